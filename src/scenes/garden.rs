use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use super::bench::{build_bench, BenchParams};
use super::common::{color, FOG_COLOR, GROUND_COLOR};
use super::pond::{build_pond, PondParams};
use super::tree::{build_tree, TreeParams};
use crate::error::SceneResult;
use crate::material::{MaterialHandle, MaterialSpec};
use crate::math::Color;
use crate::primitives::mesh_node;
use crate::scene::{AxesMarker, Fog, Light, LightHandle, Scene, SceneNode, Transform};
use crate::shape::ShapeDescriptor;
use crate::tunables::light_tunables;

pub const BENCH_POSITION: Vec3 = Vec3::new(-5.0, 0.0, -4.0);
pub const POND_POSITION: Vec3 = Vec3::ZERO;
pub const TREE_POSITION: Vec3 = Vec3::new(7.0, 0.0, 7.0);
pub const GROUND_SIZE: f32 = 30.0;
pub const MOON_POSITION: Vec3 = Vec3::new(4.0, 5.0, -2.0);
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 40.0;

/// Names of the root's children, in order.
pub const ROOT_CHILDREN: [&str; 6] = [
    "ground",
    "bench",
    "pond",
    "tree",
    "ambient_light",
    "directional_light",
];

/// Assembles the whole garden into one [`Scene`].
///
/// `build` consumes the builder, so a builder produces at most one scene.
///
/// # Examples
///
/// ```
/// use garden_scene::scenes::GardenBuilder;
///
/// let scene = GardenBuilder::new().leaf_count(10).seed(7).build().unwrap();
/// assert_eq!(scene.root().children().len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GardenBuilder {
    bench: BenchParams,
    pond: PondParams,
    tree: TreeParams,
    seed: Option<u64>,
}

impl GardenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf_count(mut self, leaf_count: i32) -> Self {
        self.tree.leaf_count = leaf_count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn bench(mut self, params: BenchParams) -> Self {
        self.bench = params;
        self
    }

    pub fn pond(mut self, params: PondParams) -> Self {
        self.pond = params;
        self
    }

    pub fn tree(mut self, params: TreeParams) -> Self {
        self.tree = params;
        self
    }

    /// Build with the configured seed, or a fresh one that gets logged so the
    /// run can be reproduced.
    pub fn build(self) -> SceneResult<Scene> {
        let seed = self.seed.unwrap_or_else(rand::random);
        log::info!("building garden: {} leaves, seed {}", self.tree.leaf_count, seed);
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build drawing leaf placement from `rng`; the configured seed is ignored.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> SceneResult<Scene> {
        let ground_material = MaterialHandle::new(MaterialSpec::matte(color(GROUND_COLOR)?));
        let ground = mesh_node(
            "ground",
            ShapeDescriptor::plane(GROUND_SIZE, GROUND_SIZE),
            &ground_material,
            Transform::new().rotated_x(-FRAC_PI_2),
        )?;

        let bench = build_bench(&self.bench, BENCH_POSITION)?;
        let pond = build_pond(&self.pond, POND_POSITION)?;
        let tree = build_tree(&self.tree, TREE_POSITION, rng)?;

        let ambient = LightHandle::new(Light::ambient(Color::WHITE, 0.5));
        let moon = LightHandle::new(Light::directional(Color::WHITE, 0.5, MOON_POSITION));

        let root = SceneNode::group(
            "scene",
            vec![
                ground,
                bench,
                pond,
                tree,
                SceneNode::light("ambient_light", ambient.clone()),
                SceneNode::light("directional_light", moon.clone()),
            ],
        );

        let fog = Fog::new(Color::from_hex(FOG_COLOR), FOG_NEAR, FOG_FAR)?;
        let axes = AxesMarker {
            size: 5.0,
            position: Vec3::new(-6.0, 5.0, 0.0),
        };

        let scene = Scene::new(root, ambient, moon, fog, Color::BLACK, axes, light_tunables()?);
        log::info!(
            "garden built: {} nodes, {} meshes",
            scene.node_count(),
            scene.mesh_count()
        );
        Ok(scene)
    }
}
