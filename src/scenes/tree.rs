use glam::Vec3;
use rand::Rng;

use super::common::{color, random_uniform, BARK_COLOR, FOLIAGE_COLOR};
use crate::error::{ConstructionError, SceneResult};
use crate::material::{MaterialHandle, MaterialSpec};
use crate::primitives::mesh_node;
use crate::scene::{SceneNode, Transform};
use crate::shape::ShapeDescriptor;

pub const DEFAULT_LEAF_COUNT: i32 = 35;

/// Trunk, canopy base and a cloud of randomly sized and placed leaf boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// Negative counts are rejected, not clamped
    pub leaf_count: i32,
    pub trunk_size: Vec3,
    pub canopy_size: Vec3,
    pub canopy_height: f32,
    /// Each leaf dimension is drawn from this closed range
    pub leaf_size: (f32, f32),
    /// Leaf centre height range
    pub leaf_height: (f32, f32),
    /// Leaf centre x and z are drawn from [-spread, spread]
    pub leaf_spread: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            leaf_count: DEFAULT_LEAF_COUNT,
            trunk_size: Vec3::new(1.0, 6.0, 1.0),
            canopy_size: Vec3::new(5.0, 1.5, 5.0),
            canopy_height: 6.5,
            leaf_size: (2.0, 3.0),
            leaf_height: (7.0, 10.0),
            leaf_spread: 4.0,
        }
    }
}

impl TreeParams {
    pub fn with_leaf_count(mut self, leaf_count: i32) -> Self {
        self.leaf_count = leaf_count;
        self
    }

    /// Check the leaf sampling ranges before any random draw.
    fn validate_leaf_ranges(&self) -> SceneResult<()> {
        let (size_lo, size_hi) = self.leaf_size;
        let (height_lo, height_hi) = self.leaf_height;
        check_range("size", size_lo, size_hi)?;
        check_range("height", height_lo, height_hi)?;
        check_range("spread", -self.leaf_spread, self.leaf_spread)
    }
}

/// A closed sampling range needs finite ends in order and a finite width.
fn check_range(field: &'static str, low: f32, high: f32) -> SceneResult<()> {
    if low.is_finite() && high.is_finite() && low <= high && (high - low).is_finite() {
        Ok(())
    } else {
        Err(ConstructionError::InvalidLeafRange { field, low, high })
    }
}

/// Build the tree group at `position`, drawing every leaf from `rng`.
///
/// Children are ordered trunk, canopy base, then the leaves. The canopy and
/// all leaves share one foliage material.
pub fn build_tree<R: Rng + ?Sized>(
    params: &TreeParams,
    position: Vec3,
    rng: &mut R,
) -> SceneResult<SceneNode> {
    let leaf_count = usize::try_from(params.leaf_count)
        .map_err(|_| ConstructionError::NegativeLeafCount(params.leaf_count))?;
    params.validate_leaf_ranges()?;

    let bark = MaterialHandle::new(MaterialSpec::matte(color(BARK_COLOR)?));
    let foliage = MaterialHandle::new(MaterialSpec::matte(color(FOLIAGE_COLOR)?));

    let trunk = params.trunk_size;
    let canopy = params.canopy_size;
    let mut children = Vec::with_capacity(leaf_count + 2);
    children.push(mesh_node(
        "trunk",
        ShapeDescriptor::cuboid(trunk.x, trunk.y, trunk.z),
        &bark,
        Transform::at(Vec3::new(0.0, trunk.y * 0.5, 0.0)),
    )?);
    children.push(mesh_node(
        "canopy_base",
        ShapeDescriptor::cuboid(canopy.x, canopy.y, canopy.z),
        &foliage,
        Transform::at(Vec3::new(0.0, params.canopy_height, 0.0)),
    )?);

    let (size_lo, size_hi) = params.leaf_size;
    let (height_lo, height_hi) = params.leaf_height;
    let spread = params.leaf_spread;
    for i in 0..leaf_count {
        let shape = ShapeDescriptor::cuboid(
            random_uniform(rng, size_lo, size_hi),
            random_uniform(rng, size_lo, size_hi),
            random_uniform(rng, size_lo, size_hi),
        );
        let offset = Vec3::new(
            random_uniform(rng, -spread, spread),
            random_uniform(rng, height_lo, height_hi),
            random_uniform(rng, -spread, spread),
        );
        children.push(mesh_node(format!("leaf_{i}"), shape, &foliage, Transform::at(offset))?);
    }

    log::debug!("tree built with {} leaves", leaf_count);
    Ok(SceneNode::group("tree", children).with_transform(Transform::at(position)))
}
