use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::common::{color, WATER_COLOR};
use crate::error::SceneResult;
use crate::material::{MaterialHandle, MaterialSpec};
use crate::math::Color;
use crate::primitives::mesh_node;
use crate::scene::{SceneNode, Transform};
use crate::shape::ShapeDescriptor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PondParams {
    pub ring_radius: f32,
    pub ring_tube_radius: f32,
    pub ring_radial_segments: u32,
    pub ring_tubular_segments: u32,
    pub water_radius: f32,
    pub water_depth: f32,
    pub water_segments: u32,
}

impl Default for PondParams {
    fn default() -> Self {
        Self {
            ring_radius: 5.0,
            ring_tube_radius: 1.0,
            ring_radial_segments: 12,
            ring_tubular_segments: 48,
            water_radius: 4.5,
            water_depth: 1.0,
            water_segments: 32,
        }
    }
}

/// Stone ring lying flat around a disc of water, both centred on the group
/// origin. The ring and the water get separate materials; the water is
/// tinted after construction.
pub fn build_pond(params: &PondParams, position: Vec3) -> SceneResult<SceneNode> {
    let ring_material = MaterialHandle::new(MaterialSpec::matte(Color::WHITE));
    let water_material = MaterialHandle::new(MaterialSpec::matte(Color::WHITE));

    let ring = mesh_node(
        "ring",
        ShapeDescriptor::torus(
            params.ring_radius,
            params.ring_tube_radius,
            params.ring_radial_segments,
            params.ring_tubular_segments,
        ),
        &ring_material,
        Transform::new().rotated_x(-FRAC_PI_2),
    )?;
    let water = mesh_node(
        "water",
        ShapeDescriptor::cylinder(
            params.water_radius,
            params.water_radius,
            params.water_depth,
            params.water_segments,
        ),
        &water_material,
        Transform::new(),
    )?;

    water_material.set_color(color(WATER_COLOR)?);

    Ok(SceneNode::group("pond", vec![ring, water]).with_transform(Transform::at(position)))
}
