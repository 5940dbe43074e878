use std::f32::consts::FRAC_PI_4;

use glam::Vec3;

use crate::error::SceneResult;
use crate::material::{MaterialHandle, MaterialSpec};
use crate::math::Color;
use crate::primitives::mesh_node;
use crate::scene::{SceneNode, Transform};
use crate::shape::ShapeDescriptor;

/// Two cylindrical legs under a box seat. No randomness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchParams {
    pub leg_radius: f32,
    pub leg_height: f32,
    pub leg_segments: u32,
    /// Distance of each leg from the bench centre along X
    pub half_span: f32,
    pub seat_size: Vec3,
    pub seat_height: f32,
    /// Fixed orientation about +Y
    pub yaw: f32,
    pub material: MaterialSpec,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self {
            leg_radius: 1.0,
            leg_height: 2.0,
            leg_segments: 10,
            half_span: 2.0,
            seat_size: Vec3::new(4.0, 1.0, 2.0),
            seat_height: 1.5,
            yaw: FRAC_PI_4,
            material: MaterialSpec::matte(Color::WHITE),
        }
    }
}

/// Bench group placed at `position`; all three parts share one material.
pub fn build_bench(params: &BenchParams, position: Vec3) -> SceneResult<SceneNode> {
    let material = MaterialHandle::new(params.material);
    let leg = ShapeDescriptor::cylinder(
        params.leg_radius,
        params.leg_radius,
        params.leg_height,
        params.leg_segments,
    );
    let leg_y = params.leg_height * 0.5;
    let seat = params.seat_size;

    let children = vec![
        mesh_node(
            "left_leg",
            leg,
            &material,
            Transform::at(Vec3::new(params.half_span, leg_y, 0.0)),
        )?,
        mesh_node(
            "right_leg",
            leg,
            &material,
            Transform::at(Vec3::new(-params.half_span, leg_y, 0.0)),
        )?,
        mesh_node(
            "seat",
            ShapeDescriptor::cuboid(seat.x, seat.y, seat.z),
            &material,
            Transform::at(Vec3::new(0.0, params.seat_height, 0.0)),
        )?,
    ];

    Ok(SceneNode::group("bench", children)
        .with_transform(Transform::at(position).rotated_y(params.yaw)))
}
