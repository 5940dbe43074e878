//! Primitive shape descriptors and their tessellation.
//!
//! Conventions follow the usual web 3D primitives: every shape is centred on
//! its local origin, cylinders stand along +Y, tori and planes lie in the XY
//! plane (planes face +Z). Compound builders rotate them into place.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::{ConstructionError, SceneResult, ShapeKind};

/// Parameters of a single primitive. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDescriptor {
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Torus {
        radius: f32,
        tube_radius: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

/// Smallest segment count that still encloses a volume.
pub const MIN_SEGMENTS: u32 = 3;

/// Local-space vertex produced by tessellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

fn positive(shape: ShapeKind, field: &'static str, value: f32) -> SceneResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConstructionError::InvalidDimension { shape, field, value })
    }
}

fn segments(shape: ShapeKind, field: &'static str, value: u32) -> SceneResult<()> {
    if value >= MIN_SEGMENTS {
        Ok(())
    } else {
        Err(ConstructionError::TooFewSegments { shape, field, value })
    }
}

impl ShapeDescriptor {
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    pub fn torus(radius: f32, tube_radius: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube_radius,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Cylinder { .. } => ShapeKind::Cylinder,
            Self::Box { .. } => ShapeKind::Box,
            Self::Torus { .. } => ShapeKind::Torus,
            Self::Plane { .. } => ShapeKind::Plane,
        }
    }

    /// Reject non-positive dimensions and segment counts below [`MIN_SEGMENTS`].
    pub fn validate(&self) -> SceneResult<()> {
        let kind = self.kind();
        match *self {
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => {
                positive(kind, "radius_top", radius_top)?;
                positive(kind, "radius_bottom", radius_bottom)?;
                positive(kind, "height", height)?;
                segments(kind, "radial_segments", radial_segments)
            }
            Self::Box {
                width,
                height,
                depth,
            } => {
                positive(kind, "width", width)?;
                positive(kind, "height", height)?;
                positive(kind, "depth", depth)
            }
            Self::Torus {
                radius,
                tube_radius,
                radial_segments,
                tubular_segments,
            } => {
                positive(kind, "radius", radius)?;
                positive(kind, "tube_radius", tube_radius)?;
                segments(kind, "radial_segments", radial_segments)?;
                segments(kind, "tubular_segments", tubular_segments)
            }
            Self::Plane { width, height } => {
                positive(kind, "width", width)?;
                positive(kind, "height", height)
            }
        }
    }

    /// Size of the local bounding box.
    pub fn extents(&self) -> Vec3 {
        match *self {
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let diameter = 2.0 * radius_top.max(radius_bottom);
                Vec3::new(diameter, height, diameter)
            }
            Self::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Self::Torus {
                radius,
                tube_radius,
                ..
            } => {
                let outer = 2.0 * (radius + tube_radius);
                Vec3::new(outer, outer, 2.0 * tube_radius)
            }
            Self::Plane { width, height } => Vec3::new(width, height, 0.0),
        }
    }

    /// Flat triangle list, three vertices per triangle, counter-clockwise when
    /// seen from outside.
    pub fn tessellate(&self) -> Vec<ShapeVertex> {
        let mut out = Vec::new();
        match *self {
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => cylinder(&mut out, radius_top, radius_bottom, height, radial_segments),
            Self::Box {
                width,
                height,
                depth,
            } => cuboid(&mut out, Vec3::new(width, height, depth) * 0.5),
            Self::Torus {
                radius,
                tube_radius,
                radial_segments,
                tubular_segments,
            } => torus(&mut out, radius, tube_radius, radial_segments, tubular_segments),
            Self::Plane { width, height } => {
                quad(&mut out, Vec3::Z, Vec3::X, Vec3::Y, Vec3::new(width, height, 0.0) * 0.5)
            }
        }
        out
    }
}

/// Push one triangle, flipping its winding if it disagrees with the normals.
fn triangle(out: &mut Vec<ShapeVertex>, p: [Vec3; 3], n: [Vec3; 3]) {
    let face = (p[1] - p[0]).cross(p[2] - p[0]);
    let order = if face.dot(n[0] + n[1] + n[2]) < 0.0 {
        [0, 2, 1]
    } else {
        [0, 1, 2]
    };
    out.extend(order.iter().map(|&i| ShapeVertex {
        position: p[i],
        normal: n[i],
    }));
}

/// Axis-aligned quad on the face with outward `normal`; `u × v` must equal `normal`.
fn quad(out: &mut Vec<ShapeVertex>, normal: Vec3, u: Vec3, v: Vec3, half: Vec3) {
    let corner = |su: f32, sv: f32| (normal + u * su + v * sv) * half;
    let (a, b, c, d) = (
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, 1.0),
    );
    triangle(out, [a, b, c], [normal; 3]);
    triangle(out, [a, c, d], [normal; 3]);
}

fn cuboid(out: &mut Vec<ShapeVertex>, half: Vec3) {
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (normal, u, v) in faces {
        quad(out, normal, u, v, half);
    }
}

fn cylinder(out: &mut Vec<ShapeVertex>, radius_top: f32, radius_bottom: f32, height: f32, segments: u32) {
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;
    let ring = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        (theta.sin(), theta.cos())
    };

    for i in 0..segments {
        let (s0, c0) = ring(i);
        let (s1, c1) = ring(i + 1);
        let bottom0 = Vec3::new(radius_bottom * s0, -half, radius_bottom * c0);
        let bottom1 = Vec3::new(radius_bottom * s1, -half, radius_bottom * c1);
        let top0 = Vec3::new(radius_top * s0, half, radius_top * c0);
        let top1 = Vec3::new(radius_top * s1, half, radius_top * c1);
        let n0 = Vec3::new(s0, slope, c0).normalize();
        let n1 = Vec3::new(s1, slope, c1).normalize();

        triangle(out, [bottom0, bottom1, top1], [n0, n1, n1]);
        triangle(out, [bottom0, top1, top0], [n0, n1, n0]);

        triangle(out, [Vec3::new(0.0, half, 0.0), top0, top1], [Vec3::Y; 3]);
        triangle(out, [Vec3::new(0.0, -half, 0.0), bottom1, bottom0], [Vec3::NEG_Y; 3]);
    }
}

fn torus(out: &mut Vec<ShapeVertex>, radius: f32, tube: f32, radial: u32, tubular: u32) {
    let point = |j: u32, i: u32| {
        let u = i as f32 / tubular as f32 * TAU;
        let v = j as f32 / radial as f32 * TAU;
        let position = Vec3::new(
            (radius + tube * v.cos()) * u.cos(),
            (radius + tube * v.cos()) * u.sin(),
            tube * v.sin(),
        );
        let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
        (position, (position - center).normalize())
    };

    for j in 0..radial {
        for i in 0..tubular {
            let (pa, na) = point(j, i);
            let (pb, nb) = point(j + 1, i);
            let (pc, nc) = point(j + 1, i + 1);
            let (pd, nd) = point(j, i + 1);
            triangle(out, [pa, pb, pd], [na, nb, nd]);
            triangle(out, [pb, pc, pd], [nb, nc, nd]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward(vertices: &[ShapeVertex]) -> bool {
        vertices.chunks(3).all(|t| {
            let face = (t[1].position - t[0].position).cross(t[2].position - t[0].position);
            face.dot(t[0].normal + t[1].normal + t[2].normal) >= 0.0
        })
    }

    #[test]
    fn test_box_extents_echo_parameters() {
        let shape = ShapeDescriptor::cuboid(4.0, 1.0, 2.0);
        assert_eq!(shape.extents(), Vec3::new(4.0, 1.0, 2.0));
    }

    #[test]
    fn test_cylinder_extents_use_widest_radius() {
        let shape = ShapeDescriptor::cylinder(1.0, 2.0, 3.0, 10);
        assert_eq!(shape.extents(), Vec3::new(4.0, 3.0, 4.0));
    }

    #[test]
    fn test_torus_extents() {
        let shape = ShapeDescriptor::torus(5.0, 1.0, 12, 48);
        assert_eq!(shape.extents(), Vec3::new(12.0, 12.0, 2.0));
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let err = ShapeDescriptor::cuboid(0.0, 1.0, 1.0).validate().unwrap_err();
        assert_eq!(
            err,
            ConstructionError::InvalidDimension {
                shape: ShapeKind::Box,
                field: "width",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(ShapeDescriptor::plane(f32::NAN, 1.0).validate().is_err());
        assert!(ShapeDescriptor::plane(1.0, f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_two_segments() {
        let err = ShapeDescriptor::torus(5.0, 1.0, 12, 2).validate().unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::TooFewSegments {
                field: "tubular_segments",
                value: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_accepts_minimum_segments() {
        assert!(ShapeDescriptor::cylinder(1.0, 1.0, 1.0, 3).validate().is_ok());
    }

    #[test]
    fn test_box_tessellation() {
        let vertices = ShapeDescriptor::cuboid(2.0, 2.0, 2.0).tessellate();
        assert_eq!(vertices.len(), 36);
        assert!(outward(&vertices));
        assert!(vertices.iter().all(|v| v.position.abs() == Vec3::ONE));
    }

    #[test]
    fn test_cylinder_tessellation() {
        let vertices = ShapeDescriptor::cylinder(1.0, 1.0, 2.0, 10).tessellate();
        assert_eq!(vertices.len(), 10 * 12);
        assert!(outward(&vertices));
        assert!(vertices.iter().all(|v| v.position.y.abs() <= 1.0 + 1e-6));
    }

    #[test]
    fn test_torus_tessellation() {
        let vertices = ShapeDescriptor::torus(5.0, 1.0, 12, 48).tessellate();
        assert_eq!(vertices.len(), 12 * 48 * 6);
        assert!(outward(&vertices));
        assert!(vertices.iter().all(|v| v.position.z.abs() <= 1.0 + 1e-5));
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let vertices = ShapeDescriptor::plane(20.0, 10.0).tessellate();
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.normal == Vec3::Z && v.position.z == 0.0));
        assert!(vertices.iter().any(|v| v.position.x == 10.0 && v.position.y == 5.0));
    }
}
