use crate::error::SceneResult;
use crate::material::MaterialHandle;
use crate::scene::{Mesh, SceneNode, Transform};
use crate::shape::ShapeDescriptor;

/// Validate `shape` and pair it with `material`.
///
/// Pure apart from the allocation; the mesh shares `material` with whoever
/// else holds the handle.
pub fn make_mesh(shape: ShapeDescriptor, material: &MaterialHandle) -> SceneResult<Mesh> {
    shape.validate()?;
    Ok(Mesh::new(shape, material.clone()))
}

/// [`make_mesh`] wrapped in a named node at `transform`.
pub fn mesh_node(
    name: impl Into<String>,
    shape: ShapeDescriptor,
    material: &MaterialHandle,
    transform: Transform,
) -> SceneResult<SceneNode> {
    Ok(SceneNode::mesh(name, make_mesh(shape, material)?).with_transform(transform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConstructionError, ShapeKind};
    use crate::material::MaterialSpec;
    use crate::math::Color;
    use glam::Vec3;

    fn material() -> MaterialHandle {
        MaterialHandle::new(MaterialSpec::matte(Color::WHITE))
    }

    #[test]
    fn test_make_mesh_echoes_every_shape() {
        let shapes = [
            ShapeDescriptor::cylinder(1.0, 1.0, 2.0, 10),
            ShapeDescriptor::cuboid(4.0, 1.0, 2.0),
            ShapeDescriptor::torus(5.0, 1.0, 12, 48),
            ShapeDescriptor::plane(20.0, 20.0),
        ];
        for shape in shapes {
            let mesh = make_mesh(shape, &material()).unwrap();
            assert_eq!(*mesh.shape(), shape);
        }
    }

    #[test]
    fn test_make_mesh_shares_material() {
        let shared = material();
        let a = make_mesh(ShapeDescriptor::cuboid(1.0, 1.0, 1.0), &shared).unwrap();
        let b = make_mesh(ShapeDescriptor::cuboid(2.0, 2.0, 2.0), &shared).unwrap();
        assert!(a.material().ptr_eq(b.material()));
    }

    #[test]
    fn test_make_mesh_rejects_degenerate_shape() {
        let err = make_mesh(ShapeDescriptor::cylinder(1.0, 1.0, -2.0, 10), &material()).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::InvalidDimension {
                shape: ShapeKind::Cylinder,
                field: "height",
                value: -2.0
            }
        );
    }

    #[test]
    fn test_mesh_node_applies_transform() {
        let node = mesh_node(
            "top",
            ShapeDescriptor::cuboid(4.0, 1.0, 2.0),
            &material(),
            Transform::at(Vec3::new(0.0, 1.5, 0.0)),
        )
        .unwrap();
        assert_eq!(node.name(), "top");
        assert_eq!(node.transform().position, Vec3::new(0.0, 1.5, 0.0));
        assert!(node.as_mesh().is_some());
    }
}
