//! Retained scene graph: transforms, mesh/group/light nodes and the scene root.
//!
//! The tree is assembled once and exposes no way to add or remove nodes
//! afterwards. Only attribute values reachable through shared handles
//! (materials, lights) change while the scene is rendered.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::error::{ConstructionError, SceneResult};
use crate::material::MaterialHandle;
use crate::math::{Aabb, Color};
use crate::shape::{ShapeDescriptor, ShapeVertex};
use crate::tunables::Tunable;
use crate::types::Vertex;

/// Local position, rotation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec3) -> Self {
        Self::default().with_position(position)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotate about the local X axis, after any existing rotation.
    pub fn rotated_x(mut self, angle: f32) -> Self {
        self.rotation = self.rotation * Quat::from_rotation_x(angle);
        self
    }

    /// Rotate about the local Y axis, after any existing rotation.
    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.rotation = self.rotation * Quat::from_rotation_y(angle);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A validated primitive paired with its material. Built by
/// [`crate::primitives::make_mesh`].
#[derive(Debug, Clone)]
pub struct Mesh {
    shape: ShapeDescriptor,
    material: MaterialHandle,
}

impl Mesh {
    pub(crate) fn new(shape: ShapeDescriptor, material: MaterialHandle) -> Self {
        Self { shape, material }
    }

    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    pub fn material(&self) -> &MaterialHandle {
        &self.material
    }

    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_extents(self.shape.extents())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
}

/// Light parameters. `position` only matters for directional lights, which
/// shine from it towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
            position: Vec3::ZERO,
        }
    }

    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
            position,
        }
    }

    /// Unit vector from the lit surface towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

/// Shared handle to a [`Light`]; the scene environment and the light's graph
/// node hold the same instance.
#[derive(Debug, Clone)]
pub struct LightHandle(Rc<RefCell<Light>>);

impl LightHandle {
    pub fn new(light: Light) -> Self {
        Self(Rc::new(RefCell::new(light)))
    }

    pub fn get(&self) -> Ref<'_, Light> {
        self.0.borrow()
    }

    pub fn intensity(&self) -> f32 {
        self.0.borrow().intensity
    }

    pub fn set_intensity(&self, intensity: f32) {
        self.0.borrow_mut().intensity = intensity;
    }

    pub fn position(&self) -> Vec3 {
        self.0.borrow().position
    }

    pub fn set_position(&self, position: Vec3) {
        self.0.borrow_mut().position = position;
    }

    pub fn ptr_eq(&self, other: &LightHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Mesh(Mesh),
    Group(Vec<SceneNode>),
    Light(LightHandle),
}

/// Named node owning its children exclusively.
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    transform: Transform,
    kind: NodeKind,
}

impl SceneNode {
    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: NodeKind::Mesh(mesh),
        }
    }

    pub fn group(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: NodeKind::Group(children),
        }
    }

    pub fn light(name: impl Into<String>, light: LightHandle) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: NodeKind::Light(light),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&LightHandle> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Children of a group; empty for meshes and lights.
    pub fn children(&self) -> &[SceneNode] {
        match &self.kind {
            NodeKind::Group(children) => children,
            _ => &[],
        }
    }

    pub fn child(&self, name: &str) -> Option<&SceneNode> {
        self.children().iter().find(|c| c.name == name)
    }

    /// This node plus all descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Call `f` for every mesh below this node with its world matrix.
    pub fn visit_meshes<F>(&self, parent: Mat4, f: &mut F)
    where
        F: FnMut(&SceneNode, &Mesh, Mat4),
    {
        let world = parent * self.transform.matrix();
        match &self.kind {
            NodeKind::Mesh(mesh) => f(self, mesh, world),
            NodeKind::Group(children) => {
                for child in children {
                    child.visit_meshes(world, f);
                }
            }
            NodeKind::Light(_) => {}
        }
    }

    /// World-space box around every mesh below this node.
    pub fn world_bounds(&self, parent: Mat4) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.visit_meshes(parent, &mut |_, mesh, world| {
            let b = mesh.local_bounds().transformed(world);
            bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
        });
        bounds
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn new(color: Color, near: f32, far: f32) -> SceneResult<Self> {
        if !(near.is_finite() && far.is_finite()) || near < 0.0 || near >= far {
            return Err(ConstructionError::InvalidFog { near, far });
        }
        Ok(Self { color, near, far })
    }

    /// 0 at or before `near`, 1 at or beyond `far`.
    pub fn factor(&self, distance: f32) -> f32 {
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

/// Red/green/blue axis lines used to read orientation while debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesMarker {
    pub size: f32,
    pub position: Vec3,
}

impl AxesMarker {
    const THICKNESS: f32 = 0.05;

    /// Three thin boxes along +X, +Y and +Z starting at the marker position.
    pub fn vertices(&self) -> Vec<Vertex> {
        let axes = [
            (Vec3::X, Color::new(1.0, 0.0, 0.0)),
            (Vec3::Y, Color::new(0.0, 1.0, 0.0)),
            (Vec3::Z, Color::new(0.0, 0.0, 1.0)),
        ];
        axes.iter()
            .flat_map(|&(axis, color)| {
                let extents = axis * self.size + (Vec3::ONE - axis) * Self::THICKNESS;
                let center = self.position + axis * self.size * 0.5;
                let shape = ShapeDescriptor::cuboid(extents.x, extents.y, extents.z);
                let world = Mat4::from_translation(center);
                to_world(&shape.tessellate(), world, color, 1.0)
            })
            .collect()
    }
}

fn to_world(local: &[ShapeVertex], world: Mat4, color: Color, roughness: f32) -> Vec<Vertex> {
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    local
        .iter()
        .map(|v| {
            Vertex::new(
                world.transform_point3(v.position).to_array(),
                (normal_matrix * v.normal).normalize_or_zero().to_array(),
                color.to_array(),
                roughness,
            )
        })
        .collect()
}

/// The scene root plus non-geometric environment state.
#[derive(Debug)]
pub struct Scene {
    root: SceneNode,
    ambient: LightHandle,
    directional: LightHandle,
    fog: Fog,
    background: Color,
    axes: AxesMarker,
    tunables: Vec<Tunable>,
}

impl Scene {
    pub(crate) fn new(
        root: SceneNode,
        ambient: LightHandle,
        directional: LightHandle,
        fog: Fog,
        background: Color,
        axes: AxesMarker,
        tunables: Vec<Tunable>,
    ) -> Self {
        Self {
            root,
            ambient,
            directional,
            fog,
            background,
            axes,
            tunables,
        }
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn child(&self, name: &str) -> Option<&SceneNode> {
        self.root.child(name)
    }

    pub fn ambient_light(&self) -> &LightHandle {
        &self.ambient
    }

    pub fn directional_light(&self) -> &LightHandle {
        &self.directional
    }

    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn axes(&self) -> &AxesMarker {
        &self.axes
    }

    pub fn tunables(&self) -> &[Tunable] {
        &self.tunables
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(|_, _, _| count += 1);
        count
    }

    pub fn visit_meshes<F>(&self, mut f: F)
    where
        F: FnMut(&SceneNode, &Mesh, Mat4),
    {
        self.root.visit_meshes(Mat4::IDENTITY, &mut f);
    }

    /// World bounds of a top-level child.
    pub fn world_bounds_of(&self, name: &str) -> Option<Aabb> {
        self.child(name)
            .and_then(|node| node.world_bounds(self.root.transform.matrix()))
    }

    /// Every mesh and the axes marker as world-space triangles. Colours are
    /// read from the material handles at call time.
    pub fn flatten(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        self.visit_meshes(|_, mesh, world| {
            let material = *mesh.material().spec();
            vertices.extend(to_world(
                &mesh.shape().tessellate(),
                world,
                material.color,
                material.roughness,
            ));
        });
        vertices.extend(self.axes.vertices());
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialSpec;
    use std::f32::consts::FRAC_PI_2;

    fn unit_box(name: &str, material: &MaterialHandle) -> SceneNode {
        SceneNode::mesh(
            name,
            Mesh::new(ShapeDescriptor::cuboid(1.0, 1.0, 1.0), material.clone()),
        )
    }

    #[test]
    fn test_transform_default_is_identity() {
        assert_eq!(Transform::new().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotated_y_quarter_turn() {
        let t = Transform::new().rotated_y(FRAC_PI_2);
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let material = MaterialHandle::new(MaterialSpec::default());
        let leaf = unit_box("leaf", &material).with_transform(Transform::at(Vec3::new(1.0, 0.0, 0.0)));
        let inner = SceneNode::group("inner", vec![leaf])
            .with_transform(Transform::at(Vec3::new(0.0, 2.0, 0.0)));
        let outer = SceneNode::group("outer", vec![inner])
            .with_transform(Transform::at(Vec3::new(0.0, 0.0, 3.0)));

        let mut origins = Vec::new();
        outer.visit_meshes(Mat4::IDENTITY, &mut |node, _, world| {
            origins.push((node.name().to_string(), world.transform_point3(Vec3::ZERO)));
        });

        assert_eq!(origins, vec![("leaf".to_string(), Vec3::new(1.0, 2.0, 3.0))]);
    }

    #[test]
    fn test_node_count_includes_self() {
        let material = MaterialHandle::new(MaterialSpec::default());
        let group = SceneNode::group(
            "g",
            vec![unit_box("a", &material), unit_box("b", &material)],
        );
        assert_eq!(group.node_count(), 3);
        assert_eq!(group.children().len(), 2);
        assert!(group.child("b").is_some());
        assert!(group.child("c").is_none());
    }

    #[test]
    fn test_world_bounds_of_offset_group() {
        let material = MaterialHandle::new(MaterialSpec::default());
        let group = SceneNode::group("g", vec![unit_box("a", &material)])
            .with_transform(Transform::at(Vec3::new(10.0, 0.5, 0.0)));
        let bounds = group.world_bounds(Mat4::IDENTITY).unwrap();
        assert_eq!(bounds.min, Vec3::new(9.5, 0.0, -0.5));
        assert_eq!(bounds.max, Vec3::new(10.5, 1.0, 0.5));
    }

    #[test]
    fn test_light_node_has_no_bounds() {
        let light = LightHandle::new(Light::ambient(Color::WHITE, 0.5));
        let node = SceneNode::light("ambient", light);
        assert!(node.world_bounds(Mat4::IDENTITY).is_none());
        assert!(node.as_light().is_some());
    }

    #[test]
    fn test_light_handle_shares_mutation() {
        let a = LightHandle::new(Light::directional(Color::WHITE, 0.5, Vec3::new(4.0, 5.0, -2.0)));
        let b = a.clone();
        a.set_intensity(0.9);
        a.set_position(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(b.intensity(), 0.9);
        assert_eq!(b.position(), Vec3::new(1.0, 1.0, 1.0));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_fog_rejects_inverted_range() {
        assert_eq!(
            Fog::new(Color::WHITE, 20.0, 1.0),
            Err(ConstructionError::InvalidFog { near: 20.0, far: 1.0 })
        );
        assert!(Fog::new(Color::WHITE, -1.0, 10.0).is_err());
        assert!(Fog::new(Color::WHITE, 5.0, 5.0).is_err());
    }

    #[test]
    fn test_fog_factor_is_linear_and_clamped() {
        let fog = Fog::new(Color::WHITE, 10.0, 20.0).unwrap();
        assert_eq!(fog.factor(5.0), 0.0);
        assert_eq!(fog.factor(15.0), 0.5);
        assert_eq!(fog.factor(25.0), 1.0);
    }

    #[test]
    fn test_axes_marker_vertices() {
        let axes = AxesMarker {
            size: 5.0,
            position: Vec3::new(-6.0, 5.0, 0.0),
        };
        let vertices = axes.vertices();
        assert_eq!(vertices.len(), 3 * 36);
        let max_x = vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - -1.0).abs() < 1e-5);
    }
}
