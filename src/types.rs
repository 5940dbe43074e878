use bytemuck::{Pod, Zeroable};

use crate::camera::CameraState;
use crate::scene::Scene;

/// World-space vertex uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub roughness: f32,
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3], roughness: f32) -> Self {
        Self {
            position,
            roughness,
            normal,
            color,
        }
    }

    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32,
        2 => Float32x3,
        3 => Float32x3,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-frame camera, light and fog parameters
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub _pad1: f32,
    /// rgb premultiplied by intensity
    pub ambient: [f32; 3],
    pub _pad2: f32,
    pub light_color: [f32; 3],
    pub _pad3: f32,
    /// Direction from surface towards the light
    pub light_direction: [f32; 3],
    pub _pad4: f32,
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub _pad5: [f32; 3],
}

impl SceneUniform {
    /// Snapshot of the camera and the scene's current lights and fog
    pub fn new(scene: &Scene, camera: &CameraState) -> Self {
        let ambient = *scene.ambient_light().get();
        let moon = *scene.directional_light().get();
        let fog = scene.fog();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: camera.position.to_array(),
            _pad1: 0.0,
            ambient: ambient.color.scaled(ambient.intensity).to_array(),
            _pad2: 0.0,
            light_color: moon.color.scaled(moon.intensity).to_array(),
            _pad3: 0.0,
            light_direction: moon.direction().to_array(),
            _pad4: 0.0,
            fog_color: fog.color.to_array(),
            fog_near: fog.near,
            fog_far: fog.far,
            _pad5: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::GardenBuilder;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
    }

    #[test]
    fn test_vertex_attribute_offsets() {
        let offsets: Vec<u64> = Vertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16, 28]);
    }

    #[test]
    fn test_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 160);
    }

    #[test]
    fn test_uniform_tracks_light_changes() {
        let scene = GardenBuilder::new().seed(5).build().unwrap();
        let camera = CameraState::default();

        let before = SceneUniform::new(&scene, &camera);
        assert_eq!(before.ambient, [0.5, 0.5, 0.5]);
        assert_eq!(before.fog_near, 10.0);
        assert_eq!(before.fog_far, 40.0);

        scene.ambient_light().set_intensity(0.25);
        let after = SceneUniform::new(&scene, &camera);
        assert_eq!(after.ambient, [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_uniform_light_direction_is_normalized() {
        let scene = GardenBuilder::new().seed(5).build().unwrap();
        let uniform = SceneUniform::new(&scene, &CameraState::default());
        let d = glam::Vec3::from_array(uniform.light_direction);
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
}
