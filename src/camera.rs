use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 8.0, 15.0);

/// Perspective parameters loaded from configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            position: DEFAULT_POSITION.to_array(),
        }
    }
}

/// Perspective camera looking at `target`.
///
/// `projection` is cached; call [`CameraState::update_projection_matrix`]
/// after changing the aspect ratio, field of view or clip planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl CameraState {
    pub fn new(settings: &CameraSettings, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(settings.position),
            target: Vec3::ZERO,
            fov_y_degrees: settings.fov_degrees,
            aspect_ratio,
            near: settings.near,
            far: settings.far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        );
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(&CameraSettings::default(), 800.0 / 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = CameraState::default();
        assert_eq!(camera.position, Vec3::new(0.0, 8.0, 15.0));
        assert_eq!(camera.fov_y_degrees, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn test_projection_is_cached_until_update() {
        let mut camera = CameraState::default();
        let before = camera.projection();
        camera.aspect_ratio = 2.0;
        assert_eq!(camera.projection(), before);
        camera.update_projection_matrix();
        assert_ne!(camera.projection(), before);
        let expected = Mat4::perspective_rh(75f32.to_radians(), 2.0, 0.1, 100.0);
        assert_eq!(camera.projection(), expected);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = CameraState::default();
        let clip = camera.view_projection().project_point3(camera.target);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }

    #[test]
    fn test_forward_points_at_target() {
        let camera = CameraState::default();
        let expected = (Vec3::ZERO - Vec3::new(0.0, 8.0, 15.0)).normalize();
        assert!((camera.forward() - expected).length() < 1e-6);
    }
}
