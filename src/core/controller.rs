use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::CameraState;

/// Per-frame camera update contract of an orbit-style input scheme.
pub trait OrbitInput {
    /// Move the camera one frame closer to the latest user target.
    /// Returns true if the camera changed.
    fn update(&mut self, camera: &mut CameraState) -> bool;
}

pub const DEFAULT_DAMPING_FACTOR: f32 = 0.05;
const POLE_EPSILON: f32 = 1e-6;
const MOVE_EPSILON: f32 = 1e-4;

/// Orbit around the camera target with damped rotation.
///
/// Rotation requests accumulate in a pending delta. Each update applies
/// `damping_factor` of it and keeps the remaining `1 - damping_factor` for
/// later frames, so the camera glides to a stop after input ends.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pending azimuth change (radians)
    theta: f32,
    /// Pending polar change (radians)
    phi: f32,
    /// Pending distance multiplier
    scale: f32,
}

impl OrbitControls {
    pub fn new(damping_factor: f32) -> Self {
        Self {
            damping_factor: damping_factor.clamp(0.0, 1.0),
            min_distance: 0.5,
            max_distance: 80.0,
            theta: 0.0,
            phi: 0.0,
            scale: 1.0,
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.phi -= angle;
    }

    /// Move towards the target; `factor` > 1 zooms in.
    pub fn dolly_in(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale /= factor;
        }
    }

    pub fn dolly_out(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Whether rotation is still gliding.
    pub fn is_settling(&self) -> bool {
        self.theta.abs() > MOVE_EPSILON || self.phi.abs() > MOVE_EPSILON
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING_FACTOR)
    }
}

impl OrbitInput for OrbitControls {
    fn update(&mut self, camera: &mut CameraState) -> bool {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }

        let theta = offset.x.atan2(offset.z) + self.theta * self.damping_factor;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + self.phi * self.damping_factor)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = camera.target + new_offset;

        let keep = 1.0 - self.damping_factor;
        self.theta *= keep;
        self.phi *= keep;
        self.scale = 1.0;

        (new_offset - offset).length_squared() > MOVE_EPSILON * MOVE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_on_z(distance: f32) -> CameraState {
        let mut camera = CameraState::default();
        camera.position = Vec3::new(0.0, 0.0, distance);
        camera
    }

    #[test]
    fn test_idle_update_keeps_camera() {
        let mut controls = OrbitControls::default();
        let mut camera = CameraState::default();
        let before = camera.position;
        assert!(!controls.update(&mut camera));
        assert!((camera.position - before).length() < 1e-4);
    }

    #[test]
    fn test_damping_applies_fraction_per_frame() {
        let mut controls = OrbitControls::new(0.5);
        let mut camera = camera_on_z(10.0);
        controls.rotate_left(-1.0);

        assert!(controls.update(&mut camera));
        let first = camera.position.x.atan2(camera.position.z);
        assert!((first - 0.5).abs() < 1e-4);

        controls.update(&mut camera);
        let second = camera.position.x.atan2(camera.position.z);
        assert!((second - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_keeps_distance() {
        let mut controls = OrbitControls::default();
        let mut camera = CameraState::default();
        let distance = camera.position.length();
        controls.rotate_left(2.0);
        controls.rotate_up(0.3);
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        assert!((camera.position.length() - distance).abs() < 1e-3);
        assert!(!controls.is_settling());
    }

    #[test]
    fn test_polar_angle_clamped_at_pole() {
        let mut controls = OrbitControls::new(1.0);
        let mut camera = camera_on_z(10.0);
        controls.rotate_up(10.0);
        controls.update(&mut camera);
        assert!(camera.position.y <= 10.0);
        assert!(camera.position.y > 9.99);
        assert!(camera.position.is_finite());
    }

    #[test]
    fn test_dolly_clamps_distance() {
        let mut controls = OrbitControls::default();
        let mut camera = camera_on_z(10.0);
        controls.dolly_in(1000.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - controls.min_distance).abs() < 1e-4);

        controls.dolly_out(1e6);
        controls.update(&mut camera);
        assert!((camera.position.length() - controls.max_distance).abs() < 1e-2);
    }
}
