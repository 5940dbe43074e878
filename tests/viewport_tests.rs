use garden_scene::camera::CameraState;
use garden_scene::viewport::{RenderSurface, ResizeEvent, ViewportController, ViewportState};

#[derive(Default)]
struct FakeSurface {
    size: Option<(u32, u32)>,
    pixel_ratio: Option<f32>,
}

impl RenderSurface for FakeSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = Some(ratio);
    }
}

#[cfg(test)]
mod viewport_tests {
    use super::*;

    #[test]
    fn test_resize_800x600_to_1600x900() {
        let mut controller = ViewportController::new();
        let mut camera = CameraState::default();
        let mut surface = FakeSurface::default();

        controller.handle_resize(ResizeEvent::new(800, 600, 1.0), &mut camera, &mut surface);
        assert!((camera.aspect_ratio - 800.0 / 600.0).abs() < 1e-6);

        let projection_before = camera.projection();
        let viewport = controller
            .handle_resize(ResizeEvent::new(1600, 900, 3.0), &mut camera, &mut surface)
            .unwrap();

        assert_eq!(camera.aspect_ratio, 1600.0 / 900.0);
        assert_ne!(camera.projection(), projection_before);
        assert_eq!(surface.size, Some((1600, 900)));
        assert_eq!(surface.pixel_ratio, Some(2.0));
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(controller.state(), ViewportState::Stable);
    }

    #[test]
    fn test_low_density_ratio_passes_through() {
        let mut controller = ViewportController::new();
        let mut camera = CameraState::default();
        let mut surface = FakeSurface::default();

        controller.handle_resize(ResizeEvent::new(1024, 768, 1.25), &mut camera, &mut surface);

        assert_eq!(surface.pixel_ratio, Some(1.25));
    }

    #[test]
    fn test_projection_matches_new_aspect() {
        let mut controller = ViewportController::new();
        let mut camera = CameraState::default();
        let mut surface = FakeSurface::default();

        controller.handle_resize(ResizeEvent::new(1600, 900, 1.0), &mut camera, &mut surface);

        let expected = glam::Mat4::perspective_rh(
            camera.fov_y_degrees.to_radians(),
            1600.0 / 900.0,
            camera.near,
            camera.far,
        );
        assert_eq!(camera.projection(), expected);
    }

    #[test]
    fn test_minimised_window_keeps_last_viewport() {
        let mut controller = ViewportController::new();
        let mut camera = CameraState::default();
        let mut surface = FakeSurface::default();

        controller.handle_resize(ResizeEvent::new(800, 600, 1.0), &mut camera, &mut surface);
        let applied = controller.handle_resize(ResizeEvent::new(0, 0, 1.0), &mut camera, &mut surface);

        assert!(applied.is_none());
        assert_eq!(controller.current().unwrap().width, 800);
        assert_eq!(surface.size, Some((800, 600)));
        assert!(camera.aspect_ratio.is_finite());
    }
}
