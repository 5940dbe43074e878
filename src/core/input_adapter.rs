use std::f32::consts::TAU;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::controller::OrbitControls;

/// Zoom factor per wheel notch
const ZOOM_STEP: f32 = 0.95;
/// Pixels treated as one wheel notch for touchpads
const PIXELS_PER_LINE: f32 = 50.0;

/// Adapter that turns Winit pointer events into orbit deltas
///
/// Left-drag rotates, the wheel zooms. Deltas accumulate until
/// [`PointerAdapter::apply`] hands them to the controls once per frame.
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    dragging: bool,
    /// Current cursor position in logical pixels (relative to window)
    cursor: Option<(f32, f32)>,
    /// Drag movement since last apply, logical pixels
    drag_delta: (f32, f32),
    /// Wheel lines since last apply, positive = zoom in
    scroll_lines: f32,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent; returns true if it was pointer input
    ///
    /// Positions arrive in physical pixels and are stored in logical pixels
    /// using `scale_factor`. When `captured_by_ui` is set the event is over the
    /// control panel: a press there does not start a drag and the wheel is
    /// left alone, but releases and moves still reach an ongoing drag.
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        scale_factor: f64,
        captured_by_ui: bool,
    ) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.button(*state == ElementState::Pressed, captured_by_ui);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved_physical(*position, scale_factor);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.dragging = false;
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !captured_by_ui {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(p) => {
                            p.to_logical::<f32>(scale_factor).y / PIXELS_PER_LINE
                        }
                    };
                    self.scroll(lines);
                }
                true
            }
            _ => false,
        }
    }

    /// Left button change. A release always ends the drag.
    pub fn button(&mut self, pressed: bool, captured_by_ui: bool) {
        if !pressed {
            self.dragging = false;
        } else if !captured_by_ui {
            self.dragging = true;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn cursor_moved_physical(&mut self, position: PhysicalPosition<f64>, scale_factor: f64) {
        let logical = position.to_logical::<f32>(scale_factor);
        self.cursor_moved(logical.x, logical.y);
    }

    /// Cursor position in logical pixels
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        if let (true, Some((old_x, old_y))) = (self.dragging, self.cursor) {
            self.drag_delta.0 += x - old_x;
            self.drag_delta.1 += y - old_y;
        }
        self.cursor = Some((x, y));
    }

    pub fn scroll(&mut self, lines: f32) {
        self.scroll_lines += lines;
    }

    pub fn drag_delta(&self) -> (f32, f32) {
        self.drag_delta
    }

    /// Feed accumulated movement into `controls` and reset
    ///
    /// `viewport_height` is in logical pixels, like the drag delta.
    ///
    /// Dragging across the full viewport height turns the camera once around.
    pub fn apply(&mut self, controls: &mut OrbitControls, viewport_height: f32) {
        if viewport_height > 0.0 {
            let (dx, dy) = self.drag_delta;
            controls.rotate_left(TAU * dx / viewport_height);
            controls.rotate_up(TAU * dy / viewport_height);
        }
        if self.scroll_lines > 0.0 {
            controls.dolly_in(ZOOM_STEP.powf(-self.scroll_lines));
        } else if self.scroll_lines < 0.0 {
            controls.dolly_out(ZOOM_STEP.powf(self.scroll_lines));
        }
        self.drag_delta = (0.0, 0.0);
        self.scroll_lines = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;
    use crate::core::controller::OrbitInput;

    #[test]
    fn test_move_without_drag_accumulates_nothing() {
        let mut adapter = PointerAdapter::new();
        adapter.cursor_moved(10.0, 10.0);
        adapter.cursor_moved(50.0, 30.0);
        assert_eq!(adapter.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_drag_accumulates_delta() {
        let mut adapter = PointerAdapter::new();
        adapter.cursor_moved(10.0, 10.0);
        adapter.button(true, false);
        adapter.cursor_moved(20.0, 15.0);
        adapter.cursor_moved(25.0, 5.0);
        assert_eq!(adapter.drag_delta(), (15.0, -5.0));
    }

    #[test]
    fn test_apply_resets_deltas() {
        let mut adapter = PointerAdapter::new();
        let mut controls = OrbitControls::default();
        adapter.cursor_moved(0.0, 0.0);
        adapter.button(true, false);
        adapter.cursor_moved(100.0, 0.0);
        adapter.scroll(2.0);

        adapter.apply(&mut controls, 600.0);

        assert_eq!(adapter.drag_delta(), (0.0, 0.0));
        assert!(controls.is_settling());
    }

    #[test]
    fn test_scroll_in_moves_camera_closer() {
        let mut adapter = PointerAdapter::new();
        let mut controls = OrbitControls::default();
        let mut camera = CameraState::default();
        let before = camera.position.length();

        adapter.scroll(3.0);
        adapter.apply(&mut controls, 600.0);
        controls.update(&mut camera);

        assert!(camera.position.length() < before);
    }

    #[test]
    fn test_drag_right_orbits_camera() {
        let mut adapter = PointerAdapter::new();
        let mut controls = OrbitControls::new(1.0);
        let mut camera = CameraState::default();

        adapter.cursor_moved(0.0, 0.0);
        adapter.button(true, false);
        adapter.cursor_moved(60.0, 0.0);
        adapter.apply(&mut controls, 600.0);
        controls.update(&mut camera);

        // dragging right swings the camera towards -x around the target
        assert!(camera.position.x < 0.0);
    }

    #[test]
    fn test_release_over_ui_ends_drag() {
        let mut adapter = PointerAdapter::new();
        adapter.cursor_moved(0.0, 0.0);
        adapter.button(true, false);
        adapter.cursor_moved(30.0, 0.0);

        adapter.button(false, true);
        adapter.cursor_moved(90.0, 0.0);

        assert!(!adapter.is_dragging());
        assert_eq!(adapter.drag_delta(), (30.0, 0.0));
    }

    #[test]
    fn test_press_over_ui_does_not_start_drag() {
        let mut adapter = PointerAdapter::new();
        adapter.cursor_moved(0.0, 0.0);
        adapter.button(true, true);
        adapter.cursor_moved(40.0, 40.0);

        assert!(!adapter.is_dragging());
        assert_eq!(adapter.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_physical_moves_scaled_to_logical() {
        let mut adapter = PointerAdapter::new();
        adapter.cursor_moved_physical(PhysicalPosition::new(0.0, 0.0), 2.0);
        adapter.button(true, false);
        adapter.cursor_moved_physical(PhysicalPosition::new(120.0, -40.0), 2.0);

        assert_eq!(adapter.drag_delta(), (60.0, -20.0));
    }

    #[test]
    fn test_orbit_rate_independent_of_scale_factor() {
        let orbit_after = |scale: f64| {
            let mut adapter = PointerAdapter::new();
            let mut controls = OrbitControls::new(1.0);
            let mut camera = CameraState::default();
            adapter.cursor_moved_physical(PhysicalPosition::new(0.0, 0.0), scale);
            adapter.button(true, false);
            adapter.cursor_moved_physical(PhysicalPosition::new(100.0 * scale, 0.0), scale);
            adapter.apply(&mut controls, 600.0);
            controls.update(&mut camera);
            camera.position
        };

        assert!((orbit_after(1.0) - orbit_after(2.0)).length() < 1e-4);
    }
}
