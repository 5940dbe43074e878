//! Keeps the camera's aspect ratio and the render target resolution in step
//! with the host viewport.

use crate::camera::CameraState;

/// Upper bound on the device pixel ratio used for the render target.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Size change delivered by the host, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl ResizeEvent {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Applied viewport after a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Render target size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportState {
    Stable,
    Resizing,
}

/// Drawable surface whose size the controller drives.
pub trait RenderSurface {
    /// New size in logical pixels
    fn set_size(&mut self, width: u32, height: u32);

    /// Already clamped to [`MAX_PIXEL_RATIO`]
    fn set_pixel_ratio(&mut self, ratio: f32);
}

pub fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

#[derive(Debug)]
pub struct ViewportController {
    state: ViewportState,
    current: Option<Viewport>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            state: ViewportState::Stable,
            current: None,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn current(&self) -> Option<Viewport> {
        self.current
    }

    /// Aspect, projection, surface size, pixel ratio; always in that order.
    ///
    /// Zero-sized events (minimised windows) are ignored and return `None`,
    /// leaving camera and surface untouched.
    pub fn handle_resize(
        &mut self,
        event: ResizeEvent,
        camera: &mut CameraState,
        surface: &mut dyn RenderSurface,
    ) -> Option<Viewport> {
        if event.width == 0 || event.height == 0 {
            log::debug!("ignoring zero-sized viewport {}x{}", event.width, event.height);
            return None;
        }

        self.state = ViewportState::Resizing;

        let aspect = event.width as f32 / event.height as f32;
        camera.aspect_ratio = aspect;
        camera.update_projection_matrix();

        surface.set_size(event.width, event.height);
        let pixel_ratio = clamp_pixel_ratio(event.device_pixel_ratio);
        surface.set_pixel_ratio(pixel_ratio);

        let viewport = Viewport {
            width: event.width,
            height: event.height,
            pixel_ratio,
        };
        self.current = Some(viewport);
        self.state = ViewportState::Stable;

        log::info!(
            "viewport {}x{} aspect {:.3} pixel ratio {}",
            event.width,
            event.height,
            aspect,
            pixel_ratio
        );
        Some(viewport)
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}
