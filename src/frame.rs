use crate::camera::CameraState;
use crate::core::{Clock, OrbitInput};
use crate::error::RenderError;
use crate::scene::Scene;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the loop started
    pub time: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Per-frame mutable state handed explicitly to every tick.
#[derive(Debug)]
pub struct FrameContext<C: OrbitInput> {
    pub camera: CameraState,
    pub controls: C,
}

impl<C: OrbitInput> FrameContext<C> {
    pub fn new(camera: CameraState, controls: C) -> Self {
        Self { camera, controls }
    }
}

/// Draws a scene through a camera.
pub trait SceneRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        camera: &CameraState,
        frame: &FrameInfo,
    ) -> Result<(), RenderError>;
}

/// Arranges for the next tick at the display's refresh signal.
pub trait FrameScheduler {
    fn request_next_frame(&self);
}

/// Counts frames and reports the rate once per second.
#[derive(Debug, Default)]
struct FpsCounter {
    frames: u32,
    window_start: f32,
    last_fps: f32,
}

impl FpsCounter {
    /// Returns the new rate when a full second has elapsed
    fn record(&mut self, time: f32) -> Option<f32> {
        self.frames += 1;
        let span = time - self.window_start;
        if span < 1.0 {
            return None;
        }
        self.last_fps = self.frames as f32 / span;
        self.frames = 0;
        self.window_start = time;
        Some(self.last_fps)
    }
}

/// Drives one logical tick per display refresh.
///
/// A tick reads the elapsed time, steps the controls, renders and then
/// schedules the next tick. The next tick is requested even when rendering
/// fails so a dropped frame never stalls the loop.
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: Clock,
    frame_number: u64,
    fps: FpsCounter,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Most recent frames-per-second measurement
    pub fn fps(&self) -> f32 {
        self.fps.last_fps
    }

    pub fn tick<C, R, S>(
        &mut self,
        context: &mut FrameContext<C>,
        scene: &Scene,
        renderer: &mut R,
        scheduler: &S,
    ) -> Result<FrameInfo, RenderError>
    where
        C: OrbitInput,
        R: SceneRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let tick = self.clock.tick();
        let frame = FrameInfo::new(self.frame_number, tick.elapsed, tick.delta);
        self.frame_number += 1;

        context.controls.update(&mut context.camera);
        let rendered = renderer.render(scene, &context.camera, &frame);
        scheduler.request_next_frame();

        if let Some(fps) = self.fps.record(frame.time) {
            log::debug!("{:.1} fps (frame {})", fps, frame.number);
        }

        rendered.map(|()| frame)
    }
}
