use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use garden_scene::camera::CameraState;
use garden_scene::cli::Cli;
use garden_scene::config::GardenConfig;
use garden_scene::core::{OrbitControls, PointerAdapter};
use garden_scene::frame::{FrameContext, FrameLoop, FrameScheduler};
use garden_scene::renderer::Renderer;
use garden_scene::scene::Scene;
use garden_scene::viewport::{ResizeEvent, ViewportController};

/// Redraws are requested from the window's own refresh signal
struct WindowScheduler<'a>(&'a Window);

impl FrameScheduler for WindowScheduler<'_> {
    fn request_next_frame(&self) {
        self.0.request_redraw();
    }
}

struct App {
    config: GardenConfig,
    scene: Scene,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    context: FrameContext<OrbitControls>,
    pointer: PointerAdapter,
    viewport: ViewportController,
    frames: FrameLoop,
}

impl App {
    fn new(config: GardenConfig, scene: Scene) -> Self {
        let aspect = config.window_width as f32 / config.window_height.max(1) as f32;
        let camera = CameraState::new(&config.camera, aspect);
        let controls = OrbitControls::new(config.damping_factor);
        Self {
            config,
            scene,
            window: None,
            renderer: None,
            context: FrameContext::new(camera, controls),
            pointer: PointerAdapter::new(),
            viewport: ViewportController::new(),
            frames: FrameLoop::new(),
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };
        let scale = window.scale_factor();
        let logical = size.to_logical::<u32>(scale);
        let event = ResizeEvent::new(logical.width, logical.height, scale as f32);
        self.viewport
            .handle_resize(event, &mut self.context.camera, renderer);
    }

    fn redraw(&mut self) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };

        let height = self
            .viewport
            .current()
            .map_or(self.config.window_height, |v| v.height);
        self.pointer
            .apply(&mut self.context.controls, height as f32);

        let scheduler = WindowScheduler(window);
        if let Err(e) = self
            .frames
            .tick(&mut self.context, &self.scene, renderer, &scheduler)
        {
            log::error!("render error: {}", e);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Garden")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone(), self.config.show_panel)) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.window = Some(window.clone());
        self.renderer = Some(renderer);
        self.resize(size);
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        let captured_by_ui = self
            .renderer
            .as_mut()
            .is_some_and(|renderer| renderer.handle_event(&event));

        // Pointer input still reaches the adapter so a drag that ends over the
        // panel is released
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        if self.pointer.process_event(&event, scale, captured_by_ui) || captured_by_ui {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = GardenConfig::resolve(&cli)?;
    let scene = config
        .garden_builder()
        .build()
        .context("building garden scene")?;

    let event_loop = EventLoop::new().context("creating event loop")?;
    let mut app = App::new(config, scene);

    log::info!("Garden - drag to orbit, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app).context("running event loop")?;

    Ok(())
}
