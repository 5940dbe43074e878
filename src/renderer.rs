use std::sync::Arc;

use bytemuck::Zeroable;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::CameraState;
use crate::error::RenderError;
use crate::frame::{FrameInfo, SceneRenderer};
use crate::scene::Scene;
use crate::types::{SceneUniform, Vertex};
use crate::viewport::RenderSurface;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Smoothing applied to the panel's FPS readout
const FPS_SMOOTHING: f32 = 0.9;

type Result<T> = std::result::Result<T, RenderError>;

/// Forward renderer for a flattened [`Scene`] with an egui control panel.
pub struct Renderer {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    show_panel: bool,
    /// Logical size last requested through [`RenderSurface`]
    logical_size: (u32, u32),
    pixel_ratio: f32,
    fps: f32,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, show_panel: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &surface_config);
        log::info!(
            "renderer on {} ({:?}), surface format {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            surface_config.format
        );

        let depth_view = Self::create_depth_view(&device, &surface_config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SceneUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let (pipeline, uniform_bind_group) =
            Self::create_render_pipeline(&device, &uniform_buffer, surface_config.format);

        let vertex_capacity = 1024;
        let vertex_buffer = Self::create_vertex_buffer(&device, vertex_capacity);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let scale = window.scale_factor() as f32;
        let logical_size = (
            (size.width as f32 / scale).round() as u32,
            (size.height as f32 / scale).round() as u32,
        );

        Ok(Self {
            window,
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            vertex_capacity,
            egui_renderer,
            egui_state,
            egui_ctx,
            show_panel,
            logical_size,
            pixel_ratio: scale,
            fps: 0.0,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await?;
        Ok(adapter)
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        let pair = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Garden Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await?;
        Ok(pair)
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        // Colours are authored in linear space and written out unconverted
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8Unorm);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Vertex Buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_render_pipeline(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        surface_format: wgpu::TextureFormat,
    ) -> (wgpu::RenderPipeline, wgpu::BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("scene_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // planes are visible from both sides
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group)
    }

    /// Let egui see the event first; true when the panel consumed it
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.show_panel && self.egui_state.on_window_event(&self.window, event).consumed
    }

    /// Current render target size in physical pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    fn reconfigure(&mut self) {
        let (width, height) = self.logical_size;
        let width = ((width as f32 * self.pixel_ratio).round() as u32).max(1);
        let height = ((height as f32 * self.pixel_ratio).round() as u32).max(1);
        if (width, height) == self.physical_size() {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, &self.surface_config);
    }

    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }

    /// Build the control panel; slider edits go straight back into the scene
    fn run_panel(&mut self, scene: &Scene, camera: &CameraState) -> egui::FullOutput {
        let mut raw_input = self.egui_state.take_egui_input(&self.window);
        match_surface_scale(&mut raw_input, self.pixel_ratio);
        let fps = self.fps;
        let show_panel = self.show_panel;

        self.egui_ctx.run(raw_input, |ctx| {
            if !show_panel {
                return;
            }
            egui::Window::new("Lights")
                .resizable(false)
                .default_pos(egui::pos2(10.0, 10.0))
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.0} FPS", fps))
                            .strong()
                            .color(egui::Color32::from_rgb(74, 158, 255)),
                    );
                    let p = camera.position;
                    ui.label(format!("camera ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
                    ui.separator();

                    for tunable in scene.tunables() {
                        let mut value = scene.tunable_value(tunable.id);
                        let slider = egui::Slider::new(&mut value, tunable.min..=tunable.max)
                            .step_by(f64::from(tunable.step))
                            .text(tunable.label);
                        if ui.add(slider).changed() {
                            scene.set_tunable(tunable.id, value);
                        }
                    }
                });
        })
    }
}

impl SceneRenderer for Renderer {
    fn render(&mut self, scene: &Scene, camera: &CameraState, frame: &FrameInfo) -> Result<()> {
        if frame.delta > 0.0 {
            let instant = 1.0 / frame.delta;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps * FPS_SMOOTHING + instant * (1.0 - FPS_SMOOTHING)
            };
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Panel first so slider edits show up in this frame
        let full_output = self.run_panel(scene, camera);

        let uniform = SceneUniform::new(scene, camera);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
        let vertices = scene.flatten();
        self.upload_vertices(&vertices);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let bg = scene.background();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(bg.r),
                            g: f64::from(bg.g),
                            b: f64::from(bg.b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..vertices.len() as u32, 0..1);
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let egui_commands = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }
}

impl RenderSurface for Renderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.logical_size = (width, height);
        self.reconfigure();
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        self.reconfigure();
    }
}

/// Lay the panel out at the surface's pixel ratio rather than the window's.
///
/// The surface may be configured below the native scale factor, so egui must
/// tessellate for that ratio or the panel comes out oversized and clipped.
fn match_surface_scale(raw_input: &mut egui::RawInput, pixel_ratio: f32) {
    raw_input
        .viewports
        .entry(raw_input.viewport_id)
        .or_default()
        .native_pixels_per_point = Some(pixel_ratio);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_at_native_scale(native: f32) -> egui::RawInput {
        let mut raw_input = egui::RawInput::default();
        raw_input.viewports.insert(
            raw_input.viewport_id,
            egui::ViewportInfo {
                native_pixels_per_point: Some(native),
                ..Default::default()
            },
        );
        raw_input
    }

    #[test]
    fn test_panel_uses_clamped_ratio() {
        let ctx = egui::Context::default();
        let mut raw_input = input_at_native_scale(3.0);

        match_surface_scale(&mut raw_input, 2.0);
        let output = ctx.run(raw_input, |_| {});

        assert_eq!(output.pixels_per_point, 2.0);
    }

    #[test]
    fn test_unclamped_ratio_left_alone() {
        let ctx = egui::Context::default();
        let mut raw_input = input_at_native_scale(1.5);

        match_surface_scale(&mut raw_input, 1.5);
        let output = ctx.run(raw_input, |_| {});

        assert_eq!(output.pixels_per_point, 1.5);
    }
}
