use std::sync::Arc;

use anyhow::Context;
use web_time::Instant;
use wgpu::{
    DeviceDescriptor, ExperimentalFeatures, Features, Instance, InstanceDescriptor, Limits,
    PowerPreference, RequestAdapterOptions, Trace,
};
use winit::{event_loop::ActiveEventLoop, keyboard::KeyCode, window::Window};

use crate::config::AppConfig;
use crate::frame_stats::FrameStats;
use crate::graphics::gpu::GpuContext;
use crate::graphics::gpu::bind_group::GpuBindGroup;
use crate::graphics::gpu::pipeline::PipelineBuilder;
use crate::graphics::gpu::surface::{GpuSurface, SurfaceErrorAction};
use crate::graphics::render::assets::AssetStore;
use crate::graphics::render::commands::MeshRenderCommand;
use crate::graphics::render::quad::{Mesh, QuadVertex};
use crate::graphics::render::renderer::{RenderError, Renderer};
use crate::resources;

/// Everything needed to draw the textured quad into the window.
pub struct State {
    pub window: Arc<Window>,
    renderer: Renderer,
    commands: Vec<MeshRenderCommand>,
    frame_stats: FrameStats,
}

impl State {
    pub async fn new(window: Arc<Window>, config: &AppConfig) -> anyhow::Result<State> {
        let size = window.inner_size();

        let instance = Instance::new(&InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no adapter compatible with the window surface")?;
        let info = adapter.get_info();
        log::info!("using {} ({:?} backend)", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("device"),
                required_features: Features::empty(),
                experimental_features: ExperimentalFeatures::disabled(),
                required_limits: Limits::default(),
                memory_hints: Default::default(),
                trace: Trace::Off,
            })
            .await
            .context("failed to create device")?;

        let surface = GpuSurface::new(
            surface,
            &adapter,
            &device,
            size.width,
            size.height,
            config.present_mode,
            config.prefer_srgb,
        )?;
        let gpu = GpuContext::new(device, queue);
        log::info!("initialized the graphics system");

        // texture
        let texture = resources::load_texture(&config.texture_file, &gpu)?;
        let texture_bind_group = GpuBindGroup::for_texture("diffuse_bind_group", &gpu, &texture);

        // mesh
        let mut assets = AssetStore::new();
        let mesh = assets.add_mesh(Mesh::quad(&gpu));

        // render pipeline
        let shader = resources::load_shader(&config.shader_file, &gpu)?;
        let pipeline = PipelineBuilder::new("quad_pipeline")
            .with_shader(&shader)
            .with_bind_group_layout(texture_bind_group.layout())
            .with_vertex::<QuadVertex>()
            .build(&gpu, surface.format())?;

        // renderer
        let mut renderer = Renderer::new(gpu, surface, config.clear_color, assets);
        let pipeline = renderer.add_pipeline(pipeline);
        let texture_bind_group = renderer.add_bind_group(texture_bind_group);
        let commands = vec![renderer.mesh_command("quad", mesh, pipeline, texture_bind_group)?];

        Ok(Self {
            window,
            renderer,
            commands,
            frame_stats: FrameStats::new(FrameStats::DEFAULT_INTERVAL, Instant::now()),
        })
    }

    pub fn update(&mut self) {
        if let Some(fps) = self.frame_stats.record_frame(Instant::now()) {
            log::debug!("{fps:.1} fps ({} frames total)", self.frame_stats.total_frames());
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Draw one frame and queue the next.
    ///
    /// Recoverable surface errors skip the frame; everything else is returned.
    pub fn render(&mut self) -> anyhow::Result<()> {
        self.window.request_redraw();

        match self.renderer.begin_frame() {
            Ok(()) => {}
            Err(RenderError::UnconfiguredSurface) => return Ok(()),
            Err(RenderError::Surface(err)) => {
                return match self.renderer.handle_surface_error(&err) {
                    SurfaceErrorAction::Fatal => Err(RenderError::Surface(err).into()),
                    action => {
                        log::warn!("skipping frame after surface error ({err}): {action:?}");
                        Ok(())
                    }
                };
            }
            Err(err) => return Err(err.into()),
        }

        self.renderer.render_frame(&self.commands)?;
        self.renderer.end_frame()?;
        Ok(())
    }

    pub fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, is_pressed: bool) {
        if (code, is_pressed) == (KeyCode::Escape, true) {
            event_loop.exit();
        }
    }
}
