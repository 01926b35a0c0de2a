use slotmap::{SlotMap, new_key_type};
use thiserror::Error;
use wgpu::{SurfaceTexture, TextureView};

use crate::graphics::{
    constants::{INDEX_BUFFER_FORMAT, TEXTURE_BIND_GROUP_SLOT, VERTEX_BUFFER_SLOT},
    gpu::{
        GpuContext,
        bind_group::GpuBindGroup,
        pipeline::GpuPipeline,
        surface::{GpuSurface, SurfaceErrorAction},
    },
    render::{
        assets::{AssetStore, MeshId},
        commands::{DrawCommand, MeshRenderCommand},
        quad::Mesh,
    },
};

new_key_type! {
    /// For referencing pipelines in the renderer.
    pub struct PipelineId;
    /// For referencing bind groups in the renderer.
    pub struct BindGroupId;
}

/// Data for a currently rendering frame.
struct CurrentFrameData {
    output: SurfaceTexture,
    view: TextureView,
}

/// Everything a command can reference by id.
pub struct RenderResources {
    assets: AssetStore,
    pipelines: SlotMap<PipelineId, GpuPipeline>,
    bind_groups: SlotMap<BindGroupId, GpuBindGroup>,
}

impl RenderResources {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            assets,
            pipelines: SlotMap::with_key(),
            bind_groups: SlotMap::with_key(),
        }
    }

    /// Get the referenced pipeline.
    pub fn get_pipeline(&self, id: PipelineId, command_label: &str) -> RenderResult<&GpuPipeline> {
        self.pipelines
            .get(id)
            .ok_or(RenderError::PipelineNotFound { label: command_label.into() })
    }

    /// Get the referenced bind group.
    pub fn get_bind_group(&self, id: BindGroupId, command_label: &str) -> RenderResult<&GpuBindGroup> {
        self.bind_groups
            .get(id)
            .ok_or(RenderError::BindGroupNotFound { label: command_label.into() })
    }

    /// Get the referenced mesh.
    pub fn get_mesh(&self, id: MeshId, command_label: &str) -> RenderResult<&Mesh> {
        self.assets
            .mesh(id)
            .ok_or(RenderError::MeshNotFound { label: command_label.into() })
    }

    /// Build a command drawing the whole of `mesh`.
    pub fn mesh_command(
        &self,
        name: &str,
        mesh: MeshId,
        pipeline: PipelineId,
        texture_bind_group: BindGroupId,
    ) -> RenderResult<MeshRenderCommand> {
        let num_elements = self.get_mesh(mesh, name)?.num_elements;
        Ok(MeshRenderCommand {
            name: name.into(),
            mesh,
            pipeline,
            texture_bind_group,
            draw: DrawCommand::indexed(num_elements),
        })
    }

    /// Look up everything a command references, failing on the first missing id.
    pub fn resolve(
        &self,
        command: &MeshRenderCommand,
    ) -> RenderResult<(&GpuPipeline, &GpuBindGroup, &Mesh)> {
        let pipeline = self.get_pipeline(command.pipeline, &command.name)?;
        let bind_group = self.get_bind_group(command.texture_bind_group, &command.name)?;
        let mesh = self.get_mesh(command.mesh, &command.name)?;
        Ok((pipeline, bind_group, mesh))
    }
}

/// Handles rendering for the entire program.
pub struct Renderer {
    gpu: GpuContext,
    surface: GpuSurface,
    clear_color: wgpu::Color,
    resources: RenderResources,
    current_frame: Option<CurrentFrameData>,
}

impl Renderer {
    /// Initialize the renderer.
    pub fn new(
        gpu: GpuContext,
        surface: GpuSurface,
        clear_color: wgpu::Color,
        assets: AssetStore,
    ) -> Self {
        Self {
            gpu,
            surface,
            clear_color,
            resources: RenderResources::new(assets),
            current_frame: None,
        }
    }

    /// Handle resizing of the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(self.gpu.device(), width, height);
    }

    /// Recover the surface after a failed `begin_frame`.
    pub fn handle_surface_error(&mut self, err: &wgpu::SurfaceError) -> SurfaceErrorAction {
        self.surface.handle_error(self.gpu.device(), err)
    }

    /// Add a pipeline to the renderer and get back its ID for referencing.
    pub fn add_pipeline(&mut self, pipeline: GpuPipeline) -> PipelineId {
        self.resources.pipelines.insert(pipeline)
    }

    /// Add a bind group to the renderer and get back its ID for referencing.
    pub fn add_bind_group(&mut self, group: GpuBindGroup) -> BindGroupId {
        self.resources.bind_groups.insert(group)
    }

    /// Build a command drawing the whole of `mesh`.
    pub fn mesh_command(
        &self,
        name: &str,
        mesh: MeshId,
        pipeline: PipelineId,
        texture_bind_group: BindGroupId,
    ) -> RenderResult<MeshRenderCommand> {
        self.resources
            .mesh_command(name, mesh, pipeline, texture_bind_group)
    }

    /// Begin a frame for rendering.
    pub fn begin_frame(&mut self) -> RenderResult<()> {
        if !self.surface.is_configured() {
            return Err(RenderError::UnconfiguredSurface);
        }
        let output = self.surface.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.current_frame = Some(CurrentFrameData { output, view });
        Ok(())
    }

    /// End a frame for rendering by displaying it.
    pub fn end_frame(&mut self) -> RenderResult<()> {
        if let Some(frame) = self.current_frame.take() {
            frame.output.present();
            return Ok(());
        }
        Err(RenderError::NoFrameInProgress)
    }

    /// Clear the frame and draw the given commands in one render pass.
    ///
    /// If any command fails, rendering stops there and nothing is submitted.
    pub fn render_frame(&mut self, commands: &[MeshRenderCommand]) -> RenderResult<()> {
        let frame = match &self.current_frame {
            Some(frame) => frame,
            None => return Err(RenderError::NoFrameInProgress),
        };
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for command in commands {
                self.write_mesh_command(command, &mut render_pass)?;
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Write the mesh command to the render pass.
    fn write_mesh_command(
        &self,
        command: &MeshRenderCommand,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) -> RenderResult<()> {
        let (pipeline, texture_bind_group, mesh) = self.resources.resolve(command)?;

        render_pass.set_pipeline(pipeline.handle());
        render_pass.set_bind_group(TEXTURE_BIND_GROUP_SLOT, texture_bind_group.handle(), &[]);
        render_pass.set_vertex_buffer(VERTEX_BUFFER_SLOT, mesh.vertex_buffer.data_slice());
        render_pass.set_index_buffer(mesh.index_buffer.data_slice(), INDEX_BUFFER_FORMAT);

        let DrawCommand {
            indices,
            base_vertex,
            instances,
        } = command.draw.clone();
        render_pass.draw_indexed(indices, base_vertex, instances);

        Ok(())
    }
}

/// An error from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No frame in progress (tried to render or end a frame before beginning one)")]
    NoFrameInProgress,
    #[error("Pipeline referenced by command {label} not found")]
    PipelineNotFound { label: String },
    #[error("Bind group referenced by command {label} not found")]
    BindGroupNotFound { label: String },
    #[error("Mesh referenced by command {label} not found")]
    MeshNotFound { label: String },
    #[error("The surface is not configured yet")]
    UnconfiguredSurface,
    #[error("{0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// A result from the renderer.
pub type RenderResult<T> = Result<T, RenderError>;
