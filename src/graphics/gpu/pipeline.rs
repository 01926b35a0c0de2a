use thiserror::Error;

use crate::graphics::gpu::{GpuContext, shader::GpuShader};

/// Vertex data that knows its own buffer layout.
pub trait Vertex: bytemuck::Pod {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Abstraction of the render pipeline.
#[derive(Clone, Debug)]
pub struct GpuPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl GpuPipeline {
    /// Get the actual pipeline.
    pub fn handle(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

/// Collects what a pipeline needs, then builds it with mostly default configs.
pub struct PipelineBuilder<'a> {
    label: &'a str,
    shader: Option<&'a GpuShader>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    vertex_buffer_layouts: Vec<wgpu::VertexBufferLayout<'static>>,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            shader: None,
            bind_group_layouts: Vec::new(),
            vertex_buffer_layouts: Vec::new(),
        }
    }

    /// The shader providing both `vs_main` and `fs_main`.
    pub fn with_shader(mut self, shader: &'a GpuShader) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Append a bind group layout; its index is the order it was added in.
    pub fn with_bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self
    }

    /// Append a vertex buffer slot for `V`.
    pub fn with_vertex<V: Vertex>(mut self) -> Self {
        self.vertex_buffer_layouts.push(V::desc());
        self
    }

    /// Build the pipeline, rendering into targets of `target_format`.
    pub fn build(
        self,
        gpu: &GpuContext,
        target_format: wgpu::TextureFormat,
    ) -> PipelineResult<GpuPipeline> {
        let shader = self
            .shader
            .ok_or_else(|| PipelineError::MissingShader { label: self.label.into() })?
            .handle();
        let label = self.label;
        let device = gpu.device();

        for (slot, layout) in self.vertex_buffer_layouts.iter().enumerate() {
            for attribute in layout.attributes {
                log::debug!(
                    "{label}: vertex slot {slot} location {} is {:?} at offset {}",
                    attribute.shader_location,
                    attribute.format,
                    attribute.offset
                );
            }
        }

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label}_layout")),
            bind_group_layouts: &self.bind_group_layouts,
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(GpuShader::VERTEX_ENTRY_POINT),
                buffers: &self.vertex_buffer_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(GpuShader::FRAGMENT_ENTRY_POINT),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });
        log::info!("created render pipeline {label}");

        Ok(GpuPipeline { pipeline })
    }
}

/// An error from building a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Pipeline {label} has no shader")]
    MissingShader { label: String },
}

/// A result from building a pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;
