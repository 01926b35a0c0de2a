use std::borrow::Cow;

use crate::graphics::gpu::GpuContext;

#[derive(Clone, Debug)]
pub struct GpuShader {
    shader: wgpu::ShaderModule,
}

impl GpuShader {
    /// Vertex stage entry point every shader must provide.
    pub const VERTEX_ENTRY_POINT: &'static str = "vs_main";
    /// Fragment stage entry point every shader must provide.
    pub const FRAGMENT_ENTRY_POINT: &'static str = "fs_main";

    /// Compile WGSL source loaded at runtime.
    pub fn from_wgsl(gpu: &GpuContext, label: &str, source: &str) -> Self {
        let shader = gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
            });
        Self { shader }
    }

    /// Get the actual shader.
    pub fn handle(&self) -> &wgpu::ShaderModule {
        &self.shader
    }
}
