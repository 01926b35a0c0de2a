use crate::graphics::gpu::GpuContext;
use wgpu::util::{BufferInitDescriptor, DeviceExt};

/// A GPU buffer plus the size of the data it was created with.
#[derive(Clone, Debug)]
pub struct GpuBuffer {
    buffer: wgpu::Buffer,
    size: wgpu::BufferAddress,
}

impl GpuBuffer {
    /// Create a vertex buffer.
    pub fn create_vertex(label: &str, gpu: &GpuContext, contents: &[u8]) -> Self {
        Self::create_init(label, gpu, contents, wgpu::BufferUsages::VERTEX)
    }

    /// Create an index buffer.
    pub fn create_index(label: &str, gpu: &GpuContext, contents: &[u8]) -> Self {
        Self::create_init(label, gpu, contents, wgpu::BufferUsages::INDEX)
    }

    fn create_init(
        label: &str,
        gpu: &GpuContext,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let buffer = gpu.device().create_buffer_init(&BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        });
        log::debug!("created buffer {label} ({} bytes)", contents.len());
        Self {
            buffer,
            size: contents.len() as wgpu::BufferAddress,
        }
    }

    /// A slice covering exactly the data the buffer was filled with.
    ///
    /// `create_buffer_init` may pad the allocation, so this is narrower than `slice(..)`.
    pub fn data_slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(0..self.size)
    }
}
