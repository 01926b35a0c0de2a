pub const TEXTURE_BIND_GROUP_SLOT: u32 = 0;

pub const VERTEX_BUFFER_SLOT: u32 = 0;
pub const INDEX_BUFFER_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint16;
