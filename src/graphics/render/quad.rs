use crate::graphics::gpu::{GpuContext, buffer::GpuBuffer, pipeline::Vertex};

/// The data for a quad vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex for QuadVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// A 1x1, origin-centred square; uv (0, 0) is the top left of the image.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-0.5, 0.5, 0.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        position: [0.5, 0.5, 0.0],
        uv: [1.0, 0.0],
    },
    QuadVertex {
        position: [0.5, -0.5, 0.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [-0.5, -0.5, 0.0],
        uv: [0.0, 1.0],
    },
];

/// Two triangles sharing the 0-2 diagonal.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// A mesh; the actual thing rendered.
pub struct Mesh {
    pub vertex_buffer: GpuBuffer,
    pub index_buffer: GpuBuffer,
    pub num_elements: u32,
}

impl Mesh {
    /// Upload the static quad.
    pub fn quad(gpu: &GpuContext) -> Self {
        let vertex_buffer =
            GpuBuffer::create_vertex("quad_vertex_buffer", gpu, bytemuck::cast_slice(&QUAD_VERTICES));
        let index_buffer =
            GpuBuffer::create_index("quad_index_buffer", gpu, bytemuck::cast_slice(&QUAD_INDICES));
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: QUAD_INDICES.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        let desc = QuadVertex::desc();
        assert_eq!(desc.array_stride, 20);
        assert_eq!(desc.step_mode, wgpu::VertexStepMode::Vertex);

        let [position, uv] = desc.attributes else {
            panic!("expected two attributes");
        };
        assert_eq!((position.shader_location, position.offset), (0, 0));
        assert_eq!(position.format, wgpu::VertexFormat::Float32x3);
        assert_eq!((uv.shader_location, uv.offset), (1, 12));
        assert_eq!(uv.format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn attributes_fill_the_stride() {
        let desc = QuadVertex::desc();
        let covered: u64 = desc.attributes.iter().map(|a| a.format.size()).sum();
        assert_eq!(covered, desc.array_stride);
    }

    #[test]
    fn indices_stay_in_bounds() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
        assert_eq!(bytemuck::cast_slice::<u16, u8>(&QUAD_INDICES).len(), 12);
    }

    #[test]
    fn triangles_share_the_diagonal() {
        let (first, second) = QUAD_INDICES.split_at(3);
        assert!(first.contains(&0) && first.contains(&2));
        assert!(second.contains(&0) && second.contains(&2));
    }

    #[test]
    fn uv_follows_image_orientation() {
        // higher y on screen samples lower rows of the image
        let top_left = QUAD_VERTICES[0];
        let bottom_right = QUAD_VERTICES[2];
        assert_eq!(top_left.position[..2], [-0.5, 0.5]);
        assert_eq!(top_left.uv, [0.0, 0.0]);
        assert_eq!(bottom_right.position[..2], [0.5, -0.5]);
        assert_eq!(bottom_right.uv, [1.0, 1.0]);
    }

    #[test]
    fn quad_is_flat_and_unit_sized() {
        for v in QUAD_VERTICES {
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[1].abs(), 0.5);
        }
    }
}
