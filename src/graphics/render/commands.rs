use std::ops::Range;

use crate::graphics::render::{
    assets::MeshId,
    renderer::{BindGroupId, PipelineId},
};

/// A command describing how to render a mesh.
#[derive(Clone, Debug)]
pub struct MeshRenderCommand {
    pub name: String,
    pub mesh: MeshId,
    pub pipeline: PipelineId,
    pub texture_bind_group: BindGroupId,
    pub draw: DrawCommand,
}

/// The indexed draw a command issues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub indices: Range<u32>,
    pub base_vertex: i32,
    pub instances: Range<u32>,
}

impl DrawCommand {
    /// Draw the first `count` indices once.
    pub fn indexed(count: u32) -> Self {
        Self {
            indices: 0..count,
            base_vertex: 0,
            instances: 0..1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_draws_a_single_instance() {
        let draw = DrawCommand::indexed(6);
        assert_eq!(draw.indices, 0..6);
        assert_eq!(draw.base_vertex, 0);
        assert_eq!(draw.instances, 0..1);
    }
}
