use slotmap::{SlotMap, new_key_type};

use crate::graphics::render::quad::Mesh;

new_key_type! {
    pub struct MeshId;
}

/// Owns the meshes the renderer draws.
///
/// Textures aren't kept here; their bind groups hold them.
#[derive(Default)]
pub struct AssetStore {
    meshes: SlotMap<MeshId, Mesh>,
}

impl AssetStore {
    /// Initialize the asset store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh to the store.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.insert(mesh)
    }

    /// Get a mesh.
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }
}
