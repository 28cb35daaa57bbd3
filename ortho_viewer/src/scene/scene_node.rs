/// Scene-graph node types.
///
/// `ModelNode` is the plain tree a loader produces. `Scene::add_model`
/// flattens it into `SceneNode`s stored in the scene's slot map.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use super::aabb::AABB;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SceneNode within a Scene.
    ///
    /// Keys remain valid even after other nodes are removed.
    pub struct NodeKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-node render flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node is drawn
        const VISIBLE        = 1 << 0;
        /// Node is drawn into shadow maps
        const CAST_SHADOW    = 1 << 1;
        /// Node samples shadow maps
        const RECEIVE_SHADOW = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::VISIBLE
    }
}

// ===== MESH DATA =====

/// Triangle mesh geometry as delivered by a loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions` (empty = non-indexed)
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { name: name.into(), positions, indices, normals: Vec::new() }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.positions.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// Local-space bounds, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.positions.iter().copied())
    }
}

// ===== MODEL TREE =====

/// Loader output: a named node with a local transform, meshes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub name: String,
    pub transform: Mat4,
    pub meshes: Vec<MeshData>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_child(mut self, child: ModelNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of meshes in this subtree.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len() + self.children.iter().map(ModelNode::mesh_count).sum::<usize>()
    }

    /// Total number of vertices in this subtree.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(MeshData::vertex_count).sum::<usize>()
            + self.children.iter().map(ModelNode::vertex_count).sum::<usize>()
    }
}

// ===== SCENE NODE =====

/// A node stored in a Scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) local_transform: Mat4,
    pub(crate) meshes: Vec<MeshData>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) flags: NodeFlags,
}

impl SceneNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_transform(&self) -> &Mat4 {
        &self.local_transform
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn has_meshes(&self) -> bool {
        !self.meshes.is_empty()
    }
}
