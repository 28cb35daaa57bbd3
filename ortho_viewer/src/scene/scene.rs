/// Scene - scene-graph nodes and lights.
///
/// Nodes live in a SlotMap for O(1) insert/remove with stable keys.
/// Loaded models are flattened from `ModelNode` trees on insertion.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use glam::Mat4;
use super::aabb::AABB;
use super::light::Light;
use super::scene_node::{ModelNode, NodeFlags, NodeKey, SceneNode};

/// A scene graph plus its lights and background color.
pub struct Scene {
    /// Nodes stored in a slot map for O(1) insert/remove
    nodes: SlotMap<NodeKey, SceneNode>,
    /// Top-level nodes in insertion order
    roots: Vec<NodeKey>,
    /// First node registered under each name
    name_index: FxHashMap<String, NodeKey>,
    lights: Vec<Light>,
    /// 0xRRGGBB
    background: u32,
}

impl Scene {
    /// Create an empty scene without lights
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            name_index: FxHashMap::default(),
            lights: Vec::new(),
            background: 0x000000,
        }
    }

    // ===== LIGHTS =====

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    pub fn set_background(&mut self, color: u32) {
        self.background = color;
    }

    // ===== NODES =====

    /// Insert a loaded model tree as a new root.
    ///
    /// Every node that carries meshes gets `mesh_flags` in addition to VISIBLE.
    /// Returns the key of the model's root node.
    pub fn add_model(&mut self, model: ModelNode, mesh_flags: NodeFlags) -> NodeKey {
        let key = self.insert_tree(model, None, mesh_flags);
        self.roots.push(key);
        key
    }

    fn insert_tree(
        &mut self,
        model: ModelNode,
        parent: Option<NodeKey>,
        mesh_flags: NodeFlags,
    ) -> NodeKey {
        let ModelNode { name, transform, meshes, children } = model;
        let flags = if meshes.is_empty() {
            NodeFlags::VISIBLE
        } else {
            NodeFlags::VISIBLE | mesh_flags
        };
        let key = self.nodes.insert(SceneNode {
            name: name.clone(),
            local_transform: transform,
            meshes,
            parent,
            children: Vec::with_capacity(children.len()),
            flags,
        });
        self.name_index.entry(name).or_insert(key);

        for child in children {
            let child_key = self.insert_tree(child, Some(key), mesh_flags);
            if let Some(node) = self.nodes.get_mut(key) {
                node.children.push(child_key);
            }
        }
        key
    }

    /// Remove a node and all its descendants. Returns false if the key is invalid.
    pub fn remove_subtree(&mut self, key: NodeKey) -> bool {
        let Some(parent) = self.nodes.get(key).map(|n| n.parent) else {
            return false;
        };

        match parent {
            Some(parent_key) => {
                if let Some(p) = self.nodes.get_mut(parent_key) {
                    p.children.retain(|c| *c != key);
                }
            }
            None => self.roots.retain(|r| *r != key),
        }

        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.remove(k) {
                if self.name_index.get(&node.name) == Some(&k) {
                    self.name_index.remove(&node.name);
                }
                stack.extend(node.children);
            }
        }
        true
    }

    /// Remove every node; lights are kept.
    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.name_index.clear();
    }

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// First node inserted with this name.
    pub fn node_by_name(&self, name: &str) -> Option<NodeKey> {
        self.name_index.get(name).copied()
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Set or clear `flags` on a node and all its descendants.
    pub fn set_flags_recursive(&mut self, key: NodeKey, flags: NodeFlags, enabled: bool) -> bool {
        if !self.nodes.contains_key(key) {
            return false;
        }
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(k) {
                node.flags.set(flags, enabled);
                stack.extend(node.children.iter().copied());
            }
        }
        true
    }

    /// Depth-first, parent before children.
    pub fn traverse<F: FnMut(NodeKey, &SceneNode)>(&self, key: NodeKey, mut visit: F) {
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get(k) {
                visit(k, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Local transforms composed from the root down to `key`.
    pub fn world_transform(&self, key: NodeKey) -> Option<Mat4> {
        let mut node = self.nodes.get(key)?;
        let mut world = node.local_transform;
        while let Some(parent_key) = node.parent {
            node = self.nodes.get(parent_key)?;
            world = node.local_transform * world;
        }
        Some(world)
    }

    /// World-space AABB of every vertex in the subtree rooted at `key`.
    ///
    /// `None` if the key is invalid or the subtree has no vertices.
    pub fn bounding_volume(&self, key: NodeKey) -> Option<AABB> {
        let mut bounds: Option<AABB> = None;
        self.traverse(key, |k, node| {
            if !node.has_meshes() {
                return;
            }
            let Some(world) = self.world_transform(k) else {
                return;
            };
            let points = node
                .meshes
                .iter()
                .flat_map(|m| m.positions.iter())
                .map(|p| world.transform_point3(*p));
            if let Some(node_bounds) = AABB::from_points(points) {
                bounds = Some(match bounds {
                    Some(b) => b.union(&node_bounds),
                    None => node_bounds,
                });
            }
        });
        bounds
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
