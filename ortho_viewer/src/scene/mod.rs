//! Scene module
//!
//! Scene graph, lights, bounding volumes, and the `SceneManager` context
//! that ties the scene to the camera, controls and renderer.

mod aabb;
mod light;
mod scene;
mod scene_manager;
mod scene_node;

pub use aabb::AABB;
pub use light::{
    color_from_hex, lights_from_config,
    AmbientLight, DirectionalLight, HemisphereLight, Light, ShadowSettings,
};
pub use scene::Scene;
pub use scene_manager::{LoadState, SceneManager};
pub use scene_node::{MeshData, ModelNode, NodeFlags, NodeKey, SceneNode};
