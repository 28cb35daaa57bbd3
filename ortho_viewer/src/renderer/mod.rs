//! Renderer seam
//!
//! The scene manager hands the scene and camera to a `Renderer` once per
//! frame. GPU backends live outside this crate; `HeadlessRenderer` culls
//! against the camera frustum and records what it would have drawn.

mod headless_renderer;
mod renderer;

pub use headless_renderer::{FrameLog, FrameRecord, HeadlessRenderer};
pub use renderer::Renderer;
