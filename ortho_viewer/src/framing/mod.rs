//! Auto-framing
//!
//! Computes the orthographic frustum and camera pose that show a loaded
//! model with a fixed margin, and re-fits the frustum when the viewport
//! aspect ratio changes.

mod auto_framer;

pub use auto_framer::{AutoFramer, Framing};
