//! Model loading
//!
//! A `ModelLoader` is started with `begin` and then polled once per frame.
//! Each poll yields at most one `LoadEvent`: any number of `Progress`
//! events followed by exactly one terminal `Loaded` or `Failed`. After the
//! terminal event the loader yields nothing until the next `begin`.

mod load_event;
mod mock_loader;
mod obj_loader;

pub use load_event::LoadEvent;
pub use mock_loader::MockLoader;
pub use obj_loader::{ObjLoader, DEFAULT_CHUNK_SIZE};

/// Source of a single model asset.
pub trait ModelLoader {
    /// Start loading `path`, abandoning any load in progress.
    ///
    /// Failures to open the asset are reported by the next `poll`.
    fn begin(&mut self, path: &str);

    /// Advance the load and return the next event, if any.
    fn poll(&mut self) -> Option<LoadEvent>;
}
