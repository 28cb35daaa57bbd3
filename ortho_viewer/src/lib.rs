/*!
# Ortho Viewer

Core of a single-model 3D viewer: loads one model, frames it in an
orthographic camera with a fixed margin, and drives orbit controls and a
cancellable render loop.

Rendering and input devices stay behind traits; the crate ships a
headless renderer, a scripted loader and a Wavefront OBJ loader.

## Architecture

- **AutoFramer**: bounding volume + aspect ratio → frustum bounds and camera pose
- **OrthographicCamera**: frustum fields, look-at pose, matrices, culling planes
- **OrbitControls**: rotate/pan/zoom around a target with damping
- **Scene**: slot-map scene graph, lights, node flags
- **ModelLoader**: progress → loaded | failed events, polled once per frame
- **Renderer**: draws a scene through a camera
- **SceneManager**: explicit context owning all of the above
- **RenderLoop**: pumps the loader and ticks the manager until cancelled

## Example

```no_run
use ortho_viewer::viewer::{
    CancellationToken, FixedRateScheduler, HeadlessRenderer, ObjLoader,
    RenderLoop, SceneManager, ViewerConfig,
};

# fn main() -> ortho_viewer::viewer::Result<()> {
let config = ViewerConfig::default();
let renderer = HeadlessRenderer::new(config.renderer, config.viewport);
let mut manager = SceneManager::new(&config, Box::new(renderer))?;
let mut loader = ObjLoader::new();
manager.load_model(&mut loader, &config.model_path);

let token = CancellationToken::new();
let mut scheduler = FixedRateScheduler::from_config(&config.render_loop);
RenderLoop::from_config(&config.render_loop)
    .run(&mut manager, &mut loader, &mut scheduler, &token)?;
# Ok(())
# }
```
*/

// Internal modules
mod error;
mod engine;
mod render_loop;
pub mod log;
pub mod camera;
pub mod config;
pub mod controls;
pub mod framing;
pub mod loader;
pub mod renderer;
pub mod scene;

// Main viewer namespace module
pub mod viewer {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub use crate::camera::{OrthoBounds, OrthographicCamera, ViewportSize};
    pub use crate::config::ViewerConfig;
    pub use crate::controls::{CameraControls, OrbitControls};
    pub use crate::framing::{AutoFramer, Framing};
    pub use crate::loader::{LoadEvent, MockLoader, ModelLoader, ObjLoader};
    pub use crate::renderer::{HeadlessRenderer, Renderer};
    pub use crate::scene::{LoadState, Scene, SceneManager, AABB};
    pub use crate::render_loop::{
        CancellationToken, FixedRateScheduler, FrameScheduler, ImmediateScheduler,
        LoopStats, RenderLoop, StopReason,
    };

    // Full sub-modules
    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod config {
        pub use crate::config::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
