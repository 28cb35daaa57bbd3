/// Renderer trait - draws a scene through an orthographic camera

use crate::camera::{OrthographicCamera, ViewportSize};
use crate::config::RendererConfig;
use crate::error::Result;
use crate::scene::Scene;

/// Rendering collaborator driven by the scene manager.
///
/// Implementations own their surface; the manager only reports size
/// changes and asks for frames.
pub trait Renderer: Send {
    /// Settings the renderer was created with
    fn config(&self) -> &RendererConfig;

    /// Resize the drawing surface
    fn set_size(&mut self, viewport: ViewportSize);

    /// Current drawing surface size
    fn size(&self) -> ViewportSize;

    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &OrthographicCamera) -> Result<()>;
}
