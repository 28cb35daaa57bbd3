/// Headless renderer (no GPU required)
///
/// Performs the CPU side of a frame: builds the camera uniform, culls
/// mesh nodes against the view frustum, and records the result in a
/// shared `FrameLog` that stays readable after the renderer has been
/// boxed and handed to the scene manager.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::camera::{CameraUniform, OrthographicCamera, ViewportSize};
use crate::config::RendererConfig;
use crate::error::Result;
use crate::scene::{NodeFlags, Scene};
use super::Renderer;

const SOURCE: &str = "viewer::HeadlessRenderer";

// ============================================================================
// Frame log
// ============================================================================

/// What the headless renderer has drawn so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRecord {
    /// Frames rendered since creation
    pub frames: u64,
    /// Camera block of the most recent frame
    pub last_uniform: Option<CameraUniform>,
    /// Mesh nodes that passed culling in the most recent frame
    pub visible_meshes: usize,
    /// Triangles of those meshes
    pub triangles: usize,
    /// Lights in the most recent frame
    pub lights: usize,
    /// Surface size at the most recent frame
    pub size: ViewportSize,
}

/// Cloneable handle to a headless renderer's `FrameRecord`.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    inner: Arc<Mutex<FrameRecord>>,
}

impl FrameLog {
    fn lock(&self) -> MutexGuard<'_, FrameRecord> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current record
    pub fn snapshot(&self) -> FrameRecord {
        self.lock().clone()
    }

    pub fn frame_count(&self) -> u64 {
        self.lock().frames
    }

    pub fn last_uniform(&self) -> Option<CameraUniform> {
        self.lock().last_uniform
    }
}

// ============================================================================
// Headless renderer
// ============================================================================

#[derive(Debug)]
pub struct HeadlessRenderer {
    config: RendererConfig,
    size: ViewportSize,
    log: FrameLog,
}

impl HeadlessRenderer {
    pub fn new(config: RendererConfig, size: ViewportSize) -> Self {
        crate::viewer_debug!(
            SOURCE,
            "Created headless renderer {}x{} (antialias: {}, shadows: {} {:?})",
            size.width,
            size.height,
            config.antialias,
            config.shadows,
            config.shadow_map_kind
        );
        Self { config, size, log: FrameLog::default() }
    }

    /// Handle for inspecting frames after the renderer is moved
    pub fn frame_log(&self) -> FrameLog {
        self.log.clone()
    }

    /// Surface size in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.config.pixel_ratio).round() as u32;
        (scale(self.size.width), scale(self.size.height))
    }
}

impl Renderer for HeadlessRenderer {
    fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn set_size(&mut self, viewport: ViewportSize) {
        self.size = viewport;
    }

    fn size(&self) -> ViewportSize {
        self.size
    }

    fn render(&mut self, scene: &Scene, camera: &OrthographicCamera) -> Result<()> {
        if self.size.is_empty() {
            crate::viewer_bail!(
                SOURCE,
                BackendError,
                "cannot render to a {}x{} surface",
                self.size.width,
                self.size.height
            );
        }

        let frustum = camera.frustum();
        let mut visible_meshes = 0;
        let mut triangles = 0;

        for &root in scene.roots() {
            scene.traverse(root, |key, node| {
                if !node.has_meshes() || !node.flags().contains(NodeFlags::VISIBLE) {
                    return;
                }
                let Some(world) = scene.world_transform(key) else {
                    return;
                };
                let in_view = node
                    .meshes()
                    .iter()
                    .filter_map(|m| m.bounds())
                    .any(|b| frustum.intersects_aabb(&b.transformed(&world)));
                if in_view {
                    visible_meshes += 1;
                    triangles += node.meshes().iter().map(|m| m.triangle_count()).sum::<usize>();
                }
            });
        }

        let mut record = self.log.lock();
        record.frames += 1;
        record.last_uniform = Some(camera.uniform());
        record.visible_meshes = visible_meshes;
        record.triangles = triangles;
        record.lights = scene.lights().len();
        record.size = self.size;

        crate::viewer_trace!(
            SOURCE,
            "Frame {}: {} meshes, {} triangles",
            record.frames,
            visible_meshes,
            triangles
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "headless_renderer_tests.rs"]
mod tests;
