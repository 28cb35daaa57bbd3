//! Scene manager: the viewer's explicit context object.
//!
//! Owns the scene, the camera, the orbit controls, the renderer and the
//! current framing. Nothing here is global; the host creates one manager
//! and passes it to the render loop.
//!
//! Lifecycle: `Idle` → `load_model` → `Loading` → (`Ready` | `Failed`).
//! Frames are only rendered once `Ready`, so a failed load leaves the
//! surface blank.

use glam::Vec3;
use winit::event::WindowEvent;
use crate::camera::{OrthographicCamera, ViewportSize};
use crate::config::{ModelConfig, ViewerConfig};
use crate::controls::{CameraControls, OrbitControls};
use crate::error::{Error, Result};
use crate::framing::{AutoFramer, Framing};
use crate::loader::{LoadEvent, ModelLoader};
use crate::renderer::Renderer;
use super::light::lights_from_config;
use super::scene::Scene;
use super::scene_node::{ModelNode, NodeFlags, NodeKey};

const SOURCE: &str = "viewer::SceneManager";

/// Progress of the single model the viewer shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No load requested yet
    Idle,
    /// Waiting for the loader; `percent` is `None` while the size is unknown
    Loading { percent: Option<f32> },
    /// Model is in the scene and framed
    Ready { model: NodeKey },
    /// Load failed; the scene stays blank
    Failed { message: String },
}

impl LoadState {
    /// `Ready` and `Failed` accept no further load events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Ready { .. } | LoadState::Failed { .. })
    }
}

pub struct SceneManager {
    scene: Scene,
    camera: OrthographicCamera,
    controls: OrbitControls,
    renderer: Box<dyn Renderer>,
    viewport: ViewportSize,
    framer: AutoFramer,
    framing: Option<Framing>,
    state: LoadState,
    model_config: ModelConfig,
    /// Path of the current or last load
    model_path: Option<String>,
}

impl SceneManager {
    /// Build the scene, lights, camera and controls described by `config`.
    ///
    /// The renderer's shadow switch decides whether lights get shadow maps.
    pub fn new(config: &ViewerConfig, mut renderer: Box<dyn Renderer>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::InitializationFailed(e.to_string()))?;

        let shadows = renderer.config().shadows;
        let mut scene = Scene::new();
        scene.set_background(renderer.config().clear_color);
        for light in lights_from_config(&config.lighting, shadows) {
            scene.add_light(light);
        }

        let camera = OrthographicCamera::for_viewport(
            config.viewport,
            config.camera.initial_frustum_size,
            config.camera.near,
            config.camera.far,
            Vec3::from_array(config.camera.position),
        );
        renderer.set_size(config.viewport);

        crate::viewer_info!(
            SOURCE,
            "Scene ready: {}x{} viewport, {} lights, shadows {}",
            config.viewport.width,
            config.viewport.height,
            scene.lights().len(),
            if shadows { "on" } else { "off" }
        );

        Ok(Self {
            scene,
            camera,
            controls: OrbitControls::new(config.controls),
            renderer,
            viewport: config.viewport,
            framer: AutoFramer::new(config.framing),
            framing: None,
            state: LoadState::Idle,
            model_config: config.model,
            model_path: None,
        })
    }

    // ===== ACCESSORS =====

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Input handlers queue rotate/pan/zoom here.
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Framing of the current model, kept in sync with the viewport aspect.
    pub fn framing(&self) -> Option<&Framing> {
        self.framing.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready { .. })
    }

    pub fn model_path(&self) -> Option<&str> {
        self.model_path.as_deref()
    }

    // ===== LOADING =====

    /// Start loading `path`, replacing any model already shown.
    pub fn load_model(&mut self, loader: &mut dyn ModelLoader, path: &str) {
        if let LoadState::Ready { model } = self.state {
            self.scene.remove_subtree(model);
        }
        self.framing = None;
        self.model_path = Some(path.to_string());
        self.state = LoadState::Loading { percent: None };

        crate::viewer_info!(SOURCE, "Loading model '{}'", path);
        loader.begin(path);
    }

    /// Handle every event the loader has ready. Returns how many were handled.
    pub fn pump_loader(&mut self, loader: &mut dyn ModelLoader) -> usize {
        let mut handled = 0;
        while matches!(self.state, LoadState::Loading { .. }) {
            let Some(event) = loader.poll() else {
                break;
            };
            self.handle_load_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply one load event. Only a load started by `load_model` accepts
    /// events; anything arriving while `Idle`, `Ready` or `Failed` is ignored.
    pub fn handle_load_event(&mut self, event: LoadEvent) {
        match self.state {
            LoadState::Loading { .. } => {}
            LoadState::Idle => {
                crate::viewer_warn!(SOURCE, "Ignoring {} event: no load requested", Self::describe(&event));
                return;
            }
            LoadState::Ready { .. } | LoadState::Failed { .. } => {
                crate::viewer_warn!(SOURCE, "Ignoring load event after completion: {}", Self::describe(&event));
                return;
            }
        }

        let percent = event.percent();
        match event {
            LoadEvent::Progress { loaded, .. } => {
                match percent {
                    Some(p) => crate::viewer_debug!(SOURCE, "Loading: {:.1}% ({} bytes)", p, loaded),
                    None => crate::viewer_debug!(SOURCE, "Loading: {} bytes", loaded),
                }
                self.state = LoadState::Loading { percent };
            }
            LoadEvent::Loaded { node } => self.on_model_loaded(node),
            LoadEvent::Failed { error } => {
                crate::viewer_error!(SOURCE, "Model load failed: {}", error);
                self.state = LoadState::Failed { message: error.to_string() };
            }
        }
    }

    fn describe(event: &LoadEvent) -> &'static str {
        match event {
            LoadEvent::Progress { .. } => "progress",
            LoadEvent::Loaded { .. } => "loaded",
            LoadEvent::Failed { .. } => "failed",
        }
    }

    fn on_model_loaded(&mut self, node: ModelNode) {
        let mut mesh_flags = NodeFlags::empty();
        mesh_flags.set(NodeFlags::CAST_SHADOW, self.model_config.cast_shadow);
        mesh_flags.set(NodeFlags::RECEIVE_SHADOW, self.model_config.receive_shadow);

        let name = node.name.clone();
        let key = self.scene.add_model(node, mesh_flags);

        match self.frame_model(key) {
            Ok(framing) => {
                self.framer.apply(&framing, &mut self.camera, &mut self.controls);
                self.controls.save_state(&self.camera);
                self.framing = Some(framing);
                self.state = LoadState::Ready { model: key };
                crate::viewer_info!(
                    SOURCE,
                    "Model '{}' framed: max dimension {}, frustum {}",
                    name,
                    framing.max_dimension,
                    framing.frustum_size
                );
            }
            Err(error) => {
                // The camera was not touched; drop the unframeable model
                self.scene.remove_subtree(key);
                self.state = LoadState::Failed { message: error.to_string() };
            }
        }
    }

    fn frame_model(&self, key: NodeKey) -> Result<Framing> {
        let Some(bounds) = self.scene.bounding_volume(key) else {
            crate::viewer_bail!(SOURCE, DegenerateBounds, "model has no vertices");
        };
        let Some(aspect) = self.viewport.aspect_ratio() else {
            crate::viewer_bail!(
                SOURCE,
                InvalidViewport,
                "viewport is {}x{}",
                self.viewport.width,
                self.viewport.height
            );
        };
        self.framer.frame(&bounds, aspect)
    }

    // ===== VIEWPORT =====

    /// Track a new surface size. Zero-sized surfaces (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = ViewportSize::new(width, height);
        let Some(aspect) = viewport.aspect_ratio() else {
            crate::viewer_warn!(SOURCE, "Ignoring resize to {}x{}", width, height);
            return;
        };

        self.viewport = viewport;
        self.renderer.set_size(viewport);

        match self.framing {
            Some(framing) => {
                let framing = self.framer.reframe_for_aspect(&framing, aspect);
                self.camera.set_bounds(framing.bounds);
                self.framing = Some(framing);
            }
            None => self.camera.set_aspect(aspect),
        }
        crate::viewer_debug!(SOURCE, "Resized to {}x{} (aspect {:.3})", width, height, aspect);
    }

    /// Route a host window event. Returns whether the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                true
            }
            _ => false,
        }
    }

    /// Return the camera to the pose it had right after framing.
    pub fn reset_view(&mut self) -> bool {
        self.controls.reset(&mut self.camera)
    }

    // ===== FRAME =====

    /// Advance the controls and, once a model is ready, render one frame.
    ///
    /// Returns whether a frame was rendered.
    pub fn tick(&mut self) -> Result<bool> {
        self.controls.update(&mut self.camera);
        if !self.is_ready() {
            return Ok(false);
        }
        self.renderer.render(&self.scene, &self.camera)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
