/// Tests for SceneManager
///
/// These tests drive the manager through load events, resizes and ticks
/// with a scripted loader and the headless renderer.

use std::sync::{Arc, Mutex};
use glam::{Vec2, Vec3};
use serial_test::serial;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use crate::camera::ViewportSize;
use crate::config::{RendererConfig, ViewerConfig};
use crate::controls::CameraControls;
use crate::engine::Engine;
use crate::error::Error;
use crate::loader::{LoadEvent, MockLoader};
use crate::log::{LogEntry, LogSeverity, Logger};
use crate::renderer::{FrameLog, HeadlessRenderer};
use crate::scene::{MeshData, ModelNode, NodeFlags};
use super::*;

// ============================================================================
// Helpers
// ============================================================================

/// Box of the given size around `center`, as a one-mesh model.
fn cube_model(center: Vec3, size: f32) -> ModelNode {
    let h = size / 2.0;
    let positions = [
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(-h, h, h),
        Vec3::new(h, h, h),
    ]
    .iter()
    .map(|p| *p + center)
    .collect();
    ModelNode::new("cube")
        .with_child(ModelNode::new("cube_mesh").with_mesh(MeshData::new("cube_mesh", positions, vec![0, 1, 2])))
}

fn square_config() -> ViewerConfig {
    ViewerConfig {
        viewport: ViewportSize::new(800, 800),
        ..ViewerConfig::default()
    }
}

fn create_manager(config: &ViewerConfig) -> (SceneManager, FrameLog) {
    let renderer = HeadlessRenderer::new(config.renderer, config.viewport);
    let log = renderer.frame_log();
    let manager = SceneManager::new(config, Box::new(renderer)).unwrap();
    (manager, log)
}

fn load(manager: &mut SceneManager, loader: &mut MockLoader) {
    manager.load_model(loader, "models/cube.obj");
    manager.pump_loader(loader);
}

/// Put the manager in `Loading` with a loader that never answers, so events
/// can be fed by hand.
fn begin_manual_load(manager: &mut SceneManager) {
    let mut silent = MockLoader::new(Vec::new());
    manager.load_model(&mut silent, "models/manual.obj");
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

// ============================================================================
// Tests: Creation
// ============================================================================

#[test]
fn test_new_builds_default_rig() {
    let (manager, log) = create_manager(&ViewerConfig::default());

    assert_eq!(*manager.load_state(), LoadState::Idle);
    assert_eq!(manager.scene().lights().len(), 4);
    assert_eq!(manager.scene().lights().iter().filter(|l| l.casts_shadow()).count(), 1);
    assert_eq!(manager.scene().background(), 0xf0f0f0);
    assert_eq!(manager.renderer().size(), ViewportSize::new(1280, 720));
    assert!(approx(manager.camera().bounds().aspect_ratio(), 1280.0 / 720.0));
    assert!(manager.framing().is_none());
    assert_eq!(log.frame_count(), 0);
}

#[test]
fn test_renderer_without_shadows_disables_shadow_maps() {
    let config = ViewerConfig::default();
    let renderer = HeadlessRenderer::new(
        RendererConfig { shadows: false, ..RendererConfig::default() },
        config.viewport,
    );
    let manager = SceneManager::new(&config, Box::new(renderer)).unwrap();

    assert!(manager.scene().lights().iter().all(|l| !l.casts_shadow()));
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut config = ViewerConfig::default();
    config.framing.padding_factor = -1.0;
    let renderer = HeadlessRenderer::new(config.renderer, config.viewport);

    let result = SceneManager::new(&config, Box::new(renderer));
    assert!(matches!(result, Err(Error::InitializationFailed(_))));
}

// ============================================================================
// Tests: Loading
// ============================================================================

#[test]
fn test_successful_load_frames_model() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 1000, 3);

    manager.load_model(&mut loader, "models/cube.obj");
    assert_eq!(*manager.load_state(), LoadState::Loading { percent: None });
    assert_eq!(manager.model_path(), Some("models/cube.obj"));

    assert_eq!(manager.pump_loader(&mut loader), 4);
    assert!(manager.is_ready());

    let bounds = *manager.camera().bounds();
    assert!(approx(bounds.left, -1.2));
    assert!(approx(bounds.right, 1.2));
    assert!(approx(bounds.top, 1.2));
    assert!(approx(bounds.bottom, -1.2));
    assert!(approx(bounds.near, 0.1));
    assert!(approx(bounds.far, 20.0));
    assert_eq!(manager.camera().position(), Vec3::new(-1.0, 1.0, 3.0));
    assert_eq!(manager.camera().target(), Vec3::ZERO);
    assert_eq!(manager.controls().target(), Vec3::ZERO);
    assert!(manager.camera().frustum().contains_point(Vec3::ZERO));
}

#[test]
fn test_loaded_meshes_get_shadow_flags() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut loader);

    let mesh = manager.scene().node_by_name("cube_mesh").unwrap();
    let flags = manager.scene().node(mesh).unwrap().flags();
    assert!(flags.contains(NodeFlags::VISIBLE | NodeFlags::CAST_SHADOW | NodeFlags::RECEIVE_SHADOW));
}

#[test]
fn test_model_config_controls_shadow_flags() {
    let mut config = square_config();
    config.model.cast_shadow = false;
    let (mut manager, _log) = create_manager(&config);
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut loader);

    let mesh = manager.scene().node_by_name("cube_mesh").unwrap();
    let flags = manager.scene().node(mesh).unwrap().flags();
    assert!(!flags.contains(NodeFlags::CAST_SHADOW));
    assert!(flags.contains(NodeFlags::RECEIVE_SHADOW));
}

#[test]
fn test_progress_updates_percent() {
    let (mut manager, _log) = create_manager(&square_config());
    begin_manual_load(&mut manager);

    manager.handle_load_event(LoadEvent::Progress { loaded: 50, total: Some(200) });
    assert_eq!(*manager.load_state(), LoadState::Loading { percent: Some(25.0) });

    manager.handle_load_event(LoadEvent::Progress { loaded: 80, total: None });
    assert_eq!(*manager.load_state(), LoadState::Loading { percent: None });
}

#[test]
fn test_failed_load_leaves_scene_blank() {
    let (mut manager, log) = create_manager(&square_config());
    let camera_before = manager.camera().clone();
    let mut loader = MockLoader::failing("models/missing.obj", "no such file");

    load(&mut manager, &mut loader);

    assert!(matches!(manager.load_state(), LoadState::Failed { message } if message.contains("no such file")));
    assert_eq!(manager.scene().node_count(), 0);
    assert_eq!(manager.camera(), &camera_before);
    assert!(!manager.tick().unwrap());
    assert!(!manager.tick().unwrap());
    assert_eq!(log.frame_count(), 0);
}

#[test]
fn test_degenerate_model_is_rejected() {
    let (mut manager, log) = create_manager(&square_config());
    let camera_before = manager.camera().clone();
    let point = ModelNode::new("point").with_mesh(MeshData::new("p", vec![Vec3::ONE; 3], vec![0, 1, 2]));

    begin_manual_load(&mut manager);
    manager.handle_load_event(LoadEvent::Loaded { node: point });

    assert!(matches!(manager.load_state(), LoadState::Failed { message } if message.contains("Degenerate")));
    assert_eq!(manager.scene().node_count(), 0);
    assert_eq!(manager.camera(), &camera_before);
    assert!(manager.framing().is_none());
    assert!(!manager.tick().unwrap());
    assert_eq!(log.frame_count(), 0);
}

#[test]
fn test_model_without_meshes_is_rejected() {
    let (mut manager, _log) = create_manager(&square_config());
    begin_manual_load(&mut manager);
    manager.handle_load_event(LoadEvent::Loaded { node: ModelNode::new("empty") });
    assert!(matches!(manager.load_state(), LoadState::Failed { .. }));
}

#[test]
fn test_model_smaller_than_near_plane_is_rejected() {
    let (mut manager, log) = create_manager(&square_config());
    let camera_before = manager.camera().clone();
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 0.05), 10, 1);

    load(&mut manager, &mut loader);

    assert!(matches!(manager.load_state(), LoadState::Failed { message } if message.contains("too small")));
    assert_eq!(manager.scene().node_count(), 0);
    assert_eq!(manager.camera(), &camera_before);
    assert!(!manager.tick().unwrap());
    assert_eq!(log.frame_count(), 0);
}

#[test]
fn test_events_before_load_are_ignored() {
    let (mut manager, log) = create_manager(&square_config());

    manager.handle_load_event(LoadEvent::Progress { loaded: 5, total: Some(10) });
    manager.handle_load_event(LoadEvent::Loaded { node: cube_model(Vec3::ZERO, 2.0) });

    assert_eq!(*manager.load_state(), LoadState::Idle);
    assert_eq!(manager.scene().node_count(), 0);
    assert!(manager.framing().is_none());
    assert!(!manager.tick().unwrap());
    assert_eq!(log.frame_count(), 0);

    let mut stray = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    assert_eq!(manager.pump_loader(&mut stray), 0);
}

#[test]
fn test_events_after_terminal_are_ignored() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut loader);
    let state = manager.load_state().clone();

    manager.handle_load_event(LoadEvent::Failed { error: Error::Io("late".to_string()) });
    manager.handle_load_event(LoadEvent::Progress { loaded: 1, total: None });

    assert_eq!(*manager.load_state(), state);
    assert_eq!(manager.pump_loader(&mut loader), 0);
}

#[test]
fn test_reload_replaces_model() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut first = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut first);
    let count = manager.scene().node_count();

    let mut second = MockLoader::succeeding(cube_model(Vec3::new(5.0, 0.0, 0.0), 4.0), 10, 1);
    load(&mut manager, &mut second);

    assert!(manager.is_ready());
    assert_eq!(manager.scene().node_count(), count);
    assert_eq!(manager.scene().roots().len(), 1);
    assert_eq!(manager.controls().target(), Vec3::new(5.0, 0.0, 0.0));
    assert!(approx(manager.framing().unwrap().max_dimension, 4.0));
}

// ============================================================================
// Tests: Resize
// ============================================================================

#[test]
fn test_resize_before_load_keeps_height() {
    let (mut manager, _log) = create_manager(&square_config());
    let top = manager.camera().bounds().top;

    manager.resize(1600, 800);

    assert_eq!(manager.viewport(), ViewportSize::new(1600, 800));
    assert_eq!(manager.renderer().size(), ViewportSize::new(1600, 800));
    assert_eq!(manager.camera().bounds().top, top);
    assert!(approx(manager.camera().bounds().aspect_ratio(), 2.0));
}

#[test]
fn test_resize_after_load_changes_left_right_only() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut loader);
    let before = *manager.camera().bounds();
    let position = manager.camera().position();

    manager.resize(1600, 800);

    let after = *manager.camera().bounds();
    assert!(approx(after.left, -2.4));
    assert!(approx(after.right, 2.4));
    assert_eq!(after.top, before.top);
    assert_eq!(after.bottom, before.bottom);
    assert_eq!(after.near, before.near);
    assert_eq!(after.far, before.far);
    assert_eq!(manager.camera().position(), position);
    assert_eq!(manager.framing().unwrap().bounds, after);
}

#[test]
fn test_zero_resize_is_ignored() {
    let (mut manager, _log) = create_manager(&square_config());
    let bounds = *manager.camera().bounds();

    manager.resize(0, 600);
    manager.resize(800, 0);

    assert_eq!(manager.viewport(), ViewportSize::new(800, 800));
    assert_eq!(*manager.camera().bounds(), bounds);
}

#[test]
fn test_window_resized_event() {
    let (mut manager, _log) = create_manager(&square_config());

    assert!(manager.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(1024, 512))));
    assert_eq!(manager.viewport(), ViewportSize::new(1024, 512));

    assert!(!manager.handle_window_event(&WindowEvent::Focused(true)));
    assert_eq!(manager.viewport(), ViewportSize::new(1024, 512));
}

// ============================================================================
// Tests: Frames and controls
// ============================================================================

#[test]
fn test_tick_renders_only_when_ready() {
    let (mut manager, log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 2);

    manager.load_model(&mut loader, "models/cube.obj");
    assert!(!manager.tick().unwrap());

    manager.pump_loader(&mut loader);
    assert!(manager.tick().unwrap());
    assert!(manager.tick().unwrap());

    let record = log.snapshot();
    assert_eq!(record.frames, 2);
    assert_eq!(record.visible_meshes, 1);
    assert_eq!(record.last_uniform, Some(manager.camera().uniform()));
}

#[test]
fn test_tick_applies_queued_orbit() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut loader);
    let framed = manager.camera().position();

    manager.controls_mut().rotate(Vec2::new(0.5, 0.0));
    manager.tick().unwrap();

    assert_ne!(manager.camera().position(), framed);
    assert_eq!(manager.camera().target(), Vec3::ZERO);
    assert!(approx(manager.camera().position().length(), framed.length()));
}

#[test]
fn test_reset_view_restores_framed_pose() {
    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::succeeding(cube_model(Vec3::ZERO, 2.0), 10, 1);
    load(&mut manager, &mut loader);
    let framed = manager.camera().position();

    manager.controls_mut().rotate(Vec2::new(1.0, 0.2));
    manager.controls_mut().zoom(3.0);
    manager.tick().unwrap();
    assert!(manager.reset_view());

    assert_eq!(manager.camera().position(), framed);
    assert_eq!(manager.camera().zoom(), 1.0);
}

#[test]
fn test_reset_view_before_load_does_nothing() {
    let (mut manager, _log) = create_manager(&square_config());
    assert!(!manager.reset_view());
}

// ============================================================================
// Tests: Logging
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == "viewer::SceneManager" && entry.message.contains("missing_5e0b.obj") {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

#[test]
#[serial]
fn test_failed_load_logs_error_with_location() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::reset_logger();
    Engine::set_logger(CaptureLogger { entries: entries.clone() });

    let (mut manager, _log) = create_manager(&square_config());
    let mut loader = MockLoader::failing("models/missing_5e0b.obj", "gone");
    manager.load_model(&mut loader, "models/missing_5e0b.obj");
    manager.pump_loader(&mut loader);

    Engine::reset_logger();

    let entries = entries.lock().unwrap();
    let errors: Vec<_> = entries.iter().filter(|e| e.severity == LogSeverity::Error).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());
    assert!(entries.iter().any(|e| e.severity == LogSeverity::Info));
}
