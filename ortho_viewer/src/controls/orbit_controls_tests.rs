use std::f32::consts::FRAC_PI_2;
use glam::{Vec2, Vec3};
use crate::camera::{OrthoBounds, OrthographicCamera};
use crate::config::OrbitConfig;
use crate::controls::CameraControls;
use super::*;

fn create_test_camera() -> OrthographicCamera {
    OrthographicCamera::new(
        OrthoBounds::symmetric(10.0, 1.0, 0.1, 100.0),
        Vec3::new(0.0, 0.0, 10.0),
    )
}

fn undamped() -> OrbitControls {
    OrbitControls::new(OrbitConfig {
        enable_damping: false,
        rotate_speed: 1.0,
        pan_speed: 1.0,
        ..OrbitConfig::default()
    })
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}

// ============================================================================
// Idle updates
// ============================================================================

#[test]
fn test_update_without_input_is_noop() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::default();

    assert!(!controls.update(&mut camera));
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0));
    assert!(!controls.is_moving());
}

#[test]
fn test_set_target_reorients_camera_once() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::default();

    controls.set_target(Vec3::new(1.0, 2.0, 3.0));
    assert!(controls.update(&mut camera));
    assert_eq!(camera.target(), Vec3::new(1.0, 2.0, 3.0));
    assert!(!controls.update(&mut camera));
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_rotate_quarter_turn_without_damping() {
    let mut camera = create_test_camera();
    let mut controls = undamped();

    controls.rotate(Vec2::new(-FRAC_PI_2, 0.0));
    assert!(controls.update(&mut camera));

    assert!(approx(camera.position(), Vec3::new(10.0, 0.0, 0.0)), "got {:?}", camera.position());
    assert_eq!(camera.target(), Vec3::ZERO);
    assert!(!controls.is_moving());
}

#[test]
fn test_rotate_preserves_radius() {
    let mut camera = create_test_camera();
    let mut controls = undamped();

    controls.rotate(Vec2::new(0.7, 0.3));
    controls.update(&mut camera);

    assert!((camera.position().length() - 10.0).abs() < 1e-3);
}

#[test]
fn test_polar_angle_is_clamped() {
    let mut camera = create_test_camera();
    let mut controls = undamped();

    controls.rotate(Vec2::new(0.0, 100.0));
    controls.update(&mut camera);

    let p = camera.position();
    assert!(p.is_finite());
    assert!(p.y < 10.0, "camera must not reach the pole");
    assert!(p.y > 9.9);
}

#[test]
fn test_damping_eases_out_and_converges() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(OrbitConfig {
        enable_damping: true,
        damping_factor: 0.25,
        rotate_speed: 1.0,
        ..OrbitConfig::default()
    });

    controls.rotate(Vec2::new(-FRAC_PI_2, 0.0));
    controls.update(&mut camera);

    // First step applies a quarter of the requested rotation
    let first_angle = camera.position().x.atan2(camera.position().z);
    assert!((first_angle - FRAC_PI_2 * 0.25).abs() < 1e-3);
    assert!(controls.is_moving());

    for _ in 0..200 {
        controls.update(&mut camera);
    }

    assert!(!controls.is_moving());
    assert!(approx(camera.position(), Vec3::new(10.0, 0.0, 0.0)), "got {:?}", camera.position());
}

#[test]
fn test_zero_damping_factor_still_settles() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(OrbitConfig {
        enable_damping: true,
        damping_factor: 0.0,
        rotate_speed: 1.0,
        ..OrbitConfig::default()
    });

    controls.rotate(Vec2::new(1.0, 0.0));
    assert!(controls.update(&mut camera));

    assert!(!controls.is_moving());
    assert!(!controls.update(&mut camera));
}

// ============================================================================
// Pan
// ============================================================================

#[test]
fn test_pan_moves_target_and_camera_together() {
    let mut camera = create_test_camera();
    let mut controls = undamped();

    // 10% of a 10-unit visible height
    controls.pan(Vec2::new(0.1, 0.0));
    controls.update(&mut camera);

    assert!(approx(controls.target(), Vec3::new(-1.0, 0.0, 0.0)));
    assert!(approx(camera.position(), Vec3::new(-1.0, 0.0, 10.0)));
    assert!(approx(camera.target(), controls.target()));
}

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn test_zoom_in_and_clamp() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(OrbitConfig {
        zoom_speed: 0.1,
        max_zoom: 2.0,
        ..OrbitConfig::default()
    });

    controls.zoom(1.0);
    assert!(controls.update(&mut camera));
    assert!((camera.zoom() - 1.1).abs() < 1e-5);

    controls.zoom(100.0);
    controls.update(&mut camera);
    assert_eq!(camera.zoom(), 2.0);
}

#[test]
fn test_disabled_controls_ignore_input() {
    let mut camera = create_test_camera();
    let mut controls = undamped();
    controls.set_enabled(false);

    controls.rotate(Vec2::new(1.0, 1.0));
    controls.pan(Vec2::new(1.0, 1.0));
    controls.zoom(3.0);

    assert!(!controls.update(&mut camera));
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0));
    assert_eq!(camera.zoom(), 1.0);
}

// ============================================================================
// Save / reset
// ============================================================================

#[test]
fn test_reset_without_saved_state() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::default();
    assert!(!controls.reset(&mut camera));
}

#[test]
fn test_reset_restores_saved_pose() {
    let mut camera = create_test_camera();
    let mut controls = undamped();
    controls.save_state(&camera);

    controls.rotate(Vec2::new(1.0, 0.2));
    controls.pan(Vec2::new(0.3, 0.1));
    controls.zoom(2.0);
    controls.update(&mut camera);

    assert!(controls.reset(&mut camera));
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0));
    assert_eq!(camera.zoom(), 1.0);
    assert_eq!(controls.target(), Vec3::ZERO);
    assert!(!controls.is_moving());
}
