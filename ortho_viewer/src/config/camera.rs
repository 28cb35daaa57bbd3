use std::f32::consts::PI;
use serde::{Deserialize, Serialize};

/// Camera used before a model has been framed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Visible height of the initial orthographic frustum
    pub initial_frustum_size: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_frustum_size: 10.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 10.0],
        }
    }
}

/// Orbit control tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Ease rotation and pan out over several frames
    pub enable_damping: bool,
    /// Fraction of pending motion applied per frame (0..=1)
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    /// Zoom change per zoom step (0.05 = 5%)
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Polar angle limits in radians, measured from +Y
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 0.05,
            min_zoom: 0.1,
            max_zoom: 20.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}
