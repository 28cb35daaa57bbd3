//! Camera controls
//!
//! `CameraControls` is the seam the scene manager and auto-framer talk to;
//! `OrbitControls` is the built-in implementation.

mod orbit_controls;

use glam::Vec3;
use crate::camera::OrthographicCamera;

pub use orbit_controls::OrbitControls;

/// Interactive camera controller.
pub trait CameraControls {
    /// Focus point the camera orbits around.
    fn target(&self) -> Vec3;

    /// Move the focus point. Takes effect on the next `update`.
    fn set_target(&mut self, target: Vec3);

    /// Advance damping/inertia and write the camera pose.
    /// Called once per frame; returns whether the camera changed.
    fn update(&mut self, camera: &mut OrthographicCamera) -> bool;
}
