/// Orbit controls - rotate, pan and zoom an orthographic camera around a target.
///
/// Input handlers call `rotate`, `pan` and `zoom` to queue motion; the
/// render loop calls `update` once per frame to apply it. With damping
/// enabled, each update applies `damping_factor` of the pending rotation
/// and pan and decays the remainder, so motion eases out over frames.

use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use crate::camera::OrthographicCamera;
use crate::config::OrbitConfig;
use super::CameraControls;

const EPS: f32 = 1e-6;
/// Keeps the camera off the poles, where the up vector degenerates
const POLAR_EPS: f32 = 1e-3;

/// Snapshot restored by `OrbitControls::reset`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedState {
    target: Vec3,
    position: Vec3,
    zoom: f32,
}

/// Spherical orbit around a target point.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: OrbitConfig,
    target: Vec3,
    /// Pending (azimuth, polar) rotation in radians
    spherical_delta: Vec2,
    /// Pending pan in fractions of the visible height
    pan_delta: Vec2,
    /// Pending multiplicative zoom
    zoom_scale: f32,
    enabled: bool,
    saved: Option<SavedState>,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            target: Vec3::ZERO,
            spherical_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
            zoom_scale: 1.0,
            enabled: true,
            saved: None,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled controls ignore new input; queued motion still settles.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Queue a rotation. `delta.x` orbits around the up axis, `delta.y` tilts.
    pub fn rotate(&mut self, delta: Vec2) {
        if self.enabled {
            self.spherical_delta -= delta * self.config.rotate_speed;
        }
    }

    /// Queue a pan in screen space, measured in fractions of the visible height.
    pub fn pan(&mut self, delta: Vec2) {
        if self.enabled {
            self.pan_delta += delta * self.config.pan_speed;
        }
    }

    /// Queue a zoom. Positive steps zoom in.
    pub fn zoom(&mut self, steps: f32) {
        if self.enabled {
            self.zoom_scale *= (1.0 + self.config.zoom_speed).powf(steps);
        }
    }

    /// `true` while queued motion has not settled.
    pub fn is_moving(&self) -> bool {
        self.spherical_delta.length_squared() > EPS * EPS
            || self.pan_delta.length_squared() > EPS * EPS
            || (self.zoom_scale - 1.0).abs() > EPS
    }

    /// Remember the current camera pose and target for `reset`.
    pub fn save_state(&mut self, camera: &OrthographicCamera) {
        self.saved = Some(SavedState {
            target: self.target,
            position: camera.position(),
            zoom: camera.zoom(),
        });
    }

    /// Restore the pose stored by `save_state` and drop pending motion.
    /// Returns false if nothing was saved.
    pub fn reset(&mut self, camera: &mut OrthographicCamera) -> bool {
        let Some(saved) = self.saved else {
            return false;
        };
        self.target = saved.target;
        camera.set_position(saved.position);
        camera.set_zoom(saved.zoom);
        camera.look_at(saved.target);
        self.clear_pending();
        true
    }

    fn clear_pending(&mut self) {
        self.spherical_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.zoom_scale = 1.0;
    }

    /// A zero factor would never settle, so it falls back to undamped steps.
    fn step_factor(&self) -> f32 {
        let factor = self.config.damping_factor;
        if self.config.enable_damping && factor > 0.0 {
            factor.min(1.0)
        } else {
            1.0
        }
    }

    fn polar_limits(&self) -> (f32, f32) {
        let min = self.config.min_polar_angle.max(POLAR_EPS);
        let max = self.config.max_polar_angle.min(PI - POLAR_EPS);
        (min, max.max(min))
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl CameraControls for OrbitControls {
    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn update(&mut self, camera: &mut OrthographicCamera) -> bool {
        let mut changed = false;

        if (self.zoom_scale - 1.0).abs() > EPS {
            let zoom = (camera.zoom() * self.zoom_scale)
                .clamp(self.config.min_zoom, self.config.max_zoom);
            changed |= (zoom - camera.zoom()).abs() > EPS;
            camera.set_zoom(zoom);
            self.zoom_scale = 1.0;
        }

        let rotating = self.spherical_delta.length_squared() > EPS * EPS;
        let panning = self.pan_delta.length_squared() > EPS * EPS;

        if !rotating && !panning {
            self.spherical_delta = Vec2::ZERO;
            self.pan_delta = Vec2::ZERO;
            if camera.target() != self.target {
                camera.look_at(self.target);
                changed = true;
            }
            return changed;
        }

        let factor = self.step_factor();

        if panning {
            let step = self.pan_delta * factor;
            let world_per_unit = camera.bounds().height() / camera.zoom();
            let offset = camera.right_vector() * (-step.x * world_per_unit)
                + camera.screen_up_vector() * (step.y * world_per_unit);
            self.target += offset;
            camera.set_position(camera.position() + offset);
        }

        let offset = camera.position() - self.target;
        let radius = offset.length();
        if radius > EPS {
            let mut theta = offset.x.atan2(offset.z);
            let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

            let step = self.spherical_delta * factor;
            theta += step.x;
            phi += step.y;
            let (min_phi, max_phi) = self.polar_limits();
            phi = phi.clamp(min_phi, max_phi);

            let new_offset = Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
            camera.set_position(self.target + new_offset);
        }
        camera.look_at(self.target);
        changed = true;

        if self.config.enable_damping {
            self.spherical_delta *= 1.0 - factor;
            self.pan_delta *= 1.0 - factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_delta = Vec2::ZERO;
        }

        changed
    }
}

#[cfg(test)]
#[path = "orbit_controls_tests.rs"]
mod tests;
