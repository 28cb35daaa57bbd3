/// Orthographic camera - frustum bounds plus a look-at pose.
///
/// The bounds are plain mutable fields: the auto-framer and the resize
/// path write them, the renderer reads the derived matrices. The camera
/// is owned by the `SceneManager` and lent out by reference.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use super::frustum::Frustum;
use super::viewport::ViewportSize;

/// Orthographic frustum parameters in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    /// Symmetric bounds with the given full height and aspect ratio.
    pub fn symmetric(frustum_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_height = frustum_size / 2.0;
        let half_width = half_height * aspect;
        Self {
            left: -half_width,
            right: half_width,
            top: half_height,
            bottom: -half_height,
            near,
            far,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// (right - left) / (top - bottom)
    pub fn aspect_ratio(&self) -> f32 {
        self.width() / self.height()
    }

    /// `left < right`, `bottom < top` and `0 < near < far`, all finite.
    pub fn is_valid(&self) -> bool {
        let finite = [self.left, self.right, self.top, self.bottom, self.near, self.far]
            .iter()
            .all(|v| v.is_finite());
        finite
            && self.left < self.right
            && self.bottom < self.top
            && 0.0 < self.near
            && self.near < self.far
    }

    /// Same height, near and far; left/right rescaled around their midpoint.
    pub fn with_aspect(&self, aspect: f32) -> Self {
        let center_x = (self.left + self.right) / 2.0;
        let half_width = self.height() / 2.0 * aspect;
        Self {
            left: center_x - half_width,
            right: center_x + half_width,
            ..*self
        }
    }
}

/// GPU-facing camera block (column-major matrices, std140-compatible).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// xyz = camera position, w = zoom
    pub position_zoom: [f32; 4],
}

/// Orthographic camera with a position, look-at target and zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    bounds: OrthoBounds,
    position: Vec3,
    target: Vec3,
    up: Vec3,
    zoom: f32,
}

impl OrthographicCamera {
    /// Create a camera at `position` looking at the origin.
    pub fn new(bounds: OrthoBounds, position: Vec3) -> Self {
        Self {
            bounds,
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            zoom: 1.0,
        }
    }

    /// Camera used before any model is framed.
    pub fn for_viewport(
        viewport: ViewportSize,
        frustum_size: f32,
        near: f32,
        far: f32,
        position: Vec3,
    ) -> Self {
        let aspect = viewport.aspect_ratio().unwrap_or(1.0);
        Self::new(OrthoBounds::symmetric(frustum_size, aspect, near, far), position)
    }

    // ===== GETTERS =====

    pub fn bounds(&self) -> &OrthoBounds {
        &self.bounds
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Unit vector from position toward target.
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Unit screen-right vector in world space.
    pub fn right_vector(&self) -> Vec3 {
        self.view_direction().cross(self.up).normalize_or_zero()
    }

    /// Unit screen-up vector in world space (orthogonal to view direction).
    pub fn screen_up_vector(&self) -> Vec3 {
        self.right_vector().cross(self.view_direction()).normalize_or_zero()
    }

    /// View matrix (world → view).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Orthographic projection with zoom applied to left/right/top/bottom.
    pub fn projection_matrix(&self) -> Mat4 {
        let b = &self.bounds;
        let z = self.zoom;
        Mat4::orthographic_rh(b.left / z, b.right / z, b.bottom / z, b.top / z, b.near, b.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Culling planes for the current pose and projection.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            view: self.view_matrix().to_cols_array_2d(),
            position_zoom: self.position.extend(self.zoom).to_array(),
        }
    }

    // ===== SETTERS =====

    pub fn set_bounds(&mut self, bounds: OrthoBounds) {
        self.bounds = bounds;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Point the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// Zoom factor; non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// Resize without a framed model: keep top/bottom/near/far, rescale left/right.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.bounds = self.bounds.with_aspect(aspect);
    }
}

#[cfg(test)]
#[path = "orthographic_camera_tests.rs"]
mod tests;
