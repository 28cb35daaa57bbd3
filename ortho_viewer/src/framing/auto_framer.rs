/// Auto-framer - fits an orthographic camera to a bounding volume.
///
/// The frustum height is the largest model dimension times the padding
/// factor, its width follows the viewport aspect ratio. The camera sits
/// above, left of and in front of the model center, offset in units of
/// the largest dimension, and looks at the center.

use glam::Vec3;
use crate::camera::{OrthoBounds, OrthographicCamera};
use crate::config::FramingConfig;
use crate::controls::CameraControls;
use crate::error::Result;
use crate::scene::AABB;

const SOURCE: &str = "viewer::AutoFramer";

/// Result of framing one bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub bounds: OrthoBounds,
    pub position: Vec3,
    /// Look-at point and orbit target (the volume's center)
    pub target: Vec3,
    /// Visible height before zoom
    pub frustum_size: f32,
    pub max_dimension: f32,
}

/// Stateless apart from its constants; the same inputs always give the same `Framing`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoFramer {
    config: FramingConfig,
}

impl AutoFramer {
    pub fn new(config: FramingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Compute frustum bounds and pose for `volume` seen at `aspect` (width / height).
    ///
    /// # Errors
    ///
    /// `DegenerateBounds` if the volume has no extent or non-finite corners, or
    /// is so small that its center would fall in front of the near plane,
    /// `InvalidViewport` if `aspect` is not a positive finite number.
    pub fn frame(&self, volume: &AABB, aspect: f32) -> Result<Framing> {
        if !volume.is_valid_volume() {
            crate::viewer_bail!(
                SOURCE,
                DegenerateBounds,
                "cannot frame volume {:?}..{:?} (max dimension {})",
                volume.min,
                volume.max,
                volume.max_dimension()
            );
        }
        Self::check_aspect(aspect)?;

        let center = volume.center();
        let max_dimension = volume.max_dimension();
        let frustum_size = max_dimension * self.config.padding_factor;

        let bounds = OrthoBounds::symmetric(
            frustum_size,
            aspect,
            self.config.near,
            max_dimension * self.config.far_multiplier,
        );
        let offset = Vec3::from_array(self.config.offset_factors) * max_dimension;

        // The camera looks straight at the center, so its depth is the offset length
        let center_depth = offset.length();
        if !bounds.is_valid() || center_depth <= bounds.near || center_depth >= bounds.far {
            crate::viewer_bail!(
                SOURCE,
                DegenerateBounds,
                "volume too small to frame: max dimension {}, center depth {} outside near {} / far {}",
                max_dimension,
                center_depth,
                bounds.near,
                bounds.far
            );
        }

        let framing = Framing {
            bounds,
            position: center + offset,
            target: center,
            frustum_size,
            max_dimension,
        };

        crate::viewer_debug!(
            SOURCE,
            "Framed volume: center {:?}, max dimension {}, frustum {}x{}, far {}",
            center,
            max_dimension,
            bounds.width(),
            bounds.height(),
            bounds.far
        );

        Ok(framing)
    }

    /// Write a framing into the camera and point the controls at its target.
    ///
    /// Zoom is reset so the padding holds on screen.
    pub fn apply(
        &self,
        framing: &Framing,
        camera: &mut OrthographicCamera,
        controls: &mut dyn CameraControls,
    ) {
        camera.set_bounds(framing.bounds);
        camera.set_position(framing.position);
        camera.look_at(framing.target);
        camera.set_zoom(1.0);
        controls.set_target(framing.target);
    }

    /// Re-fit left/right to a new aspect ratio. Top, bottom, near, far and the pose are kept.
    pub fn reframe_for_aspect(&self, framing: &Framing, aspect: f32) -> Framing {
        let half_width = framing.frustum_size / 2.0 * aspect;
        Framing {
            bounds: OrthoBounds {
                left: -half_width,
                right: half_width,
                ..framing.bounds
            },
            ..*framing
        }
    }

    /// `aspect` must be positive and finite.
    pub fn check_aspect(aspect: f32) -> Result<()> {
        if !(aspect.is_finite() && aspect > 0.0) {
            crate::viewer_bail!(SOURCE, InvalidViewport, "aspect ratio must be positive, got {}", aspect);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "auto_framer_tests.rs"]
mod tests;
