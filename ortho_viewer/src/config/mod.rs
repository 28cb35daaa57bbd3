//! Viewer configuration
//!
//! Every section has a `Default` and uses `#[serde(default)]`, so a TOML
//! file only needs the keys it overrides:
//!
//! ```toml
//! model_path = "assets/teapot.obj"
//!
//! [framing]
//! padding_factor = 1.5
//!
//! [[lighting.directional]]
//! position = [5.0, 10.0, 7.5]
//! shadow_map_size = 4096
//! ```

mod camera;
mod framing;
mod lighting;
mod renderer;

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::camera::ViewportSize;
use crate::error::{Error, Result};

pub use camera::{CameraConfig, OrbitConfig};
pub use framing::FramingConfig;
pub use lighting::{
    AmbientLightConfig, DirectionalLightConfig, HemisphereLightConfig, LightingConfig,
};
pub use renderer::{LoopConfig, ModelConfig, RendererConfig, ShadowMapKind};

/// Top-level viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Model asset handed to the loader
    pub model_path: String,
    /// Initial drawing surface size
    pub viewport: ViewportSize,
    pub camera: CameraConfig,
    pub framing: FramingConfig,
    pub controls: OrbitConfig,
    pub lighting: LightingConfig,
    pub renderer: RendererConfig,
    pub model: ModelConfig,
    pub render_loop: LoopConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: "assets/model.obj".to_string(),
            viewport: ViewportSize::default(),
            camera: CameraConfig::default(),
            framing: FramingConfig::default(),
            controls: OrbitConfig::default(),
            lighting: LightingConfig::default(),
            renderer: RendererConfig::default(),
            model: ModelConfig::default(),
            render_loop: LoopConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a TOML document. Missing keys use defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ViewerConfig = toml::from_str(text)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        crate::viewer_info!("viewer::Config", "Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Check the ranges the framing math and controls rely on.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::ConfigError(format!("{} must be positive, got {}", name, value)))
            }
        }

        if self.viewport.is_empty() {
            return Err(Error::ConfigError(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }

        positive("framing.padding_factor", self.framing.padding_factor)?;
        positive("framing.near", self.framing.near)?;
        positive("framing.far_multiplier", self.framing.far_multiplier)?;
        if !self.framing.offset_factors.iter().all(|f| f.is_finite()) {
            return Err(Error::ConfigError("framing.offset_factors must be finite".to_string()));
        }

        positive("camera.initial_frustum_size", self.camera.initial_frustum_size)?;
        positive("camera.near", self.camera.near)?;
        if self.camera.far <= self.camera.near {
            return Err(Error::ConfigError(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.camera.far, self.camera.near
            )));
        }

        positive("controls.min_zoom", self.controls.min_zoom)?;
        if !(self.controls.min_zoom <= self.controls.max_zoom) {
            return Err(Error::ConfigError(format!(
                "controls.min_zoom ({}) exceeds controls.max_zoom ({})",
                self.controls.min_zoom, self.controls.max_zoom
            )));
        }
        let damping = self.controls.damping_factor;
        let damping_ok = if self.controls.enable_damping {
            damping > 0.0 && damping <= 1.0
        } else {
            (0.0..=1.0).contains(&damping)
        };
        if !damping_ok {
            return Err(Error::ConfigError(format!(
                "controls.damping_factor must be within {}..=1 with damping {}, got {}",
                if self.controls.enable_damping { "(0" } else { "0" },
                if self.controls.enable_damping { "on" } else { "off" },
                damping
            )));
        }

        for (i, light) in self.lighting.directional.iter().enumerate() {
            if light.cast_shadow && !light.shadow_map_size.is_power_of_two() {
                return Err(Error::ConfigError(format!(
                    "lighting.directional[{}].shadow_map_size must be a power of two, got {}",
                    i, light.shadow_map_size
                )));
            }
        }

        positive("renderer.pixel_ratio", self.renderer.pixel_ratio)?;
        if self.render_loop.target_fps == 0 {
            return Err(Error::ConfigError("render_loop.target_fps must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
