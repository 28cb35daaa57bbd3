/// Scene lights built from the lighting configuration.

use glam::Vec3;
use crate::camera::OrthoBounds;
use crate::config::{
    AmbientLightConfig, DirectionalLightConfig, HemisphereLightConfig, LightingConfig,
};

/// Convert 0xRRGGBB to linear-agnostic RGB in 0..=1.
pub fn color_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Shadow map settings of a shadow-casting light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    /// Square shadow map resolution
    pub map_size: u32,
    pub bias: f32,
    /// The light's orthographic shadow camera
    pub camera: OrthoBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: Vec3,
    pub ground_color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    /// Directional lights shine from `position` toward `target`
    pub target: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub shadow: Option<ShadowSettings>,
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// A light in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Hemisphere(HemisphereLight),
    Directional(DirectionalLight),
}

impl Light {
    pub fn casts_shadow(&self) -> bool {
        matches!(self, Light::Directional(DirectionalLight { shadow: Some(_), .. }))
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient(l) => l.intensity,
            Light::Hemisphere(l) => l.intensity,
            Light::Directional(l) => l.intensity,
        }
    }
}

impl From<&AmbientLightConfig> for AmbientLight {
    fn from(config: &AmbientLightConfig) -> Self {
        Self { color: color_from_hex(config.color), intensity: config.intensity }
    }
}

impl From<&HemisphereLightConfig> for HemisphereLight {
    fn from(config: &HemisphereLightConfig) -> Self {
        Self {
            sky_color: color_from_hex(config.sky_color),
            ground_color: color_from_hex(config.ground_color),
            intensity: config.intensity,
            position: Vec3::from_array(config.position),
        }
    }
}

impl DirectionalLight {
    /// Build from config; `shadows_enabled` is the renderer's master switch.
    pub fn from_config(config: &DirectionalLightConfig, shadows_enabled: bool) -> Self {
        let shadow = (shadows_enabled && config.cast_shadow).then(|| {
            let e = config.shadow_camera_extent;
            ShadowSettings {
                map_size: config.shadow_map_size,
                bias: config.shadow_bias,
                camera: OrthoBounds {
                    left: -e,
                    right: e,
                    top: e,
                    bottom: -e,
                    near: config.shadow_camera_near,
                    far: config.shadow_camera_far,
                },
            }
        });
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::ZERO,
            color: color_from_hex(config.color),
            intensity: config.intensity,
            shadow,
        }
    }
}

/// Ambient first, then hemisphere, then directional lights in config order.
pub fn lights_from_config(config: &LightingConfig, shadows_enabled: bool) -> Vec<Light> {
    let mut lights = vec![Light::Ambient(AmbientLight::from(&config.ambient))];
    if let Some(hemisphere) = &config.hemisphere {
        lights.push(Light::Hemisphere(HemisphereLight::from(hemisphere)));
    }
    lights.extend(
        config
            .directional
            .iter()
            .map(|d| Light::Directional(DirectionalLight::from_config(d, shadows_enabled))),
    );
    lights
}
