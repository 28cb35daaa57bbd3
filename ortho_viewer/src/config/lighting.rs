use serde::{Deserialize, Serialize};

/// Scene lighting rig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: AmbientLightConfig,
    /// Sky/ground gradient light; `None` disables it
    pub hemisphere: Option<HemisphereLightConfig>,
    /// Directional lights, key light first
    pub directional: Vec<DirectionalLightConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: AmbientLightConfig::default(),
            hemisphere: Some(HemisphereLightConfig::default()),
            directional: vec![
                DirectionalLightConfig::default(),
                DirectionalLightConfig {
                    position: [-5.0, 5.0, -5.0],
                    intensity: 0.4,
                    cast_shadow: false,
                    ..DirectionalLightConfig::default()
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbientLightConfig {
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
}

impl Default for AmbientLightConfig {
    fn default() -> Self {
        Self { color: 0xffffff, intensity: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HemisphereLightConfig {
    pub sky_color: u32,
    pub ground_color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

impl Default for HemisphereLightConfig {
    fn default() -> Self {
        Self {
            sky_color: 0xffffff,
            ground_color: 0x444444,
            intensity: 0.6,
            position: [0.0, 20.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DirectionalLightConfig {
    pub position: [f32; 3],
    pub color: u32,
    pub intensity: f32,
    pub cast_shadow: bool,
    /// Shadow map resolution (square, power of two)
    pub shadow_map_size: u32,
    pub shadow_bias: f32,
    /// Half-size of the light's orthographic shadow camera
    pub shadow_camera_extent: f32,
    pub shadow_camera_near: f32,
    pub shadow_camera_far: f32,
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 10.0, 7.5],
            color: 0xffffff,
            intensity: 1.0,
            cast_shadow: true,
            shadow_map_size: 2048,
            shadow_bias: -0.0001,
            shadow_camera_extent: 10.0,
            shadow_camera_near: 0.5,
            shadow_camera_far: 50.0,
        }
    }
}
