use serde::{Deserialize, Serialize};

/// Shadow filtering mode requested from the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMapKind {
    Basic,
    Pcf,
    PcfSoft,
    Vsm,
}

/// Renderer collaborator settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    pub antialias: bool,
    /// Master switch for shadow maps
    pub shadows: bool,
    pub shadow_map_kind: ShadowMapKind,
    /// Device pixels per logical pixel
    pub pixel_ratio: f32,
    /// 0xRRGGBB
    pub clear_color: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            shadows: true,
            shadow_map_kind: ShadowMapKind::PcfSoft,
            pixel_ratio: 1.0,
            clear_color: 0xf0f0f0,
        }
    }
}

/// Shadow flags applied to every mesh node of a loaded model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { cast_shadow: true, receive_shadow: true }
    }
}

/// Render loop pacing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoopConfig {
    /// Frames per second the fixed-rate scheduler aims for
    pub target_fps: u32,
    /// Stop after this many iterations; `None` runs until cancelled
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { target_fps: 60, max_frames: None }
    }
}
