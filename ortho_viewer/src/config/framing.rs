use serde::{Deserialize, Serialize};

/// Auto-framing constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FramingConfig {
    /// Multiplier on the largest model dimension (1.2 = 20% margin)
    pub padding_factor: f32,
    /// Fixed near plane distance
    pub near: f32,
    /// Far plane = largest model dimension * this
    pub far_multiplier: f32,
    /// Camera offset from the model center, in units of the largest dimension
    pub offset_factors: [f32; 3],
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            padding_factor: 1.2,
            near: 0.1,
            far_multiplier: 10.0,
            offset_factors: [-0.5, 0.5, 1.5],
        }
    }
}
