use serde::{Deserialize, Serialize};

use super::Color;

/// Line style used for trace outlines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    /// Alternating dash / gap lengths in pixels; empty for a solid line.
    #[serde(default)]
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn solid(width: f32) -> Self {
        Self {
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(width: f32, dash: Vec<f32>) -> Self {
        Self { width, dash }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceStyle {
    pub color: Color,
    pub stroke: Stroke,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            stroke: Stroke::default(),
        }
    }
}
