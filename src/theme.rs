use serde::{Deserialize, Serialize};

use crate::data_types::Color;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Color,
    pub grid_line: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub axis_title: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            grid_line: Color::GRAY.alpha(0.3),
            axis_line: Color::BLACK,
            axis_label: Color::BLACK.alpha(0.8),
            axis_title: Color::BLACK,
        }
    }
}
