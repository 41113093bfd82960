//! Chart configuration, loadable from JSON.

use std::path::Path;
use std::time::Duration;

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::point_finder::PointFinder;
use crate::theme::ChartTheme;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Minimum time between two real paint operations.
    pub min_paint_latency_ms: u64,
    /// Attach the traces' highlighters to the point nearest to the pointer.
    pub point_highlighting: bool,
    pub point_finder: PointFinder,
    pub theme: ChartTheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_paint_latency_ms: 50,
            point_highlighting: false,
            point_finder: PointFinder::Euclidean,
            theme: ChartTheme::default(),
        }
    }
}

impl ChartConfig {
    pub fn min_paint_latency(&self) -> Duration {
        Duration::from_millis(self.min_paint_latency_ms.max(1))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid chart configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read chart configuration {}", path.display()))?;
        Self::from_json_str(&text)
            .wrap_err_with(|| format!("failed to parse chart configuration {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize chart configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::Color;

    #[test]
    fn missing_fields_use_defaults() {
        let config = ChartConfig::from_json_str(r#"{ "point_highlighting": true }"#).unwrap();
        assert!(config.point_highlighting);
        assert_eq!(config.min_paint_latency_ms, 50);
        assert_eq!(config.point_finder, PointFinder::Euclidean);
    }

    #[test]
    fn theme_colors_are_hex_strings() {
        let config = ChartConfig::from_json_str(
            r##"{ "point_finder": "Manhattan", "theme": { "background": "#102030" } }"##,
        )
        .unwrap();
        assert_eq!(config.point_finder, PointFinder::Manhattan);
        assert_eq!(config.theme.background, Color::rgb(0x10, 0x20, 0x30));

        let json = config.to_json_string().unwrap();
        assert!(json.contains("#102030"));
        assert_eq!(ChartConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ChartConfig::from_json_str("{ not json").unwrap_err();
        assert!(format!("{err:#}").contains("invalid chart configuration"));
    }
}
