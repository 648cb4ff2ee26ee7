//! Editor configuration.

use crate::elements::ColumnLimits;
use crate::snap::GRID_SIZE;
use crate::view::ZoomConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Key under which the working document is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "formDesignerTemplate";

/// Rejections raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history_capacity must be at least 1")]
    HistoryCapacity,
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("Zoom range {min}..{max} is empty")]
    ZoomRange { min: f64, max: f64 },
    #[error("Column limits {min}%..{max}% must satisfy 0 < min < 50, min <= max <= 100")]
    ColumnLimits { min: f64, max: f64 },
}

/// Tunables of an editing session. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_capacity: usize,
    pub grid_size: f64,
    pub snap_enabled: bool,
    pub show_grid: bool,
    /// Floor for element width and height, in page units.
    pub min_element_size: f64,
    pub min_column_percent: f64,
    pub max_column_percent: f64,
    pub zoom: ZoomConfig,
    pub duplicate_offset: f64,
    pub nudge_step: f64,
    pub nudge_step_large: f64,
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: MAX_UNDO_HISTORY,
            grid_size: GRID_SIZE,
            snap_enabled: false,
            show_grid: false,
            min_element_size: 20.0,
            min_column_percent: 5.0,
            max_column_percent: 95.0,
            zoom: ZoomConfig::default(),
            duplicate_offset: 20.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Decode and validate a config file.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacity);
        }
        for (field, value) in [
            ("grid_size", self.grid_size),
            ("min_element_size", self.min_element_size),
            ("zoom.min", self.zoom.min),
            ("zoom.step", self.zoom.step),
            ("nudge_step", self.nudge_step),
            ("nudge_step_large", self.nudge_step_large),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let zoom = &self.zoom;
        if !zoom.max.is_finite() || zoom.min > zoom.max || !(zoom.min..=zoom.max).contains(&1.0) {
            return Err(ConfigError::ZoomRange {
                min: zoom.min,
                max: zoom.max,
            });
        }
        let (min, max) = (self.min_column_percent, self.max_column_percent);
        if !(min > 0.0 && min < 50.0 && max >= min && max <= 100.0) {
            return Err(ConfigError::ColumnLimits { min, max });
        }
        Ok(())
    }

    pub fn column_limits(&self) -> ColumnLimits {
        ColumnLimits {
            min: self.min_column_percent,
            max: self.max_column_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.min_element_size, 20.0);
        assert_eq!(config.storage_key, "formDesignerTemplate");
        assert_eq!(config.column_limits(), ColumnLimits { min: 5.0, max: 95.0 });
    }

    #[test]
    fn test_partial_config_file() {
        let config = EditorConfig::from_json(r#"{"grid_size": 5, "snap_enabled": true}"#).unwrap();
        assert_eq!(config.grid_size, 5.0);
        assert!(config.snap_enabled);
        assert_eq!(config.history_capacity, MAX_UNDO_HISTORY);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"zoom": {"min": 2.0, "max": 0.5, "step": 0.1}}"#),
            Err(ConfigError::ZoomRange { .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"history_capacity": 0}"#),
            Err(ConfigError::HistoryCapacity)
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"min_column_percent": 0}"#),
            Err(ConfigError::ColumnLimits { .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"min_column_percent": 50}"#),
            Err(ConfigError::ColumnLimits { .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"min_column_percent": 10, "max_column_percent": 8}"#),
            Err(ConfigError::ColumnLimits { .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"grid_size": -1}"#),
            Err(ConfigError::NotPositive { field: "grid_size", .. })
        ));
        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Json(_))));
    }
}
