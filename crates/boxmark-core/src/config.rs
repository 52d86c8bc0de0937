//! Editor configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum width/height of a newly drawn rectangle, in screen pixels.
pub const DEFAULT_MIN_RECTANGLE_SIZE: f64 = 20.0;
/// Default zoom step; zoom in/out multiplies by `exp(step)`.
pub const DEFAULT_ZOOM_STEP: f64 = 0.7;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable constants of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Drafts narrower or shorter than this (screen pixels) are discarded.
    pub min_rectangle_size: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Side of a resize handle square, in screen pixels.
    pub handle_size: f64,
    /// Distance from a handle's center that still hits it, in screen pixels.
    pub handle_hit_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_rectangle_size: DEFAULT_MIN_RECTANGLE_SIZE,
            min_zoom: 1.0,
            max_zoom: 8.0,
            zoom_step: DEFAULT_ZOOM_STEP,
            handle_size: 8.0,
            handle_hit_tolerance: 6.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_zoom.is_nan() || self.min_zoom < 1.0 {
            return Err(invalid("minZoom", format!("must be at least 1, got {}", self.min_zoom)));
        }
        if self.max_zoom.is_nan() || self.max_zoom < self.min_zoom {
            return Err(invalid(
                "maxZoom",
                format!("must not be below minZoom ({}), got {}", self.min_zoom, self.max_zoom),
            ));
        }
        let positive = [
            ("minRectangleSize", self.min_rectangle_size),
            ("zoomStep", self.zoom_step),
            ("handleSize", self.handle_size),
            ("handleHitTolerance", self.handle_hit_tolerance),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.min_rectangle_size - 20.0).abs() < f64::EPSILON);
        assert!((config.max_zoom - 8.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "maxZoom": 4, "handleSize": 10 }"#).unwrap();
        assert!((config.max_zoom - 4.0).abs() < f64::EPSILON);
        assert!((config.handle_size - 10.0).abs() < f64::EPSILON);
        assert!((config.zoom_step - DEFAULT_ZOOM_STEP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_zoom_below_one() {
        let err = EditorConfig::from_json(r#"{ "minZoom": 0.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "minZoom", .. }));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = EditorConfig::from_json(r#"{ "minZoom": 3, "maxZoom": 2 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "maxZoom", .. }));
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let err = EditorConfig::from_json(r#"{ "minRectangleSize": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "minRectangleSize", .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig {
            handle_hit_tolerance: 3.5,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("handleHitTolerance"));
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
