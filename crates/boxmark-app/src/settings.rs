//! Configuration file discovery.

use crate::{AppError, AppResult};
use boxmark_core::EditorConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the app's config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default configuration location.
///
/// On Linux: `~/.config/boxmark/config.json`
/// On macOS: `~/Library/Application Support/boxmark/config.json`
/// On Windows: `%APPDATA%\boxmark\config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("boxmark").join(CONFIG_FILE_NAME))
}

/// Load the configuration from `explicit`, else from the default location,
/// else fall back to defaults.
///
/// An explicit path must exist; a missing default file is not an error.
pub fn load_config(explicit: Option<&Path>) -> AppResult<EditorConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => read_config(&path),
        _ => {
            log::debug!("No configuration file found, using defaults");
            Ok(EditorConfig::default())
        }
    }
}

/// Read and validate a configuration file.
pub fn read_config(path: &Path) -> AppResult<EditorConfig> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let config = EditorConfig::from_json(&json)?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "maxZoom": 5, "handleHitTolerance": 4 }"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!((config.max_zoom - 5.0).abs() < f64::EPSILON);
        assert!((config.handle_hit_tolerance - 4.0).abs() < f64::EPSILON);
        assert!((config.min_zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("missing.json")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "minZoom": 0 }"#).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("minZoom"));
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("boxmark/config.json"));
        }
    }
}
