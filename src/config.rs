use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DashboardError, Result};

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so `dashboard.json` only
/// needs the keys it wants to change:
///
/// ```json
/// { "data_path": "exports/diwali.csv", "table_height": 220.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Sales file loaded at startup.
    pub data_path: PathBuf,
    /// WHATWG encoding label of the sales file.
    pub encoding: String,
    pub window_size: [f32; 2],
    /// Max height of each of the two data tables.
    pub table_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            encoding: "windows-1252".to_string(),
            window_size: [1280.0, 900.0],
            table_height: 260.0,
        }
    }
}

impl DashboardConfig {
    /// Read a config file. `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DashboardError::Config {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| DashboardError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Defaults, overridden by [`CONFIG_FILE`] when present and valid.
    pub fn load() -> Self {
        match Self::from_file(Path::new(CONFIG_FILE)) {
            Ok(Some(cfg)) => {
                log::info!("Using settings from {CONFIG_FILE}");
                cfg
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("{e}; falling back to defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_means_defaults() {
        let cfg = DashboardConfig::from_file(Path::new("/nonexistent/dashboard.json")).unwrap();
        assert!(cfg.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "sales.csv" }}"#).unwrap();

        let cfg = DashboardConfig::from_file(file.path()).unwrap().unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("sales.csv"));
        assert_eq!(cfg.encoding, "windows-1252");
        assert_eq!(cfg.table_height, 260.0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "colour": "pink" }}"#).unwrap();

        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }
}
