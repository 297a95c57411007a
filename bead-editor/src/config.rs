//! Editor configuration.
//!
//! Every field has a default, so an empty `{}` file (or no file at all) gives
//! the stock 24-color board with 50 undo steps.

use anyhow::Context;
use bead_core::{Palette, PaletteError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::editor::history::default_max_states;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Undo steps kept before the oldest is dropped.
    #[serde(default = "default_max_states")]
    pub history_limit: usize,

    #[serde(default)]
    pub palette: Palette,

    /// JSON file backing the named project catalog.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Where exported project files are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("beads_projects.json")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_max_states(),
            palette: Palette::default(),
            catalog_path: default_catalog_path(),
            export_dir: default_export_dir(),
        }
    }
}

impl EditorConfig {
    /// Load a config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let config: EditorConfig = serde_json::from_str(&data)
            .with_context(|| format!("parse config file: {}", path.display()))?;
        config.validate().context("validate config")?;

        tracing::debug!(
            history_limit = config.history_limit,
            palette = config.palette.len(),
            catalog = %config.catalog_path.display(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.history_limit == 0 {
            tracing::warn!("history_limit of 0 is treated as 1");
        }
        self.palette.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.palette.len(), 24);
    }

    #[test]
    fn test_partial_override() {
        let config: EditorConfig =
            serde_json::from_str(r##"{"history_limit": 5, "palette": ["#000000", "#ff0000"]}"##)
                .unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.catalog_path, PathBuf::from("beads_projects.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_palette_invalid() {
        let config: EditorConfig = serde_json::from_str(r#"{"palette": []}"#).unwrap();
        assert_eq!(config.validate(), Err(PaletteError::Empty));
    }

    #[test]
    fn test_load_from_file() {
        let path = Path::new("target/test_config/editor.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, r#"{"history_limit": 7}"#).unwrap();

        let config = EditorConfig::load(path).unwrap();
        assert_eq!(config.history_limit, 7);

        fs::write(path, r#"{"palette": []}"#).unwrap();
        assert!(EditorConfig::load(path).is_err());
    }
}
