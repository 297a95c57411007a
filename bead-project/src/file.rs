//! Project files: the portable JSON form of a board.
//!
//! A project file is what "Save project" downloads and "Load project" reads:
//!
//! ```json
//! { "version": "1.0", "gridSize": 24, "grid": [[null, "#E60013", ...], ...],
//!   "timestamp": "2024-05-01T12:00:00.000Z" }
//! ```

use anyhow::Context;
use bead_core::{Grid, Snapshot, GRID_SIZE};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{ProjectError, FILE_FORMAT_VERSION};

/// File name prefix for exported projects.
pub const PROJECT_FILE_PREFIX: &str = "beads-project";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    pub grid: Snapshot,

    #[serde(default)]
    pub timestamp: String,
}

fn default_version() -> String {
    FILE_FORMAT_VERSION.to_string()
}

fn default_grid_size() -> usize {
    GRID_SIZE
}

impl ProjectFile {
    /// Capture the current board, stamped with the current time.
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            grid_size: grid.size(),
            grid: grid.snapshot(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a project file.
    ///
    /// The `grid` field must be present, be a square array of
    /// color-or-null, and fit the board. A disagreeing `gridSize` is only
    /// reported: the matrix itself decides.
    pub fn parse(json: &str) -> Result<Self, ProjectError> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        match value.get("grid") {
            None | Some(serde_json::Value::Null) => {
                tracing::warn!("project file has no grid");
                return Err(ProjectError::MissingGrid);
            }
            Some(grid) if !grid.is_array() => {
                tracing::warn!("project file grid is not an array");
                return Err(ProjectError::GridNotArray);
            }
            Some(_) => {}
        }

        let file: ProjectFile = serde_json::from_value(value)?;

        if !file.grid.fits_board() {
            tracing::warn!(
                size = file.grid.size(),
                expected = GRID_SIZE,
                "project grid does not fit the board"
            );
            return Err(ProjectError::WrongGridSize {
                expected: GRID_SIZE,
                found: file.grid.size(),
            });
        }

        if file.grid_size != file.grid.size() {
            tracing::warn!(
                declared = file.grid_size,
                actual = file.grid.size(),
                "gridSize field disagrees with grid; using grid"
            );
        }

        if file.version != FILE_FORMAT_VERSION {
            tracing::debug!(version = %file.version, "project file has a different version");
        }

        Ok(file)
    }
}

/// `beads-project-<millis>.json`
pub fn default_file_name(epoch_millis: i64) -> String {
    format!("{}-{}.json", PROJECT_FILE_PREFIX, epoch_millis)
}

/// Save a project file as pretty JSON.
pub fn save_project_file(path: impl AsRef<Path>, file: &ProjectFile) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir: {}", parent.display()))?;
        }
    }

    let json = file.to_json().context("serialize project to json")?;
    fs::write(path, json).with_context(|| format!("write project file: {}", path.display()))?;
    tracing::info!(path = %path.display(), "project file saved");
    Ok(())
}

/// Load and validate a project file.
pub fn load_project_file(path: impl AsRef<Path>) -> anyhow::Result<ProjectFile> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read project file: {}", path.display()))?;
    let file = ProjectFile::parse(&data)
        .with_context(|| format!("parse project file: {}", path.display()))?;
    tracing::info!(path = %path.display(), "project file loaded");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_core::BeadColor;

    fn empty_rows_json(size: usize) -> String {
        let row = format!("[{}]", vec!["null"; size].join(","));
        format!("[{}]", vec![row; size].join(","))
    }

    #[test]
    fn test_from_grid_fields() {
        let grid = Grid::new();
        let file = ProjectFile::from_grid(&grid);
        assert_eq!(file.version, "1.0");
        assert_eq!(file.grid_size, 24);
        assert!(file.timestamp.ends_with('Z'));
        assert!(file.timestamp.contains('T'));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let file = ProjectFile::from_grid(&Grid::new());
        let value: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
        assert_eq!(value["gridSize"], 24);
        assert!(value["grid"].is_array());
        assert!(value.get("grid_size").is_none());
    }

    #[test]
    fn test_parse_missing_grid() {
        let err = ProjectFile::parse(r#"{"version":"1.0","gridSize":24}"#).unwrap_err();
        assert!(matches!(err, ProjectError::MissingGrid));
    }

    #[test]
    fn test_parse_grid_not_array() {
        let err = ProjectFile::parse(r#"{"grid": "nope"}"#).unwrap_err();
        assert!(matches!(err, ProjectError::GridNotArray));
    }

    #[test]
    fn test_parse_not_json() {
        let err = ProjectFile::parse("this is not json").unwrap_err();
        assert!(matches!(err, ProjectError::Json(_)));
    }

    #[test]
    fn test_parse_wrong_size() {
        let json = format!(r#"{{"grid": {}}}"#, empty_rows_json(10));
        let err = ProjectFile::parse(&json).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::WrongGridSize {
                expected: 24,
                found: 10
            }
        ));
    }

    #[test]
    fn test_parse_bad_color() {
        let mut rows = vec![vec![serde_json::Value::Null; 24]; 24];
        rows[3][4] = serde_json::Value::String("chartreuse".into());
        let json = serde_json::json!({ "grid": rows }).to_string();
        assert!(ProjectFile::parse(&json).is_err());
    }

    #[test]
    fn test_parse_minimal_file_defaults() {
        let json = format!(r#"{{"grid": {}}}"#, empty_rows_json(24));
        let file = ProjectFile::parse(&json).unwrap();
        assert_eq!(file.version, FILE_FORMAT_VERSION);
        assert_eq!(file.grid_size, 24);
        assert_eq!(file.grid, Snapshot::empty());
    }

    #[test]
    fn test_parse_accepts_lowercase_hex() {
        let mut rows = vec![vec![serde_json::Value::Null; 24]; 24];
        rows[0][0] = serde_json::Value::String("#e60013".into());
        let json = serde_json::json!({ "grid": rows, "gridSize": 24 }).to_string();
        let file = ProjectFile::parse(&json).unwrap();
        assert_eq!(
            file.grid.get(0, 0),
            Some(Some(BeadColor::rgb(0xE6, 0x00, 0x13)))
        );
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name(1700000000000), "beads-project-1700000000000.json");
    }
}
