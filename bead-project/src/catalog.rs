//! Named project catalog.
//!
//! A catalog maps a project name to the last board saved under it. The
//! durable backend is a single JSON object on disk, keyed by name:
//!
//! ```json
//! { "heart": { "grid": [[...]], "gridSize": 24, "savedAt": 1714564800000 } }
//! ```

use bead_core::{Grid, Snapshot};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    pub grid: Snapshot,
    pub grid_size: usize,
    /// Milliseconds since the Unix epoch.
    pub saved_at: i64,
}

impl StoredProject {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            grid: grid.snapshot(),
            grid_size: grid.size(),
            saved_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Key-value store of saved projects.
pub trait Catalog {
    /// Project names in sorted order.
    fn list(&self) -> Result<Vec<String>, CatalogError>;

    /// Store `project` under `name`, replacing any previous entry.
    fn save(&mut self, name: &str, project: StoredProject) -> Result<(), CatalogError>;

    fn load(&self, name: &str) -> Result<Option<StoredProject>, CatalogError>;

    /// Returns whether an entry was removed.
    fn delete(&mut self, name: &str) -> Result<bool, CatalogError>;
}

fn normalize_name(name: &str) -> Result<&str, CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        tracing::warn!("project name cannot be empty");
        return Err(CatalogError::EmptyName);
    }
    Ok(trimmed)
}

/// In-memory catalog, for tests and for sessions without a backing file.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: BTreeMap<String, StoredProject>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Catalog for MemoryCatalog {
    fn list(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn save(&mut self, name: &str, project: StoredProject) -> Result<(), CatalogError> {
        let name = normalize_name(name)?;
        self.entries.insert(name.to_string(), project);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<StoredProject>, CatalogError> {
        let name = normalize_name(name)?;
        Ok(self.entries.get(name).cloned())
    }

    fn delete(&mut self, name: &str) -> Result<bool, CatalogError> {
        let name = normalize_name(name)?;
        Ok(self.entries.remove(name).is_some())
    }
}

/// Catalog persisted as one JSON object file.
///
/// Every call re-reads the file so that several editors sharing the file see
/// each other's saves. Writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // Entries stay raw JSON so one bad record doesn't take the rest down.
    fn read_all(&self) -> Result<BTreeMap<String, Value>, CatalogError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, Value>) -> Result<(), CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl Catalog for JsonFileCatalog {
    fn list(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.read_all()?.into_keys().collect())
    }

    fn save(&mut self, name: &str, project: StoredProject) -> Result<(), CatalogError> {
        let name = normalize_name(name)?;
        let mut entries = self.read_all()?;
        entries.insert(name.to_string(), serde_json::to_value(project)?);
        self.write_all(&entries)?;
        tracing::info!(
            name = %name,
            total = entries.len(),
            path = %self.path.display(),
            "project saved to catalog"
        );
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<StoredProject>, CatalogError> {
        let name = normalize_name(name)?;
        let Some(raw) = self.read_all()?.remove(name) else {
            return Ok(None);
        };
        let project = serde_json::from_value(raw).map_err(|source| {
            tracing::warn!(name = %name, error = %source, "catalog entry is corrupt");
            CatalogError::BadEntry {
                name: name.to_string(),
                source,
            }
        })?;
        Ok(Some(project))
    }

    fn delete(&mut self, name: &str) -> Result<bool, CatalogError> {
        let name = normalize_name(name)?;
        let mut entries = self.read_all()?;
        if entries.remove(name).is_none() {
            tracing::debug!(name = %name, "delete of unknown project ignored");
            return Ok(false);
        }
        self.write_all(&entries)?;
        tracing::info!(name = %name, "project deleted from catalog");
        Ok(true)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("project name cannot be empty")]
    EmptyName,

    #[error("catalog i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog data is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("saved project '{name}' is corrupt: {source}")]
    BadEntry {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
