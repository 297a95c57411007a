//! bead-project: saving and loading bead boards.
//!
//! Two persistence paths:
//! - Project files: a standalone JSON document for export/import.
//! - The catalog: named saves in a local key-value store.
//!
//! Both validate on the way in; nothing here touches a live editor.

use thiserror::Error;

/// Version string written into project files.
pub const FILE_FORMAT_VERSION: &str = "1.0";

pub mod catalog;
pub mod file;

pub use catalog::{Catalog, CatalogError, JsonFileCatalog, MemoryCatalog, StoredProject};
pub use file::{default_file_name, load_project_file, save_project_file, ProjectFile};

/// Reasons a project file is refused.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid format: project file has no grid")]
    MissingGrid,

    #[error("invalid format: grid is not an array")]
    GridNotArray,

    #[error("grid must be {expected}x{expected}, found {found}x{found}")]
    WrongGridSize { expected: usize, found: usize },

    #[error("invalid project json: {0}")]
    Json(#[from] serde_json::Error),
}
