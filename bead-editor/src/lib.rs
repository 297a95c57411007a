//! bead-editor: the interactive side of the bead board.
//!
//! - `editor`: history, bucket fill, tools and the [`Editor`] that ties them together.
//! - `config`: serde-backed settings with defaults.
//! - `render`: a plain-text board renderer for terminals and logs.

pub mod config;
pub mod editor;
pub mod render;

pub use config::EditorConfig;
pub use editor::{Editor, EditorError, PointerEvent};
