// Editor module for the bead board.

pub mod controller;
pub mod fill;
pub mod history;
pub mod hooks;
pub mod tools;

pub use controller::{Editor, EditorError, PointerEvent, CLEAR_PROMPT, LOAD_PROMPT};
pub use fill::flood_fill;
pub use history::History;
pub use hooks::{AlwaysConfirm, Confirm, NoopRenderer, Renderer};
pub use tools::{Edit, Eraser, Fill, Pencil, StrokePhase, Tool, ToolKind};
