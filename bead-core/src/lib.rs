//! bead-core: the board model for fuse-bead patterns.
//!
//! Design rules:
//! - The board is always 24x24; nothing resizes it.
//! - A cell is empty or holds one color; colors only need equality.
//! - Snapshots are plain owned data, never views into a live grid.

pub mod color;
pub mod grid;
pub mod palette;

pub use color::{BeadColor, Cell, ColorError};
pub use grid::{CellPos, Grid, GridError, Snapshot, GRID_SIZE};
pub use palette::{Palette, PaletteError};
