// Drawing tools for the bead editor.
//
// A tool only looks at the board and proposes an edit. The editor decides
// whether to record history and applies it, so every mutation is preceded by
// a save-point.

use bead_core::{BeadColor, Cell, CellPos, Grid, GridError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use super::fill::flood_fill;

/// Where in a stroke the pointer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePhase {
    /// First contact of a pointer-down.
    Begin,
    /// The pointer moved onto a new cell while held.
    Drag,
}

/// A single pending change to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Paint { pos: CellPos, cell: Cell },
    Fill { pos: CellPos, cell: Cell },
}

impl Edit {
    pub fn apply(&self, grid: &mut Grid) -> Result<bool, GridError> {
        match *self {
            Edit::Paint { pos, cell } => {
                grid.set(pos.row(), pos.col(), cell)?;
                Ok(true)
            }
            Edit::Fill { pos, cell } => flood_fill(grid, pos.row(), pos.col(), cell),
        }
    }

    pub fn pos(&self) -> CellPos {
        match *self {
            Edit::Paint { pos, .. } | Edit::Fill { pos, .. } => pos,
        }
    }
}

pub trait Tool {
    /// Decide what, if anything, this tool does at `pos`.
    fn plan(&self, grid: &Grid, pos: CellPos, phase: StrokePhase) -> Option<Edit>;

    fn name(&self) -> &str;

    /// Whether dragging keeps applying the tool.
    fn repeats_on_drag(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct Pencil {
    pub color: BeadColor,
}

impl Pencil {
    pub fn new(color: BeadColor) -> Self {
        Self { color }
    }
}

impl Tool for Pencil {
    fn plan(&self, grid: &Grid, pos: CellPos, phase: StrokePhase) -> Option<Edit> {
        let current = grid.at(pos);
        let paint = Some(self.color);

        match phase {
            // a fresh click on a matching bead lifts it
            StrokePhase::Begin if current == paint => {
                trace!(row = pos.row(), col = pos.col(), "pencil toggles bead off");
                Some(Edit::Paint { pos, cell: None })
            }
            // dragging never toggles, so strokes don't flicker
            StrokePhase::Drag if current == paint => None,
            _ => Some(Edit::Paint { pos, cell: paint }),
        }
    }

    fn name(&self) -> &str {
        "Pencil"
    }
}

#[derive(Debug, Clone, Default)]
pub struct Eraser;

impl Tool for Eraser {
    fn plan(&self, grid: &Grid, pos: CellPos, _phase: StrokePhase) -> Option<Edit> {
        grid.at(pos).map(|_| Edit::Paint { pos, cell: None })
    }

    fn name(&self) -> &str {
        "Eraser"
    }
}

#[derive(Debug, Clone)]
pub struct Fill {
    pub color: BeadColor,
}

impl Fill {
    pub fn new(color: BeadColor) -> Self {
        Self { color }
    }
}

impl Tool for Fill {
    fn plan(&self, grid: &Grid, pos: CellPos, phase: StrokePhase) -> Option<Edit> {
        if phase == StrokePhase::Drag {
            return None;
        }
        let cell = Some(self.color);
        if grid.at(pos) == cell {
            trace!(row = pos.row(), col = pos.col(), "fill target already matches");
            return None;
        }
        Some(Edit::Fill { pos, cell })
    }

    fn name(&self) -> &str {
        "Fill"
    }

    fn repeats_on_drag(&self) -> bool {
        false
    }
}

/// The selectable tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Fill,
}

impl ToolKind {
    pub fn tool(self, color: BeadColor) -> Box<dyn Tool> {
        match self {
            ToolKind::Pencil => Box::new(Pencil::new(color)),
            ToolKind::Eraser => Box::new(Eraser),
            ToolKind::Fill => Box::new(Fill::new(color)),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Eraser => "eraser",
            ToolKind::Fill => "fill",
        })
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pencil" => Ok(ToolKind::Pencil),
            "eraser" => Ok(ToolKind::Eraser),
            "fill" | "bucket" => Ok(ToolKind::Fill),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}
