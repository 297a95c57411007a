// The pegboard: a fixed square of cells, and detached snapshots of it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::color::Cell;

/// Pegs per side on the board.
pub const GRID_SIZE: usize = 24;

/// A position known to be on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    row: usize,
    col: usize,
}

impl CellPos {
    /// Returns `None` for anything off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    /// Same as [`CellPos::new`] for signed input (pointer math can go negative).
    pub fn from_signed(row: i64, col: i64) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Self::new(row, col)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

/// Always `GRID_SIZE` x `GRID_SIZE`, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        info!("Creating empty {}x{} grid", GRID_SIZE, GRID_SIZE);
        Self {
            cells: vec![None; GRID_SIZE * GRID_SIZE],
        }
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            warn!(row, col, size = GRID_SIZE, "cell access out of bounds");
            return Err(GridError::OutOfBounds {
                row,
                col,
                size: GRID_SIZE,
            });
        }
        Ok(row * GRID_SIZE + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Overwrite one cell. Callers snapshot first if the change should be undoable.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<(), GridError> {
        let index = self.index(row, col)?;
        trace!(row, col, ?value, "setting cell");
        self.cells[index] = value;
        Ok(())
    }

    pub fn at(&self, pos: CellPos) -> Cell {
        // CellPos is always inside a GRID_SIZE board
        self.cells[pos.row * GRID_SIZE + pos.col]
    }

    pub fn clear(&mut self) {
        info!("Clearing grid");
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn snapshot(&self) -> Snapshot {
        trace!("taking grid snapshot");
        Snapshot {
            size: GRID_SIZE,
            cells: self.cells.clone(),
        }
    }

    /// Overwrite the whole board. Snapshots of any other size are rejected
    /// and leave the grid as it was.
    pub fn replace(&mut self, snapshot: &Snapshot) -> Result<(), GridError> {
        if snapshot.size != GRID_SIZE || snapshot.cells.len() != GRID_SIZE * GRID_SIZE {
            warn!(
                expected = GRID_SIZE,
                got = snapshot.size,
                "refusing to replace grid with mismatched snapshot"
            );
            return Err(GridError::DimensionMismatch {
                expected: GRID_SIZE,
                rows: snapshot.size,
                cols: snapshot.size,
            });
        }
        self.cells.copy_from_slice(&snapshot.cells);
        debug!(painted = self.painted_count(), "grid replaced from snapshot");
        Ok(())
    }

    /// Row-major rows, for renderers.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(GRID_SIZE)
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}

/// A detached copy of a grid's cells.
///
/// On the wire this is the square matrix of `"#RRGGBB"` / `null` used by
/// project files and the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Snapshot {
    size: usize,
    cells: Vec<Cell>,
}

impl Snapshot {
    /// An all-empty board.
    pub fn empty() -> Self {
        Self {
            size: GRID_SIZE,
            cells: vec![None; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Build from rows. The matrix must be square; whether it fits the board
    /// is checked later by [`Grid::replace`].
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let size = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != size) {
            return Err(GridError::DimensionMismatch {
                expected: size,
                rows: size,
                cols: bad.len(),
            });
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.size && col < self.size).then(|| self.cells[row * self.size + col])
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(<[Cell]>::to_vec).collect()
    }

    pub fn fits_board(&self) -> bool {
        self.size == GRID_SIZE
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Snapshot {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Snapshot::from_rows(rows)
    }
}

impl From<Snapshot> for Vec<Vec<Cell>> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.to_rows()
    }
}

impl From<&Grid> for Snapshot {
    fn from(grid: &Grid) -> Self {
        grid.snapshot()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("expected a {expected}x{expected} grid, got {rows}x{cols}")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },
}
