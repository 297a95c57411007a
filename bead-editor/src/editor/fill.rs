// Bucket fill over the board.

use bead_core::{Cell, Grid, GridError};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Up, down, left, right. No diagonals.
fn neighbors(row: usize, col: usize, size: usize) -> impl Iterator<Item = (usize, usize)> {
    [
        (row.checked_sub(1), Some(col)),
        (Some(row + 1), Some(col)),
        (Some(row), col.checked_sub(1)),
        (Some(row), Some(col + 1)),
    ]
    .into_iter()
    .filter_map(move |(r, c)| match (r, c) {
        (Some(r), Some(c)) if r < size && c < size => Some((r, c)),
        _ => None,
    })
}

/// Breadth-first walk of the 4-connected region sharing the seed's cell value.
/// Cells are marked when queued, so each is visited once.
fn region(grid: &Grid, row: usize, col: usize) -> Result<Vec<(usize, usize)>, GridError> {
    let target = grid.get(row, col)?;
    let size = grid.size();

    let mut visited = vec![false; size * size];
    let mut queue = VecDeque::from([(row, col)]);
    visited[row * size + col] = true;
    let mut cells = Vec::new();

    while let Some((r, c)) = queue.pop_front() {
        cells.push((r, c));
        for (nr, nc) in neighbors(r, c, size) {
            let idx = nr * size + nc;
            if !visited[idx] && grid.get(nr, nc)? == target {
                visited[idx] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    Ok(cells)
}

/// Recolor the region containing `(row, col)` to `replacement`.
///
/// Returns `Ok(false)` without touching the grid when the seed already holds
/// `replacement` (two empties count as equal).
pub fn flood_fill(
    grid: &mut Grid,
    row: usize,
    col: usize,
    replacement: Cell,
) -> Result<bool, GridError> {
    let target = grid.get(row, col)?;

    if target == replacement {
        debug!(row, col, "target already matches fill color, skipping fill");
        return Ok(false);
    }

    trace!(row, col, ?target, ?replacement, "starting flood fill");

    // Collect first so a bad index can't leave a half-filled board.
    let cells = region(grid, row, col)?;
    for &(r, c) in &cells {
        grid.set(r, c, replacement)?;
    }

    debug!(filled = cells.len(), "flood fill completed");
    Ok(true)
}
