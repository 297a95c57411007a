// Plain-text board renderer.
//
// Each bead is one character: `.` for an empty peg, the palette index in
// base 36 (0-9, a-z) for palette colors, `?` for anything else.

use bead_core::{Cell, Grid, Palette};
use std::io::Write;

use crate::editor::Renderer;

pub fn symbol(palette: &Palette, cell: Cell) -> char {
    match cell {
        None => '.',
        Some(color) => palette
            .index_of(color)
            .and_then(|i| char::from_digit(i as u32, 36))
            .unwrap_or('?'),
    }
}

/// The board as text, one row per line.
pub fn board_to_string(palette: &Palette, grid: &Grid) -> String {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|cell| symbol(palette, *cell).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct TextRenderer<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, grid: &Grid) {
        let text = board_to_string(&self.palette, grid);
        if let Err(e) = writeln!(self.out, "{text}\n").and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to render board");
        }
    }
}
