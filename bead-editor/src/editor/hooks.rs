// Collaborators the editor calls out to: whoever draws the board, and
// whoever answers "are you sure?".

use bead_core::Grid;

/// Receives the board after every committed change. Read-only.
pub trait Renderer {
    fn render(&mut self, grid: &Grid);
}

impl<F> Renderer for F
where
    F: FnMut(&Grid),
{
    fn render(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// Renderer for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _grid: &Grid) {}
}

/// Asked before destructive actions. `false` aborts the action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Says yes to everything (scripts, `--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}
