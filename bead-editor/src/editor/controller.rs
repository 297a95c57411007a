// The editor: board, history and tool state in one owned object.

use bead_core::{BeadColor, CellPos, Grid, GridError, Palette, Snapshot};
use bead_project::{
    default_file_name, load_project_file, save_project_file, Catalog, CatalogError, ProjectFile,
    StoredProject,
};
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use super::history::History;
use super::hooks::{Confirm, NoopRenderer, Renderer};
use super::tools::{Edit, StrokePhase, ToolKind};
use crate::config::EditorConfig;

pub const CLEAR_PROMPT: &str = "Clear every bead on the board?";
pub const LOAD_PROMPT: &str = "Load this project? The current board will be replaced.";

/// Pointer input, already mapped to board cells. `None` means off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Option<CellPos>),
    Move(Option<CellPos>),
    Up,
    Leave,
}

pub struct Editor {
    grid: Grid,
    history: History,
    palette: Palette,
    tool: ToolKind,
    color: BeadColor,
    drawing: bool,
    last_cell: Option<CellPos>,
    renderer: Box<dyn Renderer>,
}

impl Editor {
    pub fn new(config: &EditorConfig, renderer: Box<dyn Renderer>) -> Self {
        let palette = config.palette.clone();
        let color = palette.default_color();
        info!(
            history_limit = config.history_limit,
            palette = palette.len(),
            color = %color,
            "creating editor"
        );

        Self {
            grid: Grid::new(),
            history: History::new(config.history_limit),
            palette,
            tool: ToolKind::default(),
            color,
            drawing: false,
            last_cell: None,
            renderer,
        }
    }

    /// Editor with default config and nothing to render to.
    pub fn headless() -> Self {
        Self::new(&EditorConfig::default(), Box::new(NoopRenderer))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> BeadColor {
        self.color
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn last_cell(&self) -> Option<CellPos> {
        self.last_cell
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        debug!(%tool, "tool selected");
        self.tool = tool;
    }

    /// Picking a color while erasing goes back to the pencil.
    pub fn select_color(&mut self, color: BeadColor) {
        debug!(%color, "color selected");
        self.color = color;
        if self.tool == ToolKind::Eraser {
            self.select_tool(ToolKind::Pencil);
        }
    }

    pub fn select_palette_index(&mut self, index: usize) -> Result<(), EditorError> {
        let color = self
            .palette
            .get(index)
            .ok_or(EditorError::UnknownPaletteIndex {
                index,
                len: self.palette.len(),
            })?;
        self.select_color(color);
        Ok(())
    }

    /// Feed one pointer event through the active tool.
    /// Returns whether the board changed.
    pub fn handle(&mut self, event: PointerEvent) -> Result<bool, EditorError> {
        match event {
            PointerEvent::Down(cell) => {
                self.drawing = true;
                self.last_cell = None;

                let Some(pos) = cell else {
                    trace!("pointer down off the board");
                    return Ok(false);
                };

                let tool = self.tool.tool(self.color);
                if tool.repeats_on_drag() {
                    self.last_cell = Some(pos);
                }
                let edit = tool.plan(&self.grid, pos, StrokePhase::Begin);
                self.commit_edit(edit)
            }
            PointerEvent::Move(cell) => {
                if !self.drawing {
                    return Ok(false);
                }
                let tool = self.tool.tool(self.color);
                if !tool.repeats_on_drag() {
                    return Ok(false);
                }
                let Some(pos) = cell else {
                    return Ok(false);
                };
                if self.last_cell == Some(pos) {
                    return Ok(false);
                }
                self.last_cell = Some(pos);

                let edit = tool.plan(&self.grid, pos, StrokePhase::Drag);
                self.commit_edit(edit)
            }
            PointerEvent::Up | PointerEvent::Leave => {
                self.drawing = false;
                self.last_cell = None;
                Ok(false)
            }
        }
    }

    // All-or-nothing: the edit runs on a copy, and only a real change records
    // the pre-edit board and goes live.
    fn commit_edit(&mut self, edit: Option<Edit>) -> Result<bool, EditorError> {
        let Some(edit) = edit else {
            return Ok(false);
        };

        let mut next = self.grid.clone();
        if !edit.apply(&mut next)? {
            return Ok(false);
        }

        self.history.commit(self.grid.snapshot());
        self.grid = next;
        trace!(
            row = edit.pos().row(),
            col = edit.pos().col(),
            tool = %self.tool,
            "edit committed"
        );
        self.render();
        Ok(true)
    }

    fn render(&mut self) {
        self.renderer.render(&self.grid);
    }

    pub fn undo(&mut self) -> bool {
        if !Self::restorable(self.history.peek_undo(), "undo") {
            return false;
        }
        match self.history.undo(self.grid.snapshot()) {
            Some(previous) => self.restore(&previous),
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if !Self::restorable(self.history.peek_redo(), "redo") {
            return false;
        }
        match self.history.redo(self.grid.snapshot()) {
            Some(next) => self.restore(&next),
            None => false,
        }
    }

    // Checked before either stack moves, so a refused step leaves history intact.
    fn restorable(snapshot: Option<&Snapshot>, action: &str) -> bool {
        match snapshot {
            None => {
                debug!("nothing to {action}");
                false
            }
            Some(snapshot) if !snapshot.fits_board() => {
                warn!(size = snapshot.size(), action, "history snapshot does not fit the board");
                false
            }
            Some(_) => true,
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) -> bool {
        if let Err(e) = self.grid.replace(snapshot) {
            warn!(error = %e, "history snapshot rejected");
            return false;
        }
        self.render();
        true
    }

    /// Empty the whole board as one undoable step, if confirmed.
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(CLEAR_PROMPT) {
            info!("clear cancelled");
            return false;
        }
        self.history.commit(self.grid.snapshot());
        self.grid.clear();
        self.render();
        true
    }

    /// Replace the board with `snapshot` as one undoable step, if confirmed.
    ///
    /// Returns `Ok(false)` when declined. Snapshots that don't fit the board
    /// are rejected before anything is recorded.
    pub fn load_snapshot(
        &mut self,
        snapshot: &Snapshot,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, EditorError> {
        if !confirm.confirm(LOAD_PROMPT) {
            info!("load cancelled");
            return Ok(false);
        }
        self.apply_snapshot(snapshot)?;
        Ok(true)
    }

    fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), EditorError> {
        if !snapshot.fits_board() {
            warn!(size = snapshot.size(), "rejecting snapshot that does not fit the board");
            return Err(GridError::DimensionMismatch {
                expected: self.grid.size(),
                rows: snapshot.size(),
                cols: snapshot.size(),
            }
            .into());
        }

        self.history.commit(self.grid.snapshot());
        self.grid.replace(snapshot)?;
        info!(painted = self.grid.painted_count(), "board loaded");
        self.render();
        Ok(())
    }

    /// The current board as a project file.
    pub fn export_document(&self) -> ProjectFile {
        ProjectFile::from_grid(&self.grid)
    }

    /// Write `beads-project-<millis>.json` into `dir`.
    pub fn export_file(&self, dir: impl AsRef<Path>) -> Result<PathBuf, EditorError> {
        let file = self.export_document();
        let path = dir
            .as_ref()
            .join(default_file_name(Utc::now().timestamp_millis()));
        save_project_file(&path, &file).map_err(EditorError::File)?;
        info!(path = %path.display(), "project exported");
        Ok(path)
    }

    /// Ask, then read and apply a project file. Any failure leaves the board
    /// and history as they were.
    pub fn import_file(
        &mut self,
        path: impl AsRef<Path>,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, EditorError> {
        let path = path.as_ref();
        if !confirm.confirm(LOAD_PROMPT) {
            info!(path = %path.display(), "import cancelled");
            return Ok(false);
        }

        let file = load_project_file(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "import failed");
            EditorError::File(e)
        })?;
        self.apply_snapshot(&file.grid)?;
        Ok(true)
    }

    pub fn save_to_catalog(
        &self,
        catalog: &mut dyn Catalog,
        name: &str,
    ) -> Result<(), EditorError> {
        catalog.save(name, StoredProject::from_grid(&self.grid))?;
        info!(name = %name.trim(), "board saved to catalog");
        Ok(())
    }

    pub fn open_from_catalog(
        &mut self,
        catalog: &dyn Catalog,
        name: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, EditorError> {
        let stored = catalog
            .load(name)?
            .ok_or_else(|| EditorError::UnknownProject(name.trim().to_string()))?;
        self.load_snapshot(&stored.grid, confirm)
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("tool", &self.tool)
            .field("color", &self.color)
            .field("drawing", &self.drawing)
            .field("last_cell", &self.last_cell)
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("palette has no color at index {index} (size {len})")]
    UnknownPaletteIndex { index: usize, len: usize },

    #[error("no saved project named '{0}'")]
    UnknownProject(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{0:#}")]
    File(anyhow::Error),
}
