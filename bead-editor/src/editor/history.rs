// Undo/redo history for the editor: whole-board snapshots on two stacks.

use bead_core::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,

    #[serde(default = "default_max_states")]
    max_states: usize,
}

pub fn default_max_states() -> usize {
    50
}

impl Default for History {
    fn default() -> Self {
        History::new(default_max_states())
    }
}

impl History {
    pub fn new(max_states: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_states: max_states.max(1),
        }
    }

    /// Record the board as it was before a mutation. Drops redo history.
    pub fn commit(&mut self, before: Snapshot) {
        self.undo_stack.push_back(before);
        while self.undo_stack.len() > self.max_states {
            self.undo_stack.pop_front();
            trace!("evicted oldest undo state");
        }
        if !self.redo_stack.is_empty() {
            debug!(discarded = self.redo_stack.len(), "redo history invalidated");
            self.redo_stack.clear();
        }
        trace!(undo = self.undo_stack.len(), "history save-point committed");
    }

    /// Step back. `current` is the live board, kept for redo.
    /// Returns `None`, and keeps `current` out of history, when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "undo"
        );
        Some(previous)
    }

    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "redo"
        );
        Some(next)
    }

    /// The state `undo` would hand back, left in place.
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn peek_redo(&self) -> Option<&Snapshot> {
        self.redo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_core::{BeadColor, Grid};

    fn marked(n: usize) -> Snapshot {
        let mut grid = Grid::new();
        grid.set(n / 24, n % 24, Some(BeadColor::rgb(0, 0, 0))).unwrap();
        grid.snapshot()
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::default();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(marked(0)), None);
        assert_eq!(history.redo(marked(0)), None);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 0);
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = History::default();
        history.commit(marked(1));

        let restored = history.undo(marked(2)).unwrap();
        assert_eq!(restored, marked(1));
        assert!(history.can_redo());

        let again = history.redo(restored).unwrap();
        assert_eq!(again, marked(2));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_peek_leaves_stacks_alone() {
        let mut history = History::new(5);
        assert!(history.peek_undo().is_none());

        history.commit(marked(1));
        history.commit(marked(2));
        assert_eq!(history.peek_undo(), Some(&marked(2)));
        assert_eq!(history.undo_len(), 2);

        history.undo(marked(3));
        assert_eq!(history.peek_redo(), Some(&marked(3)));
        assert_eq!(history.peek_undo(), Some(&marked(1)));
        assert_eq!((history.undo_len(), history.redo_len()), (1, 1));
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = History::default();
        history.commit(marked(1));
        history.undo(marked(2));
        assert!(history.can_redo());

        history.commit(marked(3));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_bounded_to_max_states() {
        let mut history = History::default();
        for n in 0..60 {
            history.commit(marked(n));
        }
        assert_eq!(history.undo_len(), 50);

        let mut current = marked(99);
        let mut last = None;
        for _ in 0..50 {
            let previous = history.undo(current.clone()).unwrap();
            current = previous.clone();
            last = Some(previous);
        }
        assert!(!history.can_undo());
        // the ten oldest save-points were evicted
        assert_eq!(last, Some(marked(10)));
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut history = History::new(0);
        history.commit(marked(1));
        history.commit(marked(2));
        assert_eq!(history.max_states(), 1);
        assert_eq!(history.undo(marked(3)), Some(marked(2)));
    }

    #[test]
    fn test_default_max_states_from_serde() {
        let history: History =
            serde_json::from_str(r#"{"undo_stack": [], "redo_stack": []}"#).unwrap();
        assert_eq!(history.max_states(), 50);
    }
}
