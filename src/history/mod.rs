//! Linear undo/redo over committed [`EditorState`] snapshots.
//!
//! There is no coalescing here: continuous controls are expected to batch
//! their transient updates and commit once on release.

use crate::state::EditorState;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<EditorState>,
    cursor: usize,
    capacity: usize,
}

impl HistoryManager {
    pub fn new(initial: EditorState) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(initial: EditorState, capacity: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn current(&self) -> &EditorState {
        &self.snapshots[self.cursor]
    }

    /// Records a committed state. Any redo tail past the cursor is
    /// discarded; once the capacity is reached the oldest snapshot drops.
    pub fn commit(&mut self, state: EditorState) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn undo(&mut self) -> Option<&EditorState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn redo(&mut self) -> Option<&EditorState> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rotation;

    fn rotated(rotation: Rotation) -> EditorState {
        EditorState {
            rotation,
            ..EditorState::default()
        }
    }

    #[test]
    fn fresh_history_has_nothing_to_undo_or_redo() {
        let history = HistoryManager::new(EditorState::default());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_move_the_cursor_over_snapshots() {
        let mut history = HistoryManager::new(EditorState::default());
        history.commit(rotated(Rotation::R90));
        history.commit(rotated(Rotation::R180));

        assert_eq!(
            history.undo().expect("undo should yield a snapshot").rotation,
            Rotation::R90
        );
        assert_eq!(
            history.undo().expect("undo should yield a snapshot").rotation,
            Rotation::R0
        );
        assert!(history.undo().is_none());

        assert_eq!(
            history.redo().expect("redo should yield a snapshot").rotation,
            Rotation::R90
        );
        assert!(history.can_redo());
    }

    #[test]
    fn commit_truncates_the_redo_tail() {
        let mut history = HistoryManager::new(EditorState::default());
        history.commit(rotated(Rotation::R90));
        history.commit(rotated(Rotation::R180));
        let _ = history.undo();
        let _ = history.undo();

        history.commit(rotated(Rotation::R270));
        assert!(!history.can_redo());
        assert_eq!(history.current().rotation, Rotation::R270);
        assert_eq!(history.snapshot_count(), 2);
    }

    #[test]
    fn capacity_bound_drops_the_oldest_snapshot() {
        let mut history = HistoryManager::with_capacity(EditorState::default(), 3);
        history.commit(rotated(Rotation::R90));
        history.commit(rotated(Rotation::R180));
        history.commit(rotated(Rotation::R270));

        assert_eq!(history.snapshot_count(), 3);
        let _ = history.undo();
        let oldest = history.undo().expect("undo should reach the oldest snapshot");
        assert_eq!(oldest.rotation, Rotation::R90);
        assert!(!history.can_undo());
    }
}
