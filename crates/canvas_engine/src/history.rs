//! Per-surface undo/redo over element-list snapshots
//!
//! Each surface keeps its own stack of whole-list snapshots and a cursor.
//! The snapshot under the cursor is the one currently materialized in the
//! surface store. Committing after an undo discards the redo branch.

use crate::{EditError, Result};
use design_model::{DesignElement, Surface, SurfaceMap};

/// A full copy of one surface's element list
pub type Snapshot = Vec<DesignElement>;

/// Snapshot stack for a single surface
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStack {
    /// Snapshots, oldest first. Never empty.
    snapshots: Vec<Snapshot>,
    /// Position of the materialized snapshot
    index: usize,
    /// Maximum number of undo steps retained; unbounded when `None`
    max_entries: Option<usize>,
}

impl HistoryStack {
    /// Create an unbounded stack holding only the initial empty snapshot
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create a stack that keeps at most `max_entries` undo steps
    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            snapshots: vec![Vec::new()],
            index: 0,
            max_entries: max_entries.map(|max| max.max(1)),
        }
    }

    /// Truncate after the cursor, append the snapshot, and move onto it
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;

        // Enforce max entries
        if let Some(max) = self.max_entries {
            while self.snapshots.len() > max + 1 {
                self.snapshots.remove(0);
                self.index -= 1;
            }
        }
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Result<&Snapshot> {
        if self.index == 0 {
            return Err(EditError::NothingToUndo);
        }
        self.index -= 1;
        Ok(&self.snapshots[self.index])
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Result<&Snapshot> {
        if self.index + 1 >= self.snapshots.len() {
            return Err(EditError::NothingToRedo);
        }
        self.index += 1;
        Ok(&self.snapshots[self.index])
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.index]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Manages one [`HistoryStack`] per surface
#[derive(Debug, Clone)]
pub struct HistoryManager {
    stacks: SurfaceMap<HistoryStack>,
}

impl HistoryManager {
    /// Create a manager with unbounded history on every surface
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create with an optional per-surface undo limit
    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            stacks: SurfaceMap::from_fn(|_| HistoryStack::with_limit(max_entries)),
        }
    }

    pub fn commit(&mut self, surface: Surface, snapshot: Snapshot) {
        let stack = &mut self.stacks[surface];
        stack.commit(snapshot);
        tracing::trace!(
            "history commit on {}: {} entries, index {}",
            surface,
            stack.len(),
            stack.index()
        );
    }

    /// Undo on one surface, returning the snapshot to materialize
    pub fn undo(&mut self, surface: Surface) -> Result<Snapshot> {
        self.stacks[surface].undo().cloned()
    }

    /// Redo on one surface, returning the snapshot to materialize
    pub fn redo(&mut self, surface: Surface) -> Result<Snapshot> {
        self.stacks[surface].redo().cloned()
    }

    pub fn can_undo(&self, surface: Surface) -> bool {
        self.stacks[surface].can_undo()
    }

    pub fn can_redo(&self, surface: Surface) -> bool {
        self.stacks[surface].can_redo()
    }

    /// Number of snapshots held for a surface
    pub fn depth(&self, surface: Surface) -> usize {
        self.stacks[surface].len()
    }

    pub fn index(&self, surface: Surface) -> usize {
        self.stacks[surface].index()
    }

    pub fn stack(&self, surface: Surface) -> &HistoryStack {
        &self.stacks[surface]
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}
