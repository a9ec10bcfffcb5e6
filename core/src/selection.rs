//! Selection state — what the player is about to do next.
//!
//! A tagged union, not two nullable fields: a pending hire kind and a
//! pending worker are mutually exclusive by construction.

use crate::types::WorkerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    /// A worker kind chosen from the hire panel, waiting for a target cell.
    PendingKind { kind: String },
    /// A placed worker chosen on the grid, candidate for merge/move/removal.
    PendingWorker { worker_id: WorkerId },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionController {
    current: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Enter pending-hire mode, clearing any worker selection.
    pub fn select_kind(&mut self, kind: &str) {
        self.current = Selection::PendingKind { kind: kind.to_string() };
    }

    /// Enter pending-worker mode, clearing any kind selection.
    pub fn select_worker(&mut self, worker_id: &str) {
        self.current = Selection::PendingWorker { worker_id: worker_id.to_string() };
    }

    pub fn clear(&mut self) {
        self.current = Selection::None;
    }

    pub fn pending_kind(&self) -> Option<&str> {
        match &self.current {
            Selection::PendingKind { kind } => Some(kind),
            _ => None,
        }
    }

    pub fn selected_worker_id(&self) -> Option<&str> {
        match &self.current {
            Selection::PendingWorker { worker_id } => Some(worker_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_mutually_exclusive() {
        let mut selection = SelectionController::new();
        selection.select_kind("basic");
        assert_eq!(selection.pending_kind(), Some("basic"));
        assert_eq!(selection.selected_worker_id(), None);

        selection.select_worker("w-1");
        assert_eq!(selection.pending_kind(), None);
        assert_eq!(selection.selected_worker_id(), Some("w-1"));

        selection.clear();
        assert_eq!(*selection.current(), Selection::None);
    }
}
