//! The mining grid — cell lock state and occupancy.
//!
//! RULE: the grid is the single source of truth for occupancy. Workers
//! mirror their position as an index into it, and both sides are updated
//! inside one operation so they can never drift apart.

use crate::{
    error::{GameError, GameResult},
    types::{Position, WorkerId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridCell {
    pub position: Position,
    pub unlocked: bool,
    pub occupant: Option<WorkerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridStore {
    cells: Vec<GridCell>,
}

impl GridStore {
    /// A fresh grid of `size` cells with the first `initial_unlocked` open.
    pub fn new(size: usize, initial_unlocked: usize) -> Self {
        let cells = (0..size)
            .map(|position| GridCell {
                position,
                unlocked: position < initial_unlocked,
                occupant: None,
            })
            .collect();
        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> Option<&GridCell> {
        self.cells.get(position)
    }

    pub fn unlocked_slots(&self) -> usize {
        self.cells.iter().filter(|c| c.unlocked).count()
    }

    pub fn is_unlocked(&self, position: Position) -> bool {
        self.cells.get(position).map(|c| c.unlocked).unwrap_or(false)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant(position).is_some()
    }

    pub fn occupant(&self, position: Position) -> Option<&WorkerId> {
        self.cells.get(position).and_then(|c| c.occupant.as_ref())
    }

    /// Mark a locked cell as unlocked.
    ///
    /// The grid checks ONLY bounds and lock state. The unlock cost belongs
    /// to the economy and must already be settled by the caller.
    pub fn unlock_slot(&mut self, position: Position) -> GameResult<()> {
        match self.cells.get_mut(position) {
            Some(cell) if !cell.unlocked => {
                cell.unlocked = true;
                Ok(())
            }
            _ => Err(GameError::InvalidSlot { position }),
        }
    }

    /// Record `worker_id` as the occupant of `position`.
    pub fn place_worker(&mut self, worker_id: &WorkerId, position: Position) -> GameResult<()> {
        let cell = self
            .cells
            .get_mut(position)
            .ok_or(GameError::InvalidSlot { position })?;
        if !cell.unlocked {
            return Err(GameError::CellLocked { position });
        }
        if cell.occupant.is_some() {
            return Err(GameError::CellOccupied { position });
        }
        cell.occupant = Some(worker_id.clone());
        Ok(())
    }

    /// Clear the occupant of `position`. No-op when already empty.
    pub fn vacate(&mut self, position: Position) {
        if let Some(cell) = self.cells.get_mut(position) {
            cell.occupant = None;
        }
    }
}
