//! The worker registry — hire, remove, move, and merge.
//!
//! The registry owns the worker records; the grid owns occupancy. Every
//! mutation here updates both sides before returning, and validates all of
//! its preconditions before touching either, so a failed call leaves no
//! partial effects.

use crate::{
    config::WorkerCatalog,
    economy::EconomyEngine,
    error::{GameError, GameResult},
    grid::GridStore,
    types::{Level, Position, WorkerId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worker {
    pub id: WorkerId,
    pub kind: String,
    pub position: Position,
    pub level: Level,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerRegistry {
    // BTreeMap keeps iteration order stable for snapshots and view models.
    workers: BTreeMap<WorkerId, Worker>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Worker> {
        self.workers.get(id)
    }

    pub fn workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    pub fn worker_at(&self, position: Position) -> Option<&Worker> {
        self.workers.values().find(|w| w.position == position)
    }

    /// Hire a worker of `kind` into `position`.
    ///
    /// Debit and placement are one all-or-nothing transaction: the grid cell
    /// is validated before the balance is touched, so a placement rejection
    /// never costs anything.
    pub fn hire(
        &mut self,
        kind: &str,
        position: Position,
        grid: &mut GridStore,
        economy: &mut EconomyEngine,
        catalog: &WorkerCatalog,
    ) -> GameResult<WorkerId> {
        let config = catalog.get(kind)?;

        // Placement preconditions first (bounds, lock, occupancy).
        let cell = grid.cell(position).ok_or(GameError::InvalidSlot { position })?;
        if !cell.unlocked {
            return Err(GameError::CellLocked { position });
        }
        if cell.occupant.is_some() {
            return Err(GameError::CellOccupied { position });
        }

        economy.debit(config.cost)?;

        let id = Uuid::new_v4().to_string();
        grid.place_worker(&id, position)?;
        self.workers.insert(
            id.clone(),
            Worker { id: id.clone(), kind: kind.to_string(), position, level: 1 },
        );
        Ok(id)
    }

    /// Remove a worker and vacate its cell.
    pub fn remove(&mut self, id: &str, grid: &mut GridStore) -> GameResult<Worker> {
        let worker = self
            .workers
            .remove(id)
            .ok_or_else(|| GameError::WorkerNotFound { id: id.to_string() })?;
        grid.vacate(worker.position);
        Ok(worker)
    }

    /// Relocate a worker to an empty unlocked cell.
    pub fn move_to(
        &mut self,
        id: &str,
        position: Position,
        grid: &mut GridStore,
    ) -> GameResult<()> {
        let from = self
            .workers
            .get(id)
            .ok_or_else(|| GameError::WorkerNotFound { id: id.to_string() })?
            .position;
        // place_worker validates lock and occupancy before anything moves.
        grid.place_worker(&id.to_string(), position)?;
        grid.vacate(from);
        if let Some(worker) = self.workers.get_mut(id) {
            worker.position = position;
        }
        Ok(())
    }

    /// Merge eligibility: same kind, same level, distinct cells.
    /// Symmetric — can_merge(a, b) == can_merge(b, a).
    pub fn can_merge(&self, a: &Worker, b: &Worker) -> bool {
        a.kind == b.kind && a.level == b.level && a.position != b.position
    }

    pub fn can_merge_ids(&self, a: &str, b: &str) -> bool {
        match (self.workers.get(a), self.workers.get(b)) {
            (Some(a), Some(b)) => self.can_merge(a, b),
            _ => false,
        }
    }

    /// Merge `source` into `target`.
    ///
    /// The survivor keeps the target's (first-clicked) position at level + 1;
    /// the source worker and its occupancy are removed.
    pub fn merge(
        &mut self,
        target_id: &str,
        source_id: &str,
        grid: &mut GridStore,
    ) -> GameResult<&Worker> {
        let target = self
            .workers
            .get(target_id)
            .ok_or_else(|| GameError::WorkerNotFound { id: target_id.to_string() })?;
        let source = self
            .workers
            .get(source_id)
            .ok_or_else(|| GameError::WorkerNotFound { id: source_id.to_string() })?;
        if !self.can_merge(target, source) {
            return Err(GameError::IncompatibleWorkers {
                a: target_id.to_string(),
                b: source_id.to_string(),
            });
        }

        let source = self.workers.remove(source_id).expect("source checked above");
        grid.vacate(source.position);
        let survivor = self.workers.get_mut(target_id).expect("target checked above");
        survivor.level += 1;
        Ok(survivor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkerCatalog;

    fn setup() -> (WorkerRegistry, GridStore, EconomyEngine, WorkerCatalog) {
        (
            WorkerRegistry::new(),
            GridStore::new(8, 8),
            EconomyEngine::new(1000.0),
            WorkerCatalog::builtin().unwrap(),
        )
    }

    #[test]
    fn hire_debits_and_places() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        let id = registry.hire("basic", 3, &mut grid, &mut economy, &catalog).unwrap();
        assert_eq!(economy.balances().emsx, 920.0);
        assert_eq!(grid.occupant(3), Some(&id));
        assert_eq!(registry.get(&id).unwrap().level, 1);
    }

    #[test]
    fn hire_into_occupied_cell_costs_nothing() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        registry.hire("basic", 3, &mut grid, &mut economy, &catalog).unwrap();
        let before = economy.balances().emsx;
        let err = registry
            .hire("basic", 3, &mut grid, &mut economy, &catalog)
            .unwrap_err();
        assert!(matches!(err, GameError::CellOccupied { position: 3 }));
        assert_eq!(economy.balances().emsx, before);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_vacates_cell() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        let id = registry.hire("basic", 2, &mut grid, &mut economy, &catalog).unwrap();
        registry.remove(&id, &mut grid).unwrap();
        assert!(!grid.is_occupied(2));
        assert!(registry.is_empty());
        assert!(matches!(
            registry.remove(&id, &mut grid),
            Err(GameError::WorkerNotFound { .. })
        ));
    }

    #[test]
    fn move_to_frees_the_old_cell() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        let id = registry.hire("basic", 0, &mut grid, &mut economy, &catalog).unwrap();
        registry.move_to(&id, 5, &mut grid).unwrap();
        assert!(!grid.is_occupied(0));
        assert_eq!(grid.occupant(5), Some(&id));
        assert_eq!(registry.get(&id).unwrap().position, 5);
    }

    #[test]
    fn can_merge_is_symmetric() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        let a = registry.hire("basic", 2, &mut grid, &mut economy, &catalog).unwrap();
        let b = registry.hire("basic", 5, &mut grid, &mut economy, &catalog).unwrap();
        let c = registry.hire("advanced", 6, &mut grid, &mut economy, &catalog).unwrap();

        assert_eq!(registry.can_merge_ids(&a, &b), registry.can_merge_ids(&b, &a));
        assert!(registry.can_merge_ids(&a, &b));
        assert!(!registry.can_merge_ids(&a, &c));
        assert!(!registry.can_merge_ids(&a, &a));
    }

    #[test]
    fn merge_keeps_target_position_and_bumps_level() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        let target = registry.hire("basic", 2, &mut grid, &mut economy, &catalog).unwrap();
        let source = registry.hire("basic", 5, &mut grid, &mut economy, &catalog).unwrap();

        let survivor = registry.merge(&target, &source, &mut grid).unwrap();
        assert_eq!(survivor.level, 2);
        assert_eq!(survivor.position, 2);
        assert_eq!(registry.len(), 1);
        assert!(!grid.is_occupied(5));
        assert_eq!(grid.occupant(2).map(String::as_str), Some(target.as_str()));
    }

    #[test]
    fn merge_rejects_level_mismatch() {
        let (mut registry, mut grid, mut economy, catalog) = setup();
        let a = registry.hire("basic", 0, &mut grid, &mut economy, &catalog).unwrap();
        let b = registry.hire("basic", 1, &mut grid, &mut economy, &catalog).unwrap();
        let c = registry.hire("basic", 2, &mut grid, &mut economy, &catalog).unwrap();
        registry.merge(&a, &b, &mut grid).unwrap(); // a is now level 2

        let err = registry.merge(&a, &c, &mut grid).unwrap_err();
        assert!(matches!(err, GameError::IncompatibleWorkers { .. }));
        assert_eq!(registry.len(), 2);
    }
}
