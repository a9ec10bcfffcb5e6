//! The game engine — the single owner of all mutable game state.
//!
//! RULES:
//!   - All mutations enter through apply(). Commands run to completion
//!     before the next one is processed; there is no concurrent mutation.
//!   - Every successful command's events are appended to the event log.
//!   - Operations are transactional: validate first, mutate second, so a
//!     failed command leaves no partial effects.
//!   - Accrual rates are recomputed on every change to the worker set.

use crate::{
    clock::SessionClock,
    command::GameCommand,
    config::{GameConfig, WorkerCatalog},
    economy::EconomyEngine,
    error::{GameError, GameResult},
    event::{event_type_name, GameEvent},
    grid::{GridCell, GridStore},
    selection::{Selection, SelectionController},
    snapshot::GameSnapshot,
    statement::Statement,
    store::SaveStore,
    types::Position,
    worker::{Worker, WorkerRegistry},
};
use chrono::Utc;
use uuid::Uuid;

pub struct GameEngine {
    pub save_id: String,
    pub store: SaveStore,
    config: GameConfig,
    catalog: WorkerCatalog,
    grid: GridStore,
    workers: WorkerRegistry,
    economy: EconomyEngine,
    selection: SelectionController,
    clock: SessionClock,
    purchased_slots: usize,
}

impl GameEngine {
    /// Start a fresh game against the given store.
    pub fn new_game(
        config: GameConfig,
        catalog: WorkerCatalog,
        store: SaveStore,
    ) -> GameResult<Self> {
        let save_id = Uuid::new_v4().to_string();
        let engine = Self {
            grid: GridStore::new(config.grid_size, config.initial_unlocked),
            workers: WorkerRegistry::new(),
            economy: EconomyEngine::new(config.starting_emsx),
            selection: SelectionController::new(),
            clock: SessionClock::new(),
            purchased_slots: 0,
            config,
            catalog,
            store,
            save_id,
        };
        let started = GameEvent::SessionStarted {
            offline_seconds: 0.0,
            offline_emsx: 0.0,
            offline_usdt: 0.0,
            offline_btc: 0.0,
        };
        engine.record(&started)?;
        log::info!("New game {} started", engine.save_id);
        Ok(engine)
    }

    /// Fresh in-memory game with default config and the built-in catalog.
    /// Used throughout the integration tests.
    pub fn build_test() -> GameResult<Self> {
        Self::new_game(
            GameConfig::default(),
            WorkerCatalog::builtin()?,
            SaveStore::in_memory()?,
        )
    }

    /// Resume the latest saved game, crediting capped offline accrual.
    ///
    /// Returns the engine plus the SessionStarted event describing what was
    /// earned while away.
    pub fn resume(
        config: GameConfig,
        catalog: WorkerCatalog,
        store: SaveStore,
    ) -> GameResult<(Self, GameEvent)> {
        let (_, state_json) = store.latest_save()?.ok_or(GameError::NoSave)?;
        let snapshot: GameSnapshot = serde_json::from_str(&state_json)?;

        let away = (Utc::now() - snapshot.saved_at).num_milliseconds().max(0) as f64 / 1000.0;
        let offline_seconds = away.min(config.max_offline_seconds);

        let mut economy = EconomyEngine::restore(snapshot.balances, snapshot.rates);
        economy.tick(offline_seconds);

        let engine = Self {
            save_id: snapshot.save_id,
            grid: snapshot.grid,
            workers: snapshot.workers,
            economy,
            selection: SelectionController::new(),
            clock: SessionClock::new(),
            purchased_slots: snapshot.purchased_slots,
            config,
            catalog,
            store,
        };
        let started = GameEvent::SessionStarted {
            offline_seconds,
            offline_emsx: snapshot.rates.emsx * offline_seconds,
            offline_usdt: snapshot.rates.usdt * offline_seconds,
            offline_btc: snapshot.rates.btc * offline_seconds,
        };
        engine.record(&started)?;
        log::info!(
            "Resumed game {} after {offline_seconds:.0}s away",
            engine.save_id
        );
        Ok((engine, started))
    }

    /// Process one command. The core simulation step.
    pub fn apply(&mut self, command: GameCommand) -> GameResult<Vec<GameEvent>> {
        let events = match command {
            GameCommand::CellClick { position } => self.cell_click(position)?,
            GameCommand::HireClick { kind } => self.hire_click(&kind)?,
            GameCommand::ConfirmHire => self.confirm_hire()?,
            GameCommand::RemoveClick { worker_id } => self.remove_click(&worker_id)?,
            GameCommand::UnlockClick { position } => self.unlock_click(position)?,
            GameCommand::ClearSelection => {
                self.selection.clear();
                vec![GameEvent::SelectionCleared]
            }
            GameCommand::Tick { elapsed_seconds } => self.accrue(elapsed_seconds),
        };
        for event in &events {
            self.record(event)?;
        }
        Ok(events)
    }

    /// Advance the economy by the wall-clock time since the last call.
    /// The periodic-timer entry point for real-time drivers.
    pub fn tick_from_clock(&mut self) -> GameResult<Vec<GameEvent>> {
        let elapsed = self.clock.elapsed_since_last();
        self.apply(GameCommand::Tick { elapsed_seconds: elapsed })
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume_clock(&mut self) {
        self.clock.resume();
    }

    /// Persist the full game state.
    pub fn save(&self) -> GameResult<()> {
        let snapshot = GameSnapshot {
            save_id: self.save_id.clone(),
            saved_at: Utc::now(),
            grid: self.grid.clone(),
            workers: self.workers.clone(),
            balances: *self.economy.balances(),
            rates: *self.economy.rates(),
            purchased_slots: self.purchased_slots,
        };
        let json = serde_json::to_string(&snapshot)?;
        self.store
            .write_save(&self.save_id, &snapshot.saved_at.to_rfc3339(), &json)?;
        log::debug!("Saved game {}", self.save_id);
        Ok(())
    }

    // ── Command handlers ───────────────────────────────────────

    /// Cell-click mediation:
    ///   - occupied cell:   merge if a compatible worker is pending,
    ///                      deselect on a second click, otherwise select.
    ///   - empty unlocked:  hire if a kind is pending, move if a worker is
    ///                      pending, otherwise nothing.
    ///   - locked cell:     nothing (unlocking is its own command).
    fn cell_click(&mut self, position: Position) -> GameResult<Vec<GameEvent>> {
        let cell = self
            .grid
            .cell(position)
            .ok_or(GameError::InvalidSlot { position })?;

        if let Some(occupant) = cell.occupant.clone() {
            return match self.selection.current().clone() {
                Selection::PendingWorker { worker_id } if worker_id == occupant => {
                    self.selection.clear();
                    Ok(vec![GameEvent::SelectionCleared])
                }
                Selection::PendingWorker { worker_id }
                    if self.workers.can_merge_ids(&worker_id, &occupant) =>
                {
                    self.merge(&worker_id, &occupant)
                }
                _ => {
                    self.selection.select_worker(&occupant);
                    Ok(vec![GameEvent::WorkerSelected { worker_id: occupant }])
                }
            };
        }

        if !cell.unlocked {
            return Ok(vec![]);
        }

        match self.selection.current().clone() {
            Selection::PendingKind { kind } => self.hire(&kind, position),
            Selection::PendingWorker { worker_id } => self.move_worker(&worker_id, position),
            Selection::None => Ok(vec![]),
        }
    }

    fn hire_click(&mut self, kind: &str) -> GameResult<Vec<GameEvent>> {
        // Validate against the catalog before entering pending-hire mode.
        self.catalog.get(kind)?;
        self.selection.select_kind(kind);
        Ok(vec![GameEvent::KindSelected { kind: kind.to_string() }])
    }

    /// Hire the pending kind into the first free unlocked cell.
    fn confirm_hire(&mut self) -> GameResult<Vec<GameEvent>> {
        let kind = self
            .selection
            .pending_kind()
            .ok_or(GameError::NoSelection)?
            .to_string();
        let position = self.first_free_cell().ok_or(GameError::GridFull)?;
        self.hire(&kind, position)
    }

    fn hire(&mut self, kind: &str, position: Position) -> GameResult<Vec<GameEvent>> {
        let cost = self.catalog.get(kind)?.cost;
        let worker_id =
            self.workers
                .hire(kind, position, &mut self.grid, &mut self.economy, &self.catalog)?;
        self.refresh_rates()?;
        // The kind stays selected so several workers can be placed in a row.
        Ok(vec![GameEvent::WorkerHired {
            worker_id,
            kind: kind.to_string(),
            position,
            cost,
        }])
    }

    fn remove_click(&mut self, worker_id: &str) -> GameResult<Vec<GameEvent>> {
        let removed = self.workers.remove(worker_id, &mut self.grid)?;
        self.refresh_rates()?;
        if self.selection.selected_worker_id() == Some(worker_id) {
            self.selection.clear();
        }
        Ok(vec![GameEvent::WorkerRemoved {
            worker_id: removed.id,
            kind: removed.kind,
            position: removed.position,
        }])
    }

    fn move_worker(&mut self, worker_id: &str, position: Position) -> GameResult<Vec<GameEvent>> {
        let from = self
            .workers
            .get(worker_id)
            .ok_or_else(|| GameError::WorkerNotFound { id: worker_id.to_string() })?
            .position;
        self.workers.move_to(worker_id, position, &mut self.grid)?;
        self.selection.clear();
        Ok(vec![GameEvent::WorkerMoved {
            worker_id: worker_id.to_string(),
            from,
            to: position,
        }])
    }

    /// Merge the first-clicked (pending) worker with the clicked occupant.
    /// The survivor keeps the pending worker's position.
    fn merge(&mut self, target_id: &str, source_id: &str) -> GameResult<Vec<GameEvent>> {
        let survivor = self.workers.merge(target_id, source_id, &mut self.grid)?;
        let event = GameEvent::WorkersMerged {
            survivor_id: survivor.id.clone(),
            consumed_id: source_id.to_string(),
            kind: survivor.kind.clone(),
            new_level: survivor.level,
            position: survivor.position,
        };
        self.refresh_rates()?;
        self.selection.clear();
        Ok(vec![event])
    }

    fn unlock_click(&mut self, position: Position) -> GameResult<Vec<GameEvent>> {
        // Bounds/lock state first so a rejected unlock costs nothing.
        match self.grid.cell(position) {
            Some(cell) if !cell.unlocked => {}
            _ => return Err(GameError::InvalidSlot { position }),
        }
        let cost = self.config.unlock_cost(self.purchased_slots);
        self.economy.debit(cost)?;
        self.grid.unlock_slot(position)?;
        self.purchased_slots += 1;
        Ok(vec![GameEvent::SlotUnlocked { position, cost }])
    }

    fn accrue(&mut self, elapsed_seconds: f64) -> Vec<GameEvent> {
        if elapsed_seconds <= 0.0 {
            return vec![];
        }
        let rates = *self.economy.rates();
        self.economy.tick(elapsed_seconds);
        vec![GameEvent::BalancesAccrued {
            elapsed_seconds,
            emsx: rates.emsx * elapsed_seconds,
            usdt: rates.usdt * elapsed_seconds,
            btc: rates.btc * elapsed_seconds,
        }]
    }

    // ── Pure predicates for UI affordances ─────────────────────

    /// Whether a hire of `kind` could succeed right now.
    pub fn can_hire_worker(&self, kind: &str) -> bool {
        match self.catalog.get(kind) {
            Ok(config) => self.economy.can_afford(config.cost) && self.first_free_cell().is_some(),
            Err(_) => false,
        }
    }

    pub fn can_merge_workers(&self, a: &str, b: &str) -> bool {
        self.workers.can_merge_ids(a, b)
    }

    pub fn can_unlock_slot(&self, position: Position) -> bool {
        matches!(self.grid.cell(position), Some(cell) if !cell.unlocked)
            && self.economy.can_afford(self.unlock_cost())
    }

    /// EMSX cost of the next slot purchase.
    pub fn unlock_cost(&self) -> f64 {
        self.config.unlock_cost(self.purchased_slots)
    }

    // ── View accessors ─────────────────────────────────────────

    pub fn cells(&self) -> &[GridCell] {
        self.grid.cells()
    }

    pub fn workers(&self) -> Vec<&Worker> {
        self.workers.workers().collect()
    }

    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.get(id)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn unlocked_slots(&self) -> usize {
        self.grid.unlocked_slots()
    }

    pub fn selected_worker_id(&self) -> Option<&str> {
        self.selection.selected_worker_id()
    }

    pub fn pending_kind(&self) -> Option<&str> {
        self.selection.pending_kind()
    }

    pub fn balances(&self) -> &crate::economy::CurrencyMap {
        self.economy.balances()
    }

    pub fn rates(&self) -> &crate::economy::CurrencyMap {
        self.economy.rates()
    }

    pub fn statement(&self) -> Statement {
        Statement::build(self.economy.balances(), self.economy.rates())
    }

    pub fn catalog(&self) -> &WorkerCatalog {
        &self.catalog
    }

    // ── Internals ──────────────────────────────────────────────

    fn first_free_cell(&self) -> Option<Position> {
        self.grid
            .cells()
            .iter()
            .find(|c| c.unlocked && c.occupant.is_none())
            .map(|c| c.position)
    }

    fn refresh_rates(&mut self) -> GameResult<()> {
        let workers: Vec<&Worker> = self.workers.workers().collect();
        self.economy.recompute_rates(&workers, &self.catalog)
    }

    fn record(&self, event: &GameEvent) -> GameResult<()> {
        self.store.append_event(
            &self.save_id,
            event_type_name(event),
            &serde_json::to_string(event)?,
        )
    }
}

// Convenience passthroughs used by the runner when replaying scripts.
impl GameEngine {
    pub fn selected_worker(&self) -> Option<&Worker> {
        self.selected_worker_id().and_then(|id| self.workers.get(id))
    }

    pub fn worker_at(&self, position: Position) -> Option<&Worker> {
        self.workers.worker_at(position)
    }
}
