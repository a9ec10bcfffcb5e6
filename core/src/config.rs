//! Static configuration — the worker-kind catalog and game policy knobs.
//!
//! The catalog is read-only external data, loaded once at startup. Policy
//! values (unlock cost schedule, starting balance, offline cap) are injected
//! here rather than hard-coded in the subsystems that apply them.

use crate::{
    error::{GameError, GameResult},
    types::Currency,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-second base production of one level-1 worker, per currency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BaseRates {
    pub emsx: f64,
    pub usdt: f64,
    pub btc: f64,
}

impl BaseRates {
    pub fn get(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Emsx => self.emsx,
            Currency::Usdt => self.usdt,
            Currency::Btc => self.btc,
        }
    }
}

/// One catalog entry: everything the game knows about a worker kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerKindConfig {
    pub kind: String,
    pub name: String,
    /// Hire cost, quoted in EMSX.
    pub cost: f64,
    /// Display color token consumed by the UI layer.
    pub color: String,
    pub base_rates: BaseRates,
}

#[derive(Debug, Clone, Deserialize)]
struct WorkerCatalogFile {
    worker_kinds: Vec<WorkerKindConfig>,
}

/// The immutable worker-kind catalog.
#[derive(Debug, Clone)]
pub struct WorkerCatalog {
    kinds: Vec<WorkerKindConfig>,
}

impl WorkerCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> GameResult<Self> {
        Self::from_json(include_str!("../../data/worker_types.json"))
    }

    /// Load a catalog override from disk.
    pub fn from_path(path: &Path) -> GameResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> GameResult<Self> {
        let file: WorkerCatalogFile = serde_json::from_str(raw)?;
        Ok(Self { kinds: file.worker_kinds })
    }

    pub fn get(&self, kind: &str) -> GameResult<&WorkerKindConfig> {
        self.kinds
            .iter()
            .find(|k| k.kind == kind)
            .ok_or_else(|| GameError::UnknownWorkerKind { kind: kind.to_string() })
    }

    pub fn kinds(&self) -> &[WorkerKindConfig] {
        &self.kinds
    }
}

/// Game policy knobs. Defaults match the shipped balance; tests override
/// individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Total number of grid cells.
    pub grid_size: usize,
    /// Cells unlocked from the start, positions 0..initial_unlocked.
    pub initial_unlocked: usize,
    /// Starting EMSX balance for a fresh game.
    pub starting_emsx: f64,
    /// Cost of the first purchased slot, in EMSX.
    pub unlock_base_cost: f64,
    /// Geometric growth applied per purchased slot.
    pub unlock_cost_growth: f64,
    /// Upper bound on offline accrual when resuming a saved game.
    pub max_offline_seconds: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 16,
            initial_unlocked: 4,
            starting_emsx: 100.0,
            unlock_base_cost: 50.0,
            unlock_cost_growth: 1.5,
            max_offline_seconds: 8.0 * 3600.0,
        }
    }
}

impl GameConfig {
    /// Cost of the next slot given how many have been purchased so far.
    pub fn unlock_cost(&self, purchased_slots: usize) -> f64 {
        self.unlock_base_cost * self.unlock_cost_growth.powi(purchased_slots as i32)
    }
}
