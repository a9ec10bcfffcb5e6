//! Snapshot serialization — full game state to/from JSON.
//!
//! A snapshot captures everything needed to resume a session: grid,
//! workers, balances, rates, and the wall-clock moment it was taken.
//! Selection state is deliberately not saved — a resumed session starts
//! with nothing pending.

use crate::{economy::CurrencyMap, grid::GridStore, worker::WorkerRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub save_id: String,
    pub saved_at: DateTime<Utc>,
    pub grid: GridStore,
    pub workers: WorkerRegistry,
    pub balances: CurrencyMap,
    pub rates: CurrencyMap,
    /// Slots bought beyond the initially-unlocked set; drives the next
    /// unlock's cost.
    pub purchased_slots: usize,
}
