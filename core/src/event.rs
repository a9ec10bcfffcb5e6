//! Events emitted by the engine — the record of everything that changed.
//!
//! Every successful command produces at least one event; events are appended
//! to the persisted event log so a session can be audited or replayed.

use crate::types::{Level, Position, WorkerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Session lifecycle ──────────────────────────
    SessionStarted {
        offline_seconds: f64,
        offline_emsx: f64,
        offline_usdt: f64,
        offline_btc: f64,
    },

    // ── Worker lifecycle ───────────────────────────
    WorkerHired {
        worker_id: WorkerId,
        kind: String,
        position: Position,
        cost: f64,
    },
    WorkerRemoved {
        worker_id: WorkerId,
        kind: String,
        position: Position,
    },
    WorkerMoved {
        worker_id: WorkerId,
        from: Position,
        to: Position,
    },
    WorkersMerged {
        survivor_id: WorkerId,
        consumed_id: WorkerId,
        kind: String,
        new_level: Level,
        position: Position,
    },

    // ── Grid ───────────────────────────────────────
    SlotUnlocked {
        position: Position,
        cost: f64,
    },

    // ── Selection ──────────────────────────────────
    KindSelected {
        kind: String,
    },
    WorkerSelected {
        worker_id: WorkerId,
    },
    SelectionCleared,

    // ── Economy ────────────────────────────────────
    BalancesAccrued {
        elapsed_seconds: f64,
        emsx: f64,
        usdt: f64,
        btc: f64,
    },
}

/// Extract a stable string name from a GameEvent variant.
/// Used for the event_type column in event_log.
pub fn event_type_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::SessionStarted { .. } => "session_started",
        GameEvent::WorkerHired { .. } => "worker_hired",
        GameEvent::WorkerRemoved { .. } => "worker_removed",
        GameEvent::WorkerMoved { .. } => "worker_moved",
        GameEvent::WorkersMerged { .. } => "workers_merged",
        GameEvent::SlotUnlocked { .. } => "slot_unlocked",
        GameEvent::KindSelected { .. } => "kind_selected",
        GameEvent::WorkerSelected { .. } => "worker_selected",
        GameEvent::SelectionCleared => "selection_cleared",
        GameEvent::BalancesAccrued { .. } => "balances_accrued",
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub save_id: String,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
    pub recorded_at: String,
}
