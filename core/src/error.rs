use crate::types::Position;
use thiserror::Error;

/// Every expected failure a game operation can report.
///
/// These are user-facing conditions (not enough funds, bad slot, bad merge),
/// not defects — the UI disables affordances ahead of time via the pure
/// predicates, but every mutating call still validates defensively.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid slot {position}: out of bounds or already unlocked")]
    InvalidSlot { position: Position },

    #[error("Cell {position} is locked")]
    CellLocked { position: Position },

    #[error("Cell {position} is already occupied")]
    CellOccupied { position: Position },

    #[error("Insufficient funds: need {needed} EMSX, have {available}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Worker '{id}' not found")]
    WorkerNotFound { id: String },

    #[error("Unknown worker kind '{kind}'")]
    UnknownWorkerKind { kind: String },

    #[error("Workers '{a}' and '{b}' cannot be merged")]
    IncompatibleWorkers { a: String, b: String },

    #[error("No pending selection")]
    NoSelection,

    #[error("No free unlocked cell available")]
    GridFull,

    #[error("No saved game to resume")]
    NoSave,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
