//! All player-issued commands — the UI boundary, one variant per input event.

use crate::types::{Position, WorkerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum GameCommand {
    /// A grid cell was clicked. What happens depends on the cell and the
    /// current selection; see GameEngine::cell_click.
    CellClick { position: Position },

    /// A hire button was clicked: select that kind for placement.
    HireClick { kind: String },

    /// Confirm the pending hire into the first free unlocked cell.
    ConfirmHire,

    /// The remove button was clicked for a placed worker.
    RemoveClick { worker_id: WorkerId },

    /// A locked cell's unlock button was clicked.
    UnlockClick { position: Position },

    ClearSelection,

    /// The periodic accrual timer fired.
    Tick { elapsed_seconds: f64 },
}
