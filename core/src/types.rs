//! Shared primitive types used across the entire game core.

use serde::{Deserialize, Serialize};

/// Index of a cell in the mining grid, 0..grid_size.
pub type Position = usize;

/// A stable, unique identifier for a hired worker.
/// UUID v4 rendered as a string — the UI layer treats ids as opaque strings.
pub type WorkerId = String;

/// Worker level. Starts at 1, increases by merging.
pub type Level = u32;

/// The three tracked currencies of the simulated economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// The primary token. Hire and unlock costs are always quoted in EMSX.
    Emsx,
    /// The stable token.
    Usdt,
    /// The reference crypto.
    Btc,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Emsx, Currency::Usdt, Currency::Btc];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Emsx => "EMSX",
            Currency::Usdt => "USDT",
            Currency::Btc => "BTC",
        }
    }
}
