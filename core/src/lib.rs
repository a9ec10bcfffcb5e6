//! minegrid-core — the simulation core of an idle mining game.
//!
//! A grid of cells, workers that occupy them, and three currency balances
//! that accrue per second from the active worker set. The UI layer is an
//! external collaborator: it sends [`command::GameCommand`]s in, reads
//! state and [`event::GameEvent`]s back, and never mutates anything itself.
//!
//! Single-threaded and event-driven: commands and the periodic accrual tick
//! interleave only at call boundaries, each running to completion.

pub mod clock;
pub mod command;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod selection;
pub mod snapshot;
pub mod statement;
pub mod store;
pub mod types;
pub mod worker;
