//! Hiring tests: cost debiting, atomicity, and affordance predicates.

use minegrid_core::command::GameCommand;
use minegrid_core::engine::GameEngine;
use minegrid_core::error::{GameError, GameResult};

/// Starting at 100 EMSX, hiring a basic miner (cost 80) into slot 3
/// succeeds, leaves 20 EMSX, and yields exactly one worker.
#[test]
fn hire_debits_cost_and_creates_worker() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    assert_eq!(engine.balances().emsx, 100.0);

    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    let events = engine.apply(GameCommand::CellClick { position: 3 })?;

    assert_eq!(events.len(), 1);
    assert_eq!(engine.balances().emsx, 20.0);
    assert_eq!(engine.worker_count(), 1);
    assert_eq!(engine.worker_at(3).unwrap().kind, "basic");
    assert_eq!(engine.worker_at(3).unwrap().level, 1);
    Ok(())
}

/// A rejected placement must not cost anything: the balance after a failed
/// hire equals its pre-call value exactly.
#[test]
fn failed_hire_is_free() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    let before = engine.balances().emsx;

    // Clicking the occupied cell while a kind is pending selects the
    // occupant instead of hiring — still no charge.
    engine.apply(GameCommand::CellClick { position: 0 })?;
    assert_eq!(engine.balances().emsx, before);
    assert_eq!(engine.worker_count(), 1);
    Ok(())
}

/// With 20 EMSX left, a second basic miner (cost 80) is not affordable.
#[test]
fn hire_rejects_insufficient_funds() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    assert!(!engine.can_hire_worker("basic"));

    let err = engine.apply(GameCommand::CellClick { position: 1 }).unwrap_err();
    assert!(matches!(err, GameError::InsufficientFunds { needed, available }
        if needed == 80.0 && available == 20.0));
    assert_eq!(engine.worker_count(), 1);
    assert_eq!(engine.balances().emsx, 20.0);
    Ok(())
}

/// Clicking a locked cell does nothing — no hire, no error, no events.
#[test]
fn locked_cell_click_is_inert() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;

    // Default config unlocks positions 0..4 only.
    let events = engine.apply(GameCommand::CellClick { position: 10 })?;
    assert!(events.is_empty());
    assert_eq!(engine.worker_count(), 0);
    assert_eq!(engine.balances().emsx, 100.0);
    Ok(())
}

/// ConfirmHire places into the first free unlocked cell, and fails with
/// NoSelection when no kind is pending.
#[test]
fn confirm_hire_uses_first_free_cell() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    let err = engine.apply(GameCommand::ConfirmHire).unwrap_err();
    assert!(matches!(err, GameError::NoSelection));

    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::ConfirmHire)?;
    assert!(engine.worker_at(0).is_some());
    Ok(())
}

/// Unknown kinds are rejected at selection time and by the predicate.
#[test]
fn unknown_kind_is_rejected() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    assert!(!engine.can_hire_worker("quantum"));
    let err = engine
        .apply(GameCommand::HireClick { kind: "quantum".into() })
        .unwrap_err();
    assert!(matches!(err, GameError::UnknownWorkerKind { .. }));
    Ok(())
}

/// Hiring recomputes accrual rates from the new worker set.
#[test]
fn hire_updates_rates() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    assert_eq!(engine.rates().emsx, 0.0);

    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    assert_eq!(engine.rates().emsx, 1.0);
    Ok(())
}
