//! Selection mediation tests: how clicks translate into hires, moves,
//! merges, and selection changes.

use minegrid_core::command::GameCommand;
use minegrid_core::engine::GameEngine;
use minegrid_core::error::GameResult;
use minegrid_core::event::GameEvent;

/// Selecting a kind clears any selected worker, and vice versa — the two
/// pending modes are mutually exclusive.
#[test]
fn kind_and_worker_selection_are_exclusive() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;

    engine.apply(GameCommand::ClearSelection)?;
    engine.apply(GameCommand::CellClick { position: 0 })?; // select the worker
    assert!(engine.selected_worker_id().is_some());
    assert_eq!(engine.pending_kind(), None);

    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    assert_eq!(engine.pending_kind(), Some("basic"));
    assert_eq!(engine.selected_worker_id(), None);
    Ok(())
}

/// Clicking an empty unlocked cell with a worker pending moves that worker.
#[test]
fn pending_worker_click_on_empty_cell_moves() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    engine.apply(GameCommand::ClearSelection)?;

    engine.apply(GameCommand::CellClick { position: 0 })?;
    let events = engine.apply(GameCommand::CellClick { position: 2 })?;

    assert!(matches!(
        events.as_slice(),
        [GameEvent::WorkerMoved { from: 0, to: 2, .. }]
    ));
    assert!(engine.worker_at(0).is_none());
    assert_eq!(engine.worker_at(2).unwrap().kind, "basic");
    // The move consumes the selection.
    assert_eq!(engine.selected_worker_id(), None);
    Ok(())
}

/// Clicking an empty cell with nothing pending does nothing.
#[test]
fn empty_click_without_selection_is_inert() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    let events = engine.apply(GameCommand::CellClick { position: 1 })?;
    assert!(events.is_empty());
    Ok(())
}

/// Removing the selected worker clears the selection.
#[test]
fn removal_clears_selection() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    engine.apply(GameCommand::ClearSelection)?;

    engine.apply(GameCommand::CellClick { position: 0 })?;
    let id = engine.selected_worker_id().unwrap().to_string();
    engine.apply(GameCommand::RemoveClick { worker_id: id })?;

    assert_eq!(engine.selected_worker_id(), None);
    assert_eq!(engine.worker_count(), 0);
    Ok(())
}

/// A full click-driven session keeps grid occupancy and worker positions
/// consistent at every step.
#[test]
fn occupancy_stays_consistent_across_a_session() -> GameResult<()> {
    let mut engine = GameEngine::build_test()?;
    let script = [
        GameCommand::HireClick { kind: "basic".into() },
        GameCommand::CellClick { position: 0 },
        GameCommand::Tick { elapsed_seconds: 300.0 },
        GameCommand::CellClick { position: 1 },
        GameCommand::ClearSelection,
        GameCommand::CellClick { position: 0 },
        GameCommand::CellClick { position: 1 }, // merge
        GameCommand::Tick { elapsed_seconds: 60.0 },
        GameCommand::CellClick { position: 1 }, // empty after the merge
        GameCommand::CellClick { position: 2 },
    ];
    for command in script {
        engine.apply(command)?;

        for cell in engine.cells() {
            if let Some(id) = &cell.occupant {
                let worker = engine.worker(id).expect("occupant must be alive");
                assert_eq!(worker.position, cell.position);
            }
        }
        for worker in engine.workers() {
            assert_eq!(
                engine.cells()[worker.position].occupant.as_deref(),
                Some(worker.id.as_str())
            );
        }
    }
    Ok(())
}
