//! mine-runner: headless session runner for the minegrid core.
//!
//! Usage:
//!   mine-runner                              # fresh demo session
//!   mine-runner --db save.db                 # persist the session
//!   mine-runner --db save.db --resume        # continue the latest save
//!   mine-runner --script session.json        # replay a JSON command list
//!   mine-runner --bot 200 --seed 7           # seeded random soak run
//!   mine-runner --catalog kinds.json --json  # catalog override, JSON summary

use anyhow::Result;
use minegrid_core::{
    command::GameCommand,
    config::{GameConfig, WorkerCatalog},
    engine::GameEngine,
    store::SaveStore,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::env;
use std::path::Path;

/// End-of-run state for machine consumers (--json).
#[derive(serde::Serialize)]
struct RunSummary {
    save_id: String,
    workers: usize,
    unlocked_slots: usize,
    next_unlock_cost: f64,
    currencies: Vec<CurrencySummary>,
}

#[derive(serde::Serialize)]
struct CurrencySummary {
    symbol: &'static str,
    balance: f64,
    rate: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let script = args.windows(2).find(|w| w[0] == "--script").map(|w| w[1].clone());
    let bot_steps = parse_arg(&args, "--bot", 0u64);
    let seed = parse_arg(&args, "--seed", 42u64);
    let resume = args.iter().any(|a| a == "--resume");
    let json_summary = args.iter().any(|a| a == "--json");

    let config = GameConfig::default();
    let catalog = match args.windows(2).find(|w| w[0] == "--catalog") {
        Some(w) => WorkerCatalog::from_path(Path::new(&w[1]))?,
        None => WorkerCatalog::builtin()?,
    };
    let store = if db == ":memory:" {
        SaveStore::in_memory()?
    } else {
        SaveStore::open(db)?
    };

    let mut engine = if resume {
        let (engine, started) = GameEngine::resume(config, catalog, store)?;
        println!("Resumed: {}", serde_json::to_string(&started)?);
        engine
    } else {
        GameEngine::new_game(config, catalog, store)?
    };

    if let Some(path) = script {
        replay_script(&mut engine, &path)?;
    } else if bot_steps > 0 {
        run_bot(&mut engine, bot_steps, seed)?;
    } else {
        run_demo(&mut engine)?;
    }

    engine.save()?;
    if json_summary {
        println!("{}", serde_json::to_string_pretty(&summarize(&engine))?);
    } else {
        print_summary(&engine);
    }
    Ok(())
}

/// A short scripted session: hire, accrue, expand, merge.
fn run_demo(engine: &mut GameEngine) -> Result<()> {
    engine.apply(GameCommand::HireClick { kind: "basic".into() })?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    engine.apply(GameCommand::Tick { elapsed_seconds: 120.0 })?;
    engine.apply(GameCommand::CellClick { position: 1 })?;
    engine.apply(GameCommand::Tick { elapsed_seconds: 120.0 })?;
    // One real-time step, the way a UI timer would drive it.
    engine.tick_from_clock()?;

    // Merge the two basics: click the first, then the second.
    engine.apply(GameCommand::ClearSelection)?;
    engine.apply(GameCommand::CellClick { position: 0 })?;
    engine.apply(GameCommand::CellClick { position: 1 })?;

    if engine.can_unlock_slot(4) {
        engine.apply(GameCommand::UnlockClick { position: 4 })?;
    }
    Ok(())
}

/// Replay a JSON array of GameCommands. Expected failures (a click the UI
/// would have disabled) are logged and skipped, matching how a stale UI is
/// handled.
fn replay_script(engine: &mut GameEngine, path: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let commands: Vec<GameCommand> = serde_json::from_str(&raw)?;
    log::info!("Replaying {} commands from {path}", commands.len());
    for command in commands {
        if let Err(err) = engine.apply(command.clone()) {
            log::warn!("Rejected {:?}: {err}", command);
        }
    }
    Ok(())
}

/// Seeded random soak run. Every command is legal to ATTEMPT; rejections are
/// expected. Afterward the occupancy invariant is asserted.
fn run_bot(engine: &mut GameEngine, steps: u64, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let kinds: Vec<String> = engine
        .catalog()
        .kinds()
        .iter()
        .map(|k| k.kind.clone())
        .collect();
    let grid_size = engine.cells().len();

    for _ in 0..steps {
        let command = match rng.gen_range(0..6) {
            0 => GameCommand::HireClick { kind: kinds[rng.gen_range(0..kinds.len())].clone() },
            1 | 2 => GameCommand::CellClick { position: rng.gen_range(0..grid_size) },
            3 => GameCommand::UnlockClick { position: rng.gen_range(0..grid_size) },
            4 => GameCommand::Tick { elapsed_seconds: rng.gen_range(1.0..30.0) },
            _ => match engine.selected_worker() {
                Some(w) => GameCommand::RemoveClick { worker_id: w.id.clone() },
                None => GameCommand::ClearSelection,
            },
        };
        if let Err(err) = engine.apply(command) {
            log::debug!("Bot command rejected: {err}");
        }
    }

    // Occupancy must survive anything the bot did.
    for cell in engine.cells() {
        if let Some(id) = &cell.occupant {
            let worker = engine
                .worker(id)
                .unwrap_or_else(|| panic!("cell {} references dead worker {id}", cell.position));
            assert_eq!(worker.position, cell.position);
        }
    }
    log::info!("Bot run complete: {} workers alive", engine.worker_count());
    Ok(())
}

fn summarize(engine: &GameEngine) -> RunSummary {
    RunSummary {
        save_id: engine.save_id.clone(),
        workers: engine.worker_count(),
        unlocked_slots: engine.unlocked_slots(),
        next_unlock_cost: engine.unlock_cost(),
        currencies: engine
            .statement()
            .lines
            .iter()
            .map(|line| CurrencySummary {
                symbol: line.symbol,
                balance: line.balance,
                rate: line.rate,
            })
            .collect(),
    }
}

fn print_summary(engine: &GameEngine) {
    println!(
        "Workers: {}  Slots: {}  Next unlock: {:.0} EMSX",
        engine.worker_count(),
        engine.unlocked_slots(),
        engine.unlock_cost()
    );
    for line in &engine.statement().lines {
        println!("{:>5}  {:>12}  +{}/s", line.symbol, line.balance_display, line.rate_display);
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
