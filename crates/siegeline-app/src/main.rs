use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::info;

use siegeline_app::autopilot::Autopilot;
use siegeline_app::highscores::{HighScoreEntry, HighScoreTable};
use siegeline_app::state::AppState;
use siegeline_app::{config, game_loop, logging};
use siegeline_core::enums::GamePhase;

/// How often the autopilot looks at the latest snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const DEFAULT_SCORES_FILE: &str = "siegeline-scores.json";

/// Usage: `siegeline [config.json]`. High scores go to `$SIEGELINE_SCORES`
/// or `siegeline-scores.json` in the working directory.
fn main() -> Result<()> {
    logging::init_logging()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let scores_path = std::env::var_os("SIEGELINE_SCORES")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_FILE));

    let config = config::load_config(config_path.as_deref())?;
    let mut pilot = Autopilot::new(&config);
    info!(
        seed = config.seed,
        difficulty = ?config.difficulty,
        sites = pilot.sites().len(),
        "starting autopilot game"
    );

    let state = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;
    state.attach(tx)?;

    let outcome = loop {
        std::thread::sleep(POLL_INTERVAL);
        let Some(snapshot) = state.latest()? else {
            continue;
        };
        if matches!(snapshot.phase, GamePhase::Defeat | GamePhase::Victory) {
            break snapshot.phase;
        }
        for command in pilot.plan(&snapshot) {
            state.send(command)?;
        }
    };

    state.shutdown()?;
    let economy = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    let mut table = HighScoreTable::load(&scores_path)?;
    let rank = table.insert(HighScoreEntry::new("autopilot", economy.score, economy.wave));
    table.save(&scores_path)?;

    info!(
        outcome = ?outcome,
        score = economy.score,
        wave = economy.wave,
        kills = economy.enemies_killed,
        leaks = economy.enemies_leaked,
        rank = ?rank.map(|r| r + 1),
        "game finished"
    );
    Ok(())
}
