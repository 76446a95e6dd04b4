//! Game loop thread: drives the simulation engine with measured frame deltas.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via an `mpsc` channel; each frame's snapshot is stored in shared
//! state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use siegeline_core::enums::GamePhase;
use siegeline_core::state::{EconomyView, GameStateSnapshot};
use siegeline_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Target spacing between frames (~60 Hz). Actual deltas are measured.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Wall-clock time between consecutive frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Milliseconds since the previous frame.
    pub fn delta_ms(&mut self) -> f64 {
        self.delta_at(Instant::now())
    }

    pub fn delta_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed.as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the final economy
/// figures once the loop shuts down.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<EconomyView>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("siegeline-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> EconomyView {
    let mut engine = SimulationEngine::new(config);
    let mut clock = FrameClock::new();
    let mut next_frame = Instant::now();
    let mut last_phase = engine.phase();

    info!(seed = engine.config().seed, "game loop started");

    loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return engine.economy();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the measured frame time (engine clamps and scales it)
        let snapshot = engine.tick(clock.delta_ms());
        if snapshot.phase != last_phase {
            debug!(from = ?last_phase, to = ?snapshot.phase, "phase changed");
            if matches!(snapshot.phase, GamePhase::Defeat | GamePhase::Victory) {
                info!(
                    phase = ?snapshot.phase,
                    score = snapshot.economy.score,
                    wave = snapshot.economy.wave,
                    "game over"
                );
            }
            last_phase = snapshot.phase;
        }

        // 3. Publish for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame += FRAME_INTERVAL;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > FRAME_INTERVAL * 2 {
            // Too far behind; the engine clamps long frames anyway.
            next_frame = now;
        }
    }
}
