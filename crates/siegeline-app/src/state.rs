//! Host state shared between the driver thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use siegeline_core::commands::PlayerCommand;
use siegeline_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// The sender sits behind a `Mutex` (it is `Send` but not `Sync`); the latest
/// snapshot is shared with the game loop thread through an `Arc`.
pub struct AppState {
    /// `None` until the game loop has been started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the command channel of a freshly started game loop.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) -> Result<()> {
        let mut lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
        if lock.is_some() {
            return Err(anyhow!("game loop already running"));
        }
        *lock = Some(tx);
        Ok(())
    }

    /// Forward a player command to the game loop.
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.send_raw(GameLoopCommand::PlayerCommand(command))
    }

    /// Ask the game loop to stop.
    pub fn shutdown(&self) -> Result<()> {
        self.send_raw(GameLoopCommand::Shutdown)
    }

    /// Clone of the most recent snapshot, if any frame has run yet.
    pub fn latest(&self) -> Result<Option<GameStateSnapshot>> {
        let lock = self
            .latest_snapshot
            .lock()
            .map_err(|e| anyhow!("snapshot lock poisoned: {e}"))?;
        Ok(lock.clone())
    }

    fn send_raw(&self, command: GameLoopCommand) -> Result<()> {
        let lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
        match lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| anyhow!("game loop stopped: {e}")),
            None => Err(anyhow!("game loop not started")),
        }
    }
}
