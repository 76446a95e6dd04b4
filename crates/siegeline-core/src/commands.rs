//! Player commands sent from the UI layer to the simulation.
//!
//! Commands are either executed immediately (`SimulationEngine::execute`)
//! or queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::TowerId;
use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Building ---
    /// Buy and place a tower centred on (x, y).
    PlaceTower { kind: TowerKind, x: f64, y: f64 },
    /// Sell a tower for part of its invested cost.
    SellTower { tower_id: TowerId },
    /// Raise a tower one level.
    UpgradeTower { tower_id: TowerId },

    // --- Waves ---
    /// Request a wave. Earlier waves may still be spawning.
    StartWave { wave_number: u32 },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen clock).
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Throw away the current game and start over.
    Restart,
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    TowerPlaced { tower_id: TowerId, cost: u32 },
    TowerSold { tower_id: TowerId, refund: u32 },
    TowerUpgraded { tower_id: TowerId, level: u32, cost: u32 },
    WaveStarted { wave_id: u32, wave_number: u32 },
    /// Control commands with nothing further to report.
    Applied,
}
