//! Reasons a player command can be rejected.
//!
//! A rejected command never mutates simulation state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::TowerId;

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandError {
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("position ({x:.0}, {y:.0}) is outside the playable area")]
    OutOfBounds { x: f64, y: f64 },
    #[error("position ({x:.0}, {y:.0}) is too close to the enemy path")]
    BlockedByPath { x: f64, y: f64 },
    #[error("position overlaps tower {tower}")]
    OverlapsTower { tower: TowerId },
    #[error("no tower with id {tower}")]
    UnknownTower { tower: TowerId },
    #[error("tower {tower} is already at max level {level}")]
    MaxLevel { tower: TowerId, level: u32 },
    #[error("wave {wave} cannot be started (next startable wave is {next})")]
    InvalidWave { wave: u32, next: u32 },
    #[error("wave {wave} is already in progress")]
    WaveAlreadyActive { wave: u32 },
    #[error("the game is not running")]
    GameNotRunning,
}
