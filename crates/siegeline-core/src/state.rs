//! Game state snapshot: the read-only view handed to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, TowerId};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub waves: Vec<WaveView>,
    pub economy: EconomyView,
    pub events: Vec<GameEvent>,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub size: f64,
    /// Health / max health, in [0, 1].
    pub health_fraction: f64,
    /// Shield / max shield, 0 for unshielded enemies.
    pub shield_fraction: f64,
    pub slowed: bool,
    pub frozen: bool,
    pub flying: bool,
    pub wave_number: u32,
}

/// A placed tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub tower_id: TowerId,
    pub kind: TowerKind,
    pub position: Position,
    pub level: u32,
    pub max_level: u32,
    pub range: f64,
    pub damage: f64,
    /// Cost of the next upgrade, `None` at max level.
    pub upgrade_cost: Option<u32>,
    pub sell_value: u32,
    /// Position of the current target, for aiming the barrel.
    pub target: Option<Position>,
}

/// A projectile in flight (or a lingering beam).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Position,
    pub origin: Position,
    pub aim: Position,
    pub size: f64,
}

/// A decorative particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub position: Position,
    /// Remaining life in [0, 1], for fading.
    pub life_fraction: f64,
}

/// A wave that is still spawning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_id: u32,
    pub wave_number: u32,
    pub spawned: u32,
    pub total: u32,
    pub spawning: bool,
}

/// Economy and progression figures for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub money: u32,
    pub score: u64,
    pub wave: u32,
    pub lives: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub towers_built: u32,
    pub projectiles_fired: u32,
    pub waves_completed: u32,
}
