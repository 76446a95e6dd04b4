//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, TowerId};
use crate::enums::*;
use crate::error::CommandError;
use crate::types::Position;

/// Everything noteworthy that happened during a tick, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave_id: u32, wave_number: u32, total: u32 },
    /// Preparation delay over, first spawn is imminent.
    WaveSpawning { wave_id: u32, wave_number: u32 },
    /// Spawn quota exhausted; the bonus has been paid.
    WaveCompleted { wave_id: u32, wave_number: u32, bonus: u32 },
    EnemySpawned { enemy_id: EnemyId, kind: EnemyKind, wave_number: u32 },
    EnemyKilled { enemy_id: EnemyId, kind: EnemyKind, reward: u32, position: Position },
    /// Enemy reached the end of the path.
    EnemyLeaked { enemy_id: EnemyId, kind: EnemyKind, damage: u32 },
    TowerPlaced { tower_id: TowerId, kind: TowerKind, position: Position },
    TowerUpgraded { tower_id: TowerId, level: u32 },
    TowerSold { tower_id: TowerId, refund: u32 },
    TowerFired { tower_id: TowerId, projectile: ProjectileKind },
    ProjectileHit { enemy_id: EnemyId, damage: f64, killed: bool },
    Explosion { position: Position, radius: f64 },
    /// A queued command failed validation.
    CommandRejected { reason: CommandError },
    Defeat { wave: u32, score: u64 },
    Victory { score: u64 },
}
