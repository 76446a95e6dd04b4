//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use std::fmt;

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Stable enemy identifier exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Stable tower identifier used by sell/upgrade commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Identity and fixed stats of an enemy, resolved from its profile at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    /// Scheduler id of the wave that spawned this enemy (statistics only).
    pub wave_id: u32,
    pub wave_number: u32,
    /// Collision radius.
    pub size: f64,
    /// Wave-scaled speed before status effects (units/s).
    pub speed: f64,
    /// Fractional damage reduction in [0, 1).
    pub armor: f64,
    pub reward: u32,
    /// Lives removed when this enemy completes the path.
    pub damage: u32,
    pub flying: bool,
    /// Boss-class: immune to freeze.
    pub boss: bool,
}

/// Health and shield pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f64,
    pub max_health: f64,
    pub shield: f64,
    pub max_shield: f64,
    /// Shield points restored per second.
    pub shield_regen_rate: f64,
    /// Hit-free time required before the shield regenerates (ms).
    pub shield_regen_delay_ms: f64,
    /// Time since the last damaging hit (ms).
    pub time_since_hit_ms: f64,
    /// Health restored per second.
    pub regen_rate: f64,
}

/// Active slow and freeze. Each holds the strongest/longest applied instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Slow magnitude in [0, 1].
    pub slow_effect: f64,
    pub slow_duration_ms: f64,
    pub frozen: bool,
    pub freeze_duration_ms: f64,
}

/// Where an enemy is along the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollower {
    /// Index of the segment currently walked.
    pub segment: usize,
    /// Fraction of the current segment already covered.
    pub progress: f64,
    /// Sideways offset from the path centreline (spawn jitter).
    pub lane_offset: f64,
}

/// Identity and investment of a placed tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub level: u32,
    /// Purchase price plus every upgrade paid.
    pub invested: u32,
}

/// Level-derived tower stats. Recomputed from the profile on every level change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: f64,
    pub range: f64,
    pub fire_rate_ms: f64,
    pub projectile: ProjectileKind,
    pub explosion_radius: f64,
    pub slow_amount: f64,
    pub slow_duration_ms: f64,
    /// Freeze applied on hit, if this level grants one.
    pub freeze_ms: Option<f64>,
    /// Max-level basic towers fire armour-piercing rounds.
    pub penetrating: bool,
}

/// Targeting state of a tower.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireControl {
    /// Weak reference to the current target; validated against the world each tick.
    #[serde(skip)]
    pub target: Option<Entity>,
    /// Virtual time of the last shot (ms).
    pub last_shot_ms: f64,
}

/// Slow carried by a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    pub amount: f64,
    pub duration_ms: f64,
}

/// Flight state of a projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Units/s. Zero for instant projectiles.
    pub speed: f64,
    pub size: f64,
    pub penetrating: bool,
    pub instant: bool,
    pub gravity: bool,
    pub homing: bool,
    pub origin: Position,
    /// Aim point fixed at launch; homing projectiles refresh it every tick.
    pub aim: Position,
    /// Weak reference to the firing tower, for homing lookups.
    #[serde(skip)]
    pub owner: Option<Entity>,
    pub distance_traveled: f64,
    pub max_distance: f64,
    pub age_ms: f64,
    pub lifetime_ms: f64,
    /// Instant hit already applied.
    pub resolved: bool,
    pub remove: bool,
    /// Enemies already struck, so penetrating rounds never hit twice.
    #[serde(skip)]
    pub hits: Vec<Entity>,
}

/// What a projectile does to whatever it hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    pub damage: f64,
    pub damage_type: DamageType,
    pub explosive: bool,
    pub explosion_radius: f64,
    pub slow: Option<SlowEffect>,
    pub freeze_ms: Option<f64>,
}

/// Decorative particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub age_ms: f64,
    pub lifetime_ms: f64,
}
