//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Resolves balance stats through `profiles::enemy_profile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Heavy,
    Armored,
    Flying,
    Boss,
    Ultra,
    Swarm,
    Shielded,
}

/// Tower archetype. Resolves balance stats through `profiles::tower_profile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    #[default]
    Basic,
    Cannon,
    Laser,
    Ice,
}

/// Projectile archetype. Resolves flight stats through `profiles::projectile_profile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Bullet,
    Cannonball,
    Laser,
    Ice,
    Missile,
}

/// Damage flavour carried by a projectile, used for per-enemy bonus modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    #[default]
    Physical,
    Explosive,
    Laser,
    Ice,
}

/// Decorative particle flavour, for the presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Debris from a killed enemy.
    Death,
    /// Fireball from an explosive detonation.
    Explosion,
    /// Spark from a direct hit.
    Hit,
    /// Frost mist from an ice hit.
    Frost,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
    /// Defender health reached zero.
    Defeat,
    /// The final wave has been cleared from the schedule.
    Victory,
}

/// Difficulty setting. Scales starting resources and wave bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 9] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Heavy,
        EnemyKind::Armored,
        EnemyKind::Flying,
        EnemyKind::Boss,
        EnemyKind::Ultra,
        EnemyKind::Swarm,
        EnemyKind::Shielded,
    ];

    /// Resolve a lowercase type tag. Unknown tags fall back to `Basic`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "basic" => EnemyKind::Basic,
            "fast" => EnemyKind::Fast,
            "heavy" => EnemyKind::Heavy,
            "armored" => EnemyKind::Armored,
            "flying" => EnemyKind::Flying,
            "boss" => EnemyKind::Boss,
            "ultra" => EnemyKind::Ultra,
            "swarm" => EnemyKind::Swarm,
            "shielded" => EnemyKind::Shielded,
            _ => EnemyKind::default(),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Heavy => "heavy",
            EnemyKind::Armored => "armored",
            EnemyKind::Flying => "flying",
            EnemyKind::Boss => "boss",
            EnemyKind::Ultra => "ultra",
            EnemyKind::Swarm => "swarm",
            EnemyKind::Shielded => "shielded",
        }
    }
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Basic,
        TowerKind::Cannon,
        TowerKind::Laser,
        TowerKind::Ice,
    ];

    /// Resolve a lowercase type tag. Unknown tags fall back to `Basic`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "basic" => TowerKind::Basic,
            "cannon" => TowerKind::Cannon,
            "laser" => TowerKind::Laser,
            "ice" => TowerKind::Ice,
            _ => TowerKind::default(),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            TowerKind::Basic => "basic",
            TowerKind::Cannon => "cannon",
            TowerKind::Laser => "laser",
            TowerKind::Ice => "ice",
        }
    }

    /// Only beam weapons reach airborne enemies.
    pub fn can_hit_flying(self) -> bool {
        matches!(self, TowerKind::Laser)
    }
}

impl ProjectileKind {
    /// Resolve a lowercase type tag. Unknown tags fall back to `Bullet`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "bullet" => ProjectileKind::Bullet,
            "cannonball" => ProjectileKind::Cannonball,
            "laser" => ProjectileKind::Laser,
            "ice" => ProjectileKind::Ice,
            "missile" => ProjectileKind::Missile,
            _ => ProjectileKind::default(),
        }
    }
}

impl Difficulty {
    /// Multiplier applied to wave completion bonuses.
    pub fn bonus_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
        }
    }
}
