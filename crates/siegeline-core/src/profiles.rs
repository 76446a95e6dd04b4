//! Archetype stat tables.
//!
//! The single source of balance numbers for enemies, towers and projectiles.
//! Instances copy or derive their fields from these records at spawn time.

use crate::constants::*;
use crate::enums::{DamageType, EnemyKind, ProjectileKind, TowerKind};

/// Base stats for an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub health: f64,
    /// Base speed before wave scaling (units/s).
    pub speed: f64,
    /// Fractional damage reduction.
    pub armor: f64,
    pub shield: f64,
    /// Shield points restored per second once the regen delay has passed.
    pub shield_regen_rate: f64,
    /// Time without being hit before the shield starts regenerating (ms).
    pub shield_regen_delay_ms: f64,
    /// Health restored per second.
    pub regen_rate: f64,
    pub reward: u32,
    /// Lives removed when this enemy completes the path.
    pub damage: u32,
    /// Collision radius.
    pub size: f64,
    pub flying: bool,
    /// Boss-class enemies are immune to freeze.
    pub boss: bool,
}

/// Base stats for a tower archetype at level 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerProfile {
    pub cost: u32,
    /// Cost of the first upgrade; later upgrades multiply it by the current level.
    pub upgrade_cost: u32,
    pub max_level: u32,
    pub damage: f64,
    pub range: f64,
    /// Minimum time between shots (ms).
    pub fire_rate_ms: f64,
    pub projectile: ProjectileKind,
    /// Splash radius for explosive projectiles, 0 otherwise.
    pub explosion_radius: f64,
    /// Slow magnitude applied on hit, 0 for none.
    pub slow_amount: f64,
    pub slow_duration_ms: f64,
}

/// Flight characteristics of a projectile archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileProfile {
    /// Units/s. Ignored for instant projectiles.
    pub speed: f64,
    pub size: f64,
    pub penetrating: bool,
    pub explosive: bool,
    /// Resolves along a beam in the tick it is fired.
    pub instant: bool,
    pub gravity: bool,
    /// Re-aims at the owning tower's target every tick.
    pub homing: bool,
    /// Travel budget (units). `None` means the firing tower's range.
    pub max_distance: Option<f64>,
    pub lifetime_ms: f64,
    pub damage_type: DamageType,
}

/// Get the stat record for an enemy archetype.
pub fn enemy_profile(kind: EnemyKind) -> EnemyProfile {
    let base = EnemyProfile {
        health: 150.0,
        speed: 50.0,
        armor: 0.0,
        shield: 0.0,
        shield_regen_rate: 0.0,
        shield_regen_delay_ms: 0.0,
        regen_rate: 0.0,
        reward: 10,
        damage: 1,
        size: 12.0,
        flying: false,
        boss: false,
    };

    match kind {
        EnemyKind::Basic => base,
        EnemyKind::Fast => EnemyProfile {
            health: 90.0,
            speed: 100.0,
            reward: 12,
            size: 10.0,
            ..base
        },
        EnemyKind::Heavy => EnemyProfile {
            health: 400.0,
            speed: 30.0,
            armor: 0.2,
            reward: 25,
            damage: 2,
            size: 16.0,
            ..base
        },
        EnemyKind::Armored => EnemyProfile {
            health: 300.0,
            speed: 40.0,
            armor: 0.4,
            reward: 20,
            damage: 2,
            size: 14.0,
            ..base
        },
        EnemyKind::Flying => EnemyProfile {
            health: 120.0,
            speed: 70.0,
            reward: 15,
            size: 11.0,
            flying: true,
            ..base
        },
        EnemyKind::Boss => EnemyProfile {
            health: 2000.0,
            speed: 25.0,
            armor: 0.3,
            regen_rate: 5.0,
            reward: 150,
            damage: 10,
            size: 26.0,
            boss: true,
            ..base
        },
        EnemyKind::Ultra => EnemyProfile {
            health: 5000.0,
            speed: 20.0,
            armor: 0.45,
            shield: 1000.0,
            shield_regen_rate: 50.0,
            shield_regen_delay_ms: 4000.0,
            regen_rate: 10.0,
            reward: 400,
            damage: 20,
            size: 30.0,
            boss: true,
            ..base
        },
        EnemyKind::Swarm => EnemyProfile {
            health: 50.0,
            speed: 80.0,
            reward: 4,
            size: 8.0,
            ..base
        },
        EnemyKind::Shielded => EnemyProfile {
            health: 350.0,
            speed: 45.0,
            shield: 200.0,
            shield_regen_rate: 20.0,
            shield_regen_delay_ms: 3000.0,
            reward: 22,
            damage: 2,
            size: 14.0,
            ..base
        },
    }
}

/// Get the level-1 stat record for a tower archetype.
pub fn tower_profile(kind: TowerKind) -> TowerProfile {
    match kind {
        TowerKind::Basic => TowerProfile {
            cost: 50,
            upgrade_cost: 40,
            max_level: 5,
            damage: 20.0,
            range: 120.0,
            fire_rate_ms: 500.0,
            projectile: ProjectileKind::Bullet,
            explosion_radius: 0.0,
            slow_amount: 0.0,
            slow_duration_ms: 0.0,
        },
        TowerKind::Cannon => TowerProfile {
            cost: 120,
            upgrade_cost: 90,
            max_level: 4,
            damage: 60.0,
            range: 140.0,
            fire_rate_ms: 1500.0,
            projectile: ProjectileKind::Cannonball,
            explosion_radius: 60.0,
            slow_amount: 0.0,
            slow_duration_ms: 0.0,
        },
        TowerKind::Laser => TowerProfile {
            cost: 150,
            upgrade_cost: 110,
            max_level: 4,
            damage: 35.0,
            range: 180.0,
            fire_rate_ms: 800.0,
            projectile: ProjectileKind::Laser,
            explosion_radius: 0.0,
            slow_amount: 0.0,
            slow_duration_ms: 0.0,
        },
        TowerKind::Ice => TowerProfile {
            cost: 100,
            upgrade_cost: 75,
            max_level: 4,
            damage: 10.0,
            range: 110.0,
            fire_rate_ms: 1000.0,
            projectile: ProjectileKind::Ice,
            explosion_radius: 0.0,
            slow_amount: 0.5,
            slow_duration_ms: 2000.0,
        },
    }
}

/// Get the flight record for a projectile archetype.
pub fn projectile_profile(kind: ProjectileKind) -> ProjectileProfile {
    match kind {
        ProjectileKind::Bullet => ProjectileProfile {
            speed: 400.0,
            size: 3.0,
            penetrating: false,
            explosive: false,
            instant: false,
            gravity: false,
            homing: false,
            max_distance: Some(600.0),
            lifetime_ms: 3000.0,
            damage_type: DamageType::Physical,
        },
        ProjectileKind::Cannonball => ProjectileProfile {
            speed: 300.0,
            size: 6.0,
            penetrating: false,
            explosive: true,
            instant: false,
            gravity: true,
            homing: false,
            max_distance: Some(700.0),
            lifetime_ms: 4000.0,
            damage_type: DamageType::Explosive,
        },
        ProjectileKind::Laser => ProjectileProfile {
            speed: 0.0,
            size: 2.0,
            penetrating: true,
            explosive: false,
            instant: true,
            gravity: false,
            homing: false,
            max_distance: None,
            lifetime_ms: 100.0,
            damage_type: DamageType::Laser,
        },
        ProjectileKind::Ice => ProjectileProfile {
            speed: 250.0,
            size: 5.0,
            penetrating: false,
            explosive: false,
            instant: false,
            gravity: false,
            homing: false,
            max_distance: Some(600.0),
            lifetime_ms: 3000.0,
            damage_type: DamageType::Ice,
        },
        ProjectileKind::Missile => ProjectileProfile {
            speed: 350.0,
            size: 5.0,
            penetrating: false,
            explosive: true,
            instant: false,
            gravity: false,
            homing: true,
            max_distance: Some(900.0),
            lifetime_ms: 5000.0,
            damage_type: DamageType::Explosive,
        },
    }
}

/// Wave speed multiplier: `min(8, 1 + (w-1)*0.25 + max(0, w-5)^1.5 * 0.1)`.
pub fn speed_multiplier(wave: u32) -> f64 {
    let w = wave.max(1) as f64;
    let late = (w - 5.0).max(0.0).powf(1.5) * 0.1;
    (1.0 + (w - 1.0) * 0.25 + late).min(SPEED_MULTIPLIER_CAP)
}

/// Wave-scaled enemy speed, floored to whole units and never below the minimum.
pub fn scaled_speed(base_speed: f64, wave: u32) -> f64 {
    (base_speed * speed_multiplier(wave))
        .floor()
        .max(MIN_ENEMY_SPEED)
}

/// Wave-scaled health (also used for shields).
pub fn scaled_health(base: f64, wave: u32) -> f64 {
    let w = wave.max(1) as f64;
    (base * (1.0 + (w - 1.0) * HEALTH_SCALING_PER_WAVE)).floor()
}
