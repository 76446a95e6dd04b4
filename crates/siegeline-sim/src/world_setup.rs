//! Entity spawn factories.
//!
//! Builds enemy, tower, projectile and particle component bundles from the
//! profile tables in `siegeline_core::profiles`.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use siegeline_core::components::*;
use siegeline_core::constants::*;
use siegeline_core::enums::*;
use siegeline_core::path::EnemyPath;
use siegeline_core::profiles::{
    enemy_profile, projectile_profile, scaled_health, scaled_speed, tower_profile,
};
use siegeline_core::types::{Position, Velocity};

/// Derive a tower's stats for a level. Always recomputed from the base
/// profile, never accumulated across upgrades.
pub fn tower_stats(kind: TowerKind, level: u32) -> TowerStats {
    let profile = tower_profile(kind);
    let level = level.clamp(1, profile.max_level);
    let steps = (level - 1) as f64;
    let at_max = level == profile.max_level;

    let projectile = match kind {
        TowerKind::Cannon if at_max => ProjectileKind::Missile,
        _ => profile.projectile,
    };

    let (slow_amount, slow_duration_ms) = if profile.slow_amount > 0.0 {
        (
            (profile.slow_amount + 0.05 * steps).min(0.8),
            profile.slow_duration_ms + 250.0 * steps,
        )
    } else {
        (0.0, 0.0)
    };

    let freeze_ms = (kind == TowerKind::Ice && level >= ICE_FREEZE_MIN_LEVEL)
        .then_some(ICE_FREEZE_DURATION_MS);

    TowerStats {
        damage: profile.damage * (1.0 + 0.5 * steps),
        range: profile.range * (1.0 + 0.1 * steps),
        fire_rate_ms: profile.fire_rate_ms * 0.9_f64.powi(steps as i32),
        projectile,
        explosion_radius: profile.explosion_radius * (1.0 + 0.15 * steps),
        slow_amount,
        slow_duration_ms,
        freeze_ms,
        penetrating: kind == TowerKind::Basic && at_max,
    }
}

/// Place a level-1 tower. Its fire clock starts at placement time.
pub fn spawn_tower(
    world: &mut World,
    id: TowerId,
    kind: TowerKind,
    position: Position,
    now_ms: f64,
) -> Entity {
    let profile = tower_profile(kind);
    world.spawn((
        Tower {
            id,
            kind,
            level: 1,
            invested: profile.cost,
        },
        tower_stats(kind, 1),
        FireControl {
            target: None,
            last_shot_ms: now_ms,
        },
        position,
    ))
}

/// Spawn an enemy at the path start, shifted sideways by `lane_offset`,
/// with health, shield and speed scaled for `wave_number`.
pub fn spawn_enemy(
    world: &mut World,
    path: &EnemyPath,
    id: EnemyId,
    kind: EnemyKind,
    wave_id: u32,
    wave_number: u32,
    lane_offset: f64,
) -> Entity {
    let profile = enemy_profile(kind);
    let health = scaled_health(profile.health, wave_number);
    let shield = scaled_health(profile.shield, wave_number);

    world.spawn((
        Enemy {
            id,
            kind,
            wave_id,
            wave_number,
            size: profile.size,
            speed: scaled_speed(profile.speed, wave_number),
            armor: profile.armor,
            reward: profile.reward,
            damage: profile.damage,
            flying: profile.flying,
            boss: profile.boss,
        },
        Vitals {
            health,
            max_health: health,
            shield,
            max_shield: shield,
            shield_regen_rate: profile.shield_regen_rate,
            shield_regen_delay_ms: profile.shield_regen_delay_ms,
            time_since_hit_ms: 0.0,
            regen_rate: profile.regen_rate,
        },
        StatusEffects::default(),
        PathFollower {
            segment: 0,
            progress: 0.0,
            lane_offset,
        },
        path.point_at(0, 0.0, lane_offset),
    ))
}

/// Launch a projectile from a tower toward `aim`.
pub fn spawn_projectile(
    world: &mut World,
    stats: &TowerStats,
    origin: Position,
    aim: Position,
    owner: Option<Entity>,
) -> Entity {
    let profile = projectile_profile(stats.projectile);
    let direction = origin.direction_to(&aim);

    let mut velocity = if profile.instant {
        Velocity::default()
    } else {
        Velocity::along(direction, profile.speed)
    };
    if profile.gravity && profile.speed > 0.0 {
        // Loft so the arc comes back to the ground at the aim point.
        let flight_secs = origin.range_to(&aim) / profile.speed;
        velocity.z = PROJECTILE_GRAVITY * flight_secs / 2.0;
    }

    let slow = (stats.slow_amount > 0.0).then_some(SlowEffect {
        amount: stats.slow_amount,
        duration_ms: stats.slow_duration_ms,
    });

    world.spawn((
        Projectile {
            kind: stats.projectile,
            speed: if profile.instant { 0.0 } else { profile.speed },
            size: profile.size,
            penetrating: profile.penetrating || stats.penetrating,
            instant: profile.instant,
            gravity: profile.gravity,
            homing: profile.homing,
            origin,
            aim,
            owner,
            distance_traveled: 0.0,
            max_distance: profile.max_distance.unwrap_or(stats.range),
            age_ms: 0.0,
            lifetime_ms: profile.lifetime_ms,
            resolved: false,
            remove: false,
            hits: Vec::new(),
        },
        Payload {
            damage: stats.damage,
            damage_type: profile.damage_type,
            explosive: profile.explosive,
            explosion_radius: stats.explosion_radius,
            slow,
            freeze_ms: stats.freeze_ms,
        },
        origin,
        velocity,
    ))
}

/// Scatter `count` decorative particles around `position`.
pub fn spawn_particles(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: ParticleKind,
    position: Position,
    count: usize,
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.5..1.0) * PARTICLE_SPEED;
        let direction = DVec2::new(angle.cos(), angle.sin());
        world.spawn((
            Particle {
                kind,
                age_ms: 0.0,
                lifetime_ms: PARTICLE_LIFETIME_MS,
            },
            position,
            Velocity::along(direction, speed),
        ));
    }
}
