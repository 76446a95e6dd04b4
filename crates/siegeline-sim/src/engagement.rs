//! Engagement resolution: damage, shields, armour and status effects.
//!
//! Pure functions over enemy components. The resolver mutates vitals and
//! statuses but never despawns; dead enemies are reaped by `systems::cleanup`.

use hecs::{Entity, World};

use siegeline_core::components::*;
use siegeline_core::constants::*;
use siegeline_core::enums::{DamageType, EnemyKind};

/// Outcome of one hit on one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub enemy_id: EnemyId,
    /// Damage after armour and type modifiers.
    pub damage: f64,
    pub killed: bool,
}

/// Damage-type bonus against an enemy archetype.
pub fn damage_modifier(damage_type: DamageType, kind: EnemyKind) -> f64 {
    match (damage_type, kind) {
        (DamageType::Explosive, EnemyKind::Heavy) => 1.5,
        (DamageType::Laser, EnemyKind::Armored) => 1.3,
        (DamageType::Ice, EnemyKind::Fast) => 1.2,
        (DamageType::Explosive, EnemyKind::Swarm) => 1.25,
        _ => 1.0,
    }
}

/// `raw * (1 - armor) * modifier`.
pub fn effective_damage(raw: f64, enemy: &Enemy, damage_type: DamageType) -> f64 {
    raw * (1.0 - enemy.armor) * damage_modifier(damage_type, enemy.kind)
}

/// Apply a hit. The shield absorbs first and any excess carries into health,
/// which clamps at zero. Returns the effective damage and whether the enemy
/// is now dead.
pub fn apply_damage(
    enemy: &Enemy,
    vitals: &mut Vitals,
    raw: f64,
    damage_type: DamageType,
) -> (f64, bool) {
    let damage = effective_damage(raw, enemy, damage_type).max(0.0);
    vitals.time_since_hit_ms = 0.0;

    let mut remaining = damage;
    if vitals.shield > 0.0 {
        let absorbed = remaining.min(vitals.shield);
        vitals.shield -= absorbed;
        remaining -= absorbed;
    }
    vitals.health = (vitals.health - remaining).max(0.0);

    (damage, vitals.health <= 0.0)
}

/// Refresh the slow to the strongest magnitude and the longest duration.
pub fn apply_slow(status: &mut StatusEffects, amount: f64, duration_ms: f64) {
    status.slow_effect = status.slow_effect.max(amount.clamp(0.0, 1.0));
    status.slow_duration_ms = status.slow_duration_ms.max(duration_ms);
}

/// Freeze for `duration_ms` unless boss-class. Refreshes to the longest duration.
pub fn apply_freeze(enemy: &Enemy, status: &mut StatusEffects, duration_ms: f64) {
    if enemy.boss {
        return;
    }
    status.frozen = true;
    status.freeze_duration_ms = status.freeze_duration_ms.max(duration_ms);
}

/// Count statuses down by `dt_ms`, clearing any that run out.
pub fn decay_status(status: &mut StatusEffects, dt_ms: f64) {
    if status.slow_duration_ms > 0.0 {
        status.slow_duration_ms -= dt_ms;
        if status.slow_duration_ms <= 0.0 {
            status.slow_duration_ms = 0.0;
            status.slow_effect = 0.0;
        }
    }
    if status.frozen {
        status.freeze_duration_ms -= dt_ms;
        if status.freeze_duration_ms <= 0.0 {
            status.freeze_duration_ms = 0.0;
            status.frozen = false;
        }
    }
}

/// Current movement speed: zero while frozen, reduced while slowed.
pub fn effective_speed(speed: f64, status: &StatusEffects) -> f64 {
    if status.frozen {
        return 0.0;
    }
    speed * (1.0 - status.slow_effect * SLOW_SPEED_FACTOR)
}

/// Falloff splash: `floor(raw * 0.7 * (1 - distance/radius))`, never negative.
pub fn splash_damage(raw: f64, distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    (raw * SPLASH_DAMAGE_RATIO * (1.0 - distance / radius))
        .floor()
        .max(0.0)
}

/// Apply a projectile's payload to one enemy in the world: damage plus any
/// slow and freeze it carries. `None` if the entity is gone or already dead.
pub fn resolve_hit(world: &mut World, target: Entity, payload: &Payload) -> Option<HitReport> {
    let (enemy, vitals, status) = world
        .query_one_mut::<(&Enemy, &mut Vitals, &mut StatusEffects)>(target)
        .ok()?;
    if vitals.health <= 0.0 {
        return None;
    }

    let (damage, killed) = apply_damage(enemy, vitals, payload.damage, payload.damage_type);
    if let Some(slow) = payload.slow {
        apply_slow(status, slow.amount, slow.duration_ms);
    }
    if let Some(freeze_ms) = payload.freeze_ms {
        apply_freeze(enemy, status, freeze_ms);
    }

    Some(HitReport {
        enemy_id: enemy.id,
        damage,
        killed,
    })
}

/// Apply raw damage with no status payload (splash).
pub fn resolve_raw(
    world: &mut World,
    target: Entity,
    raw: f64,
    damage_type: DamageType,
) -> Option<HitReport> {
    let (enemy, vitals) = world
        .query_one_mut::<(&Enemy, &mut Vitals)>(target)
        .ok()?;
    if vitals.health <= 0.0 {
        return None;
    }

    let (damage, killed) = apply_damage(enemy, vitals, raw, damage_type);
    Some(HitReport {
        enemy_id: enemy.id,
        damage,
        killed,
    })
}
