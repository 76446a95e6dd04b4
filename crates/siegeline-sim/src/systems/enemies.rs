//! Enemy system: status timers, regeneration and path movement.

use hecs::{Entity, World};

use siegeline_core::components::{Enemy, PathFollower, StatusEffects, Vitals};
use siegeline_core::path::EnemyPath;
use siegeline_core::types::Position;

use crate::engagement::{decay_status, effective_speed};

/// Advance every enemy by `dt_ms`. Enemies that walk off the end of the path
/// are pushed onto `leaked`; the caller reaps them.
pub fn run(world: &mut World, path: &EnemyPath, dt_ms: f64, leaked: &mut Vec<Entity>) {
    let dt_secs = dt_ms / 1000.0;

    for (entity, (enemy, vitals, status, follower, pos)) in world.query_mut::<(
        &Enemy,
        &mut Vitals,
        &mut StatusEffects,
        &mut PathFollower,
        &mut Position,
    )>() {
        if vitals.health <= 0.0 {
            continue;
        }

        decay_status(status, dt_ms);
        regenerate(vitals, dt_ms);

        let distance = effective_speed(enemy.speed, status) * dt_secs;
        let step = path.advance(follower.segment, follower.progress, distance);
        follower.segment = step.segment;
        follower.progress = step.progress;
        *pos = path.point_at(step.segment, step.progress, follower.lane_offset);

        if step.finished {
            leaked.push(entity);
        }
    }
}

/// Health regeneration, and shield regeneration once the enemy has gone
/// unhit for its regen delay.
pub fn regenerate(vitals: &mut Vitals, dt_ms: f64) {
    let dt_secs = dt_ms / 1000.0;

    if vitals.regen_rate > 0.0 {
        vitals.health = (vitals.health + vitals.regen_rate * dt_secs).min(vitals.max_health);
    }

    vitals.time_since_hit_ms += dt_ms;
    if vitals.max_shield > 0.0 && vitals.time_since_hit_ms >= vitals.shield_regen_delay_ms {
        vitals.shield =
            (vitals.shield + vitals.shield_regen_rate * dt_secs).min(vitals.max_shield);
    }
}
