//! Fire control system: towers with a live target launch projectiles when
//! their reload has elapsed.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use siegeline_core::components::*;
use siegeline_core::events::GameEvent;
use siegeline_core::path::EnemyPath;
use siegeline_core::profiles::projectile_profile;
use siegeline_core::types::Position;

use crate::economy::Ledger;
use crate::engagement::effective_speed;
use crate::world_setup;

/// A launch decided during the tower pass, applied after it.
struct Launch {
    tower: Entity,
    tower_id: TowerId,
    stats: TowerStats,
    origin: Position,
    aim: Position,
}

/// Predict where a target will be when a projectile of `projectile_speed`
/// reaches it: `position + direction * speed * (distance / projectile_speed)`.
///
/// Callers pass the target's current effective speed, so a frozen enemy is
/// aimed at where it stands rather than led along the path.
pub fn lead_target(
    origin: &Position,
    target: &Position,
    direction: DVec2,
    target_speed: f64,
    projectile_speed: f64,
) -> Position {
    if projectile_speed <= 0.0 {
        return *target;
    }
    let flight_secs = origin.range_to(target) / projectile_speed;
    Position::from_xy(target.xy() + direction * target_speed * flight_secs)
}

/// Fire every tower whose reload has elapsed and whose target is still valid.
pub fn run(
    world: &mut World,
    path: &EnemyPath,
    now_ms: f64,
    ledger: &mut Ledger,
    events: &mut Vec<GameEvent>,
) {
    let mut launches: Vec<Launch> = Vec::new();

    for (entity, (tower, stats, fire_control, pos)) in world
        .query::<(&Tower, &TowerStats, &FireControl, &Position)>()
        .iter()
    {
        if now_ms - fire_control.last_shot_ms <= stats.fire_rate_ms {
            continue;
        }
        let Some(target) = fire_control.target else {
            continue;
        };
        let Some(aim) = aim_point(world, path, pos, target, stats) else {
            continue;
        };

        launches.push(Launch {
            tower: entity,
            tower_id: tower.id,
            stats: stats.clone(),
            origin: *pos,
            aim,
        });
    }

    for launch in launches {
        if let Ok(mut fire_control) = world.get::<&mut FireControl>(launch.tower) {
            fire_control.last_shot_ms = now_ms;
        }
        world_setup::spawn_projectile(
            world,
            &launch.stats,
            launch.origin,
            launch.aim,
            Some(launch.tower),
        );

        ledger.projectiles_fired += 1;
        debug!(tower_id = %launch.tower_id, projectile = ?launch.stats.projectile, "tower fired");
        events.push(GameEvent::TowerFired {
            tower_id: launch.tower_id,
            projectile: launch.stats.projectile,
        });
    }
}

/// Aim point for a shot at `target`, `None` if the target is gone or dead.
fn aim_point(
    world: &World,
    path: &EnemyPath,
    origin: &Position,
    target: Entity,
    stats: &TowerStats,
) -> Option<Position> {
    let mut query = world
        .query_one::<(&Enemy, &Vitals, &StatusEffects, &PathFollower, &Position)>(target)
        .ok()?;
    let (enemy, vitals, status, follower, target_pos) = query.get()?;
    if vitals.health <= 0.0 {
        return None;
    }

    let profile = projectile_profile(stats.projectile);
    if profile.instant {
        return Some(*target_pos);
    }

    Some(lead_target(
        origin,
        target_pos,
        path.direction(follower.segment),
        effective_speed(enemy.speed, status),
        profile.speed,
    ))
}
