//! Projectile system: homing, flight, collision, beams and explosions.
//!
//! Runs after fire control, so instant beams fired this tick resolve in the
//! same tick. Hits go through `engagement`; nothing is despawned here.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use siegeline_core::components::*;
use siegeline_core::constants::*;
use siegeline_core::enums::{DamageType, ParticleKind};
use siegeline_core::events::GameEvent;
use siegeline_core::path::segment_distance;
use siegeline_core::types::{Bounds, Position, Velocity};

use crate::engagement::{self, HitReport};
use crate::world_setup;

/// An enemy a projectile could strike.
#[derive(Debug, Clone, Copy)]
struct Target {
    entity: Entity,
    position: Position,
    size: f64,
}

/// Every live enemy, airborne ones included. Only acquisition filters by
/// tower kind.
fn live_targets(world: &World) -> Vec<Target> {
    world
        .query::<(&Enemy, &Vitals, &Position)>()
        .iter()
        .filter(|(_, (_, vitals, _))| vitals.health > 0.0)
        .map(|(entity, (enemy, _, pos))| Target {
            entity,
            position: *pos,
            size: enemy.size,
        })
        .collect()
}

/// Run the projectile system for one frame of `dt_ms`.
pub fn run(
    world: &mut World,
    bounds: &Bounds,
    dt_ms: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    steer_homing(world);
    integrate(world, dt_ms);

    let in_flight: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| !p.remove)
        .map(|(entity, _)| entity)
        .collect();

    for entity in in_flight {
        resolve(world, entity, bounds, rng, events);
    }
}

/// Re-aim homing projectiles at their owner's current target, while both live.
fn steer_homing(world: &mut World) {
    let mut retargets: Vec<(Entity, Position)> = Vec::new();

    for (entity, projectile) in world.query::<&Projectile>().iter() {
        if !projectile.homing || projectile.remove {
            continue;
        }
        let Some(owner) = projectile.owner else {
            continue;
        };
        let Some(target) = world
            .get::<&FireControl>(owner)
            .ok()
            .and_then(|fc| fc.target)
        else {
            continue;
        };
        let alive = world
            .get::<&Vitals>(target)
            .map(|v| v.health > 0.0)
            .unwrap_or(false);
        if !alive {
            continue;
        }
        if let Ok(target_pos) = world.get::<&Position>(target) {
            retargets.push((entity, *target_pos));
        }
    }

    for (entity, aim) in retargets {
        if let Ok((projectile, pos, vel)) =
            world.query_one_mut::<(&mut Projectile, &Position, &mut Velocity)>(entity)
        {
            projectile.aim = aim;
            let vz = vel.z;
            *vel = Velocity::along(pos.direction_to(&aim), projectile.speed);
            vel.z = vz;
        }
    }
}

/// Move non-instant projectiles and age everything.
fn integrate(world: &mut World, dt_ms: f64) {
    let dt_secs = dt_ms / 1000.0;

    for (_entity, (projectile, pos, vel)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Velocity)>()
    {
        projectile.age_ms += dt_ms;
        if projectile.instant {
            continue;
        }

        pos.x += vel.x * dt_secs;
        pos.y += vel.y * dt_secs;
        if projectile.gravity {
            vel.z -= PROJECTILE_GRAVITY * dt_secs;
            pos.z += vel.z * dt_secs;
        }
        projectile.distance_traveled += vel.speed() * dt_secs;
    }
}

/// Collide, detonate or expire one projectile.
fn resolve(
    world: &mut World,
    entity: Entity,
    bounds: &Bounds,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let Ok((mut projectile, payload, pos)) = world
        .query_one_mut::<(&Projectile, &Payload, &Position)>(entity)
        .map(|(p, pl, pos)| (p.clone(), pl.clone(), *pos))
    else {
        return;
    };

    if projectile.instant {
        if !projectile.resolved {
            fire_beam(world, &mut projectile, &payload, rng, events);
            projectile.resolved = true;
        }
    } else {
        collide(world, &mut projectile, &payload, &pos, rng, events);

        if !projectile.remove && projectile.gravity && pos.z <= 0.0 {
            explode(world, &payload, &Position::planar(pos.x, pos.y), None, rng, events);
            projectile.remove = true;
        }
        if projectile.distance_traveled > projectile.max_distance
            || !bounds.contains(&pos, OUT_OF_BOUNDS_MARGIN)
        {
            projectile.remove = true;
        }
    }

    if projectile.age_ms >= projectile.lifetime_ms {
        projectile.remove = true;
    }

    if let Ok(mut stored) = world.get::<&mut Projectile>(entity) {
        *stored = projectile;
    }
}

/// Test a moving projectile against every live enemy it has not already hit.
fn collide(
    world: &mut World,
    projectile: &mut Projectile,
    payload: &Payload,
    pos: &Position,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let mut struck: Vec<Target> = Vec::new();
    for target in live_targets(world) {
        if projectile.hits.contains(&target.entity) {
            continue;
        }
        if pos.range_to(&target.position) < target.size + projectile.size {
            struck.push(target);
            if !projectile.penetrating {
                break;
            }
        }
    }

    for target in struck {
        strike(world, projectile, payload, &target, rng, events);
        if payload.explosive {
            explode(world, payload, pos, Some(target.entity), rng, events);
        }
        if !projectile.penetrating {
            projectile.remove = true;
        }
    }
}

/// Resolve an instant beam from the origin through the aim point out to the
/// projectile's reach, nearest enemy first.
fn fire_beam(
    world: &mut World,
    projectile: &mut Projectile,
    payload: &Payload,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let origin = projectile.origin.xy();
    let direction = projectile.origin.direction_to(&projectile.aim);
    if direction == DVec2::ZERO {
        return;
    }
    let end = origin + direction * projectile.max_distance;

    let mut along_beam: Vec<(f64, Target)> = live_targets(world)
        .into_iter()
        .filter_map(|target| {
            let offset = target.position.xy() - origin;
            let along = offset.dot(direction);
            if along < 0.0 || along > projectile.max_distance {
                return None;
            }
            let perpendicular = segment_distance(target.position.xy(), origin, end);
            (perpendicular < target.size).then_some((along, target))
        })
        .collect();
    along_beam.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, target) in along_beam {
        strike(world, projectile, payload, &target, rng, events);
        if !projectile.penetrating {
            break;
        }
    }
}

/// Apply the payload to one enemy and record the hit.
fn strike(
    world: &mut World,
    projectile: &mut Projectile,
    payload: &Payload,
    target: &Target,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    projectile.hits.push(target.entity);
    let Some(report) = engagement::resolve_hit(world, target.entity, payload) else {
        return;
    };
    push_hit(events, report);

    let particle = match payload.damage_type {
        DamageType::Ice => ParticleKind::Frost,
        _ => ParticleKind::Hit,
    };
    world_setup::spawn_particles(world, rng, particle, target.position, 1);
}

/// Splash every live enemy within the payload's radius of `center`, except
/// `exclude` (the enemy struck directly).
fn explode(
    world: &mut World,
    payload: &Payload,
    center: &Position,
    exclude: Option<Entity>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let radius = payload.explosion_radius;
    events.push(GameEvent::Explosion {
        position: *center,
        radius,
    });
    world_setup::spawn_particles(
        world,
        rng,
        ParticleKind::Explosion,
        *center,
        DEATH_PARTICLE_COUNT,
    );

    let splashed: Vec<(Entity, f64)> = live_targets(world)
        .into_iter()
        .filter(|t| Some(t.entity) != exclude)
        .filter_map(|t| {
            let distance = center.range_to(&t.position);
            if distance > radius {
                return None;
            }
            let damage = engagement::splash_damage(payload.damage, distance, radius);
            (damage > 0.0).then_some((t.entity, damage))
        })
        .collect();

    for (target, raw) in splashed {
        if let Some(report) = engagement::resolve_raw(world, target, raw, payload.damage_type) {
            push_hit(events, report);
        }
    }
}

fn push_hit(events: &mut Vec<GameEvent>, report: HitReport) {
    events.push(GameEvent::ProjectileHit {
        enemy_id: report.enemy_id,
        damage: report.damage,
        killed: report.killed,
    });
}
