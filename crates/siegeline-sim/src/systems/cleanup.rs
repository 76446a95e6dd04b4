//! Cleanup system: reaps leaked and dead enemies and spent projectiles.
//!
//! All removal happens here, through despawn buffers, so other systems can
//! iterate the world without invalidating it. Rewards are paid only at reap
//! time, which is what makes them exactly-once.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use siegeline_core::components::{Enemy, Projectile, Vitals};
use siegeline_core::constants::DEATH_PARTICLE_COUNT;
use siegeline_core::enums::ParticleKind;
use siegeline_core::events::GameEvent;
use siegeline_core::types::Position;

use crate::economy::Ledger;
use crate::world_setup;

/// Despawn enemies that completed the path and charge their damage to lives.
pub fn reap_leaked(
    world: &mut World,
    leaked: &mut Vec<Entity>,
    ledger: &mut Ledger,
    events: &mut Vec<GameEvent>,
) {
    for entity in leaked.drain(..) {
        let Ok(enemy) = world.remove_one::<Enemy>(entity) else {
            continue;
        };
        let _ = world.despawn(entity);

        ledger.record_leak(enemy.damage);
        debug!(enemy_id = %enemy.id, damage = enemy.damage, lives = ledger.lives, "enemy leaked");
        events.push(GameEvent::EnemyLeaked {
            enemy_id: enemy.id,
            kind: enemy.kind,
            damage: enemy.damage,
        });
    }
}

/// Despawn every enemy at zero health, paying its reward.
pub fn reap_dead(
    world: &mut World,
    ledger: &mut Ledger,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut deaths: Vec<(Enemy, Position)> = Vec::new();
    for (entity, (enemy, vitals, pos)) in world.query_mut::<(&Enemy, &Vitals, &Position)>() {
        if vitals.health <= 0.0 {
            despawn_buffer.push(entity);
            deaths.push((enemy.clone(), *pos));
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for (enemy, position) in deaths {
        ledger.record_kill(enemy.reward);
        debug!(enemy_id = %enemy.id, kind = ?enemy.kind, reward = enemy.reward, "enemy killed");
        events.push(GameEvent::EnemyKilled {
            enemy_id: enemy.id,
            kind: enemy.kind,
            reward: enemy.reward,
            position,
        });
        world_setup::spawn_particles(
            world,
            rng,
            ParticleKind::Death,
            position,
            DEATH_PARTICLE_COUNT,
        );
    }
}

/// Despawn projectiles flagged for removal.
pub fn reap_projectiles(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.remove {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
