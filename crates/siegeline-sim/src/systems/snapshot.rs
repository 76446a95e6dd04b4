//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use siegeline_core::components::*;
use siegeline_core::enums::GamePhase;
use siegeline_core::events::GameEvent;
use siegeline_core::profiles::tower_profile;
use siegeline_core::state::*;
use siegeline_core::types::{Position, SimTime};

use crate::economy::{sell_value, upgrade_cost, Ledger};
use crate::systems::wave_spawner::WaveScheduler;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    scheduler: &WaveScheduler,
    ledger: &Ledger,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        particles: build_particles(world),
        waves: build_waves(scheduler),
        economy: ledger.view(),
        events,
    }
}

/// Live enemies, ordered by id so the list is stable between ticks.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Vitals, &StatusEffects, &Position)>()
        .iter()
        .map(|(_, (enemy, vitals, status, pos))| EnemyView {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            size: enemy.size,
            health_fraction: fraction(vitals.health, vitals.max_health),
            shield_fraction: fraction(vitals.shield, vitals.max_shield),
            slowed: status.slow_effect > 0.0,
            frozen: status.frozen,
            flying: enemy.flying,
            wave_number: enemy.wave_number,
        })
        .collect();

    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &TowerStats, &FireControl, &Position)>()
        .iter()
        .map(|(_, (tower, stats, fire_control, pos))| TowerView {
            tower_id: tower.id,
            kind: tower.kind,
            position: *pos,
            level: tower.level,
            max_level: tower_profile(tower.kind).max_level,
            range: stats.range,
            damage: stats.damage,
            upgrade_cost: upgrade_cost(tower.kind, tower.level),
            sell_value: sell_value(tower.invested),
            target: fire_control
                .target
                .and_then(|t| world.get::<&Position>(t).ok().map(|p| *p)),
        })
        .collect();

    towers.sort_by_key(|t| t.tower_id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| !projectile.remove)
        .map(|(_, (projectile, pos))| ProjectileView {
            kind: projectile.kind,
            position: *pos,
            origin: projectile.origin,
            aim: projectile.aim,
            size: projectile.size,
        })
        .collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    world
        .query::<(&Particle, &Position)>()
        .iter()
        .map(|(_, (particle, pos))| ParticleView {
            kind: particle.kind,
            position: *pos,
            life_fraction: 1.0 - fraction(particle.age_ms, particle.lifetime_ms),
        })
        .collect()
}

fn build_waves(scheduler: &WaveScheduler) -> Vec<WaveView> {
    scheduler
        .active()
        .iter()
        .map(|wave| WaveView {
            wave_id: wave.id,
            wave_number: wave.number,
            spawned: wave.spawned,
            total: wave.total,
            spawning: wave.spawning,
        })
        .collect()
}

fn fraction(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}
