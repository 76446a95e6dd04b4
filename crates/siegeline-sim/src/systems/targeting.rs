//! Target acquisition: every tower picks the enemy furthest along the path,
//! discounted by distance.

use hecs::{Entity, World};

use siegeline_core::components::{Enemy, FireControl, PathFollower, Tower, TowerStats, Vitals};
use siegeline_core::constants::TARGET_PROGRESS_WEIGHT;
use siegeline_core::types::Position;

/// Target candidate as seen from the enemy side.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    entity: Entity,
    position: Position,
    priority: f64,
    flying: bool,
}

/// Lower is better: `distance - (segment + progress) * 10`.
pub fn adjusted_distance(distance: f64, priority: f64) -> f64 {
    distance - priority * TARGET_PROGRESS_WEIGHT
}

/// Retarget every tower.
///
/// A tower keeps its current target while it stays alive and in range unless
/// another candidate ranks strictly better. Dead and out-of-reach targets are
/// dropped.
pub fn run(world: &mut World) {
    let candidates: Vec<Candidate> = world
        .query::<(&Enemy, &Vitals, &PathFollower, &Position)>()
        .iter()
        .filter(|(_, (_, vitals, _, _))| vitals.health > 0.0)
        .map(|(entity, (enemy, _, follower, pos))| Candidate {
            entity,
            position: *pos,
            priority: follower.segment as f64 + follower.progress,
            flying: enemy.flying,
        })
        .collect();

    for (_entity, (tower, stats, fire_control, tower_pos)) in
        world.query_mut::<(&Tower, &TowerStats, &mut FireControl, &Position)>()
    {
        let can_hit_flying = tower.kind.can_hit_flying();
        let score = |c: &Candidate| adjusted_distance(tower_pos.range_to(&c.position), c.priority);
        let eligible = |c: &&Candidate| {
            (can_hit_flying || !c.flying) && tower_pos.range_to(&c.position) <= stats.range
        };

        let current = fire_control
            .target
            .and_then(|t| candidates.iter().find(|c| c.entity == t))
            .filter(|c| eligible(c));

        let mut best: Option<(&Candidate, f64)> = None;
        for candidate in candidates.iter().filter(eligible) {
            let adjusted = score(candidate);
            match best {
                Some((_, leader)) if adjusted >= leader => {}
                _ => best = Some((candidate, adjusted)),
            }
        }

        fire_control.target = match (current, best) {
            (Some(cur), Some((challenger, adjusted))) if adjusted < score(cur) => {
                Some(challenger.entity)
            }
            (Some(cur), _) => Some(cur.entity),
            (None, Some((challenger, _))) => Some(challenger.entity),
            (None, None) => None,
        };
    }
}
