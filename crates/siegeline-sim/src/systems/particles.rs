//! Decorative particles: drift, age and expire.

use hecs::{Entity, World};

use siegeline_core::components::Particle;
use siegeline_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt_ms: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    let dt_secs = dt_ms / 1000.0;

    for (entity, (particle, pos, vel)) in
        world.query_mut::<(&mut Particle, &mut Position, &Velocity)>()
    {
        particle.age_ms += dt_ms;
        if particle.age_ms >= particle.lifetime_ms {
            despawn_buffer.push(entity);
            continue;
        }
        pos.x += vel.x * dt_secs;
        pos.y += vel.y * dt_secs;
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
