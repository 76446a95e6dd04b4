//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only)
//! plus whatever engine state they write through. They are run by
//! `SimulationEngine::tick` in the order listed in `engine`.

pub mod cleanup;
pub mod enemies;
pub mod fire_control;
pub mod particles;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;
