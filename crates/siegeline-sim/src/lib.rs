//! Simulation engine for SIEGELINE.
//!
//! Owns the hecs ECS world, runs systems once per host frame with a measured
//! delta, and produces GameStateSnapshots for the presentation layer.

pub mod economy;
pub mod engagement;
pub mod engine;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use siegeline_core as core;
