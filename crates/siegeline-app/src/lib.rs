//! SIEGELINE host application.
//!
//! Runs the simulation engine on its own thread with measured frame deltas,
//! loads runtime config, keeps the high-score table, and ships an autopilot
//! for headless demo games.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod highscores;
pub mod logging;
pub mod state;

pub use siegeline_core as core;
