//! Core types and definitions for the SIEGELINE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, balance profiles, the enemy path, commands, events,
//! state snapshots, and constants. It has no runtime of its own.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod path;
pub mod profiles;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
