//! Simulation engine for VEHICULAR ASSAULT.
//!
//! Owns the hecs ECS world, loads maps into it, runs systems at a fixed
//! tick rate, persists the race session, and produces
//! `GameStateSnapshot`s for the front end.

pub mod engine;
pub mod maps;
pub mod persistence;
pub mod systems;
pub mod world_setup;

pub use assault_core as core;
pub use engine::{SimConfig, SimulationEngine};
