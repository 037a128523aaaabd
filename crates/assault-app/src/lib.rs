//! VEHICULAR ASSAULT headless runner.
//!
//! Wires the simulation engine to a fixed-rate game loop thread, a
//! line-oriented console on stdin, and the single-slot session store.

pub mod config;
pub mod console;
pub mod game_loop;
pub mod state;

pub use assault_core as core;
