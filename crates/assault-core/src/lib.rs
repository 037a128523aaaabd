//! Core types and definitions for the VEHICULAR ASSAULT simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, input merging, map and session documents,
//! state snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod map;
pub mod session;
pub mod state;
pub mod types;
