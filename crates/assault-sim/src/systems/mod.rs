//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus the engine-owned
//! context they need (controller, scheduler, RNG). They hold no state.

pub mod cleanup;
pub mod movement;
pub mod objectives;
pub mod projectiles;
pub mod pylon_ai;
pub mod snapshot;
pub mod vehicle;
