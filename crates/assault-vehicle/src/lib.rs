//! Vehicle control for VEHICULAR ASSAULT.
//!
//! Turns merged driving input into speed and steering, derives the
//! velocity command for the chassis body, and animates the cosmetic
//! wheel rig. No ECS dependency; operates on plain data.

pub mod controller;
pub mod tuning;
pub mod wheels;

pub use assault_core as core;
pub use controller::{ChassisCommand, VehicleController, VehicleState};
pub use tuning::VehicleTuning;

#[cfg(test)]
mod tests;
