//! Pylon threat agents for VEHICULAR ASSAULT.
//!
//! Implements the strike decision, damage handling, variant profiles,
//! the cosmetic bolt path, and the per-pylon strike scheduler.

pub mod bolt;
pub mod fsm;
pub mod profiles;
pub mod scheduler;

pub use assault_core as core;
pub use scheduler::StrikeScheduler;

#[cfg(test)]
mod tests;
