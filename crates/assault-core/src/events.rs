//! Events emitted by the simulation for audio, VFX and HUD feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A pylon discharged. `target` is the bolt's end point.
    StrikeFired {
        pylon_id: u32,
        result: StrikeResult,
        target: DVec3,
    },
    /// Player took damage from a pylon strike.
    PlayerDamaged {
        pylon_id: u32,
        amount: i32,
        remaining: i32,
    },
    ProjectileFired { position: DVec3 },
    /// A projectile hit a pylon that survived. A destroying hit emits only
    /// `PylonDestroyed`.
    PylonHit { pylon_id: u32, remaining: i32 },
    PylonDestroyed { pylon_id: u32 },
    CheckpointReached { id: String },
    SecretFound { id: String },
    RaceEnded { phase: RacePhase },
}
