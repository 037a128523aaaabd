//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Driving ---
    /// A driving key went down on a keyboard or touch button.
    KeyDown { source: InputSource, key: DriveKey },
    /// A driving key was released.
    KeyUp { source: InputSource, key: DriveKey },
    /// Fire a projectile along the chassis heading (rate limited).
    Fire,

    // --- Race control ---
    /// Choose the storyline used by the next `StartRace`.
    SelectStoryline { storyline: Storyline },
    /// Load the selected map and start racing.
    StartRace,
    /// Rebuild the current map and reset the player.
    RestartRace,
    /// Leave the race and go back to the menu.
    ReturnToMenu,

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
