//! Application state shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use assault_core::commands::PlayerCommand;
use assault_core::state::GameStateSnapshot;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Write the running race to the save slot.
    SaveSession,
    /// Apply the save slot to the running race.
    LoadSession,
    /// Delete the save slot.
    ClearSession,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state is `Sync`
/// - `Mutex<Option<...>>` holds what does not exist before the loop starts
/// - `Arc<Mutex<...>>` shares the latest snapshot with the game loop thread
pub struct AppState {
    /// `None` before the game loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward a command to the game loop. Returns false when the loop is
    /// not running or has hung up.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(lock) = self.command_tx.lock() else {
            return false;
        };
        match lock.as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }

    /// Clone of the most recent snapshot.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
