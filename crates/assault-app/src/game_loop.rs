//! Game loop thread. Runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use assault_core::commands::PlayerCommand;
use assault_core::constants::TICK_RATE;
use assault_core::enums::DriveKey;
use assault_core::input::DriveInput;
use assault_core::state::GameStateSnapshot;
use assault_sim::persistence;
use assault_sim::{SimConfig, SimulationEngine};

use crate::config::RunnerConfig;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: RunnerConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("assault-game-loop".into())
        .spawn(move || {
            run_game_loop(&config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Build the engine described by `config`.
pub fn build_engine(config: &RunnerConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: config.seed,
        time_scale: config.time_scale,
        storyline: config.storyline,
        ..Default::default()
    });
    if config.autostart {
        engine.queue_command(PlayerCommand::StartRace);
    }
    engine
}

/// Apply one loop command. Returns false on shutdown.
pub fn handle_command(
    engine: &mut SimulationEngine,
    config: &RunnerConfig,
    command: GameLoopCommand,
) -> bool {
    match command {
        GameLoopCommand::PlayerCommand(cmd) => engine.queue_command(cmd),
        GameLoopCommand::SaveSession => match engine.session_state() {
            Some(session) => {
                if let Err(error) = persistence::save_session(&config.save_dir, &session) {
                    warn!(%error, "save failed");
                }
            }
            None => warn!("nothing to save outside a race"),
        },
        GameLoopCommand::LoadSession => {
            let restored = persistence::load_session(&config.save_dir)
                .and_then(|session| engine.restore_session(&session));
            if let Err(error) = restored {
                warn!(%error, "load failed");
            }
        }
        GameLoopCommand::ClearSession => match persistence::clear_session(&config.save_dir) {
            Ok(existed) => info!(existed, "save cleared"),
            Err(error) => warn!(%error, "clearing save failed"),
        },
        GameLoopCommand::Shutdown => return false,
    }
    true
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: &RunnerConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = build_engine(config);
    let status_every = ((config.status_interval_secs * TICK_RATE as f64).round() as u64).max(1);
    let mut last_status_tick = 0;
    let mut next_tick_time = Instant::now();

    info!(seed = config.seed, storyline = config.storyline.slug(), "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !handle_command(&mut engine, config, command) {
                        info!("game loop stopped");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Periodic status line
        if status_due(snapshot.time.tick, &mut last_status_tick, status_every) {
            log_status(&snapshot);
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Whether `tick` should get a status line. The tick counter stalls while
/// paused or after the race ends, so each tick is reported at most once.
pub fn status_due(tick: u64, last_logged: &mut u64, every: u64) -> bool {
    if tick == 0 || tick == *last_logged || tick % every != 0 {
        return false;
    }
    *last_logged = tick;
    true
}

/// Held drive keys as their console letters, e.g. `"wa"`.
pub fn held_keys(input: &DriveInput) -> String {
    DriveKey::ALL
        .into_iter()
        .filter(|&key| input.is_held(key))
        .map(DriveKey::as_char)
        .collect()
}

/// One-line race summary.
pub fn log_status(snapshot: &GameStateSnapshot) {
    let (speed, hp, position) = snapshot
        .vehicle
        .as_ref()
        .map(|v| (v.speed, v.hitpoints, v.position))
        .unwrap_or_default();
    let pylons_up = snapshot.pylons.len();
    let visited = snapshot.objectives.iter().filter(|o| o.visited).count();
    info!(
        tick = snapshot.time.tick,
        phase = ?snapshot.phase,
        speed,
        hp,
        x = position.x,
        z = position.z,
        pylons_up,
        visited,
        keys = %held_keys(&snapshot.input),
        time_left = ?snapshot.time_left,
        "status"
    );
}
