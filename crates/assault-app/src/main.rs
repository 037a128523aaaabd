//! Headless VEHICULAR ASSAULT runner.
//!
//! Usage:
//!   vehicular-assault --storyline street-justice --autostart
//!   LOG_FORMAT=json vehicular-assault --seed 7
//!
//! Reads one command per line from stdin; `quit` or EOF stops the loop.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::{info, warn};

use assault_app::config::RunnerConfig;
use assault_app::console::{self, ConsoleCommand};
use assault_app::game_loop;
use assault_app::state::{AppState, GameLoopCommand};
use assault_core::enums::Storyline;

#[derive(Parser)]
#[command(name = "vehicular-assault")]
#[command(about = "Drive the VEHICULAR ASSAULT simulation from the terminal")]
struct Args {
    /// RNG seed (overrides ASSAULT_SEED)
    #[arg(long)]
    seed: Option<u64>,
    /// Storyline slug (overrides ASSAULT_STORYLINE)
    #[arg(long)]
    storyline: Option<String>,
    /// Directory holding the save slot (overrides ASSAULT_SAVE_DIR)
    #[arg(long)]
    save_dir: Option<PathBuf>,
    /// Initial time scale
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
    /// Start racing immediately
    #[arg(long)]
    autostart: bool,
    /// Seconds of sim time between status lines
    #[arg(long)]
    status_every: Option<f64>,
}

impl Args {
    fn apply(self, mut config: RunnerConfig) -> RunnerConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(slug) = self.storyline {
            config.storyline = Storyline::from_slug(&slug);
        }
        if let Some(dir) = self.save_dir {
            config.save_dir = dir;
        }
        if let Some(secs) = self.status_every {
            config.status_interval_secs = secs;
        }
        config.time_scale = self.time_scale.clamp(0.0, 4.0);
        config.autostart = self.autostart;
        config
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Args::parse().apply(RunnerConfig::from_env());
    info!(save_dir = %config.save_dir.display(), "starting runner");

    let state = AppState::new();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())
        .context("failed to spawn game loop thread")?;
    *state
        .command_tx
        .lock()
        .map_err(|_| anyhow!("command channel lock poisoned"))? = Some(cmd_tx);

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match console::parse_line(&line) {
            Ok(ConsoleCommand::Quit) => break,
            Ok(ConsoleCommand::Status) => match state.snapshot() {
                Some(snapshot) => game_loop::log_status(&snapshot),
                None => info!("no snapshot yet"),
            },
            Ok(ConsoleCommand::Dump) => {
                if let Some(snapshot) = state.snapshot() {
                    println!("{}", serde_json::to_string(&snapshot)?);
                }
            }
            Ok(ConsoleCommand::Loop(command)) => {
                if !state.send(command) {
                    warn!("game loop is gone");
                    break;
                }
            }
            Err(error) => warn!(%error, line = %line.trim(), "ignoring command"),
        }
    }

    state.send(GameLoopCommand::Shutdown);
    handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    Ok(())
}
