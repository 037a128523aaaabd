//! Runner configuration: environment (optionally from `.env`), then CLI flags.

use std::path::PathBuf;

use assault_core::enums::Storyline;

pub const SAVE_DIR_VAR: &str = "ASSAULT_SAVE_DIR";
pub const SEED_VAR: &str = "ASSAULT_SEED";
pub const STORYLINE_VAR: &str = "ASSAULT_STORYLINE";

const DEFAULT_SAVE_DIR: &str = "saves";
const DEFAULT_SEED: u64 = 42;
/// Seconds of sim time between status log lines.
const DEFAULT_STATUS_INTERVAL_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub save_dir: PathBuf,
    pub seed: u64,
    pub storyline: Storyline,
    pub time_scale: f64,
    /// Start racing immediately instead of waiting at the menu.
    pub autostart: bool,
    pub status_interval_secs: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            seed: DEFAULT_SEED,
            storyline: Storyline::default(),
            time_scale: 1.0,
            autostart: false,
            status_interval_secs: DEFAULT_STATUS_INTERVAL_SECS,
        }
    }
}

impl RunnerConfig {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`. Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(SAVE_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.save_dir = PathBuf::from(dir);
        }
        match lookup(SEED_VAR).map(|s| s.trim().parse::<u64>()) {
            Some(Ok(seed)) => config.seed = seed,
            Some(Err(error)) => tracing::warn!(%error, "ignoring {SEED_VAR}"),
            None => {}
        }
        if let Some(slug) = lookup(STORYLINE_VAR) {
            config.storyline = Storyline::from_slug(&slug);
        }
        config
    }
}
