//! Single-slot session persistence: one JSON document under a fixed key.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use assault_core::constants::STORAGE_KEY;
use assault_core::session::SessionState;

#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    Json(serde_json::Error),
    /// Nothing has been saved yet.
    NoSave,
    /// Restore was attempted with no race loaded.
    NoActiveRace,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "save file i/o failed: {e}"),
            PersistenceError::Json(e) => write!(f, "save data is not valid: {e}"),
            PersistenceError::NoSave => write!(f, "no saved session"),
            PersistenceError::NoActiveRace => write!(f, "no race is loaded"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Json(e)
    }
}

pub fn save_path(dir: &Path) -> PathBuf {
    dir.join(format!("{STORAGE_KEY}.json"))
}

/// Write the session, replacing any previous save. Returns the file written.
pub fn save_session(dir: &Path, session: &SessionState) -> Result<PathBuf, PersistenceError> {
    fs::create_dir_all(dir)?;
    let path = save_path(dir);
    let json = serde_json::to_string_pretty(session)?;
    fs::write(&path, json)?;
    info!(path = %path.display(), "session saved");
    Ok(path)
}

pub fn load_session(dir: &Path) -> Result<SessionState, PersistenceError> {
    let path = save_path(dir);
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PersistenceError::NoSave),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&json)?)
}

/// Delete the save. Returns whether one existed.
pub fn clear_session(dir: &Path) -> Result<bool, PersistenceError> {
    match fs::remove_file(save_path(dir)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
