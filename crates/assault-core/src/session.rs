//! Persisted race session: the flat document stored under [`STORAGE_KEY`].
//!
//! [`STORAGE_KEY`]: crate::constants::STORAGE_KEY

use serde::{Deserialize, Serialize};

use crate::types::{Point3, Quat4};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Seconds left on the countdown, `None` when the map has no limit.
    pub time_left: Option<f64>,
    pub car: CarState,
    #[serde(rename = "playerHP")]
    pub player_hp: i32,
    pub checkpoints: Vec<CheckpointState>,
    pub secret_visited: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    pub position: Point3,
    pub rotation: Quat4,
    pub velocity: Point3,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointState {
    pub id: String,
    pub visited: bool,
}
