//! Game state snapshot: the complete visible state handed to the front end each tick.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::input::DriveInput;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: RacePhase,
    pub storyline: Storyline,
    pub map_name: String,
    /// `None` while the chassis is not spawned yet.
    pub vehicle: Option<VehicleView>,
    pub input: DriveInput,
    pub pylons: Vec<PylonView>,
    pub projectiles: Vec<DVec3>,
    pub bolts: Vec<BoltView>,
    pub objectives: Vec<ObjectiveView>,
    pub time_left: Option<f64>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    pub position: DVec3,
    pub rotation: DQuat,
    pub linear_velocity: DVec3,
    pub speed: f64,
    pub steering_angle: f64,
    pub hitpoints: i32,
    pub max_hitpoints: i32,
    pub wheels: Vec<WheelView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelView {
    pub name: String,
    pub steer_yaw: f64,
    pub spin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PylonView {
    pub id: u32,
    pub variant: PylonVariant,
    pub phase: PylonPhase,
    pub position: DVec3,
    pub hitpoints: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoltView {
    pub pylon_id: u32,
    pub result: StrikeResult,
    pub points: Vec<DVec3>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub id: String,
    pub name: String,
    pub position: DVec3,
    pub visited: bool,
    pub secret: bool,
}
