//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in the vehicle / pylon-ai crates and in sim systems.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks the player's vehicle entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a vehicle whose physics body is ready to receive velocity commands.
/// Absent while the chassis model is still loading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Chassis;

/// Chassis model still loading. Replaced by a transform, body and
/// [`Chassis`] once `ready_at_tick` is reached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChassisLoading {
    pub ready_at_tick: u64,
    pub spawn: Transform,
}

/// World transform owned by the physics body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

/// Velocity command last written to a physics body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyVelocity {
    pub linear: DVec3,
    /// Angular velocity (radians per second per axis). Only yaw (y) is driven.
    pub angular: DVec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitpoints {
    pub current: i32,
    pub max: i32,
}

/// Per-pylon agent state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PylonState {
    /// Stable id, used as the scheduler key.
    pub id: u32,
    pub variant: PylonVariant,
    pub phase: PylonPhase,
    /// Fixed at load time.
    pub position: DVec3,
    /// Mean delay between strikes (ms).
    pub interval_ms: u64,
    /// Damage per successful strike.
    pub strength: i32,
    pub hitpoints: i32,
}

/// A short-lived player projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub origin: DVec3,
    /// Unit direction of travel.
    pub direction: DVec3,
    pub speed: f64,
    pub damage: i32,
    pub ttl_secs: f64,
}

/// Proximity-triggered objective marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub name: String,
    pub description: String,
    pub position: DVec3,
    pub visited: bool,
}

/// Marks an objective as a race checkpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Checkpoint;

/// Marks the objective as the hidden crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SecretCrate;

/// Resolved primitive dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveDims {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cylinder {
        diameter_top: f64,
        diameter_bottom: f64,
        height: f64,
    },
    Sphere {
        diameter: f64,
    },
    Plane {
        width: f64,
        height: f64,
    },
    Ground {
        width: f64,
        height: f64,
        subdivisions: u32,
    },
}

impl PrimitiveDims {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Box { .. } => PrimitiveKind::Box,
            Self::Cylinder { .. } => PrimitiveKind::Cylinder,
            Self::Sphere { .. } => PrimitiveKind::Sphere,
            Self::Plane { .. } => PrimitiveKind::Plane,
            Self::Ground { .. } => PrimitiveKind::Ground,
        }
    }
}

/// Collider requested for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    pub body: BodyKind,
    pub mass: f64,
}

/// Level geometry instantiated from a map primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticGeometry {
    pub name: String,
    pub dims: PrimitiveDims,
    /// Euler rotation (radians).
    pub rotation: DVec3,
    pub material: Option<MaterialId>,
    pub collider: Option<Collider>,
    pub metadata: Option<serde_json::Value>,
}

/// One cosmetic wheel: a pivot offset from the chassis plus its two rotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wheel {
    pub name: String,
    /// Pivot offset in chassis space. Front wheels have `z > 0`.
    pub offset: DVec3,
    /// Pivot yaw (radians).
    pub steer_yaw: f64,
    /// Rolling angle about the axle (radians, wrapped to [0, TAU)).
    pub spin: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WheelRig {
    pub wheels: Vec<Wheel>,
}

/// Transient strike visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeBolt {
    pub pylon_id: u32,
    pub result: StrikeResult,
    pub points: Vec<DVec3>,
    /// Scheduler clock time after which the bolt is removed.
    pub expires_at_ms: u64,
}
