//! Fundamental geometric and simulation types.
//!
//! World space: +X right, +Y up, +Z forward. A chassis faces its local +Z axis.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Plain `{x, y, z}` point as it appears in map and save documents.
/// Missing fields default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Quaternion as stored in save documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Point3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for DVec3 {
    fn from(p: Point3) -> Self {
        p.to_vec()
    }
}

impl Default for Quat4 {
    fn default() -> Self {
        DQuat::IDENTITY.into()
    }
}

impl From<DQuat> for Quat4 {
    fn from(q: DQuat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<Quat4> for DQuat {
    fn from(q: Quat4) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w).normalize()
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Elapsed simulation time in whole milliseconds (scheduler clock).
    pub fn elapsed_ms(&self) -> u64 {
        (self.elapsed_secs * 1000.0).round() as u64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Unit forward vector (+Z local) for an orientation.
pub fn forward_of(rotation: DQuat) -> DVec3 {
    (rotation * DVec3::Z).normalize_or_zero()
}
