//! First-order speed and steering model.
//!
//! The controller owns `speed` and `steering_angle`; the chassis body owns
//! the transform. Each tick the controller integrates input and hands back
//! a velocity command. Position integration is the physics body's job.
//!
//! Sign conventions: +X right, +Y up, +Z forward. Positive steering turns
//! right, which is a positive yaw about +Y.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use assault_core::input::DriveInput;
use assault_core::types::forward_of;

use crate::tuning::VehicleTuning;

/// Controller-owned motion state. Persists across frames and across
/// periods where the chassis is not available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub speed: f64,
    pub steering_angle: f64,
}

/// Velocity command for the chassis body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChassisCommand {
    pub linear_velocity: DVec3,
    pub angular_velocity: DVec3,
}

#[derive(Debug, Clone)]
pub struct VehicleController {
    tuning: VehicleTuning,
    state: VehicleState,
}

impl VehicleController {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self {
            tuning,
            state: VehicleState::default(),
        }
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    /// Zero speed and steering (race restart).
    pub fn reset(&mut self) {
        self.state = VehicleState::default();
    }

    /// Overwrite motion state, clamped to the tuning limits (session restore).
    pub fn restore(&mut self, state: VehicleState) {
        self.state = VehicleState {
            speed: state
                .speed
                .clamp(self.tuning.reverse_max, self.tuning.forward_max),
            steering_angle: state
                .steering_angle
                .clamp(-self.tuning.steer_max, self.tuning.steer_max),
        };
    }

    /// Run one tick. `chassis` is the body's current orientation, or `None`
    /// while the body is not ready; in that case nothing happens and the
    /// motion state is left untouched.
    pub fn update(
        &mut self,
        input: &DriveInput,
        dt: f64,
        chassis: Option<DQuat>,
    ) -> Option<ChassisCommand> {
        let rotation = chassis?;
        self.integrate(input, dt);
        Some(self.command(rotation))
    }

    /// Integrate input into speed and steering.
    pub fn integrate(&mut self, input: &DriveInput, dt: f64) {
        let t = &self.tuning;
        let s = &mut self.state;

        if input.right {
            s.steering_angle += t.steer_rate * dt;
        } else if input.left {
            s.steering_angle -= t.steer_rate * dt;
        } else {
            s.steering_angle = decay(s.steering_angle, t.steer_damping, t.settle_epsilon);
        }
        s.steering_angle = s.steering_angle.clamp(-t.steer_max, t.steer_max);

        if input.forward {
            s.speed += t.accel * dt;
        }
        if input.backward {
            s.speed -= t.accel * dt;
        }
        if !input.forward && !input.backward {
            s.speed = decay(s.speed, t.speed_damping, t.settle_epsilon);
        }
        s.speed = s.speed.clamp(t.reverse_max, t.forward_max);
    }

    /// Velocity command for a chassis with the given orientation.
    pub fn command(&self, rotation: DQuat) -> ChassisCommand {
        let forward = forward_of(rotation);
        let yaw_rate = self.state.steering_angle * self.state.speed * self.tuning.turn_coupling;
        ChassisCommand {
            linear_velocity: forward * self.state.speed,
            angular_velocity: DVec3::new(0.0, yaw_rate, 0.0),
        }
    }
}

/// Multiply toward zero, snapping once inside `epsilon`.
fn decay(value: f64, damping: f64, epsilon: f64) -> f64 {
    let next = value * damping;
    if next.abs() < epsilon {
        0.0
    } else {
        next
    }
}
