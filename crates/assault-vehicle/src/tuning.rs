//! Handling profiles for the vehicle controller.

use assault_core::constants::*;

/// Parameters of the first-order speed/steering model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleTuning {
    /// Steering change per second while a steer key is held.
    pub steer_rate: f64,
    /// Symmetric steering limit.
    pub steer_max: f64,
    /// Per-tick steering decay with no steer input.
    pub steer_damping: f64,
    /// Speed change per second while a throttle key is held.
    pub accel: f64,
    pub forward_max: f64,
    /// Most negative speed allowed (reverse).
    pub reverse_max: f64,
    /// Per-tick speed decay with no throttle input.
    pub speed_damping: f64,
    /// Yaw rate per unit of `steering * speed`.
    pub turn_coupling: f64,
    /// Decayed values below this snap to zero.
    pub settle_epsilon: f64,
    pub wheel_radius: f64,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self::arcade()
    }
}

impl VehicleTuning {
    /// Steering in radians, limited to +/-30 degrees.
    pub fn arcade() -> Self {
        Self {
            steer_rate: STEER_RATE,
            steer_max: STEER_MAX,
            steer_damping: STEER_DAMPING,
            accel: ACCEL,
            forward_max: FORWARD_MAX,
            reverse_max: REVERSE_MAX,
            speed_damping: SPEED_DAMPING,
            turn_coupling: TURN_COUPLING,
            settle_epsilon: SETTLE_EPSILON,
            wheel_radius: WHEEL_RADIUS,
        }
    }

    /// Steering as a normalized -1..1 command. Turn coupling is scaled so
    /// full lock turns as hard as the arcade profile.
    pub fn normalized() -> Self {
        Self {
            steer_rate: STEER_RATE / STEER_MAX,
            steer_max: 1.0,
            turn_coupling: TURN_COUPLING * STEER_MAX,
            ..Self::arcade()
        }
    }
}
