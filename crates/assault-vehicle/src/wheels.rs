//! Cosmetic wheel animation. Writes only to the wheel rig, never back
//! into the motion state.
//!
//! A wheel is a front (steered) wheel iff its pivot sits ahead of the
//! chassis origin, `offset.z > 0`.

use std::f64::consts::TAU;

use glam::DVec3;

use assault_core::components::{Wheel, WheelRig};

use crate::controller::VehicleState;

/// Four-wheel rig matching the stock chassis collider (4 wide, 6 long).
pub fn default_rig() -> WheelRig {
    let wheel = |name: &str, x: f64, z: f64| Wheel {
        name: name.to_string(),
        offset: DVec3::new(x, -0.57, z),
        steer_yaw: 0.0,
        spin: 0.0,
    };
    WheelRig {
        wheels: vec![
            wheel("wheel_fl", -1.6, 2.1),
            wheel("wheel_fr", 1.6, 2.1),
            wheel("wheel_rl", -1.6, -2.1),
            wheel("wheel_rr", 1.6, -2.1),
        ],
    }
}

pub fn is_front(wheel: &Wheel) -> bool {
    wheel.offset.z > 0.0
}

/// Turn the front pivots against the steering angle and roll every wheel
/// by the distance travelled this tick.
pub fn animate(rig: &mut WheelRig, state: &VehicleState, dt: f64, wheel_radius: f64) {
    let roll = if wheel_radius > 0.0 {
        state.speed * dt / wheel_radius
    } else {
        0.0
    };
    for wheel in &mut rig.wheels {
        if is_front(wheel) {
            wheel.steer_yaw = -state.steering_angle;
        }
        wheel.spin = (wheel.spin + roll).rem_euclid(TAU);
    }
}
