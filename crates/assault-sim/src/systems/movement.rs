//! Kinematic integration of body velocities into transforms.
//!
//! position += linear * dt; orientation turns by angular * dt.

use glam::DQuat;
use hecs::World;

use assault_core::components::{BodyVelocity, Transform};

/// Integrate every body that has both a transform and a velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (transform, body)) in world.query_mut::<(&mut Transform, &BodyVelocity)>() {
        transform.position += body.linear * dt;
        let turn = body.angular * dt;
        if turn != glam::DVec3::ZERO {
            transform.rotation = (DQuat::from_scaled_axis(turn) * transform.rotation).normalize();
        }
    }
}
