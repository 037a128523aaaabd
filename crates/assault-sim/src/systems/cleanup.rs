//! Cleanup system: removes expired, out-of-bounds, or destroyed entities.

use hecs::{Entity, World};

use assault_core::components::{Projectile, PylonState, StrikeBolt, Transform};
use assault_core::constants::WORLD_HALF_EXTENT;
use assault_core::enums::PylonPhase;

/// Despawn everything queued by earlier systems plus anything expired this
/// frame. Uses the caller's buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, now_ms: u64) {
    for (entity, bolt) in world.query_mut::<&StrikeBolt>() {
        if now_ms >= bolt.expires_at_ms {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_projectile, transform)) in world.query_mut::<(&Projectile, &Transform)>() {
        let p = transform.position;
        if p.x.abs() > WORLD_HALF_EXTENT
            || p.y.abs() > WORLD_HALF_EXTENT
            || p.z.abs() > WORLD_HALF_EXTENT
        {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pylon) in world.query_mut::<&PylonState>() {
        if pylon.phase == PylonPhase::Destroyed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
