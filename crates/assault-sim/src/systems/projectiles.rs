//! Player projectiles: firing, lifetime, and pylon collision.

use glam::DVec3;
use hecs::{Entity, World};
use tracing::info;

use assault_core::components::{BodyVelocity, Chassis, Player, Projectile, PylonState, Transform};
use assault_core::constants::*;
use assault_core::enums::PylonPhase;
use assault_core::events::GameEvent;
use assault_core::types::forward_of;

use assault_pylon_ai::fsm::{apply_damage, DamageResult};
use assault_pylon_ai::scheduler::StrikeScheduler;

/// Fire from the chassis muzzle if the cooldown has elapsed.
/// Returns the spawned projectile, or `None` while cooling down or when the
/// chassis body is not ready.
pub fn try_fire(
    world: &mut World,
    cooldown: &mut f64,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    if *cooldown > 0.0 {
        return None;
    }
    let muzzle = world
        .query_mut::<(&Player, &Chassis, &Transform)>()
        .into_iter()
        .next()
        .map(|(_, (_, _, transform))| *transform)?;

    let direction = forward_of(muzzle.rotation);
    let origin = muzzle.position + direction * MUZZLE_FORWARD + DVec3::Y * MUZZLE_UP;
    let entity = spawn(world, origin, direction);
    *cooldown = FIRE_COOLDOWN_SECS;
    events.push(GameEvent::ProjectileFired { position: origin });
    Some(entity)
}

/// Spawn a projectile at `origin` travelling along `direction`.
pub fn spawn(world: &mut World, origin: DVec3, direction: DVec3) -> Entity {
    let direction = direction.normalize_or_zero();
    world.spawn((
        Projectile {
            origin,
            direction,
            speed: PROJECTILE_SPEED,
            damage: PROJECTILE_DAMAGE,
            ttl_secs: PROJECTILE_TTL_SECS,
        },
        Transform {
            position: origin,
            rotation: glam::DQuat::IDENTITY,
        },
        BodyVelocity {
            linear: direction * PROJECTILE_SPEED,
            angular: DVec3::ZERO,
        },
    ))
}

/// Whether `point` is inside a pylon's cylinder, widened by the projectile radius.
/// The pylon position is the cylinder's centre.
pub fn hits_pylon(point: DVec3, pylon: DVec3) -> bool {
    let horizontal = DVec3::new(point.x - pylon.x, 0.0, point.z - pylon.z).length();
    let vertical = (point.y - pylon.y).abs();
    horizontal <= PYLON_DIAMETER / 2.0 + PROJECTILE_RADIUS
        && vertical <= PYLON_HEIGHT / 2.0 + PROJECTILE_RADIUS
}

/// Age projectiles and resolve pylon hits. Spent or colliding projectiles
/// are pushed to `despawn`. A pylon destroyed here has its pending strike
/// cancelled before this returns.
pub fn run(
    world: &mut World,
    scheduler: &mut StrikeScheduler,
    events: &mut Vec<GameEvent>,
    despawn: &mut Vec<Entity>,
    dt: f64,
) {
    let mut impacts: Vec<(Entity, DVec3, i32)> = Vec::new();
    for (entity, (projectile, transform)) in world.query_mut::<(&mut Projectile, &Transform)>() {
        projectile.ttl_secs -= dt;
        if projectile.ttl_secs <= 0.0 {
            despawn.push(entity);
        } else {
            impacts.push((entity, transform.position, projectile.damage));
        }
    }

    for (entity, position, damage) in impacts {
        let struck = world
            .query_mut::<&mut PylonState>()
            .into_iter()
            .find(|(_, pylon)| {
                pylon.phase != PylonPhase::Destroyed && hits_pylon(position, pylon.position)
            });
        let Some((_, pylon)) = struck else {
            continue;
        };

        let id = pylon.id;
        match apply_damage(pylon, damage) {
            DamageResult::Absorbed { remaining } => {
                events.push(GameEvent::PylonHit {
                    pylon_id: id,
                    remaining,
                });
            }
            DamageResult::Destroyed => {
                scheduler.cancel(id);
                events.push(GameEvent::PylonDestroyed { pylon_id: id });
                info!(pylon = id, "pylon destroyed");
            }
            DamageResult::Ignored => continue,
        }
        despawn.push(entity);
    }
}
