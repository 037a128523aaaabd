//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use assault_core::components::*;
use assault_core::enums::{RacePhase, Storyline};
use assault_core::events::GameEvent;
use assault_core::input::DriveInput;
use assault_core::state::*;
use assault_core::types::SimTime;

use assault_vehicle::VehicleState;

/// Everything outside the world that the snapshot reports.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: RacePhase,
    pub storyline: Storyline,
    pub map_name: &'a str,
    pub vehicle: VehicleState,
    pub input: DriveInput,
    pub time_left: Option<f64>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        storyline: ctx.storyline,
        map_name: ctx.map_name.to_string(),
        vehicle: build_vehicle(world, &ctx.vehicle),
        input: ctx.input,
        pylons: build_pylons(world),
        projectiles: world
            .query::<(&Projectile, &Transform)>()
            .iter()
            .map(|(_, (_, transform))| transform.position)
            .collect(),
        bolts: world
            .query::<&StrikeBolt>()
            .iter()
            .map(|(_, bolt)| BoltView {
                pylon_id: bolt.pylon_id,
                result: bolt.result,
                points: bolt.points.clone(),
            })
            .collect(),
        objectives: build_objectives(world),
        time_left: ctx.time_left,
        events,
    }
}

/// Vehicle view, present once the chassis body exists.
fn build_vehicle(world: &World, state: &VehicleState) -> Option<VehicleView> {
    let mut query = world.query::<(
        &Player,
        &Chassis,
        &Transform,
        &BodyVelocity,
        &Hitpoints,
        Option<&WheelRig>,
    )>();
    let (_, (_, _, transform, body, hp, rig)) = query.iter().next()?;
    Some(VehicleView {
        position: transform.position,
        rotation: transform.rotation,
        linear_velocity: body.linear,
        speed: state.speed,
        steering_angle: state.steering_angle,
        hitpoints: hp.current,
        max_hitpoints: hp.max,
        wheels: rig
            .map(|rig| {
                rig.wheels
                    .iter()
                    .map(|w| WheelView {
                        name: w.name.clone(),
                        steer_yaw: w.steer_yaw,
                        spin: w.spin,
                    })
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn build_pylons(world: &World) -> Vec<PylonView> {
    let mut pylons: Vec<PylonView> = world
        .query::<&PylonState>()
        .iter()
        .map(|(_, p)| PylonView {
            id: p.id,
            variant: p.variant,
            phase: p.phase,
            position: p.position,
            hitpoints: p.hitpoints,
        })
        .collect();
    pylons.sort_by_key(|p| p.id);
    pylons
}

/// Checkpoints first, then the secret crate, each in id order.
fn build_objectives(world: &World) -> Vec<ObjectiveView> {
    let mut objectives: Vec<ObjectiveView> = world
        .query::<(&Objective, Option<&SecretCrate>)>()
        .iter()
        .map(|(_, (o, secret))| ObjectiveView {
            id: o.id.clone(),
            name: o.name.clone(),
            position: o.position,
            visited: o.visited,
            secret: secret.is_some(),
        })
        .collect();
    objectives.sort_by(|a, b| (a.secret, &a.id).cmp(&(b.secret, &b.id)));
    objectives
}
