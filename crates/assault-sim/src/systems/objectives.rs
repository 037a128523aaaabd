//! Checkpoints, secret crate, countdown, and race-end conditions.

use hecs::World;
use tracing::info;

use assault_core::components::{Checkpoint, Chassis, Hitpoints, Objective, Player, SecretCrate, Transform};
use assault_core::constants::OBJECTIVE_RADIUS;
use assault_core::enums::RacePhase;
use assault_core::events::GameEvent;

/// Mark objectives the player is within reach of. Each fires its event once.
pub fn check_proximity(world: &mut World, events: &mut Vec<GameEvent>) {
    let Some(player) = world
        .query_mut::<(&Player, &Chassis, &Transform)>()
        .into_iter()
        .next()
        .map(|(_, (_, _, transform))| transform.position)
    else {
        return;
    };

    for (_entity, (objective, secret)) in
        world.query_mut::<(&mut Objective, Option<&SecretCrate>)>()
    {
        if objective.visited || objective.position.distance(player) > OBJECTIVE_RADIUS {
            continue;
        }
        objective.visited = true;
        let id = objective.id.clone();
        if secret.is_some() {
            info!(objective = %id, "secret crate found");
            events.push(GameEvent::SecretFound { id });
        } else {
            info!(objective = %id, "checkpoint reached");
            events.push(GameEvent::CheckpointReached { id });
        }
    }
}

/// Count the race clock down. `None` means the map has no time limit.
pub fn countdown(time_left: &mut Option<f64>, dt: f64) {
    if let Some(left) = time_left {
        *left = (*left - dt).max(0.0);
    }
}

/// The phase the race ends in this frame, if any. Wrecked takes precedence
/// over time running out, which takes precedence over finishing.
pub fn race_result(world: &mut World, time_left: Option<f64>) -> Option<RacePhase> {
    let wrecked = world
        .query_mut::<(&Player, &Hitpoints)>()
        .into_iter()
        .any(|(_, (_, hp))| hp.current <= 0);
    if wrecked {
        return Some(RacePhase::Wrecked);
    }
    if time_left.is_some_and(|left| left <= 0.0) {
        return Some(RacePhase::TimeUp);
    }

    let mut total = 0;
    let mut visited = 0;
    for (_entity, (objective, _)) in world.query_mut::<(&Objective, &Checkpoint)>() {
        total += 1;
        if objective.visited {
            visited += 1;
        }
    }
    (total > 0 && visited == total).then_some(RacePhase::Finished)
}

/// Run all objective checks. Returns the ending phase, if the race ended.
pub fn run(
    world: &mut World,
    time_left: &mut Option<f64>,
    events: &mut Vec<GameEvent>,
    dt: f64,
) -> Option<RacePhase> {
    check_proximity(world, events);
    countdown(time_left, dt);
    let ended = race_result(world, *time_left)?;
    info!(phase = ?ended, "race ended");
    events.push(GameEvent::RaceEnded { phase: ended });
    Some(ended)
}
