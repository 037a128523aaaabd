//! Pylon strike system: arms idle pylons and discharges due strikes.

use hecs::{Entity, World};
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

use assault_core::components::{Chassis, Hitpoints, Player, PylonState, StrikeBolt, Transform};
use assault_core::constants::BOLT_LIFETIME_MS;
use assault_core::enums::PylonPhase;
use assault_core::events::GameEvent;

use assault_pylon_ai::fsm::{
    evaluate_strike, jittered_delay, mark_scheduled, PlayerTarget, StrikeContext, StrikeOutcome,
};
use assault_pylon_ai::profiles::get_profile;
use assault_pylon_ai::scheduler::StrikeScheduler;

/// Run one frame of pylon AI at scheduler time `now_ms`.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    pylons: &HashMap<u32, Entity>,
    scheduler: &mut StrikeScheduler,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
    now_ms: u64,
) {
    arm_idle(world, scheduler, rng, now_ms);

    while let Some(pylon_id) = scheduler.pop_due(now_ms) {
        let Some(&entity) = pylons.get(&pylon_id) else {
            continue;
        };
        let Ok(pylon) = world.get::<&PylonState>(entity).map(|p| (*p).clone()) else {
            continue;
        };
        if pylon.phase == PylonPhase::Destroyed {
            continue;
        }

        let player = resolve_player(world);
        let ctx = StrikeContext {
            pylon_position: pylon.position,
            interval_ms: pylon.interval_ms,
            strength: pylon.strength,
            profile: get_profile(pylon.variant),
            player: player.map(|(_, target)| target),
        };

        let outcome = evaluate_strike(&ctx, rng);
        if let (StrikeOutcome::Fired { strike, .. }, Some((player_entity, target))) =
            (&outcome, player)
        {
            if strike.player_hitpoints != target.hitpoints {
                if let Ok(mut hp) = world.get::<&mut Hitpoints>(player_entity) {
                    hp.current = strike.player_hitpoints;
                }
                events.push(GameEvent::PlayerDamaged {
                    pylon_id,
                    amount: target.hitpoints - strike.player_hitpoints,
                    remaining: strike.player_hitpoints,
                });
            }
            events.push(GameEvent::StrikeFired {
                pylon_id,
                result: strike.result,
                target: strike.target,
            });
            world.spawn((StrikeBolt {
                pylon_id,
                result: strike.result,
                points: strike.bolt.clone(),
                expires_at_ms: now_ms + BOLT_LIFETIME_MS,
            },));
        } else {
            debug!(pylon = pylon_id, "player not resolvable, deferring strike");
        }

        scheduler.schedule(pylon_id, now_ms + outcome.next_delay_ms());
    }
}

/// Give every idle pylon its first timer.
fn arm_idle<R: Rng + ?Sized>(
    world: &mut World,
    scheduler: &mut StrikeScheduler,
    rng: &mut R,
    now_ms: u64,
) {
    for (_entity, pylon) in world.query_mut::<&mut PylonState>() {
        if pylon.phase == PylonPhase::Idle && mark_scheduled(pylon) {
            scheduler.schedule(pylon.id, now_ms + jittered_delay(pylon.interval_ms, rng));
        }
    }
}

/// The player as a strike target, once its chassis body exists.
fn resolve_player(world: &mut World) -> Option<(Entity, PlayerTarget)> {
    world
        .query_mut::<(&Player, &Chassis, &Transform, &Hitpoints)>()
        .into_iter()
        .next()
        .map(|(entity, (_, _, transform, hp))| {
            (
                entity,
                PlayerTarget {
                    position: transform.position,
                    hitpoints: hp.current,
                },
            )
        })
}
