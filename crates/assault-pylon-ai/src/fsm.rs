//! Pylon strike and damage logic.
//!
//! Pure functions over plain data. The sim's pylon system resolves the
//! player, calls [`evaluate_strike`], and applies the outcome; the
//! projectile system calls [`apply_damage`].
//!
//! Lifecycle: `Idle -> Scheduled -> (strike) -> Scheduled -> ...`, with
//! `Destroyed` absorbing from any state.

use glam::DVec3;
use rand::Rng;

use assault_core::components::PylonState;
use assault_core::constants::{PYLON_MISS_RADIUS, STRIKE_JITTER};
use assault_core::enums::{PylonPhase, StrikeResult};

use crate::bolt::jagged_path;
use crate::profiles::PylonProfile;

/// What the pylon can see of the player at strike time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTarget {
    pub position: DVec3,
    pub hitpoints: i32,
}

/// Input to a single strike attempt.
#[derive(Debug, Clone)]
pub struct StrikeContext {
    pub pylon_position: DVec3,
    pub interval_ms: u64,
    pub strength: i32,
    pub profile: PylonProfile,
    /// `None` when the player entity is not resolvable yet.
    pub player: Option<PlayerTarget>,
}

/// A strike that actually discharged.
#[derive(Debug, Clone, PartialEq)]
pub struct Strike {
    pub result: StrikeResult,
    /// End point of the bolt: the player's exact position on a hit.
    pub target: DVec3,
    /// Player hitpoints after the strike (unchanged on a miss).
    pub player_hitpoints: i32,
    pub bolt: Vec<DVec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrikeOutcome {
    /// Player unresolved; try again after `next_delay_ms` with no effect.
    Deferred { next_delay_ms: u64 },
    Fired {
        strike: Strike,
        next_delay_ms: u64,
    },
}

impl StrikeOutcome {
    pub fn next_delay_ms(&self) -> u64 {
        match self {
            StrikeOutcome::Deferred { next_delay_ms }
            | StrikeOutcome::Fired { next_delay_ms, .. } => *next_delay_ms,
        }
    }
}

/// Result of a projectile hitting a pylon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Pylon survived with `remaining` hitpoints.
    Absorbed { remaining: i32 },
    /// This hit took the pylon to zero or below.
    Destroyed,
    /// Pylon was already destroyed; nothing changed.
    Ignored,
}

/// Delay before the next strike: `interval` +/- 50%, uniform. Never zero.
pub fn jittered_delay<R: Rng + ?Sized>(interval_ms: u64, rng: &mut R) -> u64 {
    let interval = interval_ms as f64;
    let offset = (rng.gen::<f64>() - 0.5) * 2.0 * STRIKE_JITTER * interval;
    ((interval + offset).round() as u64).max(1)
}

/// Random point exactly `PYLON_MISS_RADIUS` from the pylon.
fn miss_target<R: Rng + ?Sized>(origin: DVec3, rng: &mut R) -> DVec3 {
    let dir = DVec3::new(
        rng.gen::<f64>() - 0.5,
        rng.gen::<f64>() - 0.5,
        rng.gen::<f64>() - 0.5,
    )
    .normalize_or_zero();
    let dir = if dir == DVec3::ZERO { DVec3::Y } else { dir };
    origin + dir * PYLON_MISS_RADIUS
}

/// Evaluate one strike attempt.
pub fn evaluate_strike<R: Rng + ?Sized>(ctx: &StrikeContext, rng: &mut R) -> StrikeOutcome {
    let Some(player) = ctx.player else {
        return StrikeOutcome::Deferred {
            next_delay_ms: ctx.interval_ms.max(1),
        };
    };

    let distance = ctx.pylon_position.distance(player.position);
    let (result, target, player_hitpoints) = if distance <= ctx.profile.max_range {
        (
            StrikeResult::Hit,
            player.position,
            (player.hitpoints - ctx.strength).max(0),
        )
    } else {
        (
            StrikeResult::Miss,
            miss_target(ctx.pylon_position, rng),
            player.hitpoints,
        )
    };

    let bolt = jagged_path(
        ctx.pylon_position,
        target,
        ctx.profile.bolt_segments,
        ctx.profile.bolt_variance,
        rng,
    );

    StrikeOutcome::Fired {
        strike: Strike {
            result,
            target,
            player_hitpoints,
            bolt,
        },
        next_delay_ms: jittered_delay(ctx.interval_ms, rng),
    }
}

/// Subtract projectile damage. Reaching `<= 0` moves the pylon to
/// `Destroyed`; the caller must cancel its pending strike.
pub fn apply_damage(pylon: &mut PylonState, damage: i32) -> DamageResult {
    if pylon.phase == PylonPhase::Destroyed {
        return DamageResult::Ignored;
    }
    pylon.hitpoints -= damage;
    if pylon.hitpoints <= 0 {
        pylon.phase = PylonPhase::Destroyed;
        DamageResult::Destroyed
    } else {
        DamageResult::Absorbed {
            remaining: pylon.hitpoints,
        }
    }
}

/// Mark a live pylon as having a pending strike. Returns false for a
/// destroyed pylon, which must never be scheduled again.
pub fn mark_scheduled(pylon: &mut PylonState) -> bool {
    match pylon.phase {
        PylonPhase::Destroyed => false,
        PylonPhase::Idle | PylonPhase::Scheduled => {
            pylon.phase = PylonPhase::Scheduled;
            true
        }
    }
}
