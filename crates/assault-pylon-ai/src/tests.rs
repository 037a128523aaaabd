#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use assault_core::components::PylonState;
    use assault_core::constants::*;
    use assault_core::enums::{PylonPhase, PylonVariant, StrikeResult};

    use crate::bolt::jagged_path;
    use crate::fsm::*;
    use crate::profiles::get_profile;
    use crate::scheduler::StrikeScheduler;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn make_context(distance: f64, strength: i32, hitpoints: i32) -> StrikeContext {
        let mut profile = get_profile(PylonVariant::Standard);
        profile.strength = strength;
        StrikeContext {
            pylon_position: DVec3::new(0.0, 15.0, 0.0),
            interval_ms: 2000,
            strength,
            profile,
            player: Some(PlayerTarget {
                position: DVec3::new(distance, 15.0, 0.0),
                hitpoints,
            }),
        }
    }

    fn make_pylon(hitpoints: i32) -> PylonState {
        PylonState {
            id: 1,
            variant: PylonVariant::Standard,
            phase: PylonPhase::Scheduled,
            position: DVec3::ZERO,
            interval_ms: 2000,
            strength: 5,
            hitpoints,
        }
    }

    // ---- Strike evaluation ----

    #[test]
    fn test_strike_in_range_hits_exact_position() {
        let ctx = make_context(30.0, 5, 100);
        match evaluate_strike(&ctx, &mut rng()) {
            StrikeOutcome::Fired { strike, .. } => {
                assert_eq!(strike.result, StrikeResult::Hit);
                assert_eq!(strike.target, DVec3::new(30.0, 15.0, 0.0));
                assert_eq!(strike.player_hitpoints, 95);
                assert_eq!(*strike.bolt.last().unwrap(), strike.target);
            }
            other => panic!("expected a strike, got {other:?}"),
        }
    }

    #[test]
    fn test_strike_at_exact_max_range_hits() {
        let ctx = make_context(PYLON_MAX_RANGE, 5, 100);
        match evaluate_strike(&ctx, &mut rng()) {
            StrikeOutcome::Fired { strike, .. } => {
                assert_eq!(strike.result, StrikeResult::Hit);
                assert_eq!(strike.player_hitpoints, 95);
            }
            other => panic!("expected a strike, got {other:?}"),
        }
    }

    #[test]
    fn test_strike_out_of_range_misses_near_pylon() {
        // Pylon at distance 60, range 50, strength 5.
        let ctx = make_context(60.0, 5, 100);
        for seed in 0..50 {
            let mut r = ChaCha8Rng::seed_from_u64(seed);
            match evaluate_strike(&ctx, &mut r) {
                StrikeOutcome::Fired { strike, .. } => {
                    assert_eq!(strike.result, StrikeResult::Miss);
                    assert_eq!(strike.player_hitpoints, 100);
                    let reach = strike.target.distance(ctx.pylon_position);
                    assert!(reach <= 10.0 + 1e-9, "miss landed {reach} away");
                    assert_eq!(*strike.bolt.last().unwrap(), strike.target);
                }
                other => panic!("expected a strike, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_strike_floors_player_hitpoints_at_zero() {
        let ctx = make_context(5.0, 25, 10);
        match evaluate_strike(&ctx, &mut rng()) {
            StrikeOutcome::Fired { strike, .. } => assert_eq!(strike.player_hitpoints, 0),
            other => panic!("expected a strike, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_player_defers_with_plain_interval() {
        let mut ctx = make_context(0.0, 5, 100);
        ctx.player = None;
        let outcome = evaluate_strike(&ctx, &mut rng());
        assert_eq!(
            outcome,
            StrikeOutcome::Deferred {
                next_delay_ms: 2000
            }
        );
    }

    #[test]
    fn test_next_delay_is_jittered_within_half_interval() {
        let mut r = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let d = jittered_delay(2000, &mut r);
            assert!((1000..=3000).contains(&d), "delay {d} out of range");
            seen.insert(d);
        }
        assert!(seen.len() > 100, "delays are not jittered");
    }

    #[test]
    fn test_next_delay_independent_of_hit_or_miss() {
        // Same seed: the miss consumes extra randomness, but both delays
        // stay within the jitter window.
        for distance in [10.0, 100.0] {
            let ctx = make_context(distance, 5, 100);
            let delay = evaluate_strike(&ctx, &mut rng()).next_delay_ms();
            assert!((1000..=3000).contains(&delay));
        }
    }

    // ---- Bolt ----

    #[test]
    fn test_bolt_endpoints_exact_interior_perturbed_within_variance() {
        let start = DVec3::new(0.0, 30.0, 0.0);
        let end = DVec3::new(12.0, 0.0, -24.0);
        let path = jagged_path(start, end, BOLT_SEGMENTS, BOLT_VARIANCE, &mut rng());
        assert_eq!(path.len(), BOLT_SEGMENTS + 1);
        assert_eq!(path[0], start);
        assert_eq!(path[BOLT_SEGMENTS], end);
        for (i, p) in path.iter().enumerate() {
            let ideal = start.lerp(end, i as f64 / BOLT_SEGMENTS as f64);
            let off = (*p - ideal).abs();
            let half = BOLT_VARIANCE / 2.0 + 1e-12;
            assert!(off.x <= half && off.y <= half && off.z <= half);
        }
    }

    #[test]
    fn test_bolt_zero_segments_is_a_straight_line() {
        let path = jagged_path(DVec3::ZERO, DVec3::ONE, 0, 0.3, &mut rng());
        assert_eq!(path, vec![DVec3::ZERO, DVec3::ONE]);
    }

    // ---- Damage ----

    #[test]
    fn test_damage_absorbed() {
        let mut pylon = make_pylon(100);
        assert_eq!(
            apply_damage(&mut pylon, 10),
            DamageResult::Absorbed { remaining: 90 }
        );
        assert_eq!(pylon.phase, PylonPhase::Scheduled);
    }

    #[test]
    fn test_damage_to_exactly_zero_destroys() {
        let mut pylon = make_pylon(10);
        assert_eq!(apply_damage(&mut pylon, 10), DamageResult::Destroyed);
        assert_eq!(pylon.hitpoints, 0);
        assert_eq!(pylon.phase, PylonPhase::Destroyed);
    }

    #[test]
    fn test_destroyed_is_absorbing() {
        let mut pylon = make_pylon(5);
        apply_damage(&mut pylon, 10);
        assert_eq!(apply_damage(&mut pylon, 10), DamageResult::Ignored);
        assert!(!mark_scheduled(&mut pylon));
        assert_eq!(pylon.phase, PylonPhase::Destroyed);
    }

    #[test]
    fn test_mark_scheduled_from_idle() {
        let mut pylon = make_pylon(100);
        pylon.phase = PylonPhase::Idle;
        assert!(mark_scheduled(&mut pylon));
        assert_eq!(pylon.phase, PylonPhase::Scheduled);
    }

    // ---- Profiles ----

    #[test]
    fn test_profiles_stay_in_design_ranges() {
        for variant in [
            PylonVariant::Standard,
            PylonVariant::Heavy,
            PylonVariant::Overcharged,
        ] {
            let p = get_profile(variant);
            assert!((5..=25).contains(&p.strength));
            assert!((8..=12).contains(&p.bolt_segments));
            assert!((0.3..=0.5).contains(&p.bolt_variance));
            assert_eq!(p.hitpoints, PYLON_HITPOINTS);
        }
        assert_eq!(get_profile(PylonVariant::Standard).strength, 5);
    }

    // ---- Scheduler ----

    #[test]
    fn test_scheduler_pops_in_time_order() {
        let mut s = StrikeScheduler::new();
        s.schedule(3, 300);
        s.schedule(1, 100);
        s.schedule(2, 200);
        assert_eq!(s.pop_due(50), None);
        assert_eq!(s.pop_due(1000), Some(1));
        assert_eq!(s.pop_due(1000), Some(2));
        assert_eq!(s.pop_due(1000), Some(3));
        assert_eq!(s.pop_due(1000), None);
        assert!(s.is_empty());
    }

    #[test]
    fn test_scheduler_ties_break_by_pylon_id() {
        let mut s = StrikeScheduler::new();
        s.schedule(9, 100);
        s.schedule(4, 100);
        assert_eq!(s.pop_due(100), Some(4));
        assert_eq!(s.pop_due(100), Some(9));
    }

    #[test]
    fn test_scheduler_cancel_is_synchronous() {
        let mut s = StrikeScheduler::new();
        s.schedule(1, 100);
        assert!(s.cancel(1));
        assert!(!s.is_armed(1));
        assert_eq!(s.pop_due(10_000), None);
        assert!(!s.cancel(1));
    }

    #[test]
    fn test_scheduler_reschedule_supersedes_old_timer() {
        let mut s = StrikeScheduler::new();
        s.schedule(1, 100);
        s.schedule(1, 500);
        assert_eq!(s.len(), 1);
        assert_eq!(s.fire_at(1), Some(500));
        assert_eq!(s.pop_due(200), None);
        assert_eq!(s.pop_due(500), Some(1));
        assert_eq!(s.pop_due(10_000), None);
    }

    #[test]
    fn test_scheduler_cancel_then_rearm() {
        let mut s = StrikeScheduler::new();
        s.schedule(1, 100);
        s.cancel(1);
        s.schedule(1, 150);
        assert_eq!(s.pop_due(120), None);
        assert_eq!(s.pop_due(150), Some(1));
    }

    #[test]
    fn test_scheduler_pop_disarms() {
        let mut s = StrikeScheduler::new();
        s.schedule(2, 10);
        assert_eq!(s.pop_due(10), Some(2));
        assert!(!s.is_armed(2));
        assert_eq!(s.fire_at(2), None);
    }
}
