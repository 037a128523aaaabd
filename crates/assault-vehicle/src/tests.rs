#[cfg(test)]
mod tests {
    use glam::{DQuat, DVec3};

    use assault_core::constants::DT;
    use assault_core::input::DriveInput;

    use crate::controller::{VehicleController, VehicleState};
    use crate::tuning::VehicleTuning;
    use crate::wheels::{animate, default_rig, is_front};

    fn input(forward: bool, backward: bool, left: bool, right: bool) -> DriveInput {
        DriveInput {
            forward,
            backward,
            left,
            right,
        }
    }

    fn scenario_tuning() -> VehicleTuning {
        VehicleTuning {
            accel: 20.0,
            forward_max: 30.0,
            ..VehicleTuning::arcade()
        }
    }

    // ---- Speed integration ----

    #[test]
    fn test_forward_one_second_unclamped() {
        let mut ctl = VehicleController::new(scenario_tuning());
        ctl.integrate(&input(true, false, false, false), 1.0);
        assert_eq!(ctl.state().speed, 20.0);
    }

    #[test]
    fn test_forward_overshoot_clamps_to_max() {
        let mut ctl = VehicleController::new(scenario_tuning());
        ctl.integrate(&input(true, false, false, false), 1.0);
        ctl.integrate(&input(true, false, false, false), 1.0);
        // 20 + 20 = 40 overshoots and lands exactly on the boundary.
        assert_eq!(ctl.state().speed, 30.0);

        let mut big_step = VehicleController::new(scenario_tuning());
        big_step.integrate(&input(true, false, false, false), 2.0);
        assert_eq!(big_step.state().speed, 30.0);
    }

    #[test]
    fn test_forward_held_one_second_at_tick_rate() {
        let mut ctl = VehicleController::new(scenario_tuning());
        for _ in 0..60 {
            ctl.integrate(&input(true, false, false, false), DT);
        }
        assert!((ctl.state().speed - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_clamps_to_reverse_max() {
        let tuning = VehicleTuning::arcade();
        let mut ctl = VehicleController::new(tuning);
        for _ in 0..600 {
            ctl.integrate(&input(false, true, false, false), DT);
        }
        assert_eq!(ctl.state().speed, tuning.reverse_max);
        assert!(tuning.reverse_max.abs() * 2.0 == tuning.forward_max);
    }

    #[test]
    fn test_both_throttle_keys_cancel_without_decay() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.restore(VehicleState {
            speed: 10.0,
            steering_angle: 0.0,
        });
        ctl.integrate(&input(true, true, false, false), DT);
        assert!((ctl.state().speed - 10.0).abs() < 1e-12);
    }

    // ---- Steering integration ----

    #[test]
    fn test_right_steers_positive_left_negative() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.integrate(&input(false, false, false, true), DT);
        assert!(ctl.state().steering_angle > 0.0);

        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.integrate(&input(false, false, true, false), DT);
        assert!(ctl.state().steering_angle < 0.0);
    }

    #[test]
    fn test_right_takes_priority_over_left() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.integrate(&input(false, false, true, true), DT);
        assert!(ctl.state().steering_angle > 0.0);
    }

    // ---- Decay ----

    #[test]
    fn test_idle_decay_is_monotone_and_settles() {
        let tuning = VehicleTuning::arcade();
        let mut ctl = VehicleController::new(tuning);
        ctl.restore(VehicleState {
            speed: tuning.forward_max,
            steering_angle: -tuning.steer_max,
        });

        let mut prev = ctl.state();
        let mut settled_at = None;
        for tick in 0..2000 {
            ctl.integrate(&DriveInput::NONE, DT);
            let s = ctl.state();
            assert!(s.speed.abs() <= prev.speed.abs());
            assert!(s.steering_angle.abs() <= prev.steering_angle.abs());
            // Never crosses zero.
            assert!(s.speed >= 0.0);
            assert!(s.steering_angle <= 0.0);
            if s.speed == 0.0 && s.steering_angle == 0.0 && settled_at.is_none() {
                settled_at = Some(tick);
            }
            prev = s;
        }
        // 30 * 0.98^n < 1e-3 needs n ~ 511 ticks.
        let settled_at = settled_at.expect("controller never settled");
        assert!(settled_at < 600, "settled after {settled_at} ticks");
    }

    #[test]
    fn test_negative_speed_decays_toward_zero() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.restore(VehicleState {
            speed: -10.0,
            steering_angle: 0.2,
        });
        ctl.integrate(&DriveInput::NONE, DT);
        let s = ctl.state();
        assert!((s.speed - (-9.8)).abs() < 1e-12);
        assert!((s.steering_angle - 0.18).abs() < 1e-12);
    }

    // ---- Clamp invariants ----

    #[test]
    fn test_clamps_hold_for_long_mixed_sequences() {
        let tuning = VehicleTuning::arcade();
        let mut ctl = VehicleController::new(tuning);
        // Deterministic pseudo-random key pattern.
        let mut seed: u32 = 0x9E37_79B9;
        for _ in 0..20_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let i = input(seed & 1 != 0, seed & 2 != 0, seed & 4 != 0, seed & 8 != 0);
            let dt = f64::from(seed % 7) * DT;
            ctl.integrate(&i, dt);
            let s = ctl.state();
            assert!(s.speed >= tuning.reverse_max && s.speed <= tuning.forward_max);
            assert!(s.steering_angle.abs() <= tuning.steer_max);
        }
    }

    #[test]
    fn test_restore_clamps_out_of_range_values() {
        let tuning = VehicleTuning::arcade();
        let mut ctl = VehicleController::new(tuning);
        ctl.restore(VehicleState {
            speed: 1000.0,
            steering_angle: -5.0,
        });
        assert_eq!(ctl.state().speed, tuning.forward_max);
        assert_eq!(ctl.state().steering_angle, -tuning.steer_max);
    }

    #[test]
    fn test_normalized_profile_limits_to_unit_steer() {
        let tuning = VehicleTuning::normalized();
        let mut ctl = VehicleController::new(tuning);
        for _ in 0..600 {
            ctl.integrate(&input(false, false, false, true), DT);
        }
        assert_eq!(ctl.state().steering_angle, 1.0);
    }

    // ---- Chassis command ----

    #[test]
    fn test_update_without_chassis_is_noop() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.restore(VehicleState {
            speed: 12.0,
            steering_angle: 0.1,
        });
        let before = ctl.state();
        for _ in 0..30 {
            let cmd = ctl.update(&input(true, false, true, false), DT, None);
            assert!(cmd.is_none());
        }
        assert_eq!(ctl.state(), before);
    }

    #[test]
    fn test_update_with_chassis_resumes_from_preserved_state() {
        let mut ctl = VehicleController::new(scenario_tuning());
        ctl.update(&input(true, false, false, false), 0.5, Some(DQuat::IDENTITY));
        ctl.update(&input(true, false, false, false), 0.5, None);
        let cmd = ctl
            .update(&input(true, false, false, false), 0.5, Some(DQuat::IDENTITY))
            .unwrap();
        assert_eq!(ctl.state().speed, 20.0);
        assert!((cmd.linear_velocity - DVec3::new(0.0, 0.0, 20.0)).length() < 1e-12);
    }

    #[test]
    fn test_command_follows_chassis_heading() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.restore(VehicleState {
            speed: 10.0,
            steering_angle: 0.0,
        });
        let rot = DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2);
        let cmd = ctl.command(rot);
        assert!((cmd.linear_velocity - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-9);
        assert_eq!(cmd.angular_velocity, DVec3::ZERO);
    }

    #[test]
    fn test_yaw_rate_is_steer_times_speed_times_coupling() {
        let tuning = VehicleTuning::arcade();
        let mut ctl = VehicleController::new(tuning);
        ctl.restore(VehicleState {
            speed: 20.0,
            steering_angle: 0.25,
        });
        let cmd = ctl.command(DQuat::IDENTITY);
        let expected = 0.25 * 20.0 * tuning.turn_coupling;
        assert!((cmd.angular_velocity.y - expected).abs() < 1e-12);
        assert_eq!(cmd.angular_velocity.x, 0.0);
        assert_eq!(cmd.angular_velocity.z, 0.0);
    }

    #[test]
    fn test_reversing_with_right_lock_yaws_left() {
        let mut ctl = VehicleController::new(VehicleTuning::arcade());
        ctl.restore(VehicleState {
            speed: -5.0,
            steering_angle: 0.3,
        });
        assert!(ctl.command(DQuat::IDENTITY).angular_velocity.y < 0.0);
    }

    // ---- Wheels ----

    #[test]
    fn test_default_rig_has_two_front_wheels() {
        let rig = default_rig();
        assert_eq!(rig.wheels.len(), 4);
        assert_eq!(rig.wheels.iter().filter(|w| is_front(w)).count(), 2);
    }

    #[test]
    fn test_animate_steers_front_only_and_spins_all() {
        let mut rig = default_rig();
        let state = VehicleState {
            speed: 4.0,
            steering_angle: 0.3,
        };
        animate(&mut rig, &state, 0.1, 0.4);
        for wheel in &rig.wheels {
            if is_front(wheel) {
                assert_eq!(wheel.steer_yaw, -0.3);
            } else {
                assert_eq!(wheel.steer_yaw, 0.0);
            }
            assert!((wheel.spin - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_animate_does_not_touch_motion_state() {
        let mut rig = default_rig();
        let state = VehicleState {
            speed: -3.0,
            steering_angle: -0.2,
        };
        let copy = state;
        animate(&mut rig, &state, DT, 0.4);
        assert_eq!(state, copy);
        // Reverse rolls backwards, wrapped into [0, TAU).
        for wheel in &rig.wheels {
            assert!(wheel.spin >= 0.0 && wheel.spin < std::f64::consts::TAU);
        }
    }
}
