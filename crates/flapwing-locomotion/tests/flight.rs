//! End-to-end behaviour of the loop against the reference body and pilot.

#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use glam::Quat;
use flapwing_core::{tilt_from_upright, vec3, PoseFrame, PoseSample, TrackedNode, Vec3};
use flapwing_locomotion::{
    BankAxis, FlightState, GroundContact, LocomotionConfig, LocomotionLoop, TickSkip, TurnLaw, TurnMemory,
};
use flapwing_sim::{
    banked_glide, glide_spread, head_pitched, looking_glide, neutral, ScriptedPilot, SimBody, GRAVITY,
};

const DT: f32 = 1.0 / 60.0;

type Loop = LocomotionLoop<ScriptedPilot, SimBody>;

fn airborne() -> SimBody { SimBody::new(70.0).at(vec3(0.0, 50.0, 0.0)) }

fn build(cfg: LocomotionConfig, frame: PoseFrame, body: SimBody) -> Loop {
    LocomotionLoop::new(cfg, ScriptedPilot::new(frame), body).unwrap()
}

/// Hands 0.4 m apart, ahead of the head, at height `y`.
fn stroke_at(y: f32) -> PoseFrame {
    PoseFrame::new(
        PoseSample::at(vec3(-0.2, y, 0.2)),
        PoseSample::at(vec3(0.2, y, 0.2)),
        PoseSample::at(vec3(0.0, 1.6, 0.0)),
    )
}

fn step(lp: &mut Loop) -> flapwing_locomotion::TickReport {
    let rep = lp.advance(DT);
    lp.body_mut().step(DT, GRAVITY);
    rep
}

mod flapping {
    use super::*;

    #[test]
    fn downstroke_fires_and_arms_cooldown() {
        let mut lp = build(LocomotionConfig::default(), stroke_at(1.4), airborne());
        step(&mut lp);

        lp.source_mut().set_frame(stroke_at(1.4 - 1.0 * DT));
        let rep = step(&mut lp);
        let flap = rep.flap.unwrap();
        assert!(flap.fired);
        assert_abs_diff_eq!(flap.cooldown, 0.5);
        assert!(rep.impulse.y > 0.0);
        assert_eq!(lp.body().impulse_count(), 1);
        assert_abs_diff_eq!(lp.flap_cooldown(), 0.5 - DT, epsilon = 1e-6);
    }

    #[test]
    fn repeat_inside_cooldown_is_ignored_then_fires_after() {
        let mut lp = build(LocomotionConfig::default(), stroke_at(1.4), airborne());
        step(&mut lp);

        let mut fired_at = Vec::new();
        for i in 1..=40 {
            lp.source_mut().set_frame(stroke_at(1.4 - i as f32 * DT));
            if step(&mut lp).flap_fired() {
                fired_at.push(lp.tick());
            }
            if lp.tick() == 8 {
                // 0.1 s after the first flap
                assert!(lp.flap_cooldown() > 0.0);
                assert_eq!(fired_at.len(), 1);
            }
        }
        assert_eq!(fired_at.len(), 2);
        assert_eq!(fired_at[1] - fired_at[0], 30);
    }

    #[test]
    fn close_hands_speed_up() {
        let narrow = |y: f32| PoseFrame::new(
            PoseSample::at(vec3(-0.05, y, 0.2)),
            PoseSample::at(vec3(0.05, y, 0.2)),
            PoseSample::at(vec3(0.0, 1.6, 0.0)),
        );
        let mut lp = build(LocomotionConfig::default(), narrow(1.4), airborne().moving(vec3(0.0, 0.0, 2.0)));
        lp.advance(DT);
        lp.source_mut().set_frame(narrow(1.3));
        let rep = lp.advance(DT);
        assert_eq!(rep.state, Some(FlightState::Flapping));
        assert!(!rep.flap_fired());
        let v = lp.body().velocity;
        assert_abs_diff_eq!(v.length(), 2.0 + 2.0 * DT, epsilon = 1e-4);
        assert!(v.normalize().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn wide_hands_home_toward_base_speed() {
        let mut lp = build(LocomotionConfig::default(), stroke_at(1.4), airborne().moving(vec3(0.0, 0.0, 20.0)));
        lp.advance(DT);
        // upward sweep: flapping state without a downstroke
        lp.source_mut().set_frame(stroke_at(1.5));
        let rep = lp.advance(DT);
        assert_eq!(rep.state, Some(FlightState::Flapping));
        assert!(!rep.flap_fired());
        assert!(lp.body().velocity.length() < 20.0);
    }
}

mod gliding {
    use super::*;

    #[test]
    fn glide_force_trends_to_target() {
        let body = airborne().moving(vec3(0.0, 0.0, 5.0));
        let mut lp = build(LocomotionConfig::default(), glide_spread(0.5), body);

        let mut last = lp.glide_force();
        for _ in 0..120 {
            let rep = step(&mut lp);
            assert_eq!(rep.state, Some(FlightState::Gliding));
            let g = rep.glide.unwrap();
            assert_abs_diff_eq!(g.ratio, 0.5, epsilon = 1e-5);
            assert!(g.glide_force <= last && g.glide_force >= 1.5);
            last = g.glide_force;
        }
        assert_abs_diff_eq!(lp.glide_force(), 1.5, epsilon = 1e-2);
    }

    #[test]
    fn slow_glide_is_braked() {
        let body = airborne().moving(vec3(0.0, -0.05, 0.05));
        let mut lp = build(LocomotionConfig::default(), glide_spread(0.5), body);
        let rep = lp.advance(DT);
        let v = rep.glide.unwrap().velocity.unwrap();
        assert!(v.abs_diff_eq(vec3(0.0, -0.001, 0.001), 1e-6));
        assert_eq!(lp.body().velocity, v);
    }

    #[test]
    fn grounded_glide_pose_applies_nothing() {
        let mut lp = build(LocomotionConfig::default(), glide_spread(0.5), SimBody::new(70.0));
        let before = lp.glide_force();
        let rep = step(&mut lp);
        assert_eq!(rep.state, Some(FlightState::Grounded));
        assert!(rep.glide.is_none() && rep.flap.is_none());
        assert_eq!(rep.force, Vec3::ZERO);
        assert_eq!(lp.glide_force(), before);
    }

    #[test]
    fn head_pitch_pushes_forward() {
        let mut lp = build(LocomotionConfig::default(), head_pitched(neutral(), 30.0), airborne());
        let rep = lp.advance(DT);
        assert_eq!(rep.state, Some(FlightState::Coasting));
        assert!(rep.force.abs_diff_eq(vec3(0.0, 0.0, 0.5), 1e-5));
    }
}

mod modes {
    use super::*;

    #[test]
    fn never_two_force_models_in_one_tick() {
        let mut lp = build(LocomotionConfig::default(), neutral(), SimBody::new(70.0).at(vec3(0.0, 3.0, 0.0)));
        for i in 0..600 {
            let frame = match (i / 30) % 4 {
                0 => stroke_at(1.8 - (i % 30) as f32 * 0.03),
                1 => glide_spread(0.3 + (i % 30) as f32 * 0.02),
                2 => neutral(),
                _ => stroke_at(1.0 + (i % 30) as f32 * 0.03),
            };
            lp.source_mut().set_frame(frame);
            let rep = step(&mut lp);
            let state = rep.state.unwrap();
            assert!(!(rep.flap.is_some() && rep.glide.is_some()));
            assert_eq!(rep.flap.is_some(), state == FlightState::Flapping);
            if rep.glide.is_some() {
                assert_eq!(state, FlightState::Gliding);
            }
        }
    }

    #[test]
    fn ground_contact_policy() {
        let cfg = LocomotionConfig { ground_contact: GroundContact::ForcesFlapping, ..LocomotionConfig::default() };
        let mut lp = build(cfg, glide_spread(0.5), SimBody::new(70.0));
        let rep = lp.advance(DT);
        assert_eq!(rep.state, Some(FlightState::Flapping));
        assert!(!rep.flap_fired());

        let mut lp = build(LocomotionConfig::default(), glide_spread(0.5), SimBody::new(70.0));
        assert_eq!(lp.advance(DT).state, Some(FlightState::Grounded));
    }

    #[test]
    fn take_off_from_the_ground() {
        let mut lp = build(LocomotionConfig::default(), stroke_at(1.4), SimBody::new(70.0));
        step(&mut lp);
        lp.source_mut().set_frame(stroke_at(1.3));
        let rep = step(&mut lp);
        assert!(rep.grounded);
        assert!(rep.flap_fired());
    }
}

mod turning {
    use super::*;

    fn height_law() -> LocomotionConfig {
        LocomotionConfig { turn_law: TurnLaw::HandHeight, ..LocomotionConfig::default() }
    }

    #[test]
    fn small_height_difference_clears_turn() {
        let body = airborne().moving(vec3(0.0, 0.0, 8.0));
        let mut lp = build(height_law(), banked_glide(0.5, 0.02), body);
        let rep = lp.advance(DT);
        let turn = rep.turn.unwrap();
        assert_eq!(turn.memory, TurnMemory::NoTurn);
        assert!(turn.bank.is_none());
        assert_eq!(lp.turn_memory(), TurnMemory::NoTurn);
    }

    #[test]
    fn sub_threshold_wobble_never_turns() {
        let body = airborne().moving(vec3(0.0, 0.0, 8.0));
        let mut lp = build(height_law(), banked_glide(0.5, 0.09), body);
        for i in 0..60 {
            let diff = if i % 2 == 0 { 0.09 } else { -0.09 };
            lp.source_mut().set_frame(banked_glide(0.5, diff));
            step(&mut lp);
            assert_eq!(lp.turn_memory(), TurnMemory::NoTurn);
        }
    }

    #[test]
    fn reversal_is_gradual() {
        let body = airborne().moving(vec3(0.0, 0.0, 8.0));
        let mut lp = build(height_law(), banked_glide(0.5, 0.5), body);
        step(&mut lp);
        assert_abs_diff_eq!(lp.turn_memory().direction().unwrap(), 0.5, epsilon = 1e-5);

        lp.source_mut().set_frame(banked_glide(0.5, -0.5));
        step(&mut lp);
        let d = lp.turn_memory().direction().unwrap();
        assert!(d > -0.5 && d < 0.5);

        for _ in 0..120 { step(&mut lp); }
        let d = lp.turn_memory().direction().unwrap();
        assert_abs_diff_eq!(d, -0.5, epsilon = 1e-3);
    }

    #[test]
    fn looking_right_banks_and_steers_right() {
        let body = airborne().moving(vec3(0.0, 0.0, 5.0));
        let mut lp = build(LocomotionConfig::default(), looking_glide(0.5, 10.0), body);
        let rep = lp.advance(DT);
        let turn = rep.turn.unwrap();
        assert!(turn.signal > 0.0);
        assert!(turn.bank.is_some());
        assert!(turn.steer_force.x > 0.0);
        assert!(tilt_from_upright(lp.body().rotation) > 0.0);
    }

    #[test]
    fn roll_axis_drops_the_inside_wing() {
        let cfg = LocomotionConfig { bank_axis: BankAxis::Roll, ..LocomotionConfig::default() };
        let body = airborne().moving(vec3(0.0, 0.0, 5.0));
        let mut lp = build(cfg, looking_glide(0.5, 10.0), body);
        lp.advance(DT);
        let rot = lp.body().rotation;
        assert!((rot * Vec3::X).y < 0.0);
        assert_abs_diff_eq!((rot * Vec3::Z).y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn no_turn_while_flapping_when_disabled() {
        let cfg = LocomotionConfig { turn_while_flapping: false, ..LocomotionConfig::default() };
        let mut lp = build(cfg, stroke_at(1.4), airborne().moving(vec3(0.0, 0.0, 5.0)));
        step(&mut lp);
        lp.source_mut().set_frame(stroke_at(1.3));
        let rep = step(&mut lp);
        assert!(rep.flap_fired());
        assert!(rep.turn.is_none());
    }
}

mod stability {
    use super::*;

    #[test]
    fn tilt_decays_to_upright() {
        let mut body = SimBody::new(70.0);
        body.rotation = Quat::from_rotation_z(30f32.to_radians());
        let mut lp = build(LocomotionConfig::default(), neutral(), body);

        let mut last = tilt_from_upright(lp.body().rotation);
        for _ in 0..600 {
            let rep = step(&mut lp);
            assert!(rep.tilt_after <= last + 1e-5);
            last = rep.tilt_after;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn lost_tracking_holds_everything() {
        let mut lp = build(LocomotionConfig::default(), glide_spread(0.5), airborne().moving(vec3(0.0, 0.0, 5.0)));
        step(&mut lp);
        let digest = lp.state_digest();
        let velocity = lp.body().velocity;

        lp.source_mut().drop_node(TrackedNode::LeftHand);
        let rep = lp.advance(DT);
        assert_eq!(rep.skip, Some(TickSkip::MissingPosition(TrackedNode::LeftHand)));
        assert!(!rep.committed());
        assert_eq!(lp.state_digest(), digest);
        assert_eq!(lp.body().velocity, velocity);
        assert_eq!(lp.body().pending_force(), Vec3::ZERO);

        lp.source_mut().restore_all();
        assert!(lp.advance(DT).committed());
        assert_eq!(lp.tick(), 2);
    }

    #[test]
    fn degenerate_dt_is_a_no_op() {
        let mut lp = build(LocomotionConfig::default(), glide_spread(0.5), airborne().moving(vec3(0.0, 0.0, 5.0)));
        step(&mut lp);
        let digest = lp.state_digest();
        let rotation = lp.body().rotation;
        for dt in [0.0, -0.1, f32::INFINITY] {
            assert!(!lp.advance(dt).committed());
        }
        assert_eq!(lp.state_digest(), digest);
        assert_eq!(lp.body().rotation, rotation);
    }

    #[test]
    fn aero_lifts_and_drags_when_enabled() {
        let cfg = LocomotionConfig { aero: Some(Default::default()), ..LocomotionConfig::default() };
        let mut lp = build(cfg, neutral(), airborne().moving(vec3(0.0, 0.0, 10.0)));
        let rep = lp.advance(DT);
        assert_eq!(rep.state, Some(FlightState::Coasting));
        assert!(rep.force.y > 0.0);
        assert!(rep.force.z < 0.0);

        let mut plain = build(LocomotionConfig::default(), neutral(), airborne().moving(vec3(0.0, 0.0, 10.0)));
        assert_eq!(plain.advance(DT).force, Vec3::ZERO);
    }
}
