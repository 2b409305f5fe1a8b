use serde::{Deserialize, Serialize};
use flapwing_core::{PoseFrame, Scalar, FORWARD};

/// Classification of one tick. `Coasting` is the ambiguous case where no
/// flight model runs (hands straddle the head and the body is airborne).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FlightState { Grounded, Flapping, Gliding, Coasting }

/// What ground contact does to classification.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundContact {
    /// Ground contact rules out gliding and suppresses flight forces; a flap
    /// gesture still classifies as flapping so the pilot can take off.
    #[default]
    BlocksGlide,
    /// Ground contact alone classifies as flapping, whatever the hands do.
    ForcesFlapping,
}

#[derive(Copy, Clone, Debug)]
pub struct ModeParams {
    pub flap_threshold: Scalar,     // m/s, mean hand speed needed to flap
    pub ground_contact: GroundContact,
}

#[derive(Copy, Clone, Debug)]
pub struct ModeArbiter { pub params: ModeParams }

impl ModeArbiter {
    pub fn new(params: ModeParams) -> Self { Self { params } }

    /// Exactly one state per tick: flapping, then ground contact, then gliding.
    pub fn classify(&self, frame: &PoseFrame, avg_hand_speed: Scalar, grounded: bool) -> FlightState {
        let head = frame.head.position.dot(FORWARD);
        let left = frame.left.position.dot(FORWARD);
        let right = frame.right.position.dot(FORWARD);

        let hand_ahead = left >= head || right >= head;
        if hand_ahead && avg_hand_speed > self.params.flap_threshold {
            return FlightState::Flapping;
        }
        if grounded {
            return match self.params.ground_contact {
                GroundContact::BlocksGlide    => FlightState::Grounded,
                GroundContact::ForcesFlapping => FlightState::Flapping,
            };
        }
        if left < head && right < head {
            return FlightState::Gliding;
        }
        FlightState::Coasting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flapwing_core::{vec3, PoseSample};

    fn frame(lz: f32, rz: f32) -> PoseFrame {
        PoseFrame::new(
            PoseSample::at(vec3(-0.3, 1.4, lz)),
            PoseSample::at(vec3(0.3, 1.4, rz)),
            PoseSample::at(vec3(0.0, 1.6, 0.0)),
        )
    }
    fn arbiter(ground_contact: GroundContact) -> ModeArbiter {
        ModeArbiter::new(ModeParams { flap_threshold: 0.3, ground_contact })
    }

    #[test] fn fast_hands_ahead_flap() {
        let a = arbiter(GroundContact::BlocksGlide);
        assert_eq!(a.classify(&frame(0.1, -0.2), 1.0, false), FlightState::Flapping);
        assert_eq!(a.classify(&frame(0.0, -0.2), 1.0, true), FlightState::Flapping);
    }
    #[test] fn hands_behind_glide_only_airborne() {
        let a = arbiter(GroundContact::BlocksGlide);
        assert_eq!(a.classify(&frame(-0.1, -0.2), 0.0, false), FlightState::Gliding);
        assert_eq!(a.classify(&frame(-0.1, -0.2), 0.0, true), FlightState::Grounded);
        // fast hands behind the head still glide
        assert_eq!(a.classify(&frame(-0.1, -0.2), 5.0, false), FlightState::Gliding);
    }
    #[test] fn slow_hands_ahead_coast() {
        let a = arbiter(GroundContact::BlocksGlide);
        assert_eq!(a.classify(&frame(0.1, -0.2), 0.1, false), FlightState::Coasting);
    }
    #[test] fn legacy_ground_contact_forces_flapping() {
        let a = arbiter(GroundContact::ForcesFlapping);
        assert_eq!(a.classify(&frame(-0.1, -0.2), 0.0, true), FlightState::Flapping);
        assert_eq!(a.classify(&frame(-0.1, -0.2), 0.0, false), FlightState::Gliding);
    }
}
