use serde::{Deserialize, Serialize};
use flapwing_core::{PoseFrame, Scalar, Vec3, UP};
use crate::HandMotion;

/// Remaining cooldown below this counts as elapsed (kills f32 residue of repeated `dt` subtraction).
pub const COOLDOWN_EPS: Scalar = 1.0e-5;

/// How the vertical impulse scales with the stroke.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlapPowerLaw {
    /// `power * mean(|left dy|, |right dy|)`
    #[default]
    StrokeDepth,
    /// `power * hand_distance * max(0, mean downward speed)`
    Dynamic,
}

impl FlapPowerLaw {
    pub fn magnitude(self, power: Scalar, motion: &HandMotion, hand_distance: Scalar) -> Scalar {
        match self {
            FlapPowerLaw::StrokeDepth => power * motion.avg_stroke_depth(),
            FlapPowerLaw::Dynamic     => power * hand_distance * motion.avg_downward_speed().max(0.0),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct FlapParams {
    pub flap_threshold: Scalar,   // m, hand separation; also m/s, mean hand speed
    pub flap_power: Scalar,
    pub cooldown: Scalar,         // s between impulses
    pub forward_damping: Scalar,  // fraction of forward speed removed per flap
    pub law: FlapPowerLaw,
}

impl Default for FlapParams {
    fn default() -> Self {
        Self { flap_threshold: 0.3, flap_power: 10.0, cooldown: 0.5, forward_damping: 0.2, law: FlapPowerLaw::StrokeDepth }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlapOutcome {
    pub gesture: bool,
    pub fired: bool,
    pub impulse: Vec3,    // world space, zero unless fired
    pub cooldown: Scalar, // remaining after evaluation
}

/// Impulsive flap with a cooldown gate and a persistent "flapping" latch.
#[derive(Copy, Clone, Debug)]
pub struct FlapForceModel {
    pub params: FlapParams,
    cooldown: Scalar,
    flapping: bool,
}

impl FlapForceModel {
    pub fn new(params: FlapParams) -> Self { Self { params, cooldown: 0.0, flapping: false } }

    #[inline] pub fn cooldown(&self) -> Scalar { self.cooldown }
    #[inline] pub fn is_flapping(&self) -> bool { self.flapping }
    #[inline] pub fn ready(&self) -> bool { self.cooldown <= 0.0 }

    /// Wide, fast, downward stroke of both hands.
    pub fn gesture_met(&self, frame: &PoseFrame, motion: &HandMotion) -> bool {
        let t = self.params.flap_threshold;
        frame.hand_distance() > t && motion.avg_speed() > t && motion.both_downward()
    }

    /// Evaluate the gesture and, when the cooldown allows, produce the impulse.
    pub fn evaluate(&mut self, frame: &PoseFrame, motion: &HandMotion, body_forward: Vec3, body_velocity: Vec3) -> FlapOutcome {
        let gesture = self.gesture_met(frame, motion);

        if gesture && self.ready() {
            let p = self.params;
            let lift = p.law.magnitude(p.flap_power, motion, frame.hand_distance());
            // bleed forward speed so repeated flaps do not compound into overshoot
            let forward_speed = body_velocity.dot(body_forward);
            let impulse = UP * lift - body_forward * (forward_speed * p.forward_damping);

            self.flapping = true;
            self.cooldown = p.cooldown;
            return FlapOutcome { gesture, fired: true, impulse, cooldown: self.cooldown };
        }
        if self.ready() {
            self.flapping = false;
        }
        FlapOutcome { gesture, fired: false, impulse: Vec3::ZERO, cooldown: self.cooldown }
    }

    /// End-of-tick bookkeeping. The latch drops as soon as the cooldown has run out.
    pub fn tick(&mut self, dt: Scalar) {
        if self.cooldown > 0.0 {
            let left = (self.cooldown - dt).max(0.0);
            self.cooldown = if left < COOLDOWN_EPS { 0.0 } else { left };
        }
        if self.cooldown == 0.0 {
            self.flapping = false;
        }
    }
}
