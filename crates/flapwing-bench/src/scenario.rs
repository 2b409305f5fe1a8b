use clap::ValueEnum;
use flapwing_core::{PoseFrame, Scalar};
use flapwing_sim::{flap_stroke, glide_spread, looking_glide};

const FLAP_PERIOD: Scalar = 0.8; // s per stroke cycle
const FLAP_SPAN: Scalar = 0.8;   // m between hands
const CLIMB_TIME: Scalar = 3.0;  // s of flapping before the glide phases

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Scenario {
    /// Flap for the whole run.
    Flap,
    /// Climb, then glide straight with arms spread.
    Glide,
    /// Climb, then glide while looking to the right.
    Bank,
}

impl Scenario {
    /// Pilot pose at time `t` (s).
    pub fn frame_at(self, t: Scalar) -> PoseFrame {
        if self == Scenario::Flap || t < CLIMB_TIME {
            return flap_stroke(t / FLAP_PERIOD, FLAP_SPAN);
        }
        match self {
            Scenario::Bank => looking_glide(0.7, 4.0),
            _ => glide_spread(0.7),
        }
    }
}
