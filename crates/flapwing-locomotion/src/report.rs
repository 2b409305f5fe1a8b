use flapwing_controllers::{FlapOutcome, FlightState, GlideOutput, TurnCommand};
use flapwing_core::{Scalar, TickCtx, Vec3};
use crate::TickSkip;

/// What one `advance` call did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: u64,              // committed tick index; unchanged by a skip
    pub dt: Scalar,
    pub skip: Option<TickSkip>,
    pub state: Option<FlightState>,
    pub grounded: bool,
    pub avg_hand_speed: Scalar, // m/s
    pub flap: Option<FlapOutcome>,
    pub glide: Option<GlideOutput>,
    pub turn: Option<TurnCommand>,
    pub impulse: Vec3,          // sum of impulses applied
    pub force: Vec3,            // sum of continuous forces applied
    pub tilt_after: Scalar,     // rad off upright once stabilized
}

impl TickReport {
    pub(crate) fn skipped(tick: u64, dt: Scalar, reason: TickSkip) -> Self {
        Self {
            tick,
            dt,
            skip: Some(reason),
            state: None,
            grounded: false,
            avg_hand_speed: 0.0,
            flap: None,
            glide: None,
            turn: None,
            impulse: Vec3::ZERO,
            force: Vec3::ZERO,
            tilt_after: 0.0,
        }
    }

    pub(crate) fn begin(ctx: &TickCtx, state: FlightState, grounded: bool, avg_hand_speed: Scalar) -> Self {
        Self {
            tick: ctx.tick,
            dt: ctx.dt,
            skip: None,
            state: Some(state),
            grounded,
            avg_hand_speed,
            flap: None,
            glide: None,
            turn: None,
            impulse: Vec3::ZERO,
            force: Vec3::ZERO,
            tilt_after: 0.0,
        }
    }

    #[inline] pub fn committed(&self) -> bool { self.skip.is_none() }
    #[inline] pub fn flap_fired(&self) -> bool { self.flap.map_or(false, |f| f.fired) }
}
