// flapwing-aero/src/lib.rs
mod isa;
mod wing;
mod combined;

pub use isa::ISA;
pub use wing::{AirDensity, FlightDrag, WingLift};
pub use combined::{AeroParams, CombinedAero};

use glam::Quat;
use flapwing_core::{Scalar, TickCtx, Vec3};

/// Body state an aerodynamic term needs.
#[derive(Copy, Clone, Debug)]
pub struct AeroQuery {
    pub velocity: Vec3,    // world
    pub orientation: Quat,
    pub altitude: Scalar,  // m above the density datum
}

/// One aerodynamic contribution, returned as a world-space force (N).
pub trait AeroModel: Send + Sync {
    fn force(&self, ctx: &TickCtx, query: AeroQuery) -> Vec3;
}
