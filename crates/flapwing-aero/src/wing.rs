use serde::{Deserialize, Serialize};
use flapwing_core::{Scalar, TickCtx, Vec3, UP};
use crate::{AeroModel, AeroQuery, ISA};

/// Where air density comes from.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirDensity {
    Fixed(Scalar),
    /// ISA density at the body's altitude.
    Isa,
}

impl Default for AirDensity {
    fn default() -> Self { AirDensity::Fixed(1.225) }
}

/// Lift equation `L = ½ ρ v² C_L A` along the body up axis, orthogonalized to velocity.
#[derive(Copy, Clone, Debug)]
pub struct WingLift {
    pub lift_coefficient: Scalar,
    pub wing_area: Scalar,       // m^2
    pub density: AirDensity,
    pub isa: ISA,
}

impl WingLift {
    fn rho(&self, altitude: Scalar) -> Scalar {
        match self.density {
            AirDensity::Fixed(rho) => rho,
            AirDensity::Isa => self.isa.density(altitude),
        }
    }
}

impl AeroModel for WingLift {
    fn force(&self, _ctx: &TickCtx, q: AeroQuery) -> Vec3 {
        let v2 = q.velocity.length_squared();
        if v2 <= 1e-8 { return Vec3::ZERO; }

        let vhat = q.velocity / v2.sqrt();
        let up = q.orientation * UP;
        let lift_dir = (up - vhat * up.dot(vhat)).normalize_or_zero();
        if lift_dir == Vec3::ZERO { return Vec3::ZERO; }

        let qdyn = 0.5 * self.rho(q.altitude) * v2;
        lift_dir * (qdyn * self.lift_coefficient * self.wing_area)
    }
}

/// Linear drag `-k v` while airborne.
#[derive(Copy, Clone, Debug)]
pub struct FlightDrag { pub k: Scalar }

impl AeroModel for FlightDrag {
    fn force(&self, _ctx: &TickCtx, q: AeroQuery) -> Vec3 { -q.velocity * self.k }
}
