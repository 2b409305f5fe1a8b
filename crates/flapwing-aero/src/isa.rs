// flapwing-aero/src/isa.rs
use serde::{Deserialize, Serialize};
use flapwing_core::Scalar;

/// Troposphere of the International Standard Atmosphere. Altitudes are metres
/// above the ground plane the pilot launches from, which is taken as sea level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ISA {
    pub rho0: Scalar,           // kg/m^3 at the datum
    pub t0: Scalar,             // K at the datum
    pub lapse: Scalar,          // K/m
    pub r_air: Scalar,          // J/(kg*K)
    pub g: Scalar,              // m/s^2
    pub ceiling: Scalar,        // m; the linear lapse stops here
}

impl Default for ISA {
    fn default() -> Self {
        Self { rho0: 1.225, t0: 288.15, lapse: 0.0065, r_air: 287.05, g: 9.80665, ceiling: 11_000.0 }
    }
}

impl ISA {
    /// Air temperature (K); below the datum the datum value holds.
    pub fn temperature(&self, altitude: Scalar) -> Scalar {
        self.t0 - self.lapse * altitude.clamp(0.0, self.ceiling)
    }

    /// `ρ0 · (T / T0)^(g / (R·L) − 1)`
    pub fn density(&self, altitude: Scalar) -> Scalar {
        if self.lapse <= 0.0 { return self.rho0; }
        let ratio = (self.temperature(altitude) / self.t0).max(0.0);
        self.rho0 * ratio.powf(self.g / (self.r_air * self.lapse) - 1.0)
    }
}
