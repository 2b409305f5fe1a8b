use std::sync::Arc;
use serde::{Deserialize, Serialize};
use flapwing_core::{Scalar, TickCtx, Vec3};
use crate::{AeroModel, AeroQuery, AirDensity, FlightDrag, WingLift, ISA};

/// Sum of several aerodynamic terms.
pub struct CombinedAero {
    parts: Vec<Arc<dyn AeroModel>>,
}

impl CombinedAero {
    pub fn new(parts: Vec<Arc<dyn AeroModel>>) -> Self { Self { parts } }
    pub fn len(&self) -> usize { self.parts.len() }
    pub fn is_empty(&self) -> bool { self.parts.is_empty() }
}

impl AeroModel for CombinedAero {
    fn force(&self, ctx: &TickCtx, q: AeroQuery) -> Vec3 {
        self.parts.iter().fold(Vec3::ZERO, |acc, p| acc + p.force(ctx, q))
    }
}

/// Tunables for the optional airborne terms.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroParams {
    pub lift_coefficient: Scalar,
    pub wing_area: Scalar,
    pub air_density: AirDensity,
    pub flight_drag: Scalar,
}

impl Default for AeroParams {
    fn default() -> Self {
        Self { lift_coefficient: 1.0, wing_area: 1.0, air_density: AirDensity::default(), flight_drag: 0.05 }
    }
}

impl AeroParams {
    /// Zero coefficients drop the corresponding term.
    pub fn build(&self) -> CombinedAero {
        let mut parts: Vec<Arc<dyn AeroModel>> = Vec::new();
        if self.lift_coefficient != 0.0 && self.wing_area > 0.0 {
            parts.push(Arc::new(WingLift {
                lift_coefficient: self.lift_coefficient,
                wing_area: self.wing_area,
                density: self.air_density,
                isa: ISA::default(),
            }));
        }
        if self.flight_drag > 0.0 {
            parts.push(Arc::new(FlightDrag { k: self.flight_drag }));
        }
        CombinedAero::new(parts)
    }
}
