use serde::{Deserialize, Serialize};
use flapwing_aero::{AeroParams, AirDensity};
use flapwing_controllers::{
    BankAxis, FlapParams, FlapPowerLaw, GlideParams, GroundContact, ModeParams, TiltParams, TurnLaw, TurnParams,
};
use flapwing_core::Scalar;
use crate::ConfigError;

/// Every tunable of the controller. Read-only once a loop is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // flapping
    pub flap_threshold: Scalar,        // m hand separation, m/s mean hand speed
    pub close_threshold: Scalar,       // m; closer hands speed up
    pub flap_power: Scalar,
    pub flap_cooldown_duration: Scalar,// s
    pub flap_forward_damping: Scalar,  // share of forward speed removed per flap
    pub speed_up_factor: Scalar,
    pub speed_change_rate: Scalar,     // 1/s
    pub base_speed: Scalar,            // m/s

    // gliding
    pub glide_factor: Scalar,
    pub min_glide_force: Scalar,       // N
    pub glide_smoothness: Scalar,      // 1/s
    pub glide_speed_threshold: Scalar, // m/s
    pub glide_drag: Scalar,
    pub initial_glide_force: Scalar,   // N
    pub max_glide_distance: Scalar,    // m

    // turning
    pub turn_factor: Scalar,
    pub turn_smoothness: Scalar,
    pub direction_change_smoothness: Scalar,
    pub turn_threshold: Scalar,
    pub max_forward_speed: Scalar,     // m/s
    pub turn_bank: bool,
    pub bank_axis: BankAxis,
    pub turn_steer: bool,
    pub turn_while_flapping: bool,

    pub forward_tilt_factor: Scalar,
    pub ground_check_distance: Scalar, // m
    pub correction_speed: Scalar,      // 1/s

    // policies
    pub ground_contact: GroundContact,
    pub flap_power_law: FlapPowerLaw,
    pub turn_law: TurnLaw,

    pub aero: Option<AeroParams>,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            flap_threshold: 0.3,
            close_threshold: 0.2,
            flap_power: 10.0,
            flap_cooldown_duration: 0.5,
            flap_forward_damping: 0.2,
            speed_up_factor: 2.0,
            speed_change_rate: 1.0,
            base_speed: 10.0,

            glide_factor: 1.0,
            min_glide_force: 1.0,
            glide_smoothness: 5.0,
            glide_speed_threshold: 0.1,
            glide_drag: 0.02,
            initial_glide_force: 10.0,
            max_glide_distance: 1.0,

            turn_factor: 1.0,
            turn_smoothness: 5.0,
            direction_change_smoothness: 5.0,
            turn_threshold: 0.1,
            max_forward_speed: 10.0,
            turn_bank: true,
            bank_axis: BankAxis::Lateral,
            turn_steer: true,
            turn_while_flapping: true,

            forward_tilt_factor: 1.0,
            ground_check_distance: 0.2,
            correction_speed: 1.0,

            ground_contact: GroundContact::BlocksGlide,
            flap_power_law: FlapPowerLaw::StrokeDepth,
            turn_law: TurnLaw::HeadAngle,

            aero: None,
        }
    }
}

impl LocomotionConfig {
    /// Reject non-finite values, negative tunables and zero divisors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("flap_threshold", self.flap_threshold),
            ("close_threshold", self.close_threshold),
            ("flap_power", self.flap_power),
            ("flap_forward_damping", self.flap_forward_damping),
            ("speed_up_factor", self.speed_up_factor),
            ("speed_change_rate", self.speed_change_rate),
            ("base_speed", self.base_speed),
            ("glide_factor", self.glide_factor),
            ("min_glide_force", self.min_glide_force),
            ("glide_smoothness", self.glide_smoothness),
            ("glide_speed_threshold", self.glide_speed_threshold),
            ("glide_drag", self.glide_drag),
            ("initial_glide_force", self.initial_glide_force),
            ("turn_factor", self.turn_factor),
            ("turn_smoothness", self.turn_smoothness),
            ("direction_change_smoothness", self.direction_change_smoothness),
            ("turn_threshold", self.turn_threshold),
            ("forward_tilt_factor", self.forward_tilt_factor),
            ("ground_check_distance", self.ground_check_distance),
            ("correction_speed", self.correction_speed),
        ];
        let positive = [
            ("flap_cooldown_duration", self.flap_cooldown_duration),
            ("max_glide_distance", self.max_glide_distance),
            ("max_forward_speed", self.max_forward_speed),
        ];

        for (field, value) in non_negative.iter().chain(positive.iter()).copied() {
            if !value.is_finite() { return Err(ConfigError::NonFinite { field, value }); }
        }
        for (field, value) in non_negative {
            if value < 0.0 { return Err(ConfigError::Negative { field, value }); }
        }
        for (field, value) in positive {
            if value <= 0.0 { return Err(ConfigError::NonPositive { field, value }); }
        }

        if let Some(a) = &self.aero {
            for (field, value) in [
                ("aero.lift_coefficient", a.lift_coefficient),
                ("aero.wing_area", a.wing_area),
                ("aero.flight_drag", a.flight_drag),
            ] {
                if !value.is_finite() { return Err(ConfigError::NonFinite { field, value }); }
                if value < 0.0 { return Err(ConfigError::Negative { field, value }); }
            }
            if let AirDensity::Fixed(value) = a.air_density {
                let field = "aero.air_density";
                if !value.is_finite() { return Err(ConfigError::NonFinite { field, value }); }
                if value < 0.0 { return Err(ConfigError::Negative { field, value }); }
            }
        }
        Ok(())
    }

    pub fn mode_params(&self) -> ModeParams {
        ModeParams { flap_threshold: self.flap_threshold, ground_contact: self.ground_contact }
    }

    pub fn flap_params(&self) -> FlapParams {
        FlapParams {
            flap_threshold: self.flap_threshold,
            flap_power: self.flap_power,
            cooldown: self.flap_cooldown_duration,
            forward_damping: self.flap_forward_damping,
            law: self.flap_power_law,
        }
    }

    pub fn glide_params(&self) -> GlideParams {
        GlideParams {
            glide_factor: self.glide_factor,
            min_glide_force: self.min_glide_force,
            glide_smoothness: self.glide_smoothness,
            glide_speed_threshold: self.glide_speed_threshold,
            glide_drag: self.glide_drag,
            max_glide_distance: self.max_glide_distance,
        }
    }

    pub fn turn_params(&self) -> TurnParams {
        TurnParams {
            turn_factor: self.turn_factor,
            turn_threshold: self.turn_threshold,
            turn_smoothness: self.turn_smoothness,
            direction_change_smoothness: self.direction_change_smoothness,
            max_forward_speed: self.max_forward_speed,
            law: self.turn_law,
            bank: self.turn_bank,
            bank_axis: self.bank_axis,
            steer: self.turn_steer,
        }
    }

    pub fn tilt_params(&self) -> TiltParams { TiltParams { correction_speed: self.correction_speed } }
}
