use glam::Quat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use flapwing_core::{angle_deg, blend, clamp01, lerp, sign, PoseFrame, Scalar, Vec3, FORWARD, RIGHT, UP};

/// Upper bound on the per-tick blend toward a new direction.
pub const MAX_DIRECTION_BLEND: Scalar = 0.5;

/// Where the signed turn-intent signal comes from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnLaw {
    /// `right hand y - left hand y` (m).
    HandHeight,
    /// Difference of each hand's angle off the head's look direction (deg).
    #[default]
    HeadAngle,
}

impl TurnLaw {
    pub fn signal(self, frame: &PoseFrame) -> Scalar {
        match self {
            TurnLaw::HandHeight => frame.right.position.y - frame.left.position.y,
            TurnLaw::HeadAngle => {
                let look = frame.head.forward();
                let head = frame.head.position;
                angle_deg(look, frame.left.position - head) - angle_deg(look, frame.right.position - head)
            }
        }
    }
}

/// Axis the body is rotated about while turning.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankAxis {
    /// `up x forward` of the body, i.e. its lateral axis: the body pitches.
    #[default]
    Lateral,
    /// The body's forward axis: a roll, right side down for a right turn.
    Roll,
}

impl BankAxis {
    /// World-space bank rotation for a signed angle in degrees (positive: turning right).
    pub fn rotation(self, body_rotation: Quat, signed_deg: Scalar) -> Option<Quat> {
        let (axis, angle) = match self {
            BankAxis::Lateral => ((body_rotation * UP).cross(body_rotation * FORWARD), signed_deg),
            BankAxis::Roll => (body_rotation * FORWARD, -signed_deg),
        };
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO { return None; }
        Some(Quat::from_axis_angle(axis, angle.to_radians()))
    }
}

/// Turn intent carried across ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum TurnMemory {
    #[default]
    NoTurn,
    Turning(Scalar),
}

impl TurnMemory {
    pub fn direction(self) -> Option<Scalar> {
        match self { TurnMemory::NoTurn => None, TurnMemory::Turning(d) => Some(d) }
    }
    #[inline] pub fn is_turning(self) -> bool { matches!(self, TurnMemory::Turning(_)) }
}

#[derive(Copy, Clone, Debug)]
pub struct TurnParams {
    pub turn_factor: Scalar,
    pub turn_threshold: Scalar,             // in signal units; below this = not turning
    pub turn_smoothness: Scalar,            // 1/s
    pub direction_change_smoothness: Scalar,// 1/s
    pub max_forward_speed: Scalar,          // m/s giving full turn authority
    pub law: TurnLaw,
    pub bank: bool,
    pub bank_axis: BankAxis,
    pub steer: bool,
}

impl Default for TurnParams {
    fn default() -> Self {
        Self {
            turn_factor: 1.0,
            turn_threshold: 0.1,
            turn_smoothness: 5.0,
            direction_change_smoothness: 5.0,
            max_forward_speed: 10.0,
            law: TurnLaw::HeadAngle,
            bank: true,
            bank_axis: BankAxis::Lateral,
            steer: true,
        }
    }
}

/// What the controller wants applied this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurnCommand {
    pub signal: Scalar,
    pub memory: TurnMemory,
    pub turn_speed: Scalar,    // deg per tick of bank
    pub bank: Option<Quat>,    // world-space rotation to pre-multiply
    pub steer_force: Vec3,     // continuous lateral force
}

impl TurnCommand {
    fn idle(signal: Scalar, memory: TurnMemory) -> Self {
        Self { signal, memory, turn_speed: 0.0, bank: None, steer_force: Vec3::ZERO }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct TurnController {
    pub params: TurnParams,
    memory: TurnMemory,
    turn_speed: Scalar,
}

impl TurnController {
    pub fn new(params: TurnParams) -> Self { Self { params, memory: TurnMemory::NoTurn, turn_speed: 0.0 } }

    #[inline] pub fn memory(&self) -> TurnMemory { self.memory }
    #[inline] pub fn turn_speed(&self) -> Scalar { self.turn_speed }

    /// Hysteresis on the stored direction. Sub-threshold signals clear it and a
    /// new turn is adopted directly. An existing one is only ever interpolated,
    /// and a blend that would cross zero stops at a zero of the old sign, so a
    /// reversal always takes at least two ticks.
    pub fn update_memory(&mut self, signal: Scalar, dt: Scalar) -> TurnMemory {
        if signal.abs() < self.params.turn_threshold {
            if self.memory.is_turning() { debug!(signal, "turn released"); }
            self.memory = TurnMemory::NoTurn;
            self.turn_speed = 0.0;
            return self.memory;
        }
        self.memory = match self.memory {
            TurnMemory::NoTurn => {
                debug!(signal, "turn engaged");
                TurnMemory::Turning(signal)
            }
            TurnMemory::Turning(prev) => {
                let t = blend(self.params.direction_change_smoothness, dt).min(MAX_DIRECTION_BLEND);
                let next = prev + (signal - prev) * t;
                if prev != 0.0 && sign(next) != sign(prev) {
                    trace!(prev, signal, "turn direction reversing");
                    TurnMemory::Turning(0.0_f32.copysign(prev))
                } else {
                    TurnMemory::Turning(next)
                }
            }
        };
        self.memory
    }

    pub fn step(&mut self, frame: &PoseFrame, body_rotation: Quat, body_velocity: Vec3, dt: Scalar) -> TurnCommand {
        let p = self.params;
        let signal = p.law.signal(frame);
        let memory = self.update_memory(signal, dt);
        let TurnMemory::Turning(direction) = memory else {
            return TurnCommand::idle(signal, memory);
        };

        let speed = body_velocity.length();
        let modifier = clamp01(speed / p.max_forward_speed);
        let desired = signal.abs() * p.turn_factor * modifier;
        self.turn_speed = lerp(self.turn_speed, desired, blend(p.turn_smoothness, dt));

        let s = sign(direction);
        let bank = if p.bank && self.turn_speed > 0.0 {
            p.bank_axis.rotation(body_rotation, s * self.turn_speed)
        } else {
            None
        };
        let steer_force = if p.steer {
            (body_rotation * RIGHT) * (s * self.turn_speed * speed)
        } else {
            Vec3::ZERO
        };

        TurnCommand { signal, memory, turn_speed: self.turn_speed, bank, steer_force }
    }
}
