//! Per-concern control models for flap-to-fly locomotion.
//!
//! Every model is a small struct holding a `Params` block plus whatever state it
//! carries across ticks. None of them touch a rigid body: they take the tick's
//! pose frame and body kinematics and return forces, impulses or rotations for
//! the orchestrator to apply.

mod motion;
mod mode;
mod flap;
mod glide;
mod turn;
mod tilt;

pub use motion::HandMotion;
pub use mode::{FlightState, GroundContact, ModeArbiter, ModeParams};
pub use flap::{FlapForceModel, FlapOutcome, FlapParams, FlapPowerLaw, COOLDOWN_EPS};
pub use glide::{GlideForceModel, GlideInput, GlideOutput, GlideParams};
pub use turn::{BankAxis, TurnCommand, TurnController, TurnLaw, TurnMemory, TurnParams, MAX_DIRECTION_BLEND};
pub use tilt::{TiltParams, TiltStabilizer};
