//! In-process collaborators for the locomotion loop: a rigid body over a flat
//! ground plane and a pose source fed from scripted gestures.

pub mod body;
pub mod pilot;

pub use body::SimBody;
pub use pilot::{banked_glide, flap_stroke, glide_spread, head_pitched, looking_glide, neutral, ScriptedPilot, HEAD_HEIGHT};

use flapwing_core::Vec3;

/// Standard gravity, world space.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
