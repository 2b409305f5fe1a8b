//! Flap-to-fly locomotion: turns tracked hand and head poses into forces,
//! impulses and rotations on a rigid body, one `advance(dt)` call per frame.
//!
//! The loop never talks to hardware or a physics engine directly; hosts plug
//! in a [`PoseSource`] and a [`PhysicsBody`].

mod body;
mod config;
mod controller;
mod error;
mod history;
mod report;
mod source;

pub use body::{ForceMode, PhysicsBody};
pub use config::LocomotionConfig;
pub use controller::LocomotionLoop;
pub use error::{ConfigError, TickSkip};
pub use history::HandHistory;
pub use report::TickReport;
pub use source::{sample_frame, PoseSource};

pub use flapwing_controllers::{BankAxis, FlapPowerLaw, FlightState, GroundContact, TurnLaw, TurnMemory};
pub use flapwing_aero::{AeroParams, AirDensity};
