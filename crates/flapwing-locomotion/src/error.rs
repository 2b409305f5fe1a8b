use thiserror::Error;
use flapwing_core::TrackedNode;

/// Rejected configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config field `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f32 },

    #[error("config field `{field}` must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("config field `{field}` must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Why a tick was skipped. Never fatal: the next tick samples fresh state.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TickSkip {
    #[error("degenerate tick duration {0}")]
    DegenerateDt(f32),

    #[error("{0} position unavailable")]
    MissingPosition(TrackedNode),

    #[error("{0} rotation unavailable")]
    MissingRotation(TrackedNode),
}
