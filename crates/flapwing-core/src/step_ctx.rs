use crate::Scalar;

/// Per-tick context handed to the models.
#[derive(Copy, Clone, Debug)]
pub struct TickCtx {
    pub dt: Scalar,
    pub tick: u64,
}

impl TickCtx {
    pub fn new(dt: Scalar, tick: u64) -> Self { Self { dt, tick } }

    /// Zero, negative or non-finite steps cannot drive velocity derivations.
    #[inline] pub fn is_degenerate(&self) -> bool { !(self.dt.is_finite() && self.dt > 0.0) }
}
