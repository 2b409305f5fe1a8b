use flapwing_core::{Scalar, Vec3};

/// Per-tick hand displacement (current minus previous sample).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandMotion {
    pub left_delta: Vec3,
    pub right_delta: Vec3,
    pub dt: Scalar,
}

impl HandMotion {
    pub fn new(left_delta: Vec3, right_delta: Vec3, dt: Scalar) -> Self { Self { left_delta, right_delta, dt } }

    /// Mean of the two hand speeds (m/s). Zero for a degenerate `dt`.
    pub fn avg_speed(&self) -> Scalar {
        if !(self.dt > 0.0) { return 0.0; }
        (self.left_delta.length() + self.right_delta.length()) * 0.5 / self.dt
    }

    /// Mean downward hand speed (m/s); negative while the hands rise.
    pub fn avg_downward_speed(&self) -> Scalar {
        if !(self.dt > 0.0) { return 0.0; }
        -(self.left_delta.y + self.right_delta.y) * 0.5 / self.dt
    }

    /// Mean vertical travel of the two hands this tick (m).
    #[inline]
    pub fn avg_stroke_depth(&self) -> Scalar { (self.left_delta.y.abs() + self.right_delta.y.abs()) * 0.5 }

    #[inline]
    pub fn both_downward(&self) -> bool { self.left_delta.y < 0.0 && self.right_delta.y < 0.0 }
}
