use glam::Quat;
use crate::{Scalar, Vec3, UP};

/// Linear blend with `t` clamped to [0, 1].
#[inline]
pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar { a + (b - a) * clamp01(t) }

/// Per-tick blend factor for a rate (1/s) over `dt`.
#[inline]
pub fn blend(rate: Scalar, dt: Scalar) -> Scalar { clamp01(rate * dt) }

#[inline]
pub fn clamp01(x: Scalar) -> Scalar {
    if x.is_nan() { return 0.0; }
    x.clamp(0.0, 1.0)
}

/// Sign that follows the sign bit: `0.0` is positive, `-0.0` negative.
#[inline]
pub fn sign(x: Scalar) -> Scalar { if x.is_sign_negative() { -1.0 } else { 1.0 } }

/// Unsigned angle between two directions in degrees; 0 if either is degenerate.
pub fn angle_deg(a: Vec3, b: Vec3) -> Scalar {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom <= 1e-12 { return 0.0; }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

#[inline]
pub fn up_axis(rot: Quat) -> Vec3 { rot * UP }

/// Angle (radians) between the rotated up axis and world up.
#[inline]
pub fn tilt_from_upright(rot: Quat) -> Scalar {
    let up = up_axis(rot);
    up.cross(UP).length().atan2(up.dot(UP))
}
