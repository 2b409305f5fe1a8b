use glam::Quat;
use flapwing_core::{blend, up_axis, Scalar, UP};

#[derive(Copy, Clone, Debug)]
pub struct TiltParams {
    pub correction_speed: Scalar, // 1/s, fraction of the error removed per second
}

impl Default for TiltParams {
    fn default() -> Self { Self { correction_speed: 1.0 } }
}

/// Pulls the body's up axis back toward world up every tick.
#[derive(Copy, Clone, Debug)]
pub struct TiltStabilizer { pub params: TiltParams }

impl TiltStabilizer {
    pub fn new(params: TiltParams) -> Self { Self { params } }

    /// Shortest rotation taking the current up axis onto world up.
    pub fn correction(&self, rotation: Quat) -> Quat {
        let up = up_axis(rotation).normalize_or_zero();
        if up == glam::Vec3::ZERO { return Quat::IDENTITY; }
        Quat::from_rotation_arc(up, UP)
    }

    /// `rotation` with a `correction_speed * dt` share of the correction pre-multiplied.
    pub fn step(&self, rotation: Quat, dt: Scalar) -> Quat {
        let t = blend(self.params.correction_speed, dt);
        if t <= 0.0 { return rotation; }
        let partial = Quat::IDENTITY.slerp(self.correction(rotation), t);
        (partial * rotation).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use flapwing_core::{tilt_from_upright, FORWARD};

    #[test] fn tilt_shrinks_monotonically() {
        let s = TiltStabilizer::new(TiltParams::default());
        let mut q = Quat::from_rotation_z(0.8) * Quat::from_rotation_x(0.3);
        let mut prev = tilt_from_upright(q);
        for _ in 0..300 {
            q = s.step(q, 1.0 / 60.0);
            let now = tilt_from_upright(q);
            assert!(now <= prev + 1e-5);
            prev = now;
        }
        assert!(prev < 0.01);
    }

    #[test] fn upright_body_keeps_heading() {
        let s = TiltStabilizer::new(TiltParams::default());
        let yawed = Quat::from_rotation_y(1.2);
        let q = s.step(yawed, 0.1);
        assert_abs_diff_eq!((q * FORWARD).dot(yawed * FORWARD), 1.0, epsilon = 1e-5);
    }

    #[test] fn inverted_body_still_recovers() {
        let s = TiltStabilizer::new(TiltParams { correction_speed: 2.0 });
        let mut q = Quat::from_rotation_x(std::f32::consts::PI);
        for _ in 0..240 { q = s.step(q, 1.0 / 60.0); }
        assert!(tilt_from_upright(q) < 0.05);
    }

    #[test] fn zero_dt_is_identity() {
        let s = TiltStabilizer::new(TiltParams::default());
        let q = Quat::from_rotation_z(0.5);
        assert_eq!(s.step(q, 0.0), q);
    }
}
