use glam::Quat;
use flapwing_core::{Scalar, Vec3, FORWARD};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ForceMode {
    /// Applied at once as a change in momentum.
    Impulse,
    /// Integrated over the next physics step.
    Continuous,
}

/// The rigid body the loop drives. The loop is its only writer during a tick.
pub trait PhysicsBody {
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode);

    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    fn position(&self) -> Vec3;

    /// Downward ray of length `max_distance` from the body origin.
    fn is_grounded(&self, max_distance: Scalar) -> bool;

    #[inline]
    fn forward(&self) -> Vec3 { self.rotation() * FORWARD }
}
