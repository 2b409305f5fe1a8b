use glam::Quat;
use flapwing_core::{Scalar, Vec3};
use flapwing_locomotion::{ForceMode, PhysicsBody};

/// Single rigid body with isotropic inertia, resting on a horizontal plane at
/// `ground_y`. `position` is the body origin (the pilot's feet).
#[derive(Clone, Debug)]
pub struct SimBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub inv_mass: Scalar,
    pub inv_inertia: Scalar,
    pub ground_y: Scalar,

    force: Vec3,
    torque: Vec3,
    impulses: u32,
}

impl SimBody {
    pub fn new(mass: Scalar) -> Self {
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            inv_mass,
            inv_inertia: inv_mass,
            ground_y: 0.0,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            impulses: 0,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self { self.position = position; self }
    pub fn moving(mut self, velocity: Vec3) -> Self { self.velocity = velocity; self }

    /// Linear impulses received since construction.
    #[inline] pub fn impulse_count(&self) -> u32 { self.impulses }
    /// Continuous force waiting for the next `step`.
    #[inline] pub fn pending_force(&self) -> Vec3 { self.force }
    #[inline] pub fn height(&self) -> Scalar { self.position.y - self.ground_y }

    /// Semi-implicit Euler over accumulated forces, then clamp to the plane.
    pub fn step(&mut self, dt: Scalar, gravity: Vec3) {
        if self.inv_mass == 0.0 || !(dt > 0.0) {
            self.force = Vec3::ZERO;
            self.torque = Vec3::ZERO;
            return;
        }
        self.velocity += (gravity + self.force * self.inv_mass) * dt;
        self.angular_velocity += self.torque * (self.inv_inertia * dt);
        self.position += self.velocity * dt;
        self.apply_orientation_delta(self.angular_velocity * dt);

        if self.position.y < self.ground_y {
            self.position.y = self.ground_y;
            self.velocity.y = self.velocity.y.max(0.0);
        }
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    /// Small-angle orientation update (world space).
    fn apply_orientation_delta(&mut self, dtheta: Vec3) {
        if dtheta.length_squared() <= 0.0 { return; }
        let dq = Quat::from_xyzw(dtheta.x * 0.5, dtheta.y * 0.5, dtheta.z * 0.5, 1.0).normalize();
        self.rotation = (dq * self.rotation).normalize();
    }
}

impl Default for SimBody {
    fn default() -> Self { Self::new(1.0) }
}

impl PhysicsBody for SimBody {
    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Impulse => {
                self.velocity += force * self.inv_mass;
                self.impulses += 1;
            }
            ForceMode::Continuous => self.force += force,
        }
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Impulse => self.angular_velocity += torque * self.inv_inertia,
            ForceMode::Continuous => self.torque += torque,
        }
    }

    fn velocity(&self) -> Vec3 { self.velocity }
    fn set_velocity(&mut self, velocity: Vec3) { self.velocity = velocity; }
    fn rotation(&self) -> Quat { self.rotation }
    fn set_rotation(&mut self, rotation: Quat) { self.rotation = rotation; }
    fn position(&self) -> Vec3 { self.position }

    fn is_grounded(&self, max_distance: Scalar) -> bool {
        self.height() <= max_distance
    }
}
