use glam::Quat;
use flapwing_core::{blend, clamp01, lerp, vec3, Scalar, Vec3, FORWARD};

#[derive(Copy, Clone, Debug)]
pub struct GlideParams {
    pub glide_factor: Scalar,
    pub min_glide_force: Scalar,       // N, floor with hands drawn in
    pub glide_smoothness: Scalar,      // 1/s
    pub glide_speed_threshold: Scalar, // m/s, below this the soft brake kicks in
    pub glide_drag: Scalar,            // velocity scale applied by the soft brake
    pub max_glide_distance: Scalar,    // m, hand reach that counts as fully spread
}

impl Default for GlideParams {
    fn default() -> Self {
        Self {
            glide_factor: 1.0,
            min_glide_force: 1.0,
            glide_smoothness: 5.0,
            glide_speed_threshold: 0.1,
            glide_drag: 0.02,
            max_glide_distance: 1.0,
        }
    }
}

/// Body and pose quantities the glide model reads.
#[derive(Copy, Clone, Debug)]
pub struct GlideInput {
    pub reach: Scalar,           // mean hand-to-head distance (m)
    pub body_rotation: Quat,
    pub body_velocity: Vec3,
    pub head_offset: Vec3,       // head minus body position, world space
    pub flapping: bool,
    pub grounded: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlideOutput {
    pub ratio: Scalar,
    pub glide_force: Scalar,     // smoothed magnitude after this tick
    pub force: Vec3,             // continuous force to apply, world space
    pub velocity: Option<Vec3>,  // soft-brake replacement velocity
    pub head_bonus: bool,
}

/// Continuous forward force while gliding, smoothed toward a reach-driven target.
#[derive(Copy, Clone, Debug)]
pub struct GlideForceModel {
    pub params: GlideParams,
    glide_force: Scalar,
}

impl GlideForceModel {
    pub fn new(params: GlideParams, initial_force: Scalar) -> Self { Self { params, glide_force: initial_force } }

    #[inline] pub fn glide_force(&self) -> Scalar { self.glide_force }

    /// 0 with hands at the head, 1 at full reach.
    pub fn ratio(&self, reach: Scalar) -> Scalar { clamp01(reach / self.params.max_glide_distance) }

    pub fn target(&self, ratio: Scalar) -> Scalar { self.params.glide_factor * ratio + self.params.min_glide_force }

    /// Returns `None` (and leaves the smoothed force alone) while flapping or grounded.
    pub fn step(&mut self, input: &GlideInput, dt: Scalar) -> Option<GlideOutput> {
        if input.flapping || input.grounded { return None; }
        let p = self.params;

        let ratio = self.ratio(input.reach);
        self.glide_force = lerp(self.glide_force, self.target(ratio), blend(p.glide_smoothness, dt));

        let forward = input.body_rotation * FORWARD;
        let mut force = forward * self.glide_force;

        // soft brake: scale body-frame vertical and forward velocity instead of stopping dead
        let v = input.body_velocity;
        let velocity = if v.length() < p.glide_speed_threshold {
            let local = input.body_rotation.inverse() * v;
            Some(input.body_rotation * vec3(local.x, local.y * p.glide_drag, local.z * p.glide_drag))
        } else {
            None
        };

        let head_bonus = input.head_offset.dot(forward) > 0.0;
        if head_bonus {
            force += forward * p.glide_factor;
        }

        Some(GlideOutput { ratio, glide_force: self.glide_force, force, velocity, head_bonus })
    }
}
