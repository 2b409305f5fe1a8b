pub mod scalar;
pub mod node;
pub mod types;
pub mod math;
pub mod hash;
pub mod step_ctx;
pub mod rng;

pub use scalar::Scalar;
pub use node::TrackedNode;
pub use types::{Vec3, PoseSample, PoseFrame, vec3, UP, FORWARD, RIGHT};
pub use math::{lerp, blend, clamp01, sign, angle_deg, up_axis, tilt_from_upright};
pub use hash::{StateHasher, hash_vec3};
pub use step_ctx::TickCtx;
pub use rng::XorShift64;
pub use glam::Quat;
