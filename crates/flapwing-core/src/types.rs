use glam::Quat;
use crate::{Scalar, TrackedNode};

pub type Vec3 = glam::Vec3;

// Y-up, +Z forward, +X right
pub const UP: Vec3 = Vec3::Y;
pub const FORWARD: Vec3 = Vec3::Z;
pub const RIGHT: Vec3 = Vec3::X;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }

/// One tracked node for one tick, in the rig frame (origin and axes of the body).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoseSample { pub position: Vec3, pub rotation: Quat }

impl Default for PoseSample {
    fn default() -> Self { Self { position: Vec3::ZERO, rotation: Quat::IDENTITY } }
}

impl PoseSample {
    #[inline] pub fn new(position: Vec3, rotation: Quat) -> Self { Self { position, rotation } }
    #[inline] pub fn at(position: Vec3) -> Self { Self { position, rotation: Quat::IDENTITY } }
    /// Look direction of this node.
    #[inline] pub fn forward(&self) -> Vec3 { self.rotation * FORWARD }
}

/// The three samples the controller needs for a tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PoseFrame {
    pub left: PoseSample,
    pub right: PoseSample,
    pub head: PoseSample,
}

impl PoseFrame {
    pub fn new(left: PoseSample, right: PoseSample, head: PoseSample) -> Self { Self { left, right, head } }

    #[inline] pub fn hand_distance(&self) -> Scalar { self.left.position.distance(self.right.position) }

    /// Mean hand-to-head distance (m).
    #[inline]
    pub fn hand_reach(&self) -> Scalar {
        let h = self.head.position;
        (self.left.position.distance(h) + self.right.position.distance(h)) * 0.5
    }

    pub fn sample(&self, node: TrackedNode) -> &PoseSample {
        match node {
            TrackedNode::LeftHand  => &self.left,
            TrackedNode::RightHand => &self.right,
            TrackedNode::Head      => &self.head,
        }
    }
    pub fn sample_mut(&mut self, node: TrackedNode) -> &mut PoseSample {
        match node {
            TrackedNode::LeftHand  => &mut self.left,
            TrackedNode::RightHand => &mut self.right,
            TrackedNode::Head      => &mut self.head,
        }
    }
}
