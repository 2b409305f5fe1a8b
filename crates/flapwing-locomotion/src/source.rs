use glam::Quat;
use flapwing_core::{PoseFrame, PoseSample, TrackedNode, Vec3};
use crate::TickSkip;

/// Tracked-device poses in the rig frame. `None` means the device is not
/// tracked this tick.
pub trait PoseSource {
    fn try_position(&mut self, node: TrackedNode) -> Option<Vec3>;
    fn try_rotation(&mut self, node: TrackedNode) -> Option<Quat>;
}

/// Sample all three nodes. Hand and head positions and the head rotation are
/// required; a hand rotation that is missing falls back to identity.
pub fn sample_frame<S: PoseSource + ?Sized>(src: &mut S) -> Result<PoseFrame, TickSkip> {
    let mut frame = PoseFrame::default();
    for node in TrackedNode::ALL {
        let position = src.try_position(node).ok_or(TickSkip::MissingPosition(node))?;
        let rotation = match (node, src.try_rotation(node)) {
            (_, Some(q)) => q,
            (TrackedNode::Head, None) => return Err(TickSkip::MissingRotation(node)),
            (_, None) => Quat::IDENTITY,
        };
        *frame.sample_mut(node) = PoseSample::new(position, rotation);
    }
    Ok(frame)
}
