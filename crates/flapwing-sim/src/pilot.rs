use glam::Quat;
use flapwing_core::{vec3, PoseFrame, PoseSample, Scalar, TrackedNode, Vec3, XorShift64};
use flapwing_locomotion::PoseSource;

/// Standing head height above the body origin (m).
pub const HEAD_HEIGHT: Scalar = 1.6;

/// Pose source replaying whatever frame the script last set.
///
/// Nodes can be dropped to simulate lost tracking, either entirely or just
/// their rotation. Optional jitter adds a deterministic per-axis offset of up
/// to `jitter` metres to every position read.
#[derive(Clone, Debug)]
pub struct ScriptedPilot {
    pub frame: PoseFrame,
    lost: [bool; 3],
    rotation_lost: [bool; 3],
    jitter: Scalar,
    rng: XorShift64,
}

impl ScriptedPilot {
    pub fn new(frame: PoseFrame) -> Self {
        Self { frame, lost: [false; 3], rotation_lost: [false; 3], jitter: 0.0, rng: XorShift64::new(1) }
    }

    pub fn with_jitter(mut self, amplitude: Scalar, seed: u64) -> Self {
        self.jitter = amplitude.max(0.0);
        self.rng = XorShift64::new(seed);
        self
    }

    #[inline] pub fn set_frame(&mut self, frame: PoseFrame) { self.frame = frame; }

    pub fn drop_node(&mut self, node: TrackedNode) { self.lost[node.index()] = true; }
    pub fn drop_rotation(&mut self, node: TrackedNode) { self.rotation_lost[node.index()] = true; }
    pub fn restore_all(&mut self) {
        self.lost = [false; 3];
        self.rotation_lost = [false; 3];
    }

    #[inline] pub fn is_tracked(&self, node: TrackedNode) -> bool { !self.lost[node.index()] }

    fn noise(&mut self) -> Vec3 {
        if self.jitter == 0.0 { return Vec3::ZERO; }
        let j = self.jitter;
        vec3(self.rng.next_signed() * j, self.rng.next_signed() * j, self.rng.next_signed() * j)
    }
}

impl Default for ScriptedPilot {
    fn default() -> Self { Self::new(neutral()) }
}

impl PoseSource for ScriptedPilot {
    fn try_position(&mut self, node: TrackedNode) -> Option<Vec3> {
        if !self.is_tracked(node) { return None; }
        let p = self.frame.sample(node).position;
        Some(p + self.noise())
    }

    fn try_rotation(&mut self, node: TrackedNode) -> Option<Quat> {
        let i = node.index();
        if self.lost[i] || self.rotation_lost[i] { return None; }
        Some(self.frame.sample(node).rotation)
    }
}

fn head() -> PoseSample { PoseSample::at(vec3(0.0, HEAD_HEIGHT, 0.0)) }

/// Hands hanging slightly ahead of the body, head level.
pub fn neutral() -> PoseFrame {
    PoseFrame::new(
        PoseSample::at(vec3(-0.25, 1.0, 0.1)),
        PoseSample::at(vec3(0.25, 1.0, 0.1)),
        head(),
    )
}

/// Keyframe of a flapping cycle. `phase` wraps to [0, 1): the first half is the
/// downstroke from above the head to chest height, the second half the recovery.
/// `span` is the distance between the hands (m).
pub fn flap_stroke(phase: Scalar, span: Scalar) -> PoseFrame {
    const TOP: Scalar = HEAD_HEIGHT + 0.2;
    const BOTTOM: Scalar = HEAD_HEIGHT - 0.6;
    let phase = phase.rem_euclid(1.0);
    let y = if phase < 0.5 {
        TOP + (BOTTOM - TOP) * (phase * 2.0)
    } else {
        BOTTOM + (TOP - BOTTOM) * ((phase - 0.5) * 2.0)
    };
    let x = span * 0.5;
    PoseFrame::new(PoseSample::at(vec3(-x, y, 0.2)), PoseSample::at(vec3(x, y, 0.2)), head())
}

/// Arms swept back and out, each hand `reach` metres from the head.
pub fn glide_spread(reach: Scalar) -> PoseFrame {
    let h = vec3(0.0, HEAD_HEIGHT, 0.0);
    let dir = vec3(1.0, -0.1, -0.3).normalize();
    let left = vec3(-dir.x, dir.y, dir.z);
    PoseFrame::new(PoseSample::at(h + left * reach), PoseSample::at(h + dir * reach), head())
}

/// Glide with the right hand `height_diff` metres above the left.
pub fn banked_glide(reach: Scalar, height_diff: Scalar) -> PoseFrame {
    let mut f = glide_spread(reach);
    f.left.position.y -= height_diff * 0.5;
    f.right.position.y += height_diff * 0.5;
    f
}

/// Glide while looking `yaw_deg` to the right (negative: left).
pub fn looking_glide(reach: Scalar, yaw_deg: Scalar) -> PoseFrame {
    let mut f = glide_spread(reach);
    f.head.rotation = Quat::from_rotation_y(yaw_deg.to_radians());
    f
}

/// Tip the head forward by `pitch_deg` (down for positive values).
pub fn head_pitched(mut frame: PoseFrame, pitch_deg: Scalar) -> PoseFrame {
    frame.head.rotation = (Quat::from_rotation_x(pitch_deg.to_radians()) * frame.head.rotation).normalize();
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test] fn stroke_goes_down_then_up() {
        let a = flap_stroke(0.1, 0.6);
        let b = flap_stroke(0.2, 0.6);
        let c = flap_stroke(0.7, 0.6);
        let d = flap_stroke(0.8, 0.6);
        assert!(b.left.position.y < a.left.position.y);
        assert!(d.left.position.y > c.left.position.y);
        assert_abs_diff_eq!(a.hand_distance(), 0.6, epsilon = 1e-6);
    }

    #[test] fn glide_hands_sit_behind_head_at_reach() {
        let f = glide_spread(0.5);
        assert!(f.left.position.z < 0.0 && f.right.position.z < 0.0);
        assert_abs_diff_eq!(f.hand_reach(), 0.5, epsilon = 1e-5);
    }

    #[test] fn dropped_nodes_report_none() {
        let mut p = ScriptedPilot::default();
        p.drop_rotation(TrackedNode::Head);
        assert!(p.try_position(TrackedNode::Head).is_some());
        assert!(p.try_rotation(TrackedNode::Head).is_none());
        p.drop_node(TrackedNode::LeftHand);
        assert!(p.try_position(TrackedNode::LeftHand).is_none());
        p.restore_all();
        assert!(p.try_rotation(TrackedNode::Head).is_some());
    }

    #[test] fn jitter_is_bounded_and_seeded() {
        let mut a = ScriptedPilot::default().with_jitter(0.01, 9);
        let mut b = ScriptedPilot::default().with_jitter(0.01, 9);
        let base = neutral().head.position;
        for _ in 0..100 {
            let pa = a.try_position(TrackedNode::Head).unwrap();
            assert_eq!(pa, b.try_position(TrackedNode::Head).unwrap());
            assert!((pa - base).abs().max_element() <= 0.0101);
        }
    }

    #[test] fn pitched_head_looks_down() {
        let f = head_pitched(neutral(), 30.0);
        assert!(f.head.forward().y < 0.0);
    }
}
