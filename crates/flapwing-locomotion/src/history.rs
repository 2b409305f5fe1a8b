use flapwing_core::{PoseFrame, Vec3};

/// Previous hand positions, for per-tick deltas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HandHistory {
    previous: Option<[Vec3; 2]>,
}

impl HandHistory {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn is_primed(&self) -> bool { self.previous.is_some() }
    #[inline] pub fn previous(&self) -> Option<[Vec3; 2]> { self.previous }

    /// (left, right) displacement since the stored frame; zero until primed.
    pub fn deltas(&self, frame: &PoseFrame) -> (Vec3, Vec3) {
        match self.previous {
            Some([l, r]) => (frame.left.position - l, frame.right.position - r),
            None => (Vec3::ZERO, Vec3::ZERO),
        }
    }

    pub fn store(&mut self, frame: &PoseFrame) {
        self.previous = Some([frame.left.position, frame.right.position]);
    }
}
