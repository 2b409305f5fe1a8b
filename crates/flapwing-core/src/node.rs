use core::fmt;
use serde::{Deserialize, Serialize};

/// Tracked device the controller samples every tick.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TrackedNode { LeftHand, RightHand, Head }

impl TrackedNode {
    pub const ALL: [TrackedNode; 3] = [TrackedNode::LeftHand, TrackedNode::RightHand, TrackedNode::Head];

    #[inline] pub fn index(self) -> usize { self as usize }
}

impl fmt::Display for TrackedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackedNode::LeftHand  => "left hand",
            TrackedNode::RightHand => "right hand",
            TrackedNode::Head      => "head",
        };
        f.write_str(s)
    }
}
