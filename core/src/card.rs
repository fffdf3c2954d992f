use serde::{Deserialize, Serialize};

use crate::CardValue;

/// Player-visible state of one board position, as a renderer consumes it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardCell {
    FaceDown,
    FaceUp(CardValue),
    Matched(CardValue),
}

impl CardCell {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::FaceUp(_) | Self::Matched(_))
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

impl Default for CardCell {
    fn default() -> Self {
        Self::FaceDown
    }
}
