//! Pitch coordinates as read off formation diagrams.

use serde::{Deserialize, Serialize};

/// A player's spot on the formation diagram, in percent of pitch size.
///
/// `top` runs from the team's own goal line towards the halfway line and
/// `left` runs across the pitch. Both are expected in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    pub const fn new(top: f64, left: f64) -> Self {
        Position { top, left }
    }

    /// Mirrors the lateral coordinate for a team drawn on the reversed side
    /// of the diagram, so that its right back lands on the same side as the
    /// opponent's.
    pub fn mirrored(self) -> Self {
        Position {
            top: self.top,
            left: 100.0 - self.left,
        }
    }

    /// Whole-percent coordinates used for zone lookup.
    pub fn rounded(self) -> (i32, i32) {
        (self.top.round() as i32, self.left.round() as i32)
    }
}
