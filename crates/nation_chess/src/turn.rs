//! Turn bookkeeping
//!
//! Whose turn it is and the full-move number. The number starts at 1 and
//! increments each time the turn passes back to White.

use crate::types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Whose turn is it?
    pub current: Color,
    /// Move number (increments after both players move)
    pub turn_number: u32,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current: Color::White,
            turn_number: 1,
        }
    }
}

impl TurnState {
    /// Starts with `color` to move on move 1
    pub fn starting_with(current: Color) -> Self {
        Self {
            current,
            turn_number: 1,
        }
    }

    /// Hands the turn to the other side
    ///
    /// # Returns
    ///
    /// The side that just finished its turn.
    pub fn switch_turn(&mut self) -> Color {
        let mover = self.current;
        self.current = mover.opposite();
        if self.current == Color::White {
            self.turn_number += 1;
        }
        mover
    }
}
