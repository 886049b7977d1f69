//! Captured pieces tracking
//!
//! Pieces leaving the board are owned by this ledger until the game is
//! re-initialised. The revive ability is the only way back: it takes the
//! first captured pawn of the reviving side out of the list.
//!
//! # Material Advantage
//!
//! Positive advantage means White is ahead, negative means Black is ahead.
//! Example: if White captured (Rook=5, Pawn=1) and Black captured (Knight=3),
//! White's advantage is (5+1) - 3 = +3 pawns.

use crate::piece::Piece;
use crate::types::{Color, PieceType};
use serde::{Deserialize, Serialize};

/// Captured pieces for both sides
///
/// # Fields
///
/// - `white_captured`: Black pieces that White has captured
/// - `black_captured`: White pieces that Black has captured
///
/// # Usage
///
/// ```rust,ignore
/// captured.add_capture(black_queen);
/// let advantage = captured.material_advantage(); // +9 for White
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    /// Pieces captured by white (black pieces taken)
    pub white_captured: Vec<Piece>,
    /// Pieces captured by black (white pieces taken)
    pub black_captured: Vec<Piece>,
}

impl CapturedPieces {
    /// Records a piece taken off the board
    ///
    /// The capturing side is the opponent of the piece's colour.
    pub fn add_capture(&mut self, piece: Piece) {
        match piece.color {
            Color::White => self.black_captured.push(piece),
            Color::Black => self.white_captured.push(piece),
        }
    }

    /// Pieces of `color` that have been lost, in capture order
    pub fn lost(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.black_captured,
            Color::Black => &self.white_captured,
        }
    }

    fn lost_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.black_captured,
            Color::Black => &mut self.white_captured,
        }
    }

    /// Whether `color` has lost at least one pawn
    pub fn has_lost_pawn(&self, color: Color) -> bool {
        self.lost(color).iter().any(|p| p.kind == PieceType::Pawn)
    }

    /// Removes and returns the earliest lost pawn of `color`
    pub fn take_lost_pawn(&mut self, color: Color) -> Option<Piece> {
        let list = self.lost_mut(color);
        let index = list.iter().position(|p| p.kind == PieceType::Pawn)?;
        Some(list.remove(index))
    }

    /// Material difference in pawn units
    ///
    /// Returns positive if White is ahead, negative if Black is ahead, 0 if equal.
    pub fn material_advantage(&self) -> i32 {
        let score = |pieces: &[Piece]| pieces.iter().map(|p| p.value() as i32).sum::<i32>();
        score(&self.white_captured) - score(&self.black_captured)
    }

    /// Empties both lists when a game is re-initialised
    pub fn clear(&mut self) {
        self.white_captured.clear();
        self.black_captured.clear();
    }
}
