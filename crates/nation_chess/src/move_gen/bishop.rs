//! Bishop move generation

use crate::board::{Board, DIAGONAL_DIRS};
use crate::move_gen::modifiers::BaseRules;
use crate::move_gen::sliding::slide;
use crate::move_gen::Move;
use crate::piece::Piece;

/// Diagonal slides, limited by the nation's slide range
pub fn moves(board: &Board, piece: &Piece, rules: &BaseRules) -> Vec<Move> {
    slide(board, piece, &DIAGONAL_DIRS, rules.slide_limit)
}
