//! Queen move generation
//!
//! The queen slides in all eight directions. She has her own entry in the
//! modifier registry: rook and bishop modifiers of the same nation do not
//! carry over to her.

use crate::board::{Board, ADJACENT_DIRS};
use crate::move_gen::modifiers::BaseRules;
use crate::move_gen::sliding::slide;
use crate::move_gen::Move;
use crate::piece::Piece;

pub fn moves(board: &Board, piece: &Piece, rules: &BaseRules) -> Vec<Move> {
    slide(board, piece, &ADJACENT_DIRS, rules.slide_limit)
}
