//! Knight move generation
//!
//! Knights jump in an L-shape and ignore anything in between.

use crate::board::Board;
use crate::move_gen::sliding::steps;
use crate::move_gen::Move;
use crate::piece::Piece;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn moves(board: &Board, piece: &Piece) -> Vec<Move> {
    steps(board, piece, &KNIGHT_OFFSETS)
}
