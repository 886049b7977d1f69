//! Ray and step helpers shared by all piece types
//!
//! - [`slide`] walks each direction up to a range limit, stopping at the
//!   first piece (captured if it is an enemy)
//! - [`steps`] tries a fixed set of single jumps

use crate::board::Board;
use crate::move_gen::Move;
use crate::piece::Piece;

/// Longest possible ray on an 8x8 board
pub const FULL_RANGE: u8 = 7;

/// Sliding moves along `dirs`, at most `limit` squares each
pub fn slide(board: &Board, piece: &Piece, dirs: &[(i8, i8)], limit: u8) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dr, dc) in dirs {
        let mut current = piece.square;
        for _ in 0..limit {
            let Some(next) = current.offset(dr, dc) else {
                break;
            };
            match board.get(next) {
                None => moves.push(Move::quiet(piece.square, next)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(Move::capture(piece.square, next));
                    }
                    break;
                }
            }
            current = next;
        }
    }
    moves
}

/// Single jumps to each offset: empty squares are quiet moves, enemies are
/// captures, allies block
pub fn steps(board: &Board, piece: &Piece, offsets: &[(i8, i8)]) -> Vec<Move> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| piece.square.offset(dr, dc))
        .filter_map(|to| match board.get(to) {
            None => Some(Move::quiet(piece.square, to)),
            Some(other) if other.color != piece.color => Some(Move::capture(piece.square, to)),
            Some(_) => None,
        })
        .collect()
}
