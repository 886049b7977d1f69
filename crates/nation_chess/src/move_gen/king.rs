//! King move generation
//!
//! One step in any direction plus castling. Castling needs an unmoved king
//! on its back rank, an unmoved rook, empty squares between them, the king
//! not in check, and every square the king crosses (origin included) free
//! of attack.
//!
//! [`castle_with_any_rook`] generalises castling to any unmoved rook on the
//! back rank; it keeps every safety condition.

use crate::board::{Board, ADJACENT_DIRS};
use crate::move_gen::attack::{is_in_check, is_square_attacked};
use crate::move_gen::sliding::steps;
use crate::move_gen::{Move, MoveKind};
use crate::piece::Piece;
use crate::types::{PieceType, Square};

pub fn moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut moves = steps(board, piece, &ADJACENT_DIRS);
    if can_start_castling(board, piece) {
        let back = piece.color.back_rank();
        for rook_col in [7u8, 0u8] {
            if let Some(mv) = castle(board, piece, Square { row: back, col: rook_col }) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// Castling with every unmoved back-rank rook except the corner ones
pub fn castle_with_any_rook(board: &Board, king: &Piece) -> Vec<Move> {
    if !can_start_castling(board, king) {
        return Vec::new();
    }
    let back = king.color.back_rank();
    (1..7u8)
        .map(|col| Square { row: back, col })
        .filter(|sq| *sq != king.square)
        .filter_map(|rook_square| castle(board, king, rook_square))
        .collect()
}

fn can_start_castling(board: &Board, king: &Piece) -> bool {
    !king.has_moved
        && king.square.row == king.color.back_rank()
        && !is_in_check(board, king.color)
}

/// Castling move with the rook on `rook_square`, if every condition holds
///
/// The king ends two squares towards the rook and the rook lands on the
/// square the king crossed.
fn castle(board: &Board, king: &Piece, rook_square: Square) -> Option<Move> {
    let rook = board.get(rook_square)?;
    if rook.kind != PieceType::Rook || rook.color != king.color || rook.has_moved {
        return None;
    }

    let kc = king.square.col as i8;
    let rc = rook_square.col as i8;
    let dir: i8 = if rc > kc { 1 } else { -1 };
    let king_to = king.square.offset(0, 2 * dir)?;
    let rook_to = king.square.offset(0, dir)?;

    let (low, high) = (kc.min(rc), kc.max(rc));
    for col in (low + 1)..high {
        if !board.is_empty(Square { row: king.square.row, col: col as u8 }) {
            return None;
        }
    }
    for landing in [king_to, rook_to] {
        if landing != rook_square && !board.is_empty(landing) {
            return None;
        }
    }

    for i in 0..=2 {
        let crossed = king.square.offset(0, i * dir)?;
        if is_square_attacked(board, crossed, king.color) {
            return None;
        }
    }

    Some(Move::with_kind(
        king.square,
        king_to,
        MoveKind::Castle {
            rook_from: rook_square,
            rook_to,
        },
    ))
}
