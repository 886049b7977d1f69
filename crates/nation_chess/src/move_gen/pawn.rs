//! Pawn move generation
//!
//! Base pawn rules:
//! - One step forward onto an empty square
//! - Two steps from an unmoved pawn when both squares are empty (unless the
//!   nation forbids it)
//! - Diagonal captures
//! - En passant on the ply right after an adjacent enemy pawn advanced two
//!   squares past it
//!
//! Promotion is handled by the engine when the move is played.

use crate::board::Board;
use crate::move_gen::modifiers::BaseRules;
use crate::move_gen::{Move, MoveKind};
use crate::piece::Piece;
use crate::types::PieceType;

pub fn moves(board: &Board, piece: &Piece, rules: &BaseRules) -> Vec<Move> {
    let mut moves = Vec::new();
    let from = piece.square;
    let forward = piece.color.forward();

    if let Some(one) = from.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
        moves.push(Move::quiet(from, one));

        if !piece.has_moved && rules.double_step {
            if let Some(two) = from.offset(2 * forward, 0).filter(|sq| board.is_empty(*sq)) {
                moves.push(Move::quiet(from, two));
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(target) = from.offset(forward, dc) {
            if board.has_enemy(target, piece.color) {
                moves.push(Move::capture(from, target));
            }
        }
    }

    if let Some(mv) = en_passant(board, piece) {
        moves.push(mv);
    }

    moves
}

/// En passant capture available to `piece`, if any
fn en_passant(board: &Board, piece: &Piece) -> Option<Move> {
    let last = board.last_move()?;
    if last.kind != PieceType::Pawn || last.color == piece.color {
        return None;
    }
    let from = piece.square;
    if from.row != piece.color.en_passant_rank()
        || last.from.row.abs_diff(last.to.row) != 2
        || last.to.row != from.row
        || last.to.col.abs_diff(from.col) != 1
    {
        return None;
    }
    // The advanced pawn must still be where it landed.
    let victim = board.get(last.to)?;
    if victim.id != last.piece {
        return None;
    }
    let to = last.to.offset(piece.color.forward(), 0)?;
    if !board.is_empty(to) {
        return None;
    }
    Some(Move::with_kind(
        from,
        to,
        MoveKind::EnPassant { captured: last.to },
    ))
}
