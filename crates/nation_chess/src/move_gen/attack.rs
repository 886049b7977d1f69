//! Attack detection and check
//!
//! Answers "does any enemy piece attack this square?" by scanning outward
//! from the square: pawn diagonals, knight jumps, king neighbours and the
//! eight rays. Only classical attack patterns are considered, and pieces
//! that cannot move (paralyzed, burning, neutral) attack nothing.
//!
//! This module never calls the move generator.

use crate::board::{Board, ADJACENT_DIRS, DIAGONAL_DIRS, ORTHOGONAL_DIRS};
use crate::move_gen::knight::KNIGHT_OFFSETS;
use crate::piece::Piece;
use crate::types::{Color, Nation, PieceType, Square};

/// Check if `square` is attacked by the opponent of `defender`
///
/// # Arguments
///
/// * `board` - Position to inspect
/// * `square` - Target square
/// * `defender` - Colour whose square is being attacked
pub fn is_square_attacked(board: &Board, square: Square, defender: Color) -> bool {
    let attacker = defender.opposite();
    let is_attacker = |piece: &Piece, kinds: &[PieceType]| {
        piece.color == attacker && !piece.is_immobile() && kinds.contains(&piece.kind)
    };

    // An attacking pawn sits one step "behind" the square from its own point of view.
    let pawn_row = -attacker.forward();
    for dc in [-1, 1] {
        if let Some(piece) = square.offset(pawn_row, dc).and_then(|sq| board.get(sq)) {
            if is_attacker(piece, &[PieceType::Pawn]) {
                return true;
            }
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(piece) = square.offset(dr, dc).and_then(|sq| board.get(sq)) {
            if is_attacker(piece, &[PieceType::Knight]) {
                return true;
            }
        }
    }

    for (dr, dc) in ADJACENT_DIRS {
        if let Some(piece) = square.offset(dr, dc).and_then(|sq| board.get(sq)) {
            if is_attacker(piece, &[PieceType::King]) {
                return true;
            }
        }
    }

    let rays = [
        (&ORTHOGONAL_DIRS, [PieceType::Rook, PieceType::Queen]),
        (&DIAGONAL_DIRS, [PieceType::Bishop, PieceType::Queen]),
    ];
    for (dirs, kinds) in rays {
        for &(dr, dc) in dirs {
            if let Some(piece) = first_piece_on_ray(board, square, dr, dc) {
                if is_attacker(piece, &kinds) {
                    return true;
                }
            }
        }
    }

    false
}

fn first_piece_on_ray(board: &Board, from: Square, dr: i8, dc: i8) -> Option<&Piece> {
    let mut current = from;
    while let Some(next) = current.offset(dr, dc) {
        if let Some(piece) = board.get(next) {
            return Some(piece);
        }
        current = next;
    }
    None
}

/// Whether an Ottoman king is covered by an orthogonally adjacent ally
pub fn is_guarded_sultan(board: &Board, king: &Piece) -> bool {
    king.kind == PieceType::King
        && king.nation == Nation::Ottoman
        && board.has_orthogonal_ally(king.square, king.color)
}

/// Whether `color`'s king is attacked
///
/// A guarded Ottoman king is never in check. A side without a king is
/// never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board
        .pieces_of(color)
        .find(|p| p.kind == PieceType::King)
    else {
        return false;
    };
    if is_guarded_sultan(board, king) {
        return false;
    }
    is_square_attacked(board, king.square, color)
}
