//! Passive capture immunity
//!
//! Consulted by the engine for every attempted capture, en passant
//! included. A holding rule rejects the move outright.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Nation, PieceType};

/// Whether a passive ability of `defender` blocks capture by `attacker`
///
/// # Rules
///
/// - Holy Roman queen cannot be taken by pawns
/// - Byzantine rook cannot be taken by knights
/// - Holy Roman pawn next to an allied pawn cannot be taken by knights
/// - Rus pawn in its own half cannot be taken by pawns
/// - Ottoman king with an orthogonally adjacent ally cannot be taken
/// - Polish rook next to an allied queen, rook or bishop cannot be taken
pub fn check_immunity(board: &Board, attacker: &Piece, defender: &Piece) -> bool {
    let at = defender.square;
    let own = defender.color;
    match (defender.nation, defender.kind, attacker.kind) {
        (Nation::HolyRoman, PieceType::Queen, PieceType::Pawn) => true,
        (Nation::Byzantine, PieceType::Rook, PieceType::Knight) => true,
        (Nation::HolyRoman, PieceType::Pawn, PieceType::Knight) => {
            board.has_adjacent_ally_pawn(at, own)
        }
        (Nation::Rus, PieceType::Pawn, PieceType::Pawn) => Board::in_own_half(at.row, own),
        (Nation::Ottoman, PieceType::King, _) => board.has_orthogonal_ally(at, own),
        (Nation::Poland, PieceType::Rook, _) => board.has_adjacent_major_ally(at, own),
        _ => false,
    }
}
