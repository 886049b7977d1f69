//! Effect handlers for activated abilities
//!
//! Handlers assume the target square came out of
//! [`super::targets::legal_targets`]; they re-check only what they need to
//! avoid panicking and report `false` when nothing happened.

use crate::board::Board;
use crate::captured::CapturedPieces;
use crate::data::TargetType;
use crate::piece::{Piece, PieceStatus};
use crate::types::{PieceType, Square};
use tracing::debug;

/// Turns of paralysis from a targeted paralyze
pub const PARALYSIS_TURNS: u8 = 1;
/// Turns of paralysis from the knight-only paralyze
pub const KNIGHT_PARALYSIS_TURNS: u8 = 3;
pub const SILENCE_TURNS: u8 = 2;
/// Lasts through the user's turn end and the opponent's turn
pub const IMMUNITY_TURNS: u8 = 2;

/// Applies the effect of `target` aimed at `square` by the piece on `source`
pub fn apply(
    board: &mut Board,
    captured: &mut CapturedPieces,
    source: Square,
    target: TargetType,
    square: Square,
) -> bool {
    if target.relocates() {
        return relocate(board, source, target, square);
    }
    let Some(user) = board.get(source) else {
        return false;
    };
    let (color, nation) = (user.color, user.nation);

    match target {
        TargetType::RevivePawn => {
            if !board.is_empty(square) {
                return false;
            }
            let Some(mut pawn) = captured.take_lost_pawn(color) else {
                return false;
            };
            pawn.has_moved = true;
            pawn.status = PieceStatus::default();
            debug!("[ABILITY] Revived pawn {} on {}", pawn.id, square);
            board.set(square, pawn);
            true
        }
        TargetType::ParalyzeEnemy => with_target(board, square, |p| {
            p.status.paralyzed = true;
            p.status.paralysis_turns = PARALYSIS_TURNS;
        }),
        TargetType::SilenceEnemy => with_target(board, square, |p| {
            p.status.silenced = true;
            p.status.silence_turns = SILENCE_TURNS;
        }),
        TargetType::ConvertEnemyPawn => with_target(board, square, |p| {
            if p.kind == PieceType::Pawn {
                p.convert(color, nation);
            }
        }),
        TargetType::NeutralizeKnight => with_target(board, square, |p| p.status.neutral = true),
        TargetType::ParalyzeKnight => with_target(board, square, |p| {
            p.status.paralyzed = true;
            p.status.paralysis_turns = KNIGHT_PARALYSIS_TURNS;
        }),
        TargetType::GrantExtraLife => with_target(board, square, |p| {
            p.status.extra_lives = p.status.extra_lives.saturating_add(1);
        }),
        TargetType::ShieldNeighbors => {
            let count = for_adjacent(board, source, |p| p.color == color, |p| {
                p.status.immune = true;
                p.status.immunity_turns = IMMUNITY_TURNS;
            });
            debug!("[ABILITY] {} allies shielded around {}", count, source);
            true
        }
        TargetType::ParalyzeAround => {
            let count = for_adjacent(board, source, |p| p.color != color, |p| {
                p.status.paralyzed = true;
                p.status.paralysis_turns = PARALYSIS_TURNS;
            });
            debug!("[ABILITY] {} enemies paralyzed around {}", count, source);
            true
        }
        _ => false,
    }
}

/// Effects that move pieces: swaps, teleport and banish
///
/// Also used on scratch boards to test whether a target would expose the
/// user's king.
pub fn relocate(board: &mut Board, source: Square, target: TargetType, square: Square) -> bool {
    match target {
        TargetType::SwapWithAny | TargetType::SwapWithQueen | TargetType::SwapWithPawn => {
            if source == square || board.is_empty(source) || board.is_empty(square) {
                return false;
            }
            board.swap(source, square);
            true
        }
        TargetType::TeleportPawn => {
            let Some(color) = board.get(source).map(|p| p.color) else {
                return false;
            };
            let pawn = board
                .pieces_of(color)
                .find(|p| p.kind == PieceType::Pawn)
                .map(|p| p.square);
            let Some(from) = pawn else {
                return false;
            };
            if !board.relocate(from, square) {
                return false;
            }
            if let Some(p) = board.get_mut(square) {
                p.promote(PieceType::Queen);
            }
            true
        }
        TargetType::BanishPawn => {
            let Some(destination) = board.get(square).and_then(|p| banish_destination(board, p)) else {
                return false;
            };
            board.relocate(square, destination)
        }
        _ => false,
    }
}

/// Nearest empty edge square a banished pawn is sent to
///
/// Candidates are the two ends of its row and the two ends of its column,
/// in that order; the pawn's promotion rank is never used. Ties keep the
/// earlier candidate.
pub fn banish_destination(board: &Board, pawn: &Piece) -> Option<Square> {
    let Square { row, col } = pawn.square;
    let promotion = pawn.color.promotion_rank();
    [
        Square { row, col: 0 },
        Square { row, col: 7 },
        Square { row: 0, col },
        Square { row: 7, col },
    ]
    .into_iter()
    .filter(|sq| sq.row != promotion && board.is_empty(*sq))
    .min_by_key(|sq| sq.distance(pawn.square))
}

fn with_target(board: &mut Board, square: Square, effect: impl FnOnce(&mut Piece)) -> bool {
    match board.get_mut(square) {
        Some(piece) => {
            effect(piece);
            true
        }
        None => false,
    }
}

fn for_adjacent(
    board: &mut Board,
    center: Square,
    select: impl Fn(&Piece) -> bool,
    mut effect: impl FnMut(&mut Piece),
) -> usize {
    let mut count = 0;
    for square in Board::adjacent(center) {
        if let Some(piece) = board.get_mut(square).filter(|p| select(&**p)) {
            effect(piece);
            count += 1;
        }
    }
    count
}
