//! Target generation for activated abilities
//!
//! One closed dispatch over [`TargetType`]. Target types that are declared
//! in the ability table but never player-activated produce no targets.

use crate::abilities::effects;
use crate::board::Board;
use crate::captured::CapturedPieces;
use crate::data::TargetType;
use crate::move_gen::attack::is_in_check;
use crate::piece::Piece;
use crate::types::{Color, PieceType, Square};

/// Squares the ability of `source` may be aimed at
///
/// Relocating target types drop every square whose effect would leave
/// `source`'s own king in check.
pub fn legal_targets(
    board: &Board,
    captured: &CapturedPieces,
    source: &Piece,
    target: TargetType,
) -> Vec<Square> {
    let mut squares = candidates(board, captured, source, target);
    if target.relocates() {
        squares.retain(|square| {
            let mut scratch = board.clone();
            effects::relocate(&mut scratch, source.square, target, *square)
                && !is_in_check(&scratch, source.color)
        });
    }
    squares
}

fn candidates(board: &Board, captured: &CapturedPieces, source: &Piece, target: TargetType) -> Vec<Square> {
    let own = source.color;
    let enemy = own.opposite();
    let squares_of = |color: Color, keep: fn(&Piece) -> bool| -> Vec<Square> {
        board
            .pieces_of(color)
            .filter(|p| keep(*p))
            .map(|p| p.square)
            .collect()
    };

    match target {
        TargetType::SwapWithAny => board
            .pieces_of(own)
            .filter(|p| p.id != source.id)
            .map(|p| p.square)
            .collect(),
        TargetType::SwapWithQueen => board
            .pieces_of(own)
            .find(|p| p.kind == PieceType::Queen && p.id != source.id)
            .map(|p| vec![p.square])
            .unwrap_or_default(),
        TargetType::SwapWithPawn => squares_of(own, |p| p.kind == PieceType::Pawn),
        TargetType::RevivePawn => {
            if captured.has_lost_pawn(own) {
                board.empty_back_rank(own)
            } else {
                Vec::new()
            }
        }
        TargetType::ParalyzeEnemy => squares_of(enemy, |p| p.kind != PieceType::King),
        TargetType::SilenceEnemy => squares_of(enemy, |_| true),
        TargetType::ConvertEnemyPawn => squares_of(enemy, |p| p.kind == PieceType::Pawn),
        TargetType::BanishPawn => board
            .pieces_of(enemy)
            .filter(|p| p.kind == PieceType::Pawn && effects::banish_destination(board, p).is_some())
            .map(|p| p.square)
            .collect(),
        TargetType::TeleportPawn => {
            if board.pieces_of(own).any(|p| p.kind == PieceType::Pawn) {
                board.empty_enemy_back_rank(own)
            } else {
                Vec::new()
            }
        }
        TargetType::NeutralizeKnight | TargetType::ParalyzeKnight => {
            squares_of(enemy, |p| p.kind == PieceType::Knight)
        }
        TargetType::GrantExtraLife => board
            .adjacent_pieces(source.square)
            .filter(|p| p.color == own)
            .map(|p| p.square)
            .collect(),
        TargetType::ShieldNeighbors | TargetType::ParalyzeAround => vec![source.square],
        TargetType::OwnKnight
        | TargetType::Castle
        | TargetType::AdjacentCapture
        | TargetType::BlockWithAlly
        | TargetType::SwapWithAdjacent => Vec::new(),
    }
}
