//! Reactive effects triggered by a confirmed capture
//!
//! [`on_capture`] only describes what should happen. The engine applies the
//! descriptors one after another with [`apply`], which re-checks each
//! precondition against the board as it is at that moment and silently
//! skips effects that no longer make sense.

use crate::board::{Board, ORTHOGONAL_DIRS};
use crate::captured::CapturedPieces;
use crate::data::AbilityId;
use crate::move_gen::attack::is_in_check;
use crate::piece::{Piece, PieceIdAllocator};
use crate::types::{Color, Nation, PieceId, PieceType, Square};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Turns a piece set alight by Greek fire keeps burning
pub const BURN_TURNS: u8 = 2;

/// One queued side effect of a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReactiveEffect {
    /// New pawn on the first empty square of the owner's back rank.
    /// `counter` names the piece and ability whose use pays for it.
    SpawnPawn {
        color: Color,
        nation: Nation,
        counter: Option<(PieceId, AbilityId)>,
    },
    /// Enemy pawn shoved to its first empty orthogonal neighbour
    Push { piece: PieceId, by: Color },
    /// Capturing piece cannot move on its next turn
    Ignite { piece: PieceId },
    /// Capturing piece is removed as well
    MutualDestruction { attacker: PieceId },
}

/// Side effects of `attacker` having just taken `defender` on `at`
///
/// Called after the defender has left the board and the attacker stands on
/// its destination. Effects are listed in a fixed order. The defender's
/// Greek fire and seppuku uses are consumed here since it is no longer on
/// the board.
pub fn on_capture(board: &Board, attacker: &Piece, defender: &mut Piece, at: Square) -> Vec<ReactiveEffect> {
    let mut effects = Vec::new();

    if attacker.nation == Nation::Japan
        && attacker.kind == PieceType::Queen
        && defender.kind == PieceType::Pawn
        && attacker.can_use_ability(AbilityId::JapanQueenValkyrie)
    {
        effects.push(ReactiveEffect::SpawnPawn {
            color: attacker.color,
            nation: attacker.nation,
            counter: Some((attacker.id, AbilityId::JapanQueenValkyrie)),
        });
    }

    if attacker.nation == Nation::Spain
        && attacker.kind == PieceType::Knight
        && Board::in_enemy_half(at.row, attacker.color)
    {
        effects.push(ReactiveEffect::SpawnPawn {
            color: attacker.color,
            nation: attacker.nation,
            counter: None,
        });
    }

    if attacker.nation == Nation::Byzantine && attacker.kind == PieceType::Knight {
        effects.extend(
            board
                .adjacent_pieces(at)
                .filter(|p| p.kind == PieceType::Pawn && p.color != attacker.color)
                .map(|p| ReactiveEffect::Push {
                    piece: p.id,
                    by: attacker.color,
                }),
        );
    }

    if defender.nation == Nation::Byzantine
        && defender.kind == PieceType::Pawn
        && defender.use_ability(AbilityId::ByzantinePawnGreekFire)
    {
        effects.push(ReactiveEffect::Ignite { piece: attacker.id });
    }

    if defender.nation == Nation::Japan
        && defender.kind == PieceType::Knight
        && defender.use_ability(AbilityId::JapanKnightSeppuku)
    {
        effects.push(ReactiveEffect::MutualDestruction { attacker: attacker.id });
    }

    effects
}

/// Applies one effect, returning whether it changed anything
pub fn apply(
    board: &mut Board,
    captured: &mut CapturedPieces,
    ids: &mut PieceIdAllocator,
    effect: &ReactiveEffect,
) -> bool {
    match *effect {
        ReactiveEffect::SpawnPawn { color, nation, counter } => {
            let Some(square) = board.empty_back_rank(color).into_iter().next() else {
                return false;
            };
            if let Some((piece, ability)) = counter {
                let paid = board
                    .find_mut(piece)
                    .is_some_and(|p| p.use_ability(ability));
                if !paid {
                    return false;
                }
            }
            let pawn = Piece::new(ids.allocate(), PieceType::Pawn, color, nation, square);
            debug!("[ABILITY] Spawned pawn {} on {}", pawn.id, square);
            board.set(square, pawn);
            true
        }
        ReactiveEffect::Push { piece, by } => {
            let Some(from) = board.find(piece).map(|p| p.square) else {
                return false;
            };
            let destination = ORTHOGONAL_DIRS
                .into_iter()
                .filter_map(|(dr, dc)| from.offset(dr, dc))
                .find(|sq| board.is_empty(*sq));
            let Some(to) = destination else {
                return false;
            };
            let mut scratch = board.clone();
            scratch.relocate(from, to);
            if is_in_check(&scratch, by) {
                return false;
            }
            board.relocate(from, to)
        }
        ReactiveEffect::Ignite { piece } => match board.find_mut(piece) {
            Some(p) => {
                p.status.burning = true;
                p.status.burn_turns = BURN_TURNS;
                true
            }
            None => false,
        },
        ReactiveEffect::MutualDestruction { attacker } => {
            let square = board
                .find(attacker)
                .filter(|p| p.kind != PieceType::King)
                .map(|p| p.square);
            match square.and_then(|sq| board.remove(sq)) {
                Some(removed) => {
                    debug!("[ABILITY] {} destroyed by seppuku", removed.id);
                    captured.add_capture(removed);
                    true
                }
                None => false,
            }
        }
    }
}
