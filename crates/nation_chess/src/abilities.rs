//! Ability system
//!
//! Handles the three kinds of nation abilities that are not plain movement
//! rules (those live in [`crate::move_gen::modifiers`]):
//!
//! - **Activated** abilities, resolved in two phases. [`AbilitySystem::activate`]
//!   validates the request and stores a single pending (ability, piece)
//!   pair together with its targets; [`AbilitySystem::execute`] applies the
//!   effect once the player picks one of those targets.
//! - **Passive immunity** ([`immunity::check_immunity`]), asked before any
//!   capture is played.
//! - **Reactive effects** ([`reactive::on_capture`]), queued after a capture
//!   is confirmed and applied in order by the engine.
//!
//! # Architecture
//!
//! The system owns nothing but the pending slot. Board and captured-piece
//! state are borrowed per call, so the engine stays the single owner of
//! game state and a rejected call cannot leave partial changes behind.
//!
//! # Examples
//!
//! ```rust,ignore
//! let activation = abilities.activate(&board, &captured, Color::White, id, piece)?;
//! if let Some(&square) = activation.targets.first() {
//!     let outcome = abilities.execute(&mut board, &mut captured, square)?;
//!     if outcome.ends_turn { /* hand the turn over */ }
//! }
//! ```

pub mod effects;
pub mod immunity;
pub mod reactive;
pub mod targets;

pub use immunity::check_immunity;
pub use reactive::{on_capture, ReactiveEffect};

use crate::board::Board;
use crate::captured::CapturedPieces;
use crate::data::{ability, nation_abilities, AbilityId, TargetType, Trigger};
use crate::error::{EngineError, EngineResult};
use crate::types::{Color, Nation, PieceId, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// An activated ability waiting for its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAbility {
    pub ability: AbilityId,
    pub piece: PieceId,
    pub target_type: TargetType,
    pub targets: Vec<Square>,
}

/// Result of phase one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub ability: AbilityId,
    pub piece: PieceId,
    pub target_type: TargetType,
    /// Empty when there is nothing to aim at; nothing is pending then
    pub targets: Vec<Square>,
}

impl Activation {
    pub fn needs_target(&self) -> bool {
        !self.targets.is_empty()
    }
}

/// Result of phase two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOutcome {
    pub ability: AbilityId,
    pub piece: PieceId,
    pub target: Square,
    pub target_type: TargetType,
    pub ends_turn: bool,
}

/// An activated ability some piece of a side can use right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityView {
    pub ability: AbilityId,
    pub name: &'static str,
    pub description: &'static str,
    pub target_type: TargetType,
    /// Pieces able to activate it, row-major
    pub pieces: Vec<PieceId>,
}

/// Two-phase activation state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySystem {
    pending: Option<PendingAbility>,
}

impl AbilitySystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingAbility> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Activated abilities of `nation` that at least one piece of `color`
    /// may use, in table order
    pub fn available_abilities(board: &Board, nation: Nation, color: Color) -> Vec<AbilityView> {
        nation_abilities(nation)
            .filter(|a| a.trigger == Trigger::Active)
            .filter_map(|a| {
                let target_type = a.target?;
                let pieces: Vec<PieceId> = board
                    .pieces_of(color)
                    .filter(|p| p.kind == a.piece && p.nation == nation && p.can_use_ability(a.id))
                    .map(|p| p.id)
                    .collect();
                (!pieces.is_empty()).then_some(AbilityView {
                    ability: a.id,
                    name: a.name,
                    description: a.description,
                    target_type,
                    pieces,
                })
            })
            .collect()
    }

    /// Phase one: validate and compute targets
    ///
    /// # Arguments
    ///
    /// * `to_move` - Side on move; the piece must belong to it
    ///
    /// # Returns
    ///
    /// The target set. When it is empty nothing becomes pending.
    ///
    /// # Errors
    ///
    /// Rejects when an ability is already pending, the piece is unknown or
    /// belongs to the other side, the piece does not own the ability, the
    /// ability is not player-activated, or the piece cannot use it now.
    pub fn activate(
        &mut self,
        board: &Board,
        captured: &CapturedPieces,
        to_move: Color,
        id: AbilityId,
        piece_id: PieceId,
    ) -> EngineResult<Activation> {
        if let Some(pending) = &self.pending {
            return Err(EngineError::AbilityPending {
                ability: pending.ability,
            });
        }
        let piece = board
            .find(piece_id)
            .ok_or(EngineError::UnknownPiece { id: piece_id })?;
        if piece.color != to_move {
            return Err(EngineError::NotYourTurn { color: piece.color });
        }
        let def = ability(id);
        if def.nation != piece.nation || def.piece != piece.kind {
            return Err(EngineError::AbilityNotOwned {
                id: piece_id,
                ability: id,
            });
        }
        let target_type = match (def.trigger, def.target) {
            (Trigger::Active, Some(target)) => target,
            _ => return Err(EngineError::AbilityNotActivatable { ability: id }),
        };
        if !piece.can_use_ability(id) {
            return Err(EngineError::AbilityUnavailable { ability: id });
        }

        let targets = targets::legal_targets(board, captured, piece, target_type);
        if targets.is_empty() {
            info!("[ABILITY] {} by {} has no targets", id, piece_id);
        } else {
            debug!("[ABILITY] {} by {} pending with {} targets", id, piece_id, targets.len());
            self.pending = Some(PendingAbility {
                ability: id,
                piece: piece_id,
                target_type,
                targets: targets.clone(),
            });
        }
        Ok(Activation {
            ability: id,
            piece: piece_id,
            target_type,
            targets,
        })
    }

    /// Phase two: apply the pending ability to `square`
    ///
    /// The target set is recomputed against the current board. An invalid
    /// square, or one the effect cannot act on, is rejected and the ability
    /// stays pending with its use unspent.
    pub fn execute(
        &mut self,
        board: &mut Board,
        captured: &mut CapturedPieces,
        square: Square,
    ) -> EngineResult<AbilityOutcome> {
        let pending = self.pending.as_ref().ok_or(EngineError::NoPendingAbility)?;
        let (id, piece_id, target_type) = (pending.ability, pending.piece, pending.target_type);

        let Some(source) = board.find(piece_id) else {
            self.pending = None;
            return Err(EngineError::UnknownPiece { id: piece_id });
        };
        let source_square = source.square;
        let targets = targets::legal_targets(board, captured, source, target_type);
        if !targets.contains(&square) {
            return Err(EngineError::InvalidTarget { ability: id, square });
        }

        if !resolve(board, captured, piece_id, id, source_square, target_type, square) {
            warn!("[ABILITY] {} by {} had no effect on {}", id, piece_id, square);
            return Err(EngineError::InvalidTarget { ability: id, square });
        }
        self.pending = None;
        info!("[ABILITY] {} by {} resolved on {}", id, piece_id, square);

        Ok(AbilityOutcome {
            ability: id,
            piece: piece_id,
            target: square,
            target_type,
            ends_turn: target_type.ends_turn(),
        })
    }

    /// Drops the pending ability without consuming a use
    pub fn cancel(&mut self) -> Option<PendingAbility> {
        let cancelled = self.pending.take();
        if let Some(pending) = &cancelled {
            debug!("[ABILITY] {} cancelled", pending.ability);
        }
        cancelled
    }
}

/// Applies the effect and spends one use of `id` only if it took place
fn resolve(
    board: &mut Board,
    captured: &mut CapturedPieces,
    piece_id: PieceId,
    id: AbilityId,
    source_square: Square,
    target_type: TargetType,
    square: Square,
) -> bool {
    if !effects::apply(board, captured, source_square, target_type, square) {
        return false;
    }
    // Looked up by id: relocating effects may have moved the source.
    if let Some(source) = board.find_mut(piece_id) {
        source.use_ability(id);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::types::PieceType;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board(pieces: &[(u32, PieceType, Color, Nation, (u8, u8))]) -> Board {
        let mut board = Board::new();
        for &(id, kind, color, nation, (r, c)) in pieces {
            board.set(sq(r, c), Piece::new(PieceId(id), kind, color, nation, sq(r, c)));
        }
        board
    }

    fn ottoman_setup() -> Board {
        board(&[
            (1, PieceType::King, Color::White, Nation::Ottoman, (7, 4)),
            (2, PieceType::Bishop, Color::White, Nation::Ottoman, (7, 2)),
            (3, PieceType::Queen, Color::White, Nation::Ottoman, (4, 4)),
            (4, PieceType::King, Color::Black, Nation::Rus, (0, 4)),
            (5, PieceType::Knight, Color::Black, Nation::Rus, (3, 3)),
        ])
    }

    #[test]
    fn test_available_abilities_lists_usable_pieces() {
        let mut b = ottoman_setup();
        let views = AbilitySystem::available_abilities(&b, Nation::Ottoman, Color::White);
        let ids: Vec<AbilityId> = views.iter().map(|v| v.ability).collect();
        assert_eq!(ids, vec![AbilityId::OttomanQueenIntrigue, AbilityId::OttomanBishopShaman]);
        assert_eq!(views[1].pieces, vec![PieceId(2)]);

        b.get_mut(sq(7, 2)).unwrap().status.silenced = true;
        let views = AbilitySystem::available_abilities(&b, Nation::Ottoman, Color::White);
        assert_eq!(views.len(), 1, "silenced bishop drops out");
    }

    #[test]
    fn test_activate_rejections() {
        let b = ottoman_setup();
        let captured = CapturedPieces::default();
        let mut system = AbilitySystem::new();

        let err = system
            .activate(&b, &captured, Color::White, AbilityId::OttomanBishopShaman, PieceId(99))
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownPiece { id: PieceId(99) });

        let err = system
            .activate(&b, &captured, Color::Black, AbilityId::OttomanBishopShaman, PieceId(2))
            .unwrap_err();
        assert_eq!(err, EngineError::NotYourTurn { color: Color::White });

        let err = system
            .activate(&b, &captured, Color::White, AbilityId::OttomanQueenIntrigue, PieceId(2))
            .unwrap_err();
        assert!(matches!(err, EngineError::AbilityNotOwned { .. }));

        let err = system
            .activate(&b, &captured, Color::White, AbilityId::OttomanKingHaremGuard, PieceId(1))
            .unwrap_err();
        assert!(matches!(err, EngineError::AbilityNotActivatable { .. }));
        assert!(!system.is_pending(), "rejections leave nothing pending");
    }

    #[test]
    fn test_two_phase_paralyze() {
        let mut b = ottoman_setup();
        let mut captured = CapturedPieces::default();
        let mut system = AbilitySystem::new();

        let activation = system
            .activate(&b, &captured, Color::White, AbilityId::OttomanBishopShaman, PieceId(2))
            .unwrap();
        assert_eq!(activation.targets, vec![sq(3, 3)]);
        assert!(system.is_pending());

        let err = system
            .activate(&b, &captured, Color::White, AbilityId::OttomanQueenIntrigue, PieceId(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::AbilityPending { .. }));

        let err = system.execute(&mut b, &mut captured, sq(0, 4)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));
        assert!(system.is_pending(), "bad target keeps the ability pending");

        let outcome = system.execute(&mut b, &mut captured, sq(3, 3)).unwrap();
        assert!(!outcome.ends_turn);
        assert!(b.get(sq(3, 3)).unwrap().status.paralyzed);
        assert_eq!(
            b.get(sq(7, 2)).unwrap().remaining_uses(AbilityId::OttomanBishopShaman),
            Some(1)
        );
        assert!(!system.is_pending());
    }

    #[test]
    fn test_cancel_keeps_the_use() {
        let b = ottoman_setup();
        let captured = CapturedPieces::default();
        let mut system = AbilitySystem::new();
        system
            .activate(&b, &captured, Color::White, AbilityId::OttomanQueenIntrigue, PieceId(3))
            .unwrap();
        assert!(system.cancel().is_some());
        assert!(system.cancel().is_none());
        assert_eq!(
            b.get(sq(4, 4)).unwrap().remaining_uses(AbilityId::OttomanQueenIntrigue),
            Some(1)
        );
        assert_eq!(
            system.execute(&mut b.clone(), &mut CapturedPieces::default(), sq(4, 4)),
            Err(EngineError::NoPendingAbility)
        );
    }

    #[test]
    fn test_empty_target_set_leaves_nothing_pending() {
        // China's king swaps with the queen; there is none.
        let b = board(&[
            (1, PieceType::King, Color::White, Nation::China, (7, 4)),
            (2, PieceType::King, Color::Black, Nation::Rus, (0, 4)),
            (3, PieceType::Pawn, Color::White, Nation::China, (6, 0)),
        ]);
        let mut system = AbilitySystem::new();
        let activation = system
            .activate(&b, &CapturedPieces::default(), Color::White, AbilityId::ChinaKingExpedition, PieceId(1))
            .unwrap();
        assert!(!activation.needs_target());
        assert!(!system.is_pending());
    }

    #[test]
    fn test_effect_that_does_nothing_keeps_the_use() {
        //! A swap aimed at an empty square changes nothing and spends nothing
        let mut b = board(&[
            (1, PieceType::King, Color::White, Nation::Mongol, (7, 4)),
            (2, PieceType::Rook, Color::White, Nation::Mongol, (7, 0)),
            (3, PieceType::King, Color::Black, Nation::Rus, (0, 4)),
        ]);
        let mut captured = CapturedPieces::default();
        let before = b.clone();

        let swapped = resolve(
            &mut b,
            &mut captured,
            PieceId(1),
            AbilityId::MongolKingMigration,
            sq(7, 4),
            TargetType::SwapWithAny,
            sq(5, 5),
        );
        assert!(!swapped);
        assert_eq!(b, before);
        assert_eq!(b.get(sq(7, 4)).unwrap().remaining_uses(AbilityId::MongolKingMigration), Some(1));

        assert!(resolve(
            &mut b,
            &mut captured,
            PieceId(1),
            AbilityId::MongolKingMigration,
            sq(7, 4),
            TargetType::SwapWithAny,
            sq(7, 0),
        ));
        let king = b.get(sq(7, 0)).unwrap();
        assert_eq!(king.kind, PieceType::King);
        assert_eq!(king.remaining_uses(AbilityId::MongolKingMigration), Some(0));
    }
}
