//! Move execution
//!
//! The per-move cycle: validate, apply (board mutation, capture
//! bookkeeping, promotion, reactive effects), consume the move's ability
//! tag, tick the mover's statuses, record notation, pass the turn, check
//! for the end of the game and deliver events.

use super::game::{GameAction, GameEngine};
use crate::abilities::{check_immunity, on_capture, reactive, ReactiveEffect};
use crate::error::{EngineError, EngineResult};
use crate::events::GameEvent;
use crate::move_gen::{Move, MoveKind, MoveValidator};
use crate::piece::AttackOutcome;
use crate::types::{Color, EndReason, PieceId, PieceType, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a played move did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    #[serde(rename = "move")]
    pub mv: Move,
    pub piece: PieceId,
    /// Kind of the piece taken off the board
    pub captured: Option<PieceType>,
    /// The target absorbed the hit with a shield or an extra life
    pub defender_survived: bool,
    pub promotion: Option<PieceType>,
    /// Reactive effects that actually took place, in order
    pub effects: Vec<ReactiveEffect>,
    pub notation: String,
    pub game_over: Option<EndReason>,
}

impl GameEngine {
    /// Moves the piece on `square` can play
    ///
    /// Captures a passive immunity refuses are left out; attempting one
    /// with [`GameEngine::make_move`] fails with `ImmuneTarget`.
    pub fn legal_moves(&self, square: Square) -> Vec<Move> {
        MoveValidator::new(&self.board).playable_moves(square)
    }

    /// Every playable move of the side to move
    pub fn all_legal_moves(&self) -> Vec<Move> {
        MoveValidator::new(&self.board).all_legal_moves(self.turn.current)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        MoveValidator::new(&self.board).is_in_check(color)
    }

    /// Plays a move for the side to move
    ///
    /// # Arguments
    ///
    /// * `promotion` - Piece a promoting pawn becomes; queen when `None`
    ///
    /// # Errors
    ///
    /// Rejected when the game is not in progress, an ability is pending,
    /// `from` is empty or holds the opponent's piece, `to` is not a legal
    /// destination, the promotion choice is a king or pawn, or the target
    /// is immune to this attacker.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> EngineResult<MoveOutcome> {
        self.ensure_playing()?;
        if let Some(pending) = self.abilities.pending() {
            return Err(EngineError::AbilityPending {
                ability: pending.ability,
            });
        }
        let piece = self
            .board
            .get(from)
            .ok_or(EngineError::NoPieceAtSquare { square: from })?;
        if piece.color != self.turn.current {
            return Err(EngineError::NotYourTurn { color: piece.color });
        }
        let mv = MoveValidator::new(&self.board)
            .legal_moves_for(piece)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(EngineError::IllegalMove { from, to })?;

        let promotes = MoveValidator::can_promote(piece, to);
        let promotion = match promotion {
            Some(kind) if promotes && !kind.is_promotion_choice() => {
                return Err(EngineError::InvalidPromotion { piece_type: kind });
            }
            _ if promotes => Some(promotion.unwrap_or(PieceType::Queen)),
            _ => None,
        };
        if let Some(target_square) = mv.captured_square() {
            if let Some(defender) = self.board.get(target_square) {
                if check_immunity(&self.board, piece, defender) {
                    return Err(EngineError::ImmuneTarget {
                        square: target_square,
                    });
                }
            }
        }

        let (id, kind, color) = (piece.id, piece.kind, piece.color);
        let mut outcome = MoveOutcome {
            mv,
            piece: id,
            captured: None,
            defender_survived: false,
            promotion: None,
            effects: Vec::new(),
            notation: String::new(),
            game_over: None,
        };
        let pending_effects = self.apply_move(&mv, &mut outcome);

        if let Some(kind) = promotion.filter(|_| !outcome.defender_survived) {
            if let Some(pawn) = self.board.get_mut(to) {
                pawn.promote(kind);
                outcome.promotion = Some(kind);
                debug!("[ENGINE] {} promoted to {}", id, kind);
            }
        }

        for effect in pending_effects {
            if reactive::apply(&mut self.board, &mut self.captured, &mut self.ids, &effect) {
                outcome.effects.push(effect);
            } else {
                debug!("[ENGINE] Skipped {:?}", effect);
            }
        }

        if let Some(ability) = mv.ability {
            if let Some(mover) = self.board.find_mut(id) {
                mover.use_ability(ability);
            }
        }

        // The suffix must see the position after the mover's statuses
        // tick, the same one the game-end check sees.
        self.tick_statuses();
        outcome.notation = self.notation(&mv, kind, color);
        self.history.add_move(self.turn.turn_number, color, outcome.notation.clone());
        self.actions.push(GameAction::Move { from, to, promotion });
        info!("[ENGINE] {} plays {}", color, outcome.notation);

        self.events.emit(GameEvent::MoveMade {
            piece: id,
            kind,
            color,
            from,
            to,
            captured: outcome.captured,
            notation: outcome.notation.clone(),
            effects: outcome.effects.clone(),
        });
        self.pass_turn();
        self.check_game_end();
        outcome.game_over = self.end_reason;
        self.events.flush();
        Ok(outcome)
    }

    /// Board mutation and capture bookkeeping for a validated move
    ///
    /// # Returns
    ///
    /// The reactive effects queued by a confirmed capture.
    fn apply_move(&mut self, mv: &Move, outcome: &mut MoveOutcome) -> Vec<ReactiveEffect> {
        let Some(target_square) = mv.captured_square() else {
            self.board.move_piece(mv.from, mv.to);
            if let MoveKind::Castle { rook_from, rook_to } = mv.kind {
                if self.board.relocate(rook_from, rook_to) {
                    if let Some(rook) = self.board.get_mut(rook_to) {
                        rook.has_moved = true;
                    }
                }
            }
            return Vec::new();
        };

        let survived = self
            .board
            .get_mut(target_square)
            .map(|defender| defender.on_attacked() == AttackOutcome::Survived)
            .unwrap_or(false);
        if survived {
            outcome.defender_survived = true;
            self.board.clear_last_move();
            debug!("[ENGINE] Defender on {} survived the attack", target_square);
            return Vec::new();
        }

        let Some(mut defender) = self.board.remove(target_square) else {
            self.board.move_piece(mv.from, mv.to);
            return Vec::new();
        };
        self.board.move_piece(mv.from, mv.to);
        outcome.captured = Some(defender.kind);

        let effects = match self.board.get(mv.to) {
            Some(attacker) => on_capture(&self.board, attacker, &mut defender, target_square),
            None => Vec::new(),
        };
        self.captured.add_capture(defender);
        effects
    }

    /// Algebraic notation of a move that has just been applied
    ///
    /// Call after the mover's statuses have ticked.
    fn notation(&self, mv: &Move, kind: PieceType, color: Color) -> String {
        let mut text = String::new();
        if let MoveKind::Castle { .. } = mv.kind {
            text.push_str(if mv.to.col > mv.from.col { "O-O" } else { "O-O-O" });
        } else {
            if let Some(letter) = kind.letter() {
                text.push(letter);
            }
            if mv.is_capture() {
                if kind == PieceType::Pawn {
                    text.push(mv.from.file());
                }
                text.push('x');
            }
            text.push_str(&mv.to.notation());
        }

        let validator = MoveValidator::new(&self.board);
        let opponent = color.opposite();
        if validator.is_checkmate(opponent) {
            text.push('#');
        } else if validator.is_in_check(opponent) {
            text.push('+');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Nation;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn position(pieces: &[(&str, PieceType, Color)], to_move: Color) -> GameEngine {
        let pieces: Vec<_> = pieces.iter().map(|&(at, kind, color)| (sq(at), kind, color)).collect();
        GameEngine::from_position(Nation::HolyRoman, Nation::Byzantine, &pieces, to_move).unwrap()
    }

    fn has_en_passant(engine: &GameEngine, square: Square) -> bool {
        engine
            .legal_moves(square)
            .iter()
            .any(|mv| matches!(mv.kind, MoveKind::EnPassant { .. }))
    }

    #[test]
    fn test_shielded_defender_survives_capture() {
        //! A survived capture leaves both pieces in place, spends the
        //! protection, passes the turn and ends the en passant window.
        let mut engine = position(
            &[
                ("e1", PieceType::King, Color::White),
                ("e2", PieceType::Pawn, Color::White),
                ("a3", PieceType::Rook, Color::White),
                ("e8", PieceType::King, Color::Black),
                ("d4", PieceType::Pawn, Color::Black),
                ("a6", PieceType::Rook, Color::Black),
            ],
            Color::White,
        );
        engine.make_move(sq("e2"), sq("e4"), None).unwrap();
        assert!(has_en_passant(&engine, sq("d4")), "Window opens after the double step");

        engine.board.get_mut(sq("a3")).unwrap().status.shielded = true;
        let outcome = engine.make_move(sq("a6"), sq("a3"), None).unwrap();
        assert!(outcome.defender_survived);
        assert_eq!(outcome.captured, None);
        assert_eq!(outcome.promotion, None);
        assert!(outcome.effects.is_empty());
        assert_eq!(engine.current_turn(), Color::White);

        let attacker = engine.board.get(sq("a6")).unwrap();
        assert_eq!((attacker.kind, attacker.color), (PieceType::Rook, Color::Black));
        let defender = engine.board.get(sq("a3")).unwrap();
        assert_eq!(defender.color, Color::White);
        assert!(!defender.status.shielded, "Shield is spent");
        assert!(engine.captured_pieces(Color::White).is_empty());

        engine.board.get_mut(sq("a6")).unwrap().status.extra_lives = 1;
        let outcome = engine.make_move(sq("a3"), sq("a6"), None).unwrap();
        assert!(outcome.defender_survived);
        assert_eq!(engine.board.get(sq("a6")).unwrap().status.extra_lives, 0);
        assert_eq!(engine.board.get(sq("a3")).unwrap().kind, PieceType::Rook);
        assert_eq!(engine.current_turn(), Color::Black);

        assert!(!has_en_passant(&engine, sq("d4")), "Window closed two plies later");
        assert_eq!(
            engine.make_move(sq("d4"), sq("e3"), None),
            Err(EngineError::IllegalMove {
                from: sq("d4"),
                to: sq("e3")
            })
        );
    }

    #[test]
    fn test_check_suffix_sees_expired_paralysis() {
        //! The rook wakes up as White's turn ends, so the move gives check
        let mut engine = position(
            &[
                ("a1", PieceType::King, Color::White),
                ("e2", PieceType::Rook, Color::White),
                ("e8", PieceType::King, Color::Black),
            ],
            Color::White,
        );
        let rook = engine.board.get_mut(sq("e2")).unwrap();
        rook.status.paralyzed = true;
        rook.status.paralysis_turns = 1;
        assert!(!engine.is_in_check(Color::Black));

        let outcome = engine.make_move(sq("a1"), sq("b1"), None).unwrap();
        assert_eq!(outcome.notation, "Kb1+");
        assert!(engine.is_in_check(Color::Black));
        assert!(engine.game_state().is_check);
        assert_eq!(engine.move_history().to_text(), "1. Kb1+");
    }

    #[test]
    fn test_off_board_squares_are_rejected() {
        let mut engine = position(
            &[
                ("e1", PieceType::King, Color::White),
                ("e2", PieceType::Pawn, Color::White),
                ("e8", PieceType::King, Color::Black),
            ],
            Color::White,
        );
        let outside = Square { row: 8, col: 0 };

        assert!(engine.legal_moves(outside).is_empty());
        assert_eq!(
            engine.make_move(outside, sq("e4"), None),
            Err(EngineError::NoPieceAtSquare { square: outside })
        );
        assert_eq!(
            engine.make_move(sq("e2"), Square { row: 9, col: 4 }, None),
            Err(EngineError::IllegalMove {
                from: sq("e2"),
                to: Square { row: 9, col: 4 }
            })
        );
        assert!(engine.action_log().is_empty());

        let log = r#"[{"action": "move", "from": {"row": 9, "col": 4}, "to": {"row": 4, "col": 4}, "promotion": null}]"#;
        assert!(serde_json::from_str::<Vec<GameAction>>(log).is_err());
    }
}
