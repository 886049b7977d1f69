//! Game state snapshots
//!
//! [`GameSnapshot`] is the serializable view of a game handed to front
//! ends. Two engines that went through the same actions produce equal
//! snapshots.

use super::game::GameEngine;
use crate::abilities::PendingAbility;
use crate::board::BoardEntry;
use crate::captured::CapturedPieces;
use crate::history::HistoryEntry;
use crate::piece::Piece;
use crate::types::{Color, EndReason, GamePhase, Nation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Vec<BoardEntry>,
    pub white_nation: Option<Nation>,
    pub black_nation: Option<Nation>,
    pub current_turn: Color,
    pub turn_number: u32,
    pub phase: GamePhase,
    pub winner: Option<Color>,
    pub end_reason: Option<EndReason>,
    pub captured_pieces: CapturedPieces,
    pub move_history: Vec<HistoryEntry>,
    pub pending_ability: Option<PendingAbility>,
    pub is_check: bool,
}

impl GameEngine {
    pub fn game_state(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.serialize(),
            white_nation: self.white_nation,
            black_nation: self.black_nation,
            current_turn: self.turn.current,
            turn_number: self.turn.turn_number,
            phase: self.phase,
            winner: self.winner,
            end_reason: self.end_reason,
            captured_pieces: self.captured.clone(),
            move_history: self.history.moves.clone(),
            pending_ability: self.abilities.pending().cloned(),
            is_check: self.is_in_check(self.turn.current),
        }
    }

    /// Pieces of `color` that have been captured, in capture order
    pub fn captured_pieces(&self, color: Color) -> &[Piece] {
        self.captured.lost(color)
    }

    /// White's material lead in pawns (negative when Black leads)
    pub fn material_advantage(&self) -> i32 {
        self.captured.material_advantage()
    }
}
