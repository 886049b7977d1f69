//! Error types for the nations rules engine
//!
//! Every rejected operation maps to one [`EngineError`] variant. A rejected
//! operation never mutates the game, so callers can surface the message and
//! carry on.

use crate::data::AbilityId;
use crate::types::{Color, GamePhase, PieceId, PieceType, Square};
use thiserror::Error;

/// Errors returned by [`crate::api::GameEngine`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Move or ability attempted while the game is not being played
    #[error("Game is not in progress (phase: {phase:?})")]
    NotPlaying { phase: GamePhase },

    /// No nation assigned to a colour at game start
    #[error("No nation selected for {color}")]
    MissingNation { color: Color },

    /// Position handed to the engine is not playable
    #[error("Invalid setup: {message}")]
    InvalidSetup { message: String },

    /// Source square is empty
    #[error("No piece at square {square}")]
    NoPieceAtSquare { square: Square },

    /// Piece belongs to the side not on move
    #[error("Not {color}'s turn")]
    NotYourTurn { color: Color },

    /// Destination is not among the legal moves
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// A passive ability of the defender blocks this capture
    #[error("Piece at {square} is immune to this attack")]
    ImmuneTarget { square: Square },

    /// Promotion to king or pawn
    #[error("Cannot promote to {piece_type}")]
    InvalidPromotion { piece_type: PieceType },

    /// Another ability is waiting for a target
    #[error("Ability {ability} is waiting for a target")]
    AbilityPending { ability: AbilityId },

    /// Target chosen with nothing pending
    #[error("No ability is waiting for a target")]
    NoPendingAbility,

    /// Piece id not found on the board
    #[error("Unknown piece {id}")]
    UnknownPiece { id: PieceId },

    /// Piece's nation/type does not own this ability
    #[error("Piece {id} does not have ability {ability}")]
    AbilityNotOwned { id: PieceId, ability: AbilityId },

    /// Ability is passive or reactive
    #[error("Ability {ability} cannot be activated directly")]
    AbilityNotActivatable { ability: AbilityId },

    /// Silenced, neutralized or out of uses
    #[error("Ability {ability} is not available")]
    AbilityUnavailable { ability: AbilityId },

    /// Chosen square is not a target of the pending ability
    #[error("Invalid target {square} for ability {ability}")]
    InvalidTarget { ability: AbilityId, square: Square },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
