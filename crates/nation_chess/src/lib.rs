//! Nations chess rules engine
//!
//! A chess variant in which each side plays as a historical nation. Every
//! nation bends the rules for some of its pieces: changed movement,
//! capture immunities, one-shot activated abilities and effects that fire
//! when a capture happens.
//!
//! # Modules
//!
//! - [`types`]: colours, piece types, nations, squares
//! - [`data`]: the nation and ability tables
//! - [`board`] and [`piece`]: game state
//! - [`move_gen`]: legal moves, check, checkmate, stalemate
//! - [`abilities`]: activated, passive and reactive abilities
//! - [`api`]: [`GameEngine`], the turn state machine
//!
//! Everything is synchronous and single-threaded.

pub mod abilities;
pub mod api;
pub mod board;
pub mod captured;
pub mod data;
pub mod error;
pub mod events;
pub mod history;
pub mod move_gen;
pub mod piece;
pub mod turn;
pub mod types;

pub use abilities::{AbilityOutcome, AbilityView, Activation, ReactiveEffect};
pub use api::{GameAction, GameEngine, GameSnapshot, MoveOutcome};
pub use board::Board;
pub use data::{ability, nation_info, Ability, AbilityId, NationInfo, TargetType, Trigger};
pub use error::{EngineError, EngineResult};
pub use events::{GameEvent, SubscriptionId};
pub use move_gen::{Move, MoveKind, MoveValidator};
pub use piece::Piece;
pub use types::{Color, EndReason, GamePhase, Nation, PieceId, PieceType, Square};
