//! Static game data
//!
//! Immutable tables describing the eleven nations and their abilities.
//! Nothing here changes during a game; pieces hold their mutable state
//! (remaining uses, status flags) themselves.

pub mod abilities;
pub mod nations;

pub use abilities::{abilities_for, ability, nation_abilities, Ability, AbilityId, TargetType, Trigger};
pub use nations::{nation_info, NationInfo, NationRatings, PieceNames};
