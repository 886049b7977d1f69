//! Public API for the rules engine
//!
//! [`GameEngine`] is the single entry point for playing a game: it owns the
//! board, validates and applies moves and abilities, keeps the move history
//! and the action log, and delivers [`crate::events::GameEvent`]s once each
//! operation has settled.
//!
//! # Lifecycle
//!
//! `setup -> playing -> ended`, with `paused` branching off `playing`.
//! Moves and abilities are accepted only while playing.
//!
//! # Examples
//!
//! ```rust,ignore
//! let mut engine = GameEngine::new();
//! engine.set_player_nation(Color::White, Nation::England);
//! engine.set_player_nation(Color::Black, Nation::Japan);
//! engine.init_game()?;
//!
//! let outcome = engine.make_move("e2".parse()?, "e4".parse()?, None)?;
//! println!("{}", outcome.notation);
//! println!("{}", serde_json::to_string(&engine.game_state())?);
//! ```

mod abilities;
mod game;
mod moves;
mod state;

pub use game::{GameAction, GameEngine};
pub use moves::MoveOutcome;
pub use state::GameSnapshot;
