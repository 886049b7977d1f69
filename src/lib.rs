//! Driver for the nations chess engine
//!
//! Settings handling, the interactive line protocol and random self-play
//! used by the `superchess` binary. The rules live in [`nation_chess`].

pub mod config;
pub mod error;
pub mod play;
pub mod selfplay;

pub use config::{DriverSettings, EngineConfig};
pub use error::{ConfigError, ConfigResult};
