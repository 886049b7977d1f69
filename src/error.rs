//! Error types for the driver
//!
//! Covers loading and saving the settings file. Rules violations are
//! reported by the engine itself as [`nation_chess::EngineError`].

use nation_chess::PieceType;
use thiserror::Error;

/// Errors that can occur while handling driver settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// The configured default promotion is a king or a pawn
    #[error("Cannot promote to {piece_type}")]
    InvalidPromotion { piece_type: PieceType },
}

/// Result type alias for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;
