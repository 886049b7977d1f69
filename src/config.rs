//! Driver settings
//!
//! Loads and saves [`DriverSettings`] as JSON. Command-line flags override
//! whatever the file says.
//!
//! # File Location
//!
//! Settings live in `settings.json` inside the platform configuration
//! directory, or in the working directory when the platform has none.
//!
//! # Error Handling
//!
//! [`load_settings`] never fails: a missing file, an unreadable file or an
//! invalid one all mean default settings, with a warning for the latter two.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use nation_chess::{Color, EngineResult, GameEngine, Nation, PieceType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Nations and promotion choice for new games
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub white: Nation,
    pub black: Nation,
    /// Piece a pawn becomes when the player does not pick one
    pub promotion: PieceType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            white: Nation::England,
            black: Nation::Japan,
            promotion: PieceType::Queen,
        }
    }
}

impl EngineConfig {
    /// Creates an engine with both nations set and the game started
    pub fn new_game(&self) -> EngineResult<GameEngine> {
        let mut engine = GameEngine::new();
        engine.set_player_nation(Color::White, self.white);
        engine.set_player_nation(Color::Black, self.black);
        engine.init_game()?;
        Ok(engine)
    }
}

/// Everything the `superchess` binary reads from its settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    pub engine: EngineConfig,
    /// `tracing` filter directive, e.g. `info` or `nation_chess=debug`
    pub log_level: String,
    /// Self-play stops after this many plies
    pub max_plies: u32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        DriverSettings {
            engine: EngineConfig::default(),
            log_level: "info".to_string(),
            max_plies: 200,
        }
    }
}

impl DriverSettings {
    /// # Errors
    ///
    /// [`ConfigError::InvalidPromotion`] when the default promotion is a
    /// king or a pawn.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.engine.promotion.is_promotion_choice() {
            return Err(ConfigError::InvalidPromotion {
                piece_type: self.engine.promotion,
            });
        }
        Ok(())
    }
}

/// Path of `settings.json` in the user's configuration directory
///
/// Falls back to a local `settings.json` when the platform config
/// directory cannot be resolved.
pub fn settings_path() -> PathBuf {
    match ProjectDirs::from("com", "superchess", "SuperChess") {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

/// Reads and validates settings from `path`
///
/// Fields missing from the file take their default values.
pub fn load_from(path: &Path) -> ConfigResult<DriverSettings> {
    let contents = fs::read_to_string(path)?;
    let settings: DriverSettings = serde_json::from_str(&contents)?;
    settings.validate()?;
    Ok(settings)
}

/// Writes settings to `path`, creating parent directories as needed
pub fn save_to(path: &Path, settings: &DriverSettings) -> ConfigResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(settings)?)?;
    info!("[CONFIG] Saved settings to {:?}", path);
    Ok(())
}

/// Loads settings from `path`, falling back to defaults
pub fn load_or_default(path: &Path) -> DriverSettings {
    if !path.exists() {
        info!("[CONFIG] No settings file found at {:?}. Using defaults.", path);
        return DriverSettings::default();
    }
    match load_from(path) {
        Ok(settings) => {
            info!("[CONFIG] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("[CONFIG] Failed to load settings at {:?}: {}. Using defaults.", path, e);
            DriverSettings::default()
        }
    }
}

/// Loads settings from the default location
pub fn load_settings() -> DriverSettings {
    load_or_default(&settings_path())
}
