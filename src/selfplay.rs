//! Random self-play
//!
//! Plays random legal moves (and now and then a random activated ability)
//! for both sides. The RNG is seeded, so a seed always replays the same
//! game.

use crate::config::EngineConfig;
use nation_chess::{EngineResult, GameEngine, GamePhase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// One ply in eight tries an ability first
const ABILITY_ODDS: u32 = 8;

/// Plays a random game from the configured nations
///
/// # Arguments
///
/// * `seed` - RNG seed; equal seeds give equal games
/// * `max_plies` - Stop after this many moves or abilities
///
/// # Returns
///
/// The engine in whatever state the game reached.
pub fn self_play(config: &EngineConfig, seed: u64, max_plies: u32) -> EngineResult<GameEngine> {
    let mut engine = config.new_game()?;
    let mut rng = StdRng::seed_from_u64(seed);
    info!(
        "[ENGINE] Self-play {} vs {} (seed {})",
        config.white, config.black, seed
    );

    let mut plies = 0;
    while engine.phase() == GamePhase::Playing && plies < max_plies {
        let acted = rng.random_ratio(1, ABILITY_ODDS) && try_ability(&mut engine, &mut rng)?;
        if !acted && !try_move(&mut engine, &mut rng, config)? {
            debug!("[ENGINE] No playable move for {}", engine.current_turn());
            break;
        }
        plies += 1;
    }
    info!("[ENGINE] Self-play stopped after {} plies", plies);
    Ok(engine)
}

/// Plays one random playable move
///
/// Returns `false` when the side to move has none.
fn try_move(engine: &mut GameEngine, rng: &mut StdRng, config: &EngineConfig) -> EngineResult<bool> {
    let moves = engine.all_legal_moves();
    if moves.is_empty() {
        return Ok(false);
    }
    let mv = moves[rng.random_range(0..moves.len())];
    engine.make_move(mv.from, mv.to, Some(config.promotion))?;
    Ok(true)
}

/// Uses a random activated ability on a random target, if one exists
fn try_ability(engine: &mut GameEngine, rng: &mut StdRng) -> EngineResult<bool> {
    let views = engine.available_abilities(engine.current_turn());
    if views.is_empty() {
        return Ok(false);
    }
    let view = &views[rng.random_range(0..views.len())];
    let piece = view.pieces[rng.random_range(0..view.pieces.len())];

    let activation = engine.activate_ability(view.ability, piece)?;
    if !activation.needs_target() {
        return Ok(false);
    }
    let target = activation.targets[rng.random_range(0..activation.targets.len())];
    engine.execute_ability(target)?;
    Ok(true)
}
