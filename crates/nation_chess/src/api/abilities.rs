//! Ability operations on the engine
//!
//! Thin wrappers over [`crate::abilities::AbilitySystem`] that add the game
//! phase check, the action log, turn handling and events.

use super::game::{GameAction, GameEngine};
use crate::abilities::{AbilityOutcome, AbilitySystem, AbilityView, Activation, PendingAbility};
use crate::data::AbilityId;
use crate::error::EngineResult;
use crate::events::GameEvent;
use crate::types::{Color, PieceId, Square};

impl GameEngine {
    /// Activated abilities `color` can use right now
    pub fn available_abilities(&self, color: Color) -> Vec<AbilityView> {
        match self.nation(color) {
            Some(nation) => AbilitySystem::available_abilities(&self.board, nation, color),
            None => Vec::new(),
        }
    }

    /// Phase one of an activated ability
    ///
    /// With an empty target set the call succeeds but nothing is pending.
    pub fn activate_ability(&mut self, ability: AbilityId, piece: PieceId) -> EngineResult<Activation> {
        self.ensure_playing()?;
        self.abilities
            .activate(&self.board, &self.captured, self.turn.current, ability, piece)
    }

    /// Phase two: resolve the pending ability on `square`
    ///
    /// Turn-ending abilities pass the turn; the others leave the same side
    /// to move. Either way the game-end check runs.
    pub fn execute_ability(&mut self, square: Square) -> EngineResult<AbilityOutcome> {
        self.ensure_playing()?;
        let color = self.turn.current;
        let outcome = self
            .abilities
            .execute(&mut self.board, &mut self.captured, square)?;

        self.actions.push(GameAction::Ability {
            ability: outcome.ability,
            piece: outcome.piece,
            target: square,
        });
        self.events.emit(GameEvent::AbilityUsed { color, outcome });
        if outcome.ends_turn {
            self.board.clear_last_move();
            self.end_turn();
        }
        self.check_game_end();
        self.events.flush();
        Ok(outcome)
    }

    /// Drops the pending ability, if any, without spending a use
    pub fn cancel_ability(&mut self) -> bool {
        self.abilities.cancel().is_some()
    }

    pub fn pending_ability(&self) -> Option<&PendingAbility> {
        self.abilities.pending()
    }
}
