//! Pieces and their per-game state
//!
//! A [`Piece`] carries its identity, its current square, whether it has
//! moved, the remaining-use ledger for its limited abilities and a set of
//! transient status flags applied by abilities.
//!
//! # Ability ledger
//!
//! At construction the ledger is seeded from the ability table: every
//! ability of the piece's (nation, type) with a positive `max_uses` gets a
//! counter. Abilities without a counter are untracked and always usable
//! (unless the piece is silenced or neutralized).
//!
//! # Timed statuses
//!
//! Paralysis, burning, silence and immunity count down in
//! [`Piece::on_turn_end`], which the engine calls for every piece of the side
//! that just finished its turn.

use crate::data::{abilities_for, AbilityId};
use crate::types::{Color, Nation, PieceId, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transient flags set by abilities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceStatus {
    /// Cannot move
    pub paralyzed: bool,
    pub paralysis_turns: u8,
    /// Cannot use abilities
    pub silenced: bool,
    pub silence_turns: u8,
    /// Set on fire by Greek fire, cannot move
    pub burning: bool,
    pub burn_turns: u8,
    /// Permanently stripped of movement and abilities
    pub neutral: bool,
    /// Absorbs the next capture
    pub shielded: bool,
    /// Cannot be captured
    pub immune: bool,
    pub immunity_turns: u8,
    /// Captures it survives before being removed
    pub extra_lives: u8,
}

/// Result of a capture landing on a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// A shield or an extra life absorbed the hit
    Survived,
    /// The piece leaves the board
    Removed,
}

/// A piece on (or captured from) the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceType,
    pub color: Color,
    pub nation: Nation,
    /// Kept equal to the cell holding the piece by [`crate::board::Board`]
    pub square: Square,
    pub has_moved: bool,
    /// Remaining uses of tracked abilities
    pub ability_uses: BTreeMap<AbilityId, u8>,
    pub status: PieceStatus,
}

impl Piece {
    /// Creates a piece with a freshly seeded ability ledger
    pub fn new(id: PieceId, kind: PieceType, color: Color, nation: Nation, square: Square) -> Self {
        let mut piece = Piece {
            id,
            kind,
            color,
            nation,
            square,
            has_moved: false,
            ability_uses: BTreeMap::new(),
            status: PieceStatus::default(),
        };
        piece.seed_ability_uses();
        piece
    }

    fn seed_ability_uses(&mut self) {
        self.ability_uses = abilities_for(self.nation, self.kind)
            .filter_map(|a| match a.max_uses {
                Some(max) if max > 0 => Some((a.id, max)),
                _ => None,
            })
            .collect();
    }

    /// Whether the ability may be used right now
    ///
    /// Silenced and neutral pieces can use nothing. Tracked abilities need a
    /// positive counter; untracked ones are always usable.
    pub fn can_use_ability(&self, id: AbilityId) -> bool {
        if self.status.silenced || self.status.neutral {
            return false;
        }
        match self.ability_uses.get(&id) {
            Some(&remaining) => remaining > 0,
            None => true,
        }
    }

    /// Consumes one use of an ability
    ///
    /// # Returns
    ///
    /// `false` (and no change) when [`Piece::can_use_ability`] fails.
    pub fn use_ability(&mut self, id: AbilityId) -> bool {
        if !self.can_use_ability(id) {
            return false;
        }
        if let Some(remaining) = self.ability_uses.get_mut(&id) {
            *remaining -= 1;
        }
        true
    }

    /// Remaining uses of a tracked ability, `None` if untracked
    pub fn remaining_uses(&self, id: AbilityId) -> Option<u8> {
        self.ability_uses.get(&id).copied()
    }

    /// Paralyzed, burning and neutral pieces generate no moves at all
    pub fn is_immobile(&self) -> bool {
        self.status.paralyzed || self.status.burning || self.status.neutral
    }

    pub fn symbol(&self) -> char {
        self.kind.symbol(self.color)
    }

    pub fn value(&self) -> u32 {
        self.kind.value()
    }

    /// Changes the piece's kind and re-seeds its ledger for the new kind
    pub fn promote(&mut self, kind: PieceType) {
        self.kind = kind;
        self.seed_ability_uses();
    }

    /// Hands the piece to the other army, taking on its nation's abilities
    pub fn convert(&mut self, color: Color, nation: Nation) {
        self.color = color;
        self.nation = nation;
        self.seed_ability_uses();
    }

    /// Counts down timed statuses at the end of the owner's turn
    pub fn on_turn_end(&mut self) {
        let status = &mut self.status;
        tick(&mut status.paralyzed, &mut status.paralysis_turns);
        tick(&mut status.burning, &mut status.burn_turns);
        tick(&mut status.silenced, &mut status.silence_turns);
        tick(&mut status.immune, &mut status.immunity_turns);
    }

    /// Resolves a capture landing on this piece
    ///
    /// A shield is spent first, then an extra life.
    pub fn on_attacked(&mut self) -> AttackOutcome {
        if self.status.shielded {
            self.status.shielded = false;
            return AttackOutcome::Survived;
        }
        if self.status.extra_lives > 0 {
            self.status.extra_lives -= 1;
            return AttackOutcome::Survived;
        }
        AttackOutcome::Removed
    }
}

/// Hands out piece ids for pieces created during play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceIdAllocator {
    next: u32,
}

impl PieceIdAllocator {
    pub fn starting_at(next: u32) -> Self {
        PieceIdAllocator { next }
    }

    pub fn allocate(&mut self) -> PieceId {
        let id = PieceId(self.next);
        self.next += 1;
        id
    }
}

fn tick(flag: &mut bool, turns: &mut u8) {
    if !*flag {
        return;
    }
    *turns = turns.saturating_sub(1);
    if *turns == 0 {
        *flag = false;
    }
}
