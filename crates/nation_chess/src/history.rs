//! Move history
//!
//! Notation is kept as numbered pairs, one entry per full move. A White
//! move opens a new entry; a Black move fills the open entry with the same
//! number or opens one of its own (when White's turn was spent on an
//! ability, or the game started with Black to move).

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// One numbered line of the score sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub number: u32,
    pub white: Option<String>,
    pub black: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    pub moves: Vec<HistoryEntry>,
}

impl MoveHistory {
    /// Records the notation of a move played by `color` during move `number`
    pub fn add_move(&mut self, number: u32, color: Color, notation: String) {
        match color {
            Color::White => self.moves.push(HistoryEntry {
                number,
                white: Some(notation),
                black: None,
            }),
            Color::Black => match self.moves.last_mut() {
                Some(entry) if entry.number == number && entry.black.is_none() => {
                    entry.black = Some(notation);
                }
                _ => self.moves.push(HistoryEntry {
                    number,
                    white: None,
                    black: Some(notation),
                }),
            },
        }
    }

    /// Get the last entry recorded
    pub fn last_move(&self) -> Option<&HistoryEntry> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// PGN-like rendering, e.g. `1. e4 e5 2. Nf3`
    pub fn to_text(&self) -> String {
        self.moves
            .iter()
            .map(|entry| {
                let white = entry.white.as_deref().unwrap_or("..");
                match &entry.black {
                    Some(black) => format!("{}. {} {}", entry.number, white, black),
                    None => format!("{}. {}", entry.number, white),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
