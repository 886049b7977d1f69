//! Move generation and legality
//!
//! [`MoveValidator`] turns a board and a piece into the set of legal
//! destinations, and answers the check / checkmate / stalemate questions.
//!
//! # Architecture
//!
//! Generation happens in three layers:
//!
//! 1. **Base rule** per piece type (`pawn`, `knight`, `bishop`, `rook`,
//!    `queen`, `king`), parameterised by [`modifiers::BaseRules`] so that
//!    nation restrictions (slide limits, no double step) apply before
//!    anything is added.
//! 2. **Extensions** from the [`modifiers`] registry, keyed by
//!    (nation, piece type). Each added move is tagged with the ability that
//!    granted it so the engine can consume a use when it is played.
//! 3. **Filters**: immobile pieces produce nothing, captures of immune
//!    targets and of kings are dropped, and every remaining candidate is
//!    probed on a scratch copy of the board for king safety.
//!
//! Captures a passive immunity refuses are legal geometry but not playable.
//! [`MoveValidator::legal_moves_for`] keeps them so the engine can report
//! why such a capture failed; the playable lists and the game-end queries
//! leave them out.
//!
//! Attack detection lives in [`attack`] and never calls back into the
//! generator, so there is no recursion between "is this square attacked"
//! and "what are the legal moves".
//!
//! # Examples
//!
//! ```rust,ignore
//! let validator = MoveValidator::new(&board);
//! for mv in validator.legal_moves(square) {
//!     println!("{} -> {} ({:?})", mv.from, mv.to, mv.ability);
//! }
//! if validator.is_checkmate(Color::Black) { /* ... */ }
//! ```

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod modifiers;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;

#[cfg(test)]
mod tests;

use crate::abilities::check_immunity;
use crate::board::Board;
use crate::data::AbilityId;
use crate::piece::Piece;
use crate::types::{Color, PieceType, Square};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Geometric effect of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Destination is empty
    Quiet,
    /// Takes the enemy piece on the destination
    Capture,
    /// Takes the enemy piece on the destination by jumping one screen
    CannonCapture,
    /// Pawn takes the pawn on `captured` and lands behind it
    EnPassant { captured: Square },
    /// King and rook move together
    Castle { rook_from: Square, rook_to: Square },
}

/// A candidate or played move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// Ability that granted this move, if it is not a base move
    pub ability: Option<AbilityId>,
}

impl Move {
    pub fn quiet(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            kind: MoveKind::Quiet,
            ability: None,
        }
    }

    pub fn capture(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            kind: MoveKind::Capture,
            ability: None,
        }
    }

    pub fn with_kind(from: Square, to: Square, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            kind,
            ability: None,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::CannonCapture | MoveKind::EnPassant { .. }
        )
    }

    /// Square of the piece this move takes, if any
    pub fn captured_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Capture | MoveKind::CannonCapture => Some(self.to),
            MoveKind::EnPassant { captured } => Some(captured),
            MoveKind::Quiet | MoveKind::Castle { .. } => None,
        }
    }
}

/// Read-only rules oracle over a board
pub struct MoveValidator<'a> {
    board: &'a Board,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board) -> Self {
        MoveValidator { board }
    }

    /// Base moves plus nation extensions, before king safety
    ///
    /// Immobile pieces return nothing. Captures of immune pieces and of
    /// kings are never produced.
    pub fn pseudo_legal_moves(&self, piece: &Piece) -> Vec<Move> {
        if piece.is_immobile() {
            return Vec::new();
        }

        let rules = modifiers::base_rules(piece);
        let mut moves = match piece.kind {
            PieceType::Pawn => pawn::moves(self.board, piece, &rules),
            PieceType::Knight => knight::moves(self.board, piece),
            PieceType::Bishop => bishop::moves(self.board, piece, &rules),
            PieceType::Rook => rook::moves(self.board, piece, &rules),
            PieceType::Queen => queen::moves(self.board, piece, &rules),
            PieceType::King => king::moves(self.board, piece),
        };
        moves.extend(modifiers::extensions(self.board, piece));

        let mut seen = Vec::with_capacity(moves.len());
        moves.retain(|mv| {
            if seen.contains(&mv.to) {
                return false;
            }
            seen.push(mv.to);
            match mv.captured_square().and_then(|sq| self.board.get(sq)) {
                Some(target) => !target.status.immune && target.kind != PieceType::King,
                None => true,
            }
        });
        moves
    }

    /// Legal moves of the piece on `square` (empty if none)
    pub fn legal_moves(&self, square: Square) -> Vec<Move> {
        match self.board.get(square) {
            Some(piece) => self.legal_moves_for(piece),
            None => Vec::new(),
        }
    }

    /// Pseudo-legal moves that do not leave the mover's king in check
    pub fn legal_moves_for(&self, piece: &Piece) -> Vec<Move> {
        let candidates = self.pseudo_legal_moves(piece);
        if candidates.is_empty() {
            return candidates;
        }
        let mut scratch = self.board.clone();
        self.filter_king_safe(&mut scratch, piece.color, candidates)
    }

    fn filter_king_safe(&self, scratch: &mut Board, color: Color, candidates: Vec<Move>) -> Vec<Move> {
        candidates
            .into_iter()
            .filter(|mv| {
                let exposed = leaves_king_in_check(scratch, mv, color);
                if exposed {
                    trace!("[MOVE_GEN] {} -> {} leaves {} king in check", mv.from, mv.to, color);
                }
                !exposed
            })
            .collect()
    }

    /// Legal moves of `piece` minus captures a passive immunity refuses
    pub fn playable_moves_for(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = self.legal_moves_for(piece);
        moves.retain(|mv| !self.refused_by_immunity(piece, mv));
        moves
    }

    /// Playable moves of the piece on `square` (empty if none)
    pub fn playable_moves(&self, square: Square) -> Vec<Move> {
        match self.board.get(square) {
            Some(piece) => self.playable_moves_for(piece),
            None => Vec::new(),
        }
    }

    /// Whether the target of `mv` is immune to `piece`
    pub fn refused_by_immunity(&self, piece: &Piece, mv: &Move) -> bool {
        mv.captured_square()
            .and_then(|sq| self.board.get(sq))
            .is_some_and(|target| check_immunity(self.board, piece, target))
    }

    /// Every playable move for one side
    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut scratch = self.board.clone();
        let mut all = Vec::new();
        for piece in self.board.pieces_of(color) {
            let mut candidates = self.pseudo_legal_moves(piece);
            candidates.retain(|mv| !self.refused_by_immunity(piece, mv));
            all.extend(self.filter_king_safe(&mut scratch, color, candidates));
        }
        all
    }

    /// Whether `color` has at least one playable move
    pub fn has_legal_move(&self, color: Color) -> bool {
        let mut scratch = self.board.clone();
        self.board.pieces_of(color).any(|piece| {
            self.pseudo_legal_moves(piece).iter().any(|mv| {
                !self.refused_by_immunity(piece, mv) && !leaves_king_in_check(&mut scratch, mv, color)
            })
        })
    }

    /// Whether any piece of the opponent of `defender` attacks `square`
    pub fn is_square_attacked(&self, square: Square, defender: Color) -> bool {
        attack::is_square_attacked(self.board, square, defender)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attack::is_in_check(self.board, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Whether a pawn of `color` landing on `to` promotes
    pub fn can_promote(piece: &Piece, to: Square) -> bool {
        piece.kind == PieceType::Pawn && to.row == piece.color.promotion_rank()
    }
}

/// Pieces lifted off the scratch board while probing one move
struct Probe {
    from: Square,
    to: Square,
    taken: Option<Piece>,
    rook: Option<(Square, Square)>,
}

/// Plays `mv` on `scratch`, asks whether `color` is in check, then puts
/// everything back exactly as it was.
fn leaves_king_in_check(scratch: &mut Board, mv: &Move, color: Color) -> bool {
    let defender_survives = mv
        .captured_square()
        .and_then(|sq| scratch.get(sq))
        .is_some_and(|target| target.status.shielded || target.status.extra_lives > 0);
    if defender_survives {
        // The attacker stays put, so the position does not change.
        return attack::is_in_check(scratch, color);
    }

    let Some(probe) = play_probe(scratch, mv) else {
        return false;
    };
    let in_check = attack::is_in_check(scratch, color);
    undo_probe(scratch, probe);
    in_check
}

fn play_probe(scratch: &mut Board, mv: &Move) -> Option<Probe> {
    let taken = mv.captured_square().and_then(|sq| scratch.remove(sq));
    let Some(mover) = scratch.remove(mv.from) else {
        if let Some(piece) = taken {
            scratch.set(piece.square, piece);
        }
        return None;
    };
    let rook = match mv.kind {
        MoveKind::Castle { rook_from, rook_to } => {
            let rook = scratch.remove(rook_from);
            if let Some(rook) = rook {
                scratch.set(rook_to, rook);
                Some((rook_from, rook_to))
            } else {
                None
            }
        }
        _ => None,
    };
    scratch.set(mv.to, mover);
    Some(Probe {
        from: mv.from,
        to: mv.to,
        taken,
        rook,
    })
}

fn undo_probe(scratch: &mut Board, probe: Probe) {
    let mover = scratch.remove(probe.to);
    let rook = probe.rook.and_then(|(_, rook_to)| scratch.remove(rook_to));
    if let (Some(rook), Some((rook_from, _))) = (rook, probe.rook) {
        scratch.set(rook_from, rook);
    }
    if let Some(mover) = mover {
        scratch.set(probe.from, mover);
    }
    if let Some(taken) = probe.taken {
        scratch.set(taken.square, taken);
    }
}
