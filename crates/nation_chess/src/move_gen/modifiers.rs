//! Nation movement modifiers
//!
//! A single table, keyed by (nation, piece type), lists every way a nation
//! bends the base movement rules. Each entry is one of:
//!
//! - a **restriction** of the base rule (shorter slides, no double step),
//!   folded into [`BaseRules`] before the base moves are generated;
//! - an **extension** that adds destinations, each tagged with the ability
//!   that granted it.
//!
//! Extensions carry a [`Gate`]: `Always` for unlimited passive rules,
//! `Usable` for rules that need [`Piece::can_use_ability`] (limited uses,
//! or lost while silenced).
//!
//! Restrictions never apply to extension moves, and the table is keyed by
//! exact piece type: a queen picks up none of her nation's rook or bishop
//! entries.
//!
//! # Adding a modifier
//!
//! ```rust,ignore
//! Modifier {
//!     nation: Nation::Mongol,
//!     piece: PieceType::Pawn,
//!     ability: AbilityId::MongolPawnNomad,
//!     gate: Gate::Usable,
//!     rule: Rule::Extend(nomad_retreat),
//! }
//! ```

use crate::board::{Board, DIAGONAL_DIRS, ORTHOGONAL_DIRS};
use crate::data::AbilityId;
use crate::move_gen::king::castle_with_any_rook;
use crate::move_gen::sliding::{slide, steps, FULL_RANGE};
use crate::move_gen::{Move, MoveKind};
use crate::piece::Piece;
use crate::types::{Nation, PieceType};

/// Parameters of the base move rule after restrictions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseRules {
    pub slide_limit: u8,
    pub double_step: bool,
}

impl Default for BaseRules {
    fn default() -> Self {
        BaseRules {
            slide_limit: FULL_RANGE,
            double_step: true,
        }
    }
}

/// When a modifier is in force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Requires `can_use_ability` on the owning ability
    Usable,
}

/// Extra destinations for a piece
pub type Extension = fn(&Board, &Piece) -> Vec<Move>;

#[derive(Clone, Copy)]
pub enum Rule {
    SlideLimit(u8),
    NoDoubleStep,
    Extend(Extension),
}

/// One registry entry
#[derive(Clone, Copy)]
pub struct Modifier {
    pub nation: Nation,
    pub piece: PieceType,
    pub ability: AbilityId,
    pub gate: Gate,
    pub rule: Rule,
}

const fn modifier(nation: Nation, piece: PieceType, ability: AbilityId, gate: Gate, rule: Rule) -> Modifier {
    Modifier {
        nation,
        piece,
        ability,
        gate,
        rule,
    }
}

use AbilityId as A;
use Gate::{Always, Usable};
use Nation as N;
use PieceType as P;
use Rule::{Extend, NoDoubleStep, SlideLimit};

pub static MODIFIERS: &[Modifier] = &[
    // England
    modifier(N::England, P::Pawn, A::EnglandPawnLongbow, Always, NoDoubleStep),
    modifier(N::England, P::Pawn, A::EnglandPawnLongbow, Usable, Extend(longbow_shot)),
    modifier(N::England, P::Rook, A::EnglandRookTowerShot, Always, SlideLimit(5)),
    modifier(N::England, P::Rook, A::EnglandRookTowerShot, Always, Extend(diagonal_step)),
    modifier(N::England, P::King, A::EnglandKingCastlePlus, Usable, Extend(castle_with_any_rook)),
    // Japan
    modifier(N::Japan, P::Pawn, A::JapanPawnTeppo, Usable, Extend(teppo_advance)),
    // China
    modifier(N::China, P::Pawn, A::ChinaPawnCrossRiver, Always, Extend(river_sidestep)),
    modifier(N::China, P::Rook, A::ChinaRookCannon, Usable, Extend(cannon_captures)),
    modifier(N::China, P::Bishop, A::ChinaBishopAdvisor, Always, SlideLimit(5)),
    modifier(N::China, P::Bishop, A::ChinaBishopAdvisor, Always, Extend(orthogonal_step)),
    // Poland
    modifier(N::Poland, P::Pawn, A::PolandPawnCossack, Usable, Extend(sidestep)),
    modifier(N::Poland, P::Knight, A::PolandKnightHussar, Usable, Extend(hussar_charge)),
    // Mongol
    modifier(N::Mongol, P::Pawn, A::MongolPawnNomad, Usable, Extend(nomad_retreat)),
    // Ottoman
    modifier(N::Ottoman, P::Pawn, A::OttomanPawnMusket, Usable, Extend(musket_shot)),
    modifier(N::Ottoman, P::Rook, A::OttomanRookCannon, Usable, Extend(cannon_captures)),
    // France
    modifier(N::France, P::Knight, A::FranceKnightCharge, Always, Extend(heavy_charge)),
    modifier(N::France, P::Bishop, A::FranceBishopBlessing, Always, Extend(blessed_rays)),
    // Holy Roman Empire
    modifier(N::HolyRoman, P::Knight, A::HolyRomanKnightCrusade, Always, Extend(crusade_step)),
    // Rus
    modifier(N::Rus, P::Rook, A::RusRookFortress, Always, Extend(fortress_diagonals)),
    modifier(N::Rus, P::Knight, A::RusKnightRaid, Usable, Extend(raid)),
    // Spain
    modifier(N::Spain, P::Queen, A::SpainQueenVoyage, Always, SlideLimit(5)),
    modifier(N::Spain, P::Bishop, A::SpainBishopHeresy, Usable, Extend(heresy_strike)),
    modifier(N::Spain, P::Pawn, A::SpainPawnTercio, Always, Extend(tercio_advance)),
];

/// Registry entries for a (nation, piece type) pair
pub fn modifiers_for(nation: Nation, piece: PieceType) -> impl Iterator<Item = &'static Modifier> {
    MODIFIERS
        .iter()
        .filter(move |m| m.nation == nation && m.piece == piece)
}

fn in_force(modifier: &Modifier, piece: &Piece) -> bool {
    match modifier.gate {
        Gate::Always => true,
        Gate::Usable => piece.can_use_ability(modifier.ability),
    }
}

/// Base rule parameters after this piece's restrictions
pub fn base_rules(piece: &Piece) -> BaseRules {
    let mut rules = BaseRules::default();
    for m in modifiers_for(piece.nation, piece.kind).filter(|m| in_force(m, piece)) {
        match m.rule {
            Rule::SlideLimit(limit) => rules.slide_limit = rules.slide_limit.min(limit),
            Rule::NoDoubleStep => rules.double_step = false,
            Rule::Extend(_) => {}
        }
    }
    rules
}

/// Every extension move for this piece, tagged with its ability
pub fn extensions(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    for m in modifiers_for(piece.nation, piece.kind).filter(|m| in_force(m, piece)) {
        if let Rule::Extend(extend) = m.rule {
            moves.extend(extend(board, piece).into_iter().map(|mut mv| {
                mv.ability = Some(m.ability);
                mv
            }));
        }
    }
    moves
}

fn is_centre_file(piece: &Piece) -> bool {
    (2..=5).contains(&piece.square.col)
}

/// Capture an enemy exactly two squares ahead (centre files)
fn longbow_shot(board: &Board, piece: &Piece) -> Vec<Move> {
    if !is_centre_file(piece) {
        return Vec::new();
    }
    piece
        .square
        .offset(2 * piece.color.forward(), 0)
        .filter(|sq| board.has_enemy(*sq, piece.color))
        .map(|sq| Move::capture(piece.square, sq))
        .into_iter()
        .collect()
}

fn diagonal_step(board: &Board, piece: &Piece) -> Vec<Move> {
    steps(board, piece, &DIAGONAL_DIRS)
}

fn orthogonal_step(board: &Board, piece: &Piece) -> Vec<Move> {
    steps(board, piece, &ORTHOGONAL_DIRS)
}

/// Three-square first move for centre-file pawns
fn teppo_advance(board: &Board, piece: &Piece) -> Vec<Move> {
    if piece.has_moved || !is_centre_file(piece) {
        return Vec::new();
    }
    let forward = piece.color.forward();
    let one_clear = piece
        .square
        .offset(forward, 0)
        .is_some_and(|sq| board.is_empty(sq));
    if !one_clear {
        return Vec::new();
    }
    piece
        .square
        .offset(3 * forward, 0)
        .filter(|sq| board.is_empty(*sq))
        .map(|sq| Move::quiet(piece.square, sq))
        .into_iter()
        .collect()
}

/// Sideways step onto an empty square
fn sidestep(board: &Board, piece: &Piece) -> Vec<Move> {
    [-1, 1]
        .into_iter()
        .filter_map(|dc| piece.square.offset(0, dc))
        .filter(|sq| board.is_empty(*sq))
        .map(|sq| Move::quiet(piece.square, sq))
        .collect()
}

fn river_sidestep(board: &Board, piece: &Piece) -> Vec<Move> {
    if Board::crossed_midline(piece.square.row, piece.color) {
        sidestep(board, piece)
    } else {
        Vec::new()
    }
}

/// Xiangqi-style cannon: jump exactly one piece, take the next enemy
fn cannon_captures(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    for (dr, dc) in ORTHOGONAL_DIRS {
        let mut screen_found = false;
        let mut current = piece.square;
        while let Some(next) = current.offset(dr, dc) {
            current = next;
            let Some(other) = board.get(next) else {
                continue;
            };
            if !screen_found {
                screen_found = true;
                continue;
            }
            if other.color != piece.color {
                moves.push(Move::with_kind(piece.square, next, MoveKind::CannonCapture));
            }
            break;
        }
    }
    moves
}

fn hussar_charge(board: &Board, piece: &Piece) -> Vec<Move> {
    slide(board, piece, &ORTHOGONAL_DIRS, 2)
}

/// One step straight back, never a capture
fn nomad_retreat(board: &Board, piece: &Piece) -> Vec<Move> {
    piece
        .square
        .offset(-piece.color.forward(), 0)
        .filter(|sq| board.is_empty(*sq))
        .map(|sq| Move::quiet(piece.square, sq))
        .into_iter()
        .collect()
}

/// Unmoved centre-file pawns shoot an enemy one or two squares ahead
fn musket_shot(board: &Board, piece: &Piece) -> Vec<Move> {
    if piece.has_moved || !is_centre_file(piece) {
        return Vec::new();
    }
    (1..=2)
        .filter_map(|i| piece.square.offset(i * piece.color.forward(), 0))
        .filter(|sq| board.has_enemy(*sq, piece.color))
        .map(|sq| Move::capture(piece.square, sq))
        .collect()
}

fn heavy_charge(board: &Board, piece: &Piece) -> Vec<Move> {
    steps(board, piece, &[(-2, 0), (2, 0), (0, -2), (0, 2)])
}

/// Continue a diagonal past the first allied blocker, up to the next piece
fn blessed_rays(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    for (dr, dc) in DIAGONAL_DIRS {
        let mut current = piece.square;
        let mut passed_ally = false;
        while let Some(next) = current.offset(dr, dc) {
            current = next;
            match board.get(next) {
                None if passed_ally => moves.push(Move::quiet(piece.square, next)),
                None => {}
                Some(other) if other.color == piece.color && !passed_ally => passed_ally = true,
                Some(other) => {
                    if passed_ally && other.color != piece.color {
                        moves.push(Move::capture(piece.square, next));
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn crusade_step(board: &Board, piece: &Piece) -> Vec<Move> {
    if Board::in_enemy_half(piece.square.row, piece.color) {
        orthogonal_step(board, piece)
    } else {
        Vec::new()
    }
}

fn fortress_diagonals(board: &Board, piece: &Piece) -> Vec<Move> {
    if Board::in_own_half(piece.square.row, piece.color) {
        slide(board, piece, &DIAGONAL_DIRS, 2)
    } else {
        Vec::new()
    }
}

/// First-move orthogonal dash of up to three squares
fn raid(board: &Board, piece: &Piece) -> Vec<Move> {
    if piece.has_moved {
        return Vec::new();
    }
    slide(board, piece, &ORTHOGONAL_DIRS, 3)
}

/// Capture an orthogonally adjacent enemy
fn heresy_strike(board: &Board, piece: &Piece) -> Vec<Move> {
    ORTHOGONAL_DIRS
        .into_iter()
        .filter_map(|(dr, dc)| piece.square.offset(dr, dc))
        .filter(|sq| board.has_enemy(*sq, piece.color))
        .map(|sq| Move::capture(piece.square, sq))
        .collect()
}

/// Two-square advance for a moved pawn standing in a row of three or more
fn tercio_advance(board: &Board, piece: &Piece) -> Vec<Move> {
    if !piece.has_moved || board.pawns_in_row(piece.square.row, piece.color) < 3 {
        return Vec::new();
    }
    let forward = piece.color.forward();
    let one = piece.square.offset(forward, 0);
    let two = piece.square.offset(2 * forward, 0);
    match (one, two) {
        (Some(one), Some(two)) if board.is_empty(one) && board.is_empty(two) => {
            vec![Move::quiet(piece.square, two)]
        }
        _ => Vec::new(),
    }
}
