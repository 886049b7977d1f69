//! Core types for the nations rules engine
//!
//! Defines the small value types every other module speaks in: colours,
//! piece kinds, nations, board coordinates and piece identities.
//!
//! # Coordinates
//!
//! Squares use `(row, col)` with row 0 at the top of the board (Black's back
//! rank, rank 8) and row 7 at the bottom (White's back rank, rank 1).
//! Columns 0-7 map to files `a`-`h`. White pawns therefore advance towards
//! row 0 and Black pawns towards row 7.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side to move / owner of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colours, White first
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the other side
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step for this colour
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this colour's pieces at the start of the game
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row where this colour's pawns start
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this colour promotes on
    pub fn promotion_rank(self) -> u8 {
        self.opposite().back_rank()
    }

    /// Row a pawn of this colour must stand on to capture en passant
    pub fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    /// Back-rank layout from column 0 to column 7
    pub const BACK_RANK: [PieceType; 8] = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];

    /// Material value in pawns (king has none)
    pub fn value(self) -> u32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight | PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 0,
        }
    }

    /// Notation letter, `None` for pawns
    pub fn letter(self) -> Option<char> {
        match self {
            PieceType::King => Some('K'),
            PieceType::Queen => Some('Q'),
            PieceType::Rook => Some('R'),
            PieceType::Bishop => Some('B'),
            PieceType::Knight => Some('N'),
            PieceType::Pawn => None,
        }
    }

    /// Unicode figurine for the given colour
    pub fn symbol(self, color: Color) -> char {
        match (color, self) {
            (Color::White, PieceType::King) => '♔',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, PieceType::King) => '♚',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Pawn) => '♟',
        }
    }

    /// Whether a pawn may promote into this kind
    pub fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Rook => "rook",
            PieceType::Bishop => "bishop",
            PieceType::Knight => "knight",
            PieceType::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "king" | "k" => Ok(PieceType::King),
            "queen" | "q" => Ok(PieceType::Queen),
            "rook" | "r" => Ok(PieceType::Rook),
            "bishop" | "b" => Ok(PieceType::Bishop),
            "knight" | "n" => Ok(PieceType::Knight),
            "pawn" | "p" => Ok(PieceType::Pawn),
            other => Err(format!("unknown piece type '{other}'")),
        }
    }
}

/// Rules theme bound to one player's whole army
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nation {
    France,
    England,
    HolyRoman,
    China,
    Japan,
    Ottoman,
    Mongol,
    Byzantine,
    Spain,
    Poland,
    Rus,
}

impl Nation {
    pub const ALL: [Nation; 11] = [
        Nation::France,
        Nation::England,
        Nation::HolyRoman,
        Nation::China,
        Nation::Japan,
        Nation::Ottoman,
        Nation::Mongol,
        Nation::Byzantine,
        Nation::Spain,
        Nation::Poland,
        Nation::Rus,
    ];

    /// Stable identifier used in ability ids and settings files
    pub fn id(self) -> &'static str {
        match self {
            Nation::France => "france",
            Nation::England => "england",
            Nation::HolyRoman => "holyroman",
            Nation::China => "china",
            Nation::Japan => "japan",
            Nation::Ottoman => "ottoman",
            Nation::Mongol => "mongol",
            Nation::Byzantine => "byzantine",
            Nation::Spain => "spain",
            Nation::Poland => "poland",
            Nation::Rus => "rus",
        }
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Nation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Nation::ALL
            .into_iter()
            .find(|nation| nation.id() == wanted)
            .ok_or_else(|| format!("unknown nation '{s}'"))
    }
}

/// A board coordinate
///
/// [`Square::new`] and [`Square::offset`] return `None` for anything off
/// the 8x8 grid, and deserializing an off-board square fails. A literal
/// built out of range is still harmless: the board reads it as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

/// Unchecked wire form of [`Square`]
#[derive(Deserialize)]
struct RawSquare {
    row: u8,
    col: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = String;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.row, raw.col)
            .ok_or_else(|| format!("square ({}, {}) is off the board", raw.row, raw.col))
    }
}

impl Square {
    /// Creates a square, or `None` when outside the board
    pub fn new(row: u8, col: u8) -> Option<Square> {
        (row < 8 && col < 8).then_some(Square { row, col })
    }

    pub fn is_on_board(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Creates a square from signed coordinates
    pub fn from_signed(row: i8, col: i8) -> Option<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Square displaced by `(dr, dc)`, if still on the board
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        if !self.is_on_board() {
            return None;
        }
        Square::from_signed(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Chebyshev distance between two squares
    pub fn distance(self, other: Square) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Iterates over all 64 squares in row-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    /// Algebraic name such as `e4`
    pub fn notation(self) -> String {
        if !self.is_on_board() {
            return format!("({}, {})", self.row, self.col);
        }
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{file}{rank}")
    }

    /// File letter of this square
    pub fn file(self) -> char {
        (b'a' + self.col.min(7)) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parses algebraic notation (`e4`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square '{s}'"));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(format!("invalid square '{s}'"));
        }
        Ok(Square {
            row: b'8' - rank,
            col: file - b'a',
        })
    }
}

/// Engine-assigned piece identity
///
/// Ids are handed out from a per-game counter so that two engines fed the
/// same actions assign the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Setup,
    Playing,
    Paused,
    Ended,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    Checkmate,
    Stalemate,
    Resignation,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Checkmate => write!(f, "checkmate"),
            EndReason::Stalemate => write!(f, "stalemate"),
            EndReason::Resignation => write!(f, "resignation"),
        }
    }
}
