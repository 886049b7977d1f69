//! Board representation and geometric queries
//!
//! The board is a fixed 8x8 grid of optional pieces. Each cell owns its
//! piece: removing a piece hands ownership to the caller (usually the
//! captured-pieces list), and placing a piece updates the piece's stored
//! square so the two never disagree.
//!
//! Provides:
//! - Cell access (`get`, `set`, `remove`, `move_piece`, `relocate`, `swap`)
//! - Ally/enemy predicates
//! - Half-board and adjacency helpers used by the nation rules
//! - A flat serialization used by snapshots and the no-mutation checks
//!
//! A square off the 8x8 grid reads as empty and writes to it change
//! nothing. Offsets off the board simply produce no square.

use crate::piece::Piece;
use crate::types::{Color, Nation, PieceId, PieceType, Square};
use serde::{Deserialize, Serialize};

/// The eight king-step directions
pub const ADJACENT_DIRS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Up, down, left, right
pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// The most recent regular move, used for en passant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub piece: PieceId,
    pub kind: PieceType,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
}

/// One occupied cell in [`Board::serialize`] output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub row: u8,
    pub col: u8,
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub color: Color,
    pub nation: Nation,
    pub has_moved: bool,
}

/// 8x8 grid of pieces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
    last_move: Option<LastMove>,
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard starting position
    ///
    /// Pieces are numbered from 1 in row-major order, so the returned id
    /// counter continues at 33.
    pub fn standard(white: Nation, black: Nation) -> (Self, u32) {
        let mut board = Board::new();
        let mut next_id = 1u32;
        for color in [Color::Black, Color::White] {
            let nation = match color {
                Color::White => white,
                Color::Black => black,
            };
            let mut rows = [
                (color.back_rank(), PieceType::BACK_RANK),
                (color.pawn_rank(), [PieceType::Pawn; 8]),
            ];
            if color == Color::White {
                rows.reverse();
            }
            for (row, kinds) in rows {
                for (col, kind) in kinds.into_iter().enumerate() {
                    let square = Square { row, col: col as u8 };
                    board.set(square, Piece::new(PieceId(next_id), kind, color, nation, square));
                    next_id += 1;
                }
            }
        }
        (board, next_id)
    }

    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.cell(square)?.as_ref()
    }

    pub fn get_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.cell_mut(square)?.as_mut()
    }

    /// Places a piece, returning whatever occupied the cell
    ///
    /// Off the board nothing is placed and the piece is handed back.
    pub fn set(&mut self, square: Square, mut piece: Piece) -> Option<Piece> {
        piece.square = square;
        match self.cell_mut(square) {
            Some(cell) => cell.replace(piece),
            None => Some(piece),
        }
    }

    /// Takes the piece off a cell
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cell_mut(square)?.take()
    }

    fn cell(&self, square: Square) -> Option<&Option<Piece>> {
        self.cells.get(square.row as usize)?.get(square.col as usize)
    }

    fn cell_mut(&mut self, square: Square) -> Option<&mut Option<Piece>> {
        self.cells.get_mut(square.row as usize)?.get_mut(square.col as usize)
    }

    /// Plays a regular move
    ///
    /// Marks the piece as moved and records [`LastMove`]. Any piece on the
    /// destination is displaced and returned.
    ///
    /// # Returns
    ///
    /// `None` for the outer option when `from` is empty or `to` is off
    /// the board.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Option<Piece>> {
        if !to.is_on_board() {
            return None;
        }
        let mut piece = self.remove(from)?;
        piece.has_moved = true;
        let displaced = self.remove(to);
        self.last_move = Some(LastMove {
            piece: piece.id,
            kind: piece.kind,
            color: piece.color,
            from,
            to,
            captured: displaced.as_ref().map(|p| p.kind),
        });
        self.set(to, piece);
        Some(displaced)
    }

    /// Moves a piece to an empty square without touching move history
    ///
    /// Used by abilities and reactive effects. Does nothing and returns
    /// `false` when `from` is empty or `to` is occupied.
    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        if from == to || !to.is_on_board() || !self.is_empty(to) {
            return false;
        }
        match self.remove(from) {
            Some(piece) => {
                self.set(to, piece);
                true
            }
            None => false,
        }
    }

    /// Exchanges the contents of two cells
    pub fn swap(&mut self, a: Square, b: Square) {
        if !a.is_on_board() || !b.is_on_board() {
            return;
        }
        let first = self.remove(a);
        let second = self.remove(b);
        if let Some(piece) = first {
            self.set(b, piece);
        }
        if let Some(piece) = second {
            self.set(a, piece);
        }
    }

    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    /// Forgets the last regular move
    ///
    /// Called when a turn passes without one, so en passant only answers
    /// the double step of the ply just played.
    pub fn clear_last_move(&mut self) {
        self.last_move = None;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn has_enemy(&self, square: Square, color: Color) -> bool {
        self.get(square).is_some_and(|p| p.color != color)
    }

    pub fn has_ally(&self, square: Square, color: Color) -> bool {
        self.get(square).is_some_and(|p| p.color == color)
    }

    /// Every piece in row-major order
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().flatten()
    }

    /// Pieces of one colour in row-major order
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.all_pieces().filter(move |p| p.color == color)
    }

    /// Mutable access to every piece of a colour
    pub fn pieces_of_mut(&mut self, color: Color) -> impl Iterator<Item = &mut Piece> {
        self.cells
            .iter_mut()
            .flatten()
            .flatten()
            .filter(move |p| p.color == color)
    }

    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.all_pieces().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.cells.iter_mut().flatten().flatten().find(|p| p.id == id)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceType::King)
            .map(|p| p.square)
    }

    /// White owns rows 4-7, Black rows 0-3
    pub fn in_own_half(row: u8, color: Color) -> bool {
        match color {
            Color::White => row >= 4,
            Color::Black => row <= 3,
        }
    }

    pub fn in_enemy_half(row: u8, color: Color) -> bool {
        !Self::in_own_half(row, color)
    }

    /// Same line as [`Board::in_enemy_half`], named for pawn rules
    pub fn crossed_midline(row: u8, color: Color) -> bool {
        Self::in_enemy_half(row, color)
    }

    /// The up-to-eight squares around `square`
    pub fn adjacent(square: Square) -> impl Iterator<Item = Square> {
        ADJACENT_DIRS
            .into_iter()
            .filter_map(move |(dr, dc)| square.offset(dr, dc))
    }

    /// Occupied squares around `square`
    pub fn adjacent_pieces(&self, square: Square) -> impl Iterator<Item = &Piece> {
        Self::adjacent(square).filter_map(|sq| self.get(sq))
    }

    pub fn has_adjacent_ally_pawn(&self, square: Square, color: Color) -> bool {
        self.adjacent_pieces(square)
            .any(|p| p.color == color && p.kind == PieceType::Pawn)
    }

    pub fn has_orthogonal_ally(&self, square: Square, color: Color) -> bool {
        ORTHOGONAL_DIRS
            .into_iter()
            .filter_map(|(dr, dc)| square.offset(dr, dc))
            .any(|sq| self.has_ally(sq, color))
    }

    /// Queen, rook or bishop of `color` next to `square`
    pub fn has_adjacent_major_ally(&self, square: Square, color: Color) -> bool {
        self.adjacent_pieces(square).any(|p| {
            p.color == color
                && matches!(p.kind, PieceType::Queen | PieceType::Rook | PieceType::Bishop)
        })
    }

    pub fn pawns_in_row(&self, row: u8, color: Color) -> usize {
        self.cells
            .get(row as usize)
            .into_iter()
            .flatten()
            .flatten()
            .filter(|p| p.color == color && p.kind == PieceType::Pawn)
            .count()
    }

    /// Empty squares on `color`'s own back rank
    pub fn empty_back_rank(&self, color: Color) -> Vec<Square> {
        self.empty_in_row(color.back_rank())
    }

    /// Empty squares on the opponent's back rank
    pub fn empty_enemy_back_rank(&self, color: Color) -> Vec<Square> {
        self.empty_in_row(color.opposite().back_rank())
    }

    fn empty_in_row(&self, row: u8) -> Vec<Square> {
        (0..8u8)
            .map(|col| Square { row, col })
            .filter(|sq| self.is_empty(*sq))
            .collect()
    }

    /// Flat list of occupied cells in row-major order
    pub fn serialize(&self) -> Vec<BoardEntry> {
        self.all_pieces()
            .map(|p| BoardEntry {
                row: p.square.row,
                col: p.square.col,
                kind: p.kind,
                color: p.color,
                nation: p.nation,
                has_moved: p.has_moved,
            })
            .collect()
    }

    /// Text diagram, rank 8 at the top
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..8u8 {
            out.push((b'8' - row) as char);
            out.push(' ');
            for col in 0..8u8 {
                let square = Square { row, col };
                out.push(self.get(square).map_or('.', |p| p.symbol()));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_standard_layout() {
        let (board, next_id) = Board::standard(Nation::France, Nation::Japan);
        assert_eq!(board.all_pieces().count(), 32);
        assert_eq!(next_id, 33);
        assert_eq!(board.king_square(Color::White), Some(sq(7, 4)));
        assert_eq!(board.king_square(Color::Black), Some(sq(0, 4)));
        assert_eq!(board.get(sq(6, 0)).unwrap().kind, PieceType::Pawn);
        assert_eq!(board.get(sq(0, 3)).unwrap().kind, PieceType::Queen);
        assert_eq!(board.get(sq(7, 0)).unwrap().nation, Nation::France);
        assert_eq!(board.get(sq(0, 0)).unwrap().nation, Nation::Japan);
    }

    #[test]
    fn test_position_stays_in_sync() {
        let (mut board, _) = Board::standard(Nation::Spain, Nation::Rus);
        board.move_piece(sq(6, 4), sq(4, 4));
        let pawn = board.get(sq(4, 4)).unwrap();
        assert_eq!(pawn.square, sq(4, 4));
        assert!(pawn.has_moved);
        assert!(board.is_empty(sq(6, 4)));

        let last = board.last_move().unwrap();
        assert_eq!((last.from, last.to), (sq(6, 4), sq(4, 4)));
    }

    #[test]
    fn test_relocate_does_not_touch_last_move() {
        let (mut board, _) = Board::standard(Nation::Spain, Nation::Rus);
        board.move_piece(sq(6, 4), sq(4, 4));
        let before = *board.last_move().unwrap();
        assert!(board.relocate(sq(1, 0), sq(3, 0)));
        assert_eq!(*board.last_move().unwrap(), before);
        assert!(!board.get(sq(3, 0)).unwrap().has_moved);
        assert!(!board.relocate(sq(3, 0), sq(4, 4)), "occupied target");
    }

    #[test]
    fn test_off_board_squares_read_empty_and_ignore_writes() {
        let (mut board, _) = Board::standard(Nation::Spain, Nation::Rus);
        let before = board.clone();
        let outside = Square { row: 8, col: 0 };

        assert!(board.get(outside).is_none());
        assert!(board.get_mut(Square { row: 0, col: 8 }).is_none());
        assert!(board.remove(outside).is_none());
        assert!(board.move_piece(sq(6, 4), outside).is_none());
        assert!(!board.relocate(sq(6, 4), outside));
        board.swap(sq(6, 4), outside);
        assert_eq!(board, before);

        let pawn = board.get(sq(6, 0)).unwrap().clone();
        let handed_back = board.set(outside, pawn).unwrap();
        assert_eq!(handed_back.kind, PieceType::Pawn);
        assert_eq!(board.all_pieces().count(), 32);
    }

    #[test]
    fn test_move_from_empty_square() {
        let mut board = Board::new();
        assert!(board.move_piece(sq(3, 3), sq(4, 4)).is_none());
        assert!(board.last_move().is_none());
    }

    #[test]
    fn test_halves_and_midline() {
        assert!(Board::in_own_half(5, Color::White));
        assert!(Board::in_enemy_half(3, Color::White));
        assert!(Board::crossed_midline(4, Color::Black));
        assert!(!Board::crossed_midline(3, Color::Black));
    }

    #[test]
    fn test_neighbourhood_queries() {
        let mut board = Board::new();
        let place = |board: &mut Board, kind, color, row, col| {
            let square = sq(row, col);
            board.set(square, Piece::new(PieceId(row as u32 * 8 + col as u32), kind, color, Nation::Poland, square));
        };
        place(&mut board, PieceType::Rook, Color::White, 4, 4);
        place(&mut board, PieceType::Queen, Color::White, 3, 3);
        place(&mut board, PieceType::Pawn, Color::White, 4, 5);
        place(&mut board, PieceType::Pawn, Color::White, 4, 0);
        place(&mut board, PieceType::Pawn, Color::Black, 4, 1);

        assert!(board.has_adjacent_major_ally(sq(4, 4), Color::White));
        assert!(board.has_orthogonal_ally(sq(4, 4), Color::White));
        assert!(board.has_adjacent_ally_pawn(sq(4, 4), Color::White));
        assert!(!board.has_adjacent_major_ally(sq(4, 4), Color::Black));
        assert_eq!(board.pawns_in_row(4, Color::White), 2);
        assert_eq!(Board::adjacent(sq(0, 0)).count(), 3);
        assert_eq!(board.empty_back_rank(Color::White).len(), 8);
    }

    #[test]
    fn test_clone_is_deep() {
        let (board, _) = Board::standard(Nation::China, Nation::Mongol);
        let mut copy = board.clone();
        copy.remove(sq(0, 0));
        copy.get_mut(sq(7, 4)).unwrap().status.paralyzed = true;
        assert!(board.get(sq(0, 0)).is_some());
        assert!(!board.get(sq(7, 4)).unwrap().status.paralyzed);
        assert_ne!(board.serialize(), copy.serialize());
    }
}
