//! Scenario suite for move generation
//!
//! Tests base piece rules, every entry of the modifier registry, king safety
//! and the check / checkmate / stalemate queries on hand-built positions.
//!
//! # Test Organization
//!
//! - `test_pawn_*` - base pawn rules and en passant
//! - `test_castling_*` - standard and any-rook castling
//! - `test_modifier_*` - nation extensions and restrictions
//! - `test_status_*` - paralysis, burning, immunity filters
//! - `test_check_*` / `test_mate_*` - king safety and game-end queries

use super::*;
use crate::data::AbilityId;
use crate::piece::Piece;
use crate::types::{Color, Nation, PieceId, PieceType};
use std::collections::BTreeSet;

/// Builder for hand-made positions
///
/// Pieces get ids in insertion order. Kings are not added automatically.
struct Setup {
    board: Board,
    next_id: u32,
}

impl Setup {
    fn new() -> Self {
        Setup {
            board: Board::new(),
            next_id: 1,
        }
    }

    fn put(mut self, kind: PieceType, color: Color, nation: Nation, at: (u8, u8)) -> Self {
        let square = sq(at.0, at.1);
        let piece = Piece::new(PieceId(self.next_id), kind, color, nation, square);
        self.next_id += 1;
        self.board.set(square, piece);
        self
    }

    /// White king on h1 and Black king on a8, out of the way
    fn with_corner_kings(self) -> Self {
        self.put(PieceType::King, Color::White, Nation::France, (7, 7))
            .put(PieceType::King, Color::Black, Nation::France, (0, 0))
    }

    fn moved(mut self, at: (u8, u8)) -> Self {
        if let Some(piece) = self.board.get_mut(sq(at.0, at.1)) {
            piece.has_moved = true;
        }
        self
    }

    fn build(self) -> Board {
        self.board
    }
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

fn destinations(board: &Board, at: (u8, u8)) -> BTreeSet<(u8, u8)> {
    MoveValidator::new(board)
        .legal_moves(sq(at.0, at.1))
        .iter()
        .map(|mv| (mv.to.row, mv.to.col))
        .collect()
}

fn find_move(board: &Board, from: (u8, u8), to: (u8, u8)) -> Option<Move> {
    MoveValidator::new(board)
        .legal_moves(sq(from.0, from.1))
        .into_iter()
        .find(|mv| mv.to == sq(to.0, to.1))
}

// ============================================================================
// Pawn Tests
// ============================================================================

#[test]
fn test_pawn_unmoved_single_and_double_step() {
    //! An unmoved white pawn on e2 with nothing in front has exactly the
    //! one- and two-square advances.
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::France, (6, 4))
        .build();

    let expected: BTreeSet<_> = [(5, 4), (4, 4)].into_iter().collect();
    assert_eq!(destinations(&board, (6, 4)), expected);
}

#[test]
fn test_pawn_blocked_and_diagonal_capture() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::France, (6, 4))
        .put(PieceType::Knight, Color::Black, Nation::France, (5, 4))
        .put(PieceType::Knight, Color::Black, Nation::France, (5, 5))
        .build();

    let expected: BTreeSet<_> = [(5, 5)].into_iter().collect();
    assert_eq!(destinations(&board, (6, 4)), expected);
    assert_eq!(find_move(&board, (6, 4), (5, 5)).unwrap().kind, MoveKind::Capture);
}

#[test]
fn test_pawn_en_passant_only_right_after_advance() {
    //! En passant exists on the ply right after the two-square advance and
    //! disappears once another move has been made.
    let mut board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::France, (3, 4))
        .moved((3, 4))
        .put(PieceType::Pawn, Color::Black, Nation::France, (1, 3))
        .build();

    board.move_piece(sq(1, 3), sq(3, 3));
    let ep = find_move(&board, (3, 4), (2, 3)).expect("en passant should be available");
    assert_eq!(ep.kind, MoveKind::EnPassant { captured: sq(3, 3) });

    board.move_piece(sq(7, 7), sq(7, 6));
    board.move_piece(sq(0, 0), sq(0, 1));
    assert!(find_move(&board, (3, 4), (2, 3)).is_none());
}

#[test]
fn test_pawn_en_passant_closes_when_turn_passes_without_a_move() {
    //! A turn spent on an ability or an absorbed capture still uses up the
    //! one-ply window.
    let mut board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::Black, Nation::Mongol, (4, 3))
        .moved((4, 3))
        .put(PieceType::Pawn, Color::White, Nation::Mongol, (6, 4))
        .build();

    board.move_piece(sq(6, 4), sq(4, 4));
    assert!(find_move(&board, (4, 3), (5, 4)).is_some());

    board.clear_last_move();
    assert!(find_move(&board, (4, 3), (5, 4)).is_none());
    assert!(board.last_move().is_none());
}

#[test]
fn test_pawn_en_passant_wrong_rank() {
    let mut board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::France, (4, 4))
        .moved((4, 4))
        .put(PieceType::Pawn, Color::Black, Nation::France, (2, 3))
        .moved((2, 3))
        .build();

    board.move_piece(sq(2, 3), sq(4, 3));
    assert!(find_move(&board, (4, 4), (3, 3)).is_none());
}

// ============================================================================
// Castling Tests
// ============================================================================

#[test]
fn test_castling_both_sides() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 4))
        .put(PieceType::Rook, Color::White, Nation::France, (7, 7))
        .put(PieceType::Rook, Color::White, Nation::France, (7, 0))
        .put(PieceType::King, Color::Black, Nation::France, (0, 4))
        .build();

    let short = find_move(&board, (7, 4), (7, 6)).expect("short castling");
    assert_eq!(
        short.kind,
        MoveKind::Castle {
            rook_from: sq(7, 7),
            rook_to: sq(7, 5)
        }
    );
    let long = find_move(&board, (7, 4), (7, 2)).expect("long castling");
    assert_eq!(
        long.kind,
        MoveKind::Castle {
            rook_from: sq(7, 0),
            rook_to: sq(7, 3)
        }
    );
}

#[test]
fn test_castling_blocked_by_attacked_transit() {
    //! A black rook on the f-file covers f1, so short castling is illegal
    //! while long castling is unaffected.
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 4))
        .put(PieceType::Rook, Color::White, Nation::France, (7, 7))
        .put(PieceType::Rook, Color::White, Nation::France, (7, 0))
        .put(PieceType::Rook, Color::Black, Nation::France, (2, 5))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();

    assert!(find_move(&board, (7, 4), (7, 6)).is_none());
    assert!(find_move(&board, (7, 4), (7, 2)).is_some());
}

#[test]
fn test_castling_not_out_of_check() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 4))
        .put(PieceType::Rook, Color::White, Nation::France, (7, 7))
        .put(PieceType::Rook, Color::Black, Nation::France, (2, 4))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();

    assert!(find_move(&board, (7, 4), (7, 6)).is_none());
}

#[test]
fn test_castling_any_rook_for_england() {
    //! An English king may castle with an unmoved rook that is not on a
    //! corner, keeping the same landing pattern.
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::England, (7, 4))
        .put(PieceType::Rook, Color::White, Nation::England, (7, 1))
        .put(PieceType::King, Color::Black, Nation::France, (0, 7))
        .build();

    let mv = find_move(&board, (7, 4), (7, 2)).expect("castle with the b-file rook");
    assert_eq!(mv.ability, Some(AbilityId::EnglandKingCastlePlus));
    assert_eq!(
        mv.kind,
        MoveKind::Castle {
            rook_from: sq(7, 1),
            rook_to: sq(7, 3)
        }
    );

    let mut exhausted = board.clone();
    exhausted
        .get_mut(sq(7, 4))
        .unwrap()
        .use_ability(AbilityId::EnglandKingCastlePlus);
    assert!(find_move(&exhausted, (7, 4), (7, 2)).is_none());
}

// ============================================================================
// Modifier Tests
// ============================================================================

#[test]
fn test_modifier_england_longbow() {
    //! English pawn on d2 with an enemy on d4: the ranged capture and the
    //! single step, never a double step.
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::England, (6, 3))
        .put(PieceType::Pawn, Color::Black, Nation::France, (4, 3))
        .build();

    let expected: BTreeSet<_> = [(5, 3), (4, 3)].into_iter().collect();
    assert_eq!(destinations(&board, (6, 3)), expected);
    let shot = find_move(&board, (6, 3), (4, 3)).unwrap();
    assert_eq!(shot.kind, MoveKind::Capture);
    assert_eq!(shot.ability, Some(AbilityId::EnglandPawnLongbow));

    let empty_front = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::England, (6, 3))
        .build();
    assert!(!destinations(&empty_front, (6, 3)).contains(&(4, 3)));
}

#[test]
fn test_modifier_england_longbow_edge_files() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::England, (6, 1))
        .put(PieceType::Pawn, Color::Black, Nation::France, (4, 1))
        .build();

    assert!(!destinations(&board, (6, 1)).contains(&(4, 1)));
}

#[test]
fn test_modifier_france_bishop_blessing() {
    //! The bishop passes its own pawn and keeps sliding until the next
    //! piece, which it may capture. Squares past that are unreachable.
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Bishop, Color::White, Nation::France, (6, 1))
        .put(PieceType::Pawn, Color::White, Nation::France, (4, 3))
        .put(PieceType::Pawn, Color::Black, Nation::France, (2, 5))
        .build();

    let blessed = |to| find_move(&board, (6, 1), to).and_then(|mv| mv.ability);
    assert_eq!(find_move(&board, (6, 1), (5, 2)).unwrap().ability, None);
    assert_eq!(blessed((3, 4)), Some(AbilityId::FranceBishopBlessing));
    assert_eq!(blessed((2, 5)), Some(AbilityId::FranceBishopBlessing));
    assert_eq!(find_move(&board, (6, 1), (2, 5)).unwrap().kind, MoveKind::Capture);
    assert!(find_move(&board, (6, 1), (1, 6)).is_none());
    assert!(find_move(&board, (6, 1), (4, 3)).is_none());
}

#[test]
fn test_modifier_france_blessing_stops_at_second_ally() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Bishop, Color::White, Nation::France, (6, 1))
        .put(PieceType::Pawn, Color::White, Nation::France, (5, 2))
        .put(PieceType::Pawn, Color::White, Nation::France, (3, 4))
        .build();

    let dests = destinations(&board, (6, 1));
    assert!(dests.contains(&(4, 3)));
    assert!(!dests.contains(&(3, 4)));
    assert!(!dests.contains(&(2, 5)));
}

#[test]
fn test_modifier_england_rook_range_and_diagonal() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::England, (7, 7))
        .put(PieceType::King, Color::Black, Nation::France, (0, 7))
        .put(PieceType::Rook, Color::White, Nation::England, (7, 0))
        .build();

    let dests = destinations(&board, (7, 0));
    assert!(dests.contains(&(2, 0)), "five squares up");
    assert!(!dests.contains(&(1, 0)), "six squares is out of range");
    assert!(dests.contains(&(6, 1)), "diagonal step");
}

#[test]
fn test_modifier_queen_does_not_inherit() {
    //! England limits its rooks to five squares, but the English queen
    //! slides the full board; Spain's queen is limited to five.
    let english = Setup::new()
        .put(PieceType::King, Color::White, Nation::England, (7, 7))
        .put(PieceType::King, Color::Black, Nation::France, (0, 7))
        .put(PieceType::Queen, Color::White, Nation::England, (7, 0))
        .build();
    assert!(destinations(&english, (7, 0)).contains(&(0, 0)));

    let spanish = Setup::new()
        .put(PieceType::King, Color::White, Nation::Spain, (7, 7))
        .put(PieceType::King, Color::Black, Nation::France, (0, 7))
        .put(PieceType::Queen, Color::White, Nation::Spain, (7, 0))
        .build();
    let dests = destinations(&spanish, (7, 0));
    assert!(dests.contains(&(2, 0)));
    assert!(!dests.contains(&(1, 0)));
    assert!(!dests.contains(&(1, 6)));
}

#[test]
fn test_modifier_cannon_capture_until_used() {
    //! The Chinese rook jumps exactly one screen to take an enemy, once.
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Rook, Color::White, Nation::China, (7, 1))
        .put(PieceType::Pawn, Color::White, Nation::China, (5, 1))
        .put(PieceType::Knight, Color::Black, Nation::France, (2, 1))
        .build();

    let cannon = find_move(&board, (7, 1), (2, 1)).expect("cannon capture");
    assert_eq!(cannon.kind, MoveKind::CannonCapture);
    assert_eq!(cannon.ability, Some(AbilityId::ChinaRookCannon));

    let mut used = board.clone();
    used.get_mut(sq(7, 1))
        .unwrap()
        .use_ability(AbilityId::ChinaRookCannon);
    assert!(find_move(&used, (7, 1), (2, 1)).is_none());
}

#[test]
fn test_modifier_teppo_and_musket() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::Japan, (6, 3))
        .put(PieceType::Pawn, Color::White, Nation::Ottoman, (6, 4))
        .put(PieceType::Rook, Color::Black, Nation::France, (4, 4))
        .build();

    let teppo = find_move(&board, (6, 3), (3, 3)).expect("three-square advance");
    assert_eq!(teppo.ability, Some(AbilityId::JapanPawnTeppo));

    let musket = find_move(&board, (6, 4), (4, 4)).expect("musket shot");
    assert_eq!(musket.kind, MoveKind::Capture);
    assert_eq!(musket.ability, Some(AbilityId::OttomanPawnMusket));
}

#[test]
fn test_modifier_sideways_and_backward_pawns() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::China, (3, 2))
        .moved((3, 2))
        .put(PieceType::Pawn, Color::White, Nation::China, (5, 5))
        .moved((5, 5))
        .put(PieceType::Pawn, Color::White, Nation::Mongol, (4, 0))
        .moved((4, 0))
        .put(PieceType::Pawn, Color::Black, Nation::Poland, (2, 6))
        .moved((2, 6))
        .build();

    let china_crossed = destinations(&board, (3, 2));
    assert!(china_crossed.contains(&(3, 1)) && china_crossed.contains(&(3, 3)));
    let china_home = destinations(&board, (5, 5));
    assert!(!china_home.contains(&(5, 4)));

    let mongol = find_move(&board, (4, 0), (5, 0)).expect("nomad retreat");
    assert_eq!(mongol.ability, Some(AbilityId::MongolPawnNomad));

    let cossack = find_move(&board, (2, 6), (2, 7)).expect("cossack sidestep");
    assert_eq!(cossack.ability, Some(AbilityId::PolandPawnCossack));
}

#[test]
fn test_modifier_tercio_double_step_after_moving() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Pawn, Color::White, Nation::Spain, (5, 1))
        .moved((5, 1))
        .put(PieceType::Pawn, Color::White, Nation::Spain, (5, 2))
        .moved((5, 2))
        .put(PieceType::Pawn, Color::White, Nation::Spain, (5, 3))
        .moved((5, 3))
        .put(PieceType::Pawn, Color::White, Nation::Spain, (4, 6))
        .moved((4, 6))
        .build();

    let tercio = find_move(&board, (5, 2), (3, 2)).expect("tercio advance");
    assert_eq!(tercio.ability, Some(AbilityId::SpainPawnTercio));
    assert!(find_move(&board, (4, 6), (2, 6)).is_none(), "lone pawn");
}

#[test]
fn test_modifier_knight_extensions() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Knight, Color::White, Nation::France, (4, 4))
        .put(PieceType::Knight, Color::White, Nation::HolyRoman, (2, 2))
        .put(PieceType::Knight, Color::White, Nation::Poland, (5, 0))
        .put(PieceType::Knight, Color::White, Nation::Rus, (7, 6))
        .build();

    let france = find_move(&board, (4, 4), (2, 4)).expect("heavy charge");
    assert_eq!(france.ability, Some(AbilityId::FranceKnightCharge));

    let crusade = find_move(&board, (2, 2), (2, 3)).expect("crusade step");
    assert_eq!(crusade.ability, Some(AbilityId::HolyRomanKnightCrusade));

    let hussar = find_move(&board, (5, 0), (3, 0)).expect("hussar charge");
    assert_eq!(hussar.ability, Some(AbilityId::PolandKnightHussar));

    let raid = find_move(&board, (7, 6), (4, 6)).expect("raid");
    assert_eq!(raid.ability, Some(AbilityId::RusKnightRaid));
}

#[test]
fn test_modifier_bishop_and_rook_extensions() {
    let board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Bishop, Color::White, Nation::China, (5, 5))
        .put(PieceType::Bishop, Color::White, Nation::Spain, (3, 3))
        .put(PieceType::Pawn, Color::Black, Nation::France, (2, 3))
        .put(PieceType::Rook, Color::White, Nation::Rus, (6, 2))
        .build();

    let advisor = find_move(&board, (5, 5), (4, 5)).expect("advisor step");
    assert_eq!(advisor.ability, Some(AbilityId::ChinaBishopAdvisor));

    let heresy = find_move(&board, (3, 3), (2, 3)).expect("heresy strike");
    assert_eq!(heresy.ability, Some(AbilityId::SpainBishopHeresy));

    let fortress = find_move(&board, (6, 2), (4, 0)).expect("fortress diagonal");
    assert_eq!(fortress.ability, Some(AbilityId::RusRookFortress));
    assert!(find_move(&board, (6, 2), (3, 5)).is_none(), "only two squares");
}

// ============================================================================
// Status Tests
// ============================================================================

#[test]
fn test_status_immobile_piece_neither_moves_nor_attacks() {
    //! A paralyzed rook staring down the e-file produces no moves and gives
    //! no check.
    let mut board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 4))
        .put(PieceType::Rook, Color::Black, Nation::France, (2, 4))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();
    assert!(MoveValidator::new(&board).is_in_check(Color::White));

    board.get_mut(sq(2, 4)).unwrap().status.paralyzed = true;
    let validator = MoveValidator::new(&board);
    assert!(!validator.is_in_check(Color::White));
    assert!(validator.legal_moves(sq(2, 4)).is_empty());

    let mut burning = board.clone();
    {
        let rook = burning.get_mut(sq(2, 4)).unwrap();
        rook.status.paralyzed = false;
        rook.status.burning = true;
    }
    assert!(MoveValidator::new(&burning).legal_moves(sq(2, 4)).is_empty());
}

#[test]
fn test_status_immune_target_not_capturable() {
    let mut board = Setup::new()
        .with_corner_kings()
        .put(PieceType::Rook, Color::White, Nation::France, (4, 0))
        .put(PieceType::Knight, Color::Black, Nation::France, (4, 5))
        .build();
    assert!(find_move(&board, (4, 0), (4, 5)).is_some());

    board.get_mut(sq(4, 5)).unwrap().status.immune = true;
    assert!(find_move(&board, (4, 0), (4, 5)).is_none());
    assert!(find_move(&board, (4, 0), (4, 4)).is_some());
}

#[test]
fn test_status_kings_are_never_captured() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 7))
        .put(PieceType::Rook, Color::White, Nation::France, (0, 5))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();

    assert!(find_move(&board, (0, 5), (0, 0)).is_none());
}

// ============================================================================
// Check, Checkmate and Stalemate Tests
// ============================================================================

#[test]
fn test_check_single_interposition() {
    //! With the king checked down the e-file, the only rook move is the
    //! block on e3, and the pawn far away has nothing.
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 4))
        .put(PieceType::Rook, Color::White, Nation::France, (5, 0))
        .put(PieceType::Pawn, Color::White, Nation::France, (6, 7))
        .put(PieceType::Rook, Color::Black, Nation::France, (0, 4))
        .put(PieceType::King, Color::Black, Nation::France, (0, 7))
        .build();

    let validator = MoveValidator::new(&board);
    assert!(validator.is_in_check(Color::White));
    let expected: BTreeSet<_> = [(5, 4)].into_iter().collect();
    assert_eq!(destinations(&board, (5, 0)), expected);
    assert!(destinations(&board, (6, 7)).is_empty());
}

#[test]
fn test_check_pinned_piece_cannot_leave_line() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 4))
        .put(PieceType::Bishop, Color::White, Nation::France, (5, 4))
        .put(PieceType::Rook, Color::Black, Nation::France, (1, 4))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();

    assert!(destinations(&board, (5, 4)).is_empty());
}

#[test]
fn test_check_guarded_sultan() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::Ottoman, (7, 4))
        .put(PieceType::Pawn, Color::White, Nation::Ottoman, (7, 3))
        .put(PieceType::Rook, Color::Black, Nation::France, (2, 4))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();

    let validator = MoveValidator::new(&board);
    assert!(validator.is_square_attacked(sq(7, 4), Color::White));
    assert!(!validator.is_in_check(Color::White));
}

#[test]
fn test_mate_back_rank() {
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 6))
        .put(PieceType::Pawn, Color::White, Nation::France, (6, 5))
        .put(PieceType::Pawn, Color::White, Nation::France, (6, 6))
        .put(PieceType::Pawn, Color::White, Nation::France, (6, 7))
        .put(PieceType::Rook, Color::Black, Nation::France, (7, 0))
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .build();

    let validator = MoveValidator::new(&board);
    assert!(validator.is_checkmate(Color::White));
    assert!(validator.is_in_check(Color::White));
    assert!(!validator.has_legal_move(Color::White));
    assert!(!validator.is_stalemate(Color::White));
}

#[test]
fn test_mate_when_only_answer_is_an_immune_capture() {
    //! The knight could take the checking rook, but Byzantine rooks shrug
    //! off knights, so the position is mate.
    let board = Setup::new()
        .put(PieceType::King, Color::White, Nation::France, (7, 7))
        .put(PieceType::Knight, Color::White, Nation::France, (7, 5))
        .put(PieceType::Rook, Color::Black, Nation::Byzantine, (6, 7))
        .put(PieceType::Knight, Color::Black, Nation::Byzantine, (5, 5))
        .put(PieceType::King, Color::Black, Nation::Byzantine, (0, 0))
        .build();

    let validator = MoveValidator::new(&board);
    let knight = board.get(sq(7, 5)).unwrap();
    let capture = find_move(&board, (7, 5), (6, 7)).expect("geometrically legal");
    assert!(validator.refused_by_immunity(knight, &capture));
    assert!(validator.playable_moves(sq(7, 5)).is_empty());
    assert!(validator.all_legal_moves(Color::White).is_empty());
    assert!(validator.is_checkmate(Color::White));
    assert!(!validator.is_stalemate(Color::White));
}

#[test]
fn test_mate_stalemate_corner_king() {
    let board = Setup::new()
        .put(PieceType::King, Color::Black, Nation::France, (0, 0))
        .put(PieceType::Queen, Color::White, Nation::France, (2, 1))
        .put(PieceType::King, Color::White, Nation::France, (7, 7))
        .build();

    let validator = MoveValidator::new(&board);
    assert!(validator.is_stalemate(Color::Black));
    assert!(!validator.is_checkmate(Color::Black));
    assert!(validator.all_legal_moves(Color::Black).is_empty());
}

#[test]
fn test_probe_leaves_board_unchanged() {
    //! Generating every legal move (including castling and en passant
    //! probes) must not change the position.
    let mut board = Setup::new()
        .put(PieceType::King, Color::White, Nation::England, (7, 4))
        .put(PieceType::Rook, Color::White, Nation::England, (7, 7))
        .put(PieceType::Rook, Color::White, Nation::England, (7, 2))
        .put(PieceType::Pawn, Color::White, Nation::France, (3, 4))
        .moved((3, 4))
        .put(PieceType::Pawn, Color::Black, Nation::France, (1, 3))
        .put(PieceType::Rook, Color::Black, Nation::China, (0, 1))
        .put(PieceType::Pawn, Color::Black, Nation::China, (2, 1))
        .put(PieceType::King, Color::Black, Nation::France, (0, 6))
        .build();
    board.move_piece(sq(1, 3), sq(3, 3));

    let before = board.clone();
    let serialized = board.serialize();
    let validator = MoveValidator::new(&board);
    let white = validator.all_legal_moves(Color::White);
    let black = validator.all_legal_moves(Color::Black);
    assert!(!white.is_empty() && !black.is_empty());
    assert!(white
        .iter()
        .any(|mv| matches!(mv.kind, MoveKind::EnPassant { .. })));
    assert!(white.iter().any(|mv| matches!(mv.kind, MoveKind::Castle { .. })));
    validator.is_checkmate(Color::White);
    validator.is_stalemate(Color::Black);

    assert_eq!(board.serialize(), serialized);
    assert_eq!(board, before);
}
