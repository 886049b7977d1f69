//! Game lifecycle management
//!
//! Creating, starting, pausing and ending games, plus the turn-boundary
//! steps shared by moves and abilities.

use crate::abilities::AbilitySystem;
use crate::board::Board;
use crate::captured::CapturedPieces;
use crate::data::AbilityId;
use crate::error::{EngineError, EngineResult};
use crate::events::{EventBus, GameEvent, SubscriptionId};
use crate::history::MoveHistory;
use crate::move_gen::MoveValidator;
use crate::piece::{Piece, PieceIdAllocator};
use crate::turn::TurnState;
use crate::types::{Color, EndReason, GamePhase, Nation, PieceId, PieceType, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One accepted, state-changing operation
///
/// The action log of a game replays to the same snapshot on a freshly
/// initialised engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum GameAction {
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    },
    Ability {
        ability: AbilityId,
        piece: PieceId,
        target: Square,
    },
    Resign {
        color: Color,
    },
}

/// The rules engine for one game
///
/// Owns the board and every piece on it. Operations either succeed
/// completely or return an [`EngineError`] and leave the game untouched.
#[derive(Debug)]
pub struct GameEngine {
    pub(super) board: Board,
    pub(super) white_nation: Option<Nation>,
    pub(super) black_nation: Option<Nation>,
    pub(super) turn: TurnState,
    pub(super) phase: GamePhase,
    pub(super) winner: Option<Color>,
    pub(super) end_reason: Option<EndReason>,
    pub(super) captured: CapturedPieces,
    pub(super) history: MoveHistory,
    pub(super) abilities: AbilitySystem,
    pub(super) ids: PieceIdAllocator,
    pub(super) actions: Vec<GameAction>,
    pub(super) events: EventBus,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Creates an engine in the setup phase with an empty board
    pub fn new() -> Self {
        GameEngine {
            board: Board::new(),
            white_nation: None,
            black_nation: None,
            turn: TurnState::default(),
            phase: GamePhase::Setup,
            winner: None,
            end_reason: None,
            captured: CapturedPieces::default(),
            history: MoveHistory::default(),
            abilities: AbilitySystem::new(),
            ids: PieceIdAllocator::starting_at(1),
            actions: Vec::new(),
            events: EventBus::default(),
        }
    }

    /// Assigns a nation to a side; takes effect at the next [`GameEngine::init_game`]
    pub fn set_player_nation(&mut self, color: Color, nation: Nation) {
        match color {
            Color::White => self.white_nation = Some(nation),
            Color::Black => self.black_nation = Some(nation),
        }
        debug!("[ENGINE] {} plays {}", color, nation);
    }

    pub fn nation(&self, color: Color) -> Option<Nation> {
        match color {
            Color::White => self.white_nation,
            Color::Black => self.black_nation,
        }
    }

    fn nations(&self) -> EngineResult<(Nation, Nation)> {
        let white = self
            .white_nation
            .ok_or(EngineError::MissingNation { color: Color::White })?;
        let black = self
            .black_nation
            .ok_or(EngineError::MissingNation { color: Color::Black })?;
        Ok((white, black))
    }

    /// Sets up the standard starting position and starts play
    ///
    /// Resets every piece of game state. Delivers `GameStart`.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingNation`] when a side has no nation.
    pub fn init_game(&mut self) -> EngineResult<()> {
        let (white, black) = self.nations()?;
        let (board, next_id) = Board::standard(white, black);
        self.start(board, PieceIdAllocator::starting_at(next_id), Color::White);
        info!("[ENGINE] New game: {} (white) vs {} (black)", white, black);
        self.events.emit(GameEvent::GameStart { white, black });
        self.events.flush();
        Ok(())
    }

    /// Starts a game from an arbitrary position
    ///
    /// Pieces are numbered from 1 in the order given. Pawns away from their
    /// starting rank count as moved.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSetup`] unless each side has exactly one king,
    /// every square is on the board and no two pieces share a square.
    pub fn from_position(
        white: Nation,
        black: Nation,
        pieces: &[(Square, PieceType, Color)],
        to_move: Color,
    ) -> EngineResult<Self> {
        for color in Color::BOTH {
            let kings = pieces
                .iter()
                .filter(|(_, kind, c)| *kind == PieceType::King && *c == color)
                .count();
            if kings != 1 {
                return Err(EngineError::InvalidSetup {
                    message: format!("{} has {} kings", color, kings),
                });
            }
        }

        let mut board = Board::new();
        let mut ids = PieceIdAllocator::starting_at(1);
        for &(square, kind, color) in pieces {
            if !square.is_on_board() {
                return Err(EngineError::InvalidSetup {
                    message: format!("{} is off the board", square),
                });
            }
            if !board.is_empty(square) {
                return Err(EngineError::InvalidSetup {
                    message: format!("two pieces on {}", square),
                });
            }
            let nation = if color == Color::White { white } else { black };
            let mut piece = Piece::new(ids.allocate(), kind, color, nation, square);
            piece.has_moved = kind == PieceType::Pawn && square.row != color.pawn_rank();
            board.set(square, piece);
        }

        let mut engine = GameEngine::new();
        engine.white_nation = Some(white);
        engine.black_nation = Some(black);
        engine.start(board, ids, to_move);
        info!("[ENGINE] Game from position, {} to move", to_move);
        Ok(engine)
    }

    fn start(&mut self, board: Board, ids: PieceIdAllocator, to_move: Color) {
        self.board = board;
        self.ids = ids;
        self.turn = TurnState::starting_with(to_move);
        self.phase = GamePhase::Playing;
        self.winner = None;
        self.end_reason = None;
        self.captured.clear();
        self.history.clear();
        self.abilities = AbilitySystem::new();
        self.actions.clear();
        self.events.discard();
    }

    pub fn pause(&mut self) -> EngineResult<()> {
        self.ensure_playing()?;
        self.phase = GamePhase::Paused;
        info!("[ENGINE] Game paused");
        Ok(())
    }

    pub fn resume(&mut self) -> EngineResult<()> {
        if self.phase != GamePhase::Paused {
            return Err(EngineError::NotPlaying { phase: self.phase });
        }
        self.phase = GamePhase::Playing;
        info!("[ENGINE] Game resumed");
        Ok(())
    }

    /// `color` gives up; the opponent wins
    pub fn resign(&mut self, color: Color) -> EngineResult<()> {
        self.ensure_playing()?;
        self.abilities.cancel();
        self.actions.push(GameAction::Resign { color });
        self.finish(Some(color.opposite()), EndReason::Resignation);
        self.events.flush();
        Ok(())
    }

    /// Registers a callback for every future event
    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Re-runs an action log, stopping at the first rejected action
    pub fn replay(&mut self, actions: &[GameAction]) -> EngineResult<()> {
        for action in actions {
            match *action {
                GameAction::Move { from, to, promotion } => {
                    self.make_move(from, to, promotion)?;
                }
                GameAction::Ability {
                    ability,
                    piece,
                    target,
                } => {
                    self.activate_ability(ability, piece)?;
                    self.execute_ability(target)?;
                }
                GameAction::Resign { color } => self.resign(color)?,
            }
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.turn.current
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Every accepted action since the game started
    pub fn action_log(&self) -> &[GameAction] {
        &self.actions
    }

    pub fn move_history(&self) -> &MoveHistory {
        &self.history
    }

    pub(super) fn ensure_playing(&self) -> EngineResult<()> {
        if self.phase == GamePhase::Playing {
            Ok(())
        } else {
            Err(EngineError::NotPlaying { phase: self.phase })
        }
    }

    /// Ticks the mover's timed statuses and passes the turn
    pub(super) fn end_turn(&mut self) {
        self.tick_statuses();
        self.pass_turn();
    }

    /// Runs `on_turn_end` for every piece of the side to move
    pub(super) fn tick_statuses(&mut self) {
        let mover = self.turn.current;
        for piece in self.board.pieces_of_mut(mover) {
            piece.on_turn_end();
        }
    }

    /// Flips the side to move and announces it
    pub(super) fn pass_turn(&mut self) {
        self.turn.switch_turn();
        self.events.emit(GameEvent::TurnChange {
            current: self.turn.current,
            turn_number: self.turn.turn_number,
        });
    }

    /// Ends the game if the side to move is mated or stalemated
    pub(super) fn check_game_end(&mut self) {
        let to_move = self.turn.current;
        let validator = MoveValidator::new(&self.board);
        if validator.is_checkmate(to_move) {
            self.finish(Some(to_move.opposite()), EndReason::Checkmate);
        } else if validator.is_stalemate(to_move) {
            self.finish(None, EndReason::Stalemate);
        }
    }

    fn finish(&mut self, winner: Option<Color>, reason: EndReason) {
        self.phase = GamePhase::Ended;
        self.winner = winner;
        self.end_reason = Some(reason);
        match winner {
            Some(color) => info!("[ENGINE] Game over by {}: {} wins", reason, color),
            None => info!("[ENGINE] Game over by {}: draw", reason),
        }
        self.events.emit(GameEvent::GameEnd { winner, reason });
    }
}
