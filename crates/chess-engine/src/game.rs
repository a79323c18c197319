//! Turn-by-turn game management.
//!
//! The [`Game`] struct owns a board and the side to move. It is the single
//! place a game is mutated: moves are checked against the legal moves of the
//! piece, committed, and the turn passes to the other side.

use chess_core::{Color, GameProperties, Location, Move, MoveList};
use thiserror::Error;
use tracing::debug;

use crate::{BoardState, CommitError};

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// No piece stands on the square the move starts from.
    #[error("no piece on {0}")]
    EmptySquare(Location),
    /// The piece belongs to the side not on move.
    #[error("piece on {location} belongs to {found}, but {to_move} is to move")]
    WrongSide {
        location: Location,
        to_move: Color,
        found: Color,
    },
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// There is no move to take back.
    #[error("no move to undo")]
    NothingToUndo,
    /// Replaying the history failed.
    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// The side to move is in check and has no legal move.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current board.
    board: BoardState,
    /// Board before the first move, used to replay on undo.
    initial: BoardState,
    /// Side on move in the initial board.
    first_to_move: Color,
    side_to_move: Color,
    game_over: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::with_properties(GameProperties::default())
    }

    /// Creates a new standard game with the given properties.
    pub fn with_properties(properties: GameProperties) -> Self {
        Self::from_board(BoardState::standard(properties), Color::White)
    }

    /// Creates a game from an arbitrary board with `side_to_move` to play.
    pub fn from_board(board: BoardState, side_to_move: Color) -> Self {
        let game_over = board.is_game_over(side_to_move);
        Game {
            initial: board.clone(),
            board,
            first_to_move: side_to_move,
            side_to_move,
            game_over,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns every move played so far.
    pub fn history(&self) -> &[Move] {
        self.board.history().as_slice()
    }

    /// Returns the legal moves of the piece on `location`, whoever owns it.
    pub fn legal_moves(&self, location: Location) -> Option<MoveList> {
        self.board.valid_moves(location)
    }

    /// Returns all legal moves of the side to move.
    pub fn all_legal_moves(&self) -> MoveList {
        self.board.all_valid_moves(self.side_to_move)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.check(self.side_to_move)
    }

    /// Returns true if the side to move has no legal move.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns how the game ended, or `None` while it is still going.
    pub fn result(&self) -> Option<GameResult> {
        if !self.game_over {
            return None;
        }
        Some(if self.is_check() {
            GameResult::Checkmate {
                winner: self.side_to_move.opposite(),
            }
        } else {
            GameResult::Stalemate
        })
    }

    /// Plays a move for the side to move.
    ///
    /// A promotion matches the legal promotion to the same square whatever
    /// piece it names; the piece given in `m` is the one created.
    pub fn play(&mut self, m: Move) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        let from = m.from();
        let piece = self.board.piece(from).ok_or(GameError::EmptySquare(from))?;
        if piece.color() != self.side_to_move {
            return Err(GameError::WrongSide {
                location: from,
                to_move: self.side_to_move,
                found: piece.color(),
            });
        }

        let legal = self.board.valid_moves(from).unwrap_or_default();
        if !legal.iter().any(|lm| lm.same_squares(m)) {
            return Err(GameError::IllegalMove(m));
        }

        self.board.try_commit(m)?;
        debug!(side = %self.side_to_move, mv = %m, "move committed");

        self.side_to_move = self.side_to_move.opposite();
        self.game_over = self.board.is_game_over(self.side_to_move);
        if self.game_over {
            debug!(side = %self.side_to_move, "no legal moves left");
        }
        Ok(())
    }

    /// Takes back the last move and returns it.
    ///
    /// The board is rebuilt by replaying every earlier move from the initial
    /// board, so piece histories are restored exactly.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let mut history = self.board.history().clone();
        let last = history.pop_last().ok_or(GameError::NothingToUndo)?;

        let mut board = self.initial.clone();
        for m in &history {
            board.try_commit(*m)?;
        }

        self.side_to_move = if history.len() % 2 == 0 {
            self.first_to_move
        } else {
            self.first_to_move.opposite()
        };
        self.board = board;
        self.game_over = self.board.is_game_over(self.side_to_move);
        debug!(mv = %last, "move taken back");
        Ok(last)
    }
}
