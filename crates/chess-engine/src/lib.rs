//! Chess rules engine.
//!
//! This crate provides:
//! - [`BoardState`] - piece placement, king index and move history
//! - [`Piece`] - a piece with its own move history
//! - Move generation where every candidate is proven legal by committing it
//!   on a clone of the board and testing the mover's king
//! - Move commit with [`CommitError`] for moves that do not fit the board
//! - [`Game`] - turn management, game-over detection and take-back
//! - [`perft`](movegen::perft) for validating the generator
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, GameProperties, Location, Move};
//! use chess_engine::{BoardState, Game};
//!
//! let board = BoardState::standard(GameProperties::default());
//! let moves = board.all_valid_moves(Color::White);
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! let e2 = Location::from_algebraic("e2").unwrap();
//! let e4 = Location::from_algebraic("e4").unwrap();
//! let mut game = Game::new();
//! game.play(Move::regular(e2, e4)).unwrap();
//! println!("{}", game.board());
//! ```

mod board;
mod commit;
mod game;
pub mod movegen;
mod piece;

pub use board::BoardState;
pub use commit::CommitError;
pub use game::{Game, GameError, GameResult};
pub use movegen::perft::{perft, perft_divide};
pub use piece::Piece;
