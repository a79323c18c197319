//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! callers:
//! - [`Color`], [`PieceKind`] and [`PromotionPiece`] for pieces
//! - [`Location`] and [`Offset`] for board coordinates
//! - [`Move`], [`MoveList`] and [`MoveHistory`] for moves
//! - [`GameProperties`] for per-game settings
//! - [`Placement`] for describing positions as text

mod color;
mod history;
mod location;
mod mov;
mod piece;
mod placement;
mod properties;

pub use color::{Color, ParseColorError};
pub use history::{MoveHistory, MoveList};
pub use location::{Location, Offset, Ray};
pub use mov::Move;
pub use piece::{PieceKind, PromotionPiece};
pub use placement::{Placement, PlacementError};
pub use properties::{ConfigError, Direction, GameProperties, Rgb, Shade};
