//! Move representation.
//!
//! A [`Move`] is a closed set of variants. Each variant carries every square
//! it touches, so applying it never has to infer anything from the board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Location, PromotionPiece};

/// A chess move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// A piece moves to an empty square.
    Regular { from: Location, to: Location },
    /// A piece moves onto an opposing piece and removes it.
    Capture {
        from: Location,
        to: Location,
        capture: Location,
    },
    /// A pawn captures a pawn that just passed it with a double step.
    /// `capture` is the square beside `from`, not `to`.
    EnPassant {
        from: Location,
        to: Location,
        capture: Location,
    },
    /// King and rook move together.
    Castle {
        king_from: Location,
        king_to: Location,
        rook_from: Location,
        rook_to: Location,
    },
    /// A pawn reaches the end row and becomes `piece`. Any piece on `to`
    /// is captured.
    Promotion {
        from: Location,
        to: Location,
        piece: PromotionPiece,
    },
}

impl Move {
    /// Creates a regular move.
    #[inline]
    pub const fn regular(from: Location, to: Location) -> Self {
        Move::Regular { from, to }
    }

    /// Creates a capture on the destination square.
    #[inline]
    pub const fn capture(from: Location, to: Location) -> Self {
        Move::Capture {
            from,
            to,
            capture: to,
        }
    }

    /// Creates an en passant capture.
    #[inline]
    pub const fn en_passant(from: Location, to: Location, capture: Location) -> Self {
        Move::EnPassant { from, to, capture }
    }

    /// Creates a castling move.
    #[inline]
    pub const fn castle(
        king_from: Location,
        king_to: Location,
        rook_from: Location,
        rook_to: Location,
    ) -> Self {
        Move::Castle {
            king_from,
            king_to,
            rook_from,
            rook_to,
        }
    }

    /// Creates a promotion to the default piece (queen).
    #[inline]
    pub const fn promotion(from: Location, to: Location) -> Self {
        Move::Promotion {
            from,
            to,
            piece: PromotionPiece::Queen,
        }
    }

    /// Returns the square the moving piece (the king, for castling) leaves.
    #[inline]
    pub const fn from(self) -> Location {
        match self {
            Move::Regular { from, .. }
            | Move::Capture { from, .. }
            | Move::EnPassant { from, .. }
            | Move::Promotion { from, .. } => from,
            Move::Castle { king_from, .. } => king_from,
        }
    }

    /// Returns the square the moving piece (the king, for castling) lands on.
    #[inline]
    pub const fn to(self) -> Location {
        match self {
            Move::Regular { to, .. }
            | Move::Capture { to, .. }
            | Move::EnPassant { to, .. }
            | Move::Promotion { to, .. } => to,
            Move::Castle { king_to, .. } => king_to,
        }
    }

    /// Returns the square of the piece this move always removes.
    ///
    /// Promotions only capture when `to` is occupied, so they report `None`.
    #[inline]
    pub const fn capture_location(self) -> Option<Location> {
        match self {
            Move::Capture { capture, .. } | Move::EnPassant { capture, .. } => Some(capture),
            _ => None,
        }
    }

    /// Returns every square this move reads or writes.
    pub fn touched(self) -> Vec<Location> {
        match self {
            Move::Regular { from, to } | Move::Promotion { from, to, .. } => vec![from, to],
            Move::Capture { from, to, capture } | Move::EnPassant { from, to, capture } => {
                let mut squares = vec![from, to];
                if capture != to {
                    squares.push(capture);
                }
                squares
            }
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => vec![king_from, king_to, rook_from, rook_to],
        }
    }

    /// Returns the chosen piece if this is a promotion.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PromotionPiece> {
        match self {
            Move::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// Sets the piece a promotion creates. Must be called before the move is
    /// committed. Returns false, leaving the move unchanged, if this is not
    /// a promotion.
    pub fn set_promotion_piece(&mut self, choice: PromotionPiece) -> bool {
        match self {
            Move::Promotion { piece, .. } => {
                *piece = choice;
                true
            }
            _ => false,
        }
    }

    /// Returns this move with the promotion choice replaced.
    #[must_use]
    pub fn with_promotion_piece(mut self, choice: PromotionPiece) -> Self {
        self.set_promotion_piece(choice);
        self
    }

    /// Returns true if this move and `other` are the same apart from the
    /// promotion choice.
    pub fn same_squares(self, other: Move) -> bool {
        match (self, other) {
            (
                Move::Promotion { from, to, .. },
                Move::Promotion {
                    from: other_from,
                    to: other_to,
                    ..
                },
            ) => from == other_from && to == other_to,
            _ => self == other,
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, Move::Capture { .. } | Move::EnPassant { .. })
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    /// Returns true for a regular move that advances two ranks along a file,
    /// the shape of a pawn's double step.
    pub fn is_double_advance(self) -> bool {
        match self {
            Move::Regular { from, to } => {
                from.file() == to.file() && from.rank().abs_diff(to.rank()) == 2
            }
            _ => false,
        }
    }

    /// Returns the coordinate form of this move (e.g. "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion_piece() {
            Some(piece) => format!("{}{}{}", self.from(), self.to(), piece.suffix()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
