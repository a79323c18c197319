//! Piece kinds.

use serde::{Deserialize, Serialize};

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the board-diagram letter for this kind with the given color
    /// (uppercase for White).
    pub const fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a board-diagram letter into a kind and color.
    pub const fn from_symbol(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns true if this piece slides along rays (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The kinds a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// All promotion choices, Queen first.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    /// Returns the piece kind created by this promotion.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    /// Returns the promotion choice for a kind, if pawns may promote to it.
    #[inline]
    pub const fn from_kind(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Queen => Some(PromotionPiece::Queen),
            PieceKind::Rook => Some(PromotionPiece::Rook),
            PieceKind::Bishop => Some(PromotionPiece::Bishop),
            PieceKind::Knight => Some(PromotionPiece::Knight),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Returns the lowercase suffix used when printing a promotion ("q", "r", ...).
    #[inline]
    pub const fn suffix(self) -> char {
        self.kind().symbol(Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols() {
        assert_eq!(PieceKind::Pawn.symbol(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.symbol(Color::Black), 'p');
        assert_eq!(PieceKind::King.symbol(Color::White), 'K');
        assert_eq!(PieceKind::Knight.symbol(Color::Black), 'n');
    }

    #[test]
    fn from_symbol() {
        assert_eq!(
            PieceKind::from_symbol('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_symbol('q'),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(PieceKind::from_symbol('x'), None);
    }

    #[test]
    fn is_slider() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn promotion_defaults_to_queen() {
        assert_eq!(PromotionPiece::default(), PromotionPiece::Queen);
        assert_eq!(PromotionPiece::default().kind(), PieceKind::Queen);
    }

    #[test]
    fn promotion_kinds() {
        for choice in PromotionPiece::ALL {
            assert_eq!(PromotionPiece::from_kind(choice.kind()), Some(choice));
        }
        assert_eq!(PromotionPiece::from_kind(PieceKind::King), None);
        assert_eq!(PromotionPiece::from_kind(PieceKind::Pawn), None);
        assert_eq!(PromotionPiece::Knight.suffix(), 'n');
    }
}
