//! Pieces on the board.

use chess_core::{Color, Move, MoveHistory, PieceKind, PromotionPiece};

/// A piece together with the moves it has taken part in.
///
/// A piece never changes color or kind. Promotion replaces the pawn with a
/// new piece (see [`Piece::promoted`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    history: MoveHistory,
}

impl Piece {
    /// Creates a piece with an empty history.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            color,
            kind,
            history: MoveHistory::new(),
        }
    }

    #[inline]
    pub const fn pawn(color: Color) -> Self {
        Self::new(color, PieceKind::Pawn)
    }

    #[inline]
    pub const fn knight(color: Color) -> Self {
        Self::new(color, PieceKind::Knight)
    }

    #[inline]
    pub const fn bishop(color: Color) -> Self {
        Self::new(color, PieceKind::Bishop)
    }

    #[inline]
    pub const fn rook(color: Color) -> Self {
        Self::new(color, PieceKind::Rook)
    }

    #[inline]
    pub const fn queen(color: Color) -> Self {
        Self::new(color, PieceKind::Queen)
    }

    #[inline]
    pub const fn king(color: Color) -> Self {
        Self::new(color, PieceKind::King)
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the moves this piece has taken part in, including being
    /// captured.
    #[inline]
    pub const fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns true if this piece has never moved.
    #[inline]
    pub fn is_unmoved(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub const fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color as u8 == color as u8 && self.kind as u8 == kind as u8
    }

    /// Returns the board-diagram letter (uppercase for White).
    #[inline]
    pub const fn symbol(&self) -> char {
        self.kind.symbol(self.color)
    }

    /// Creates the piece a pawn becomes on promotion. The new piece starts
    /// with a copy of this piece's history.
    pub fn promoted(&self, choice: PromotionPiece) -> Piece {
        Piece {
            color: self.color,
            kind: choice.kind(),
            history: self.history.clone(),
        }
    }

    pub(crate) fn record(&mut self, m: Move) {
        self.history.push(m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Location;

    #[test]
    fn new_piece_is_unmoved() {
        let knight = Piece::knight(Color::Black);
        assert!(knight.is_unmoved());
        assert!(knight.is(Color::Black, PieceKind::Knight));
        assert!(!knight.is(Color::White, PieceKind::Knight));
        assert_eq!(knight.symbol(), 'n');
    }

    #[test]
    fn promoted_copies_history() {
        let step = Move::regular(
            Location::from_algebraic("e6").unwrap(),
            Location::from_algebraic("e7").unwrap(),
        );
        let mut pawn = Piece::pawn(Color::White);
        pawn.record(step);

        let mut rook = pawn.promoted(PromotionPiece::Rook);
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert_eq!(rook.color(), Color::White);
        assert_eq!(rook.history(), pawn.history());

        rook.record(step);
        assert_eq!(rook.history().len(), 2);
        assert_eq!(pawn.history().len(), 1);
    }
}
