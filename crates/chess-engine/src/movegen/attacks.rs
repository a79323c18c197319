//! Check detection.
//!
//! Attacks are found by looking outwards from the king: a pawn on one of
//! the two forward diagonals, a knight a knight's jump away, or the first
//! piece along each of the eight rays.

use chess_core::{Color, Location, Offset, PieceKind};
use tracing::warn;

use crate::BoardState;

impl BoardState {
    /// Returns true if the king of `color` is attacked.
    ///
    /// A board without that king is never in check; this is logged as a
    /// warning since it means the board was built without one.
    pub fn check(&self, color: Color) -> bool {
        match self.king(color) {
            Some((king, _)) => self.is_attacked(king, color),
            None => {
                warn!(%color, "no king on board, reporting not in check");
                false
            }
        }
    }

    /// Returns true if a piece of the opponent of `color` attacks `target`.
    pub fn is_attacked(&self, target: Location, color: Color) -> bool {
        self.pawn_attacks(target, color)
            || self.knight_attacks(target, color)
            || Offset::ALL_DIRECTIONS
                .into_iter()
                .any(|step| self.ray_attacks(target, color, step))
    }

    fn pawn_attacks(&self, target: Location, color: Color) -> bool {
        let forward = self.properties().direction(color).rank_step();
        [Offset::new(-1, forward), Offset::new(1, forward)]
            .into_iter()
            .filter_map(|o| target.offset(o))
            .any(|loc| self.holds(loc, color.opposite(), PieceKind::Pawn))
    }

    fn knight_attacks(&self, target: Location, color: Color) -> bool {
        target
            .knight_jumps()
            .any(|loc| self.holds(loc, color.opposite(), PieceKind::Knight))
    }

    fn ray_attacks(&self, target: Location, color: Color, step: Offset) -> bool {
        let Some((distance, loc)) = target
            .ray(step)
            .enumerate()
            .find(|(_, loc)| !self.is_empty(*loc))
        else {
            return false;
        };
        let Some(piece) = self.piece(loc) else {
            return false;
        };
        if piece.color() == color {
            return false;
        }
        match piece.kind() {
            PieceKind::Queen => true,
            PieceKind::Rook => !step.is_diagonal(),
            PieceKind::Bishop => step.is_diagonal(),
            PieceKind::King => distance == 0,
            PieceKind::Pawn | PieceKind::Knight => false,
        }
    }

    fn holds(&self, location: Location, color: Color, kind: PieceKind) -> bool {
        self.piece(location).is_some_and(|p| p.is(color, kind))
    }
}
