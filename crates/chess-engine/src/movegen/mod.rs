//! Move generation.
//!
//! Each piece first produces its geometric candidates. Every candidate is
//! then committed on a clone of the board and kept only if the mover's own
//! king is not in check afterwards.

mod attacks;
mod king;
mod pawn;
pub mod perft;

use chess_core::{Color, Location, Move, MoveList, Offset, PieceKind};
use tracing::trace;

use crate::BoardState;

impl BoardState {
    /// Returns the legal moves of the piece on `from`.
    ///
    /// Returns `None` only if `from` is empty. Promotions are listed once,
    /// with the default piece; change it with [`Move::set_promotion_piece`]
    /// before committing.
    pub fn valid_moves(&self, from: Location) -> Option<MoveList> {
        let piece = self.piece(from)?;
        let color = piece.color();

        let mut moves = MoveList::new();
        match piece.kind() {
            PieceKind::Pawn => self.pawn_candidates(from, color, &mut moves),
            PieceKind::Knight => self.step_candidates(from, color, from.knight_jumps(), &mut moves),
            PieceKind::Bishop => self.slide_candidates(from, color, Offset::DIAGONAL, &mut moves),
            PieceKind::Rook => self.slide_candidates(from, color, Offset::ORTHOGONAL, &mut moves),
            PieceKind::Queen => {
                self.slide_candidates(from, color, Offset::ALL_DIRECTIONS, &mut moves)
            }
            PieceKind::King => {
                self.step_candidates(from, color, from.neighbors(), &mut moves);
                self.castle_candidates(from, color, &mut moves);
            }
        }

        moves.retain(|m| self.is_legal(*m, color));
        Some(moves)
    }

    /// Returns the legal moves of every piece of `color`.
    pub fn all_valid_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for (from, _) in self.pieces(color) {
            if let Some(list) = self.valid_moves(from) {
                moves.extend(list);
            }
        }
        moves
    }

    /// Returns true if no piece of `color` has a legal move.
    ///
    /// Checkmate and stalemate both report true. Use [`BoardState::check`]
    /// to tell them apart.
    pub fn is_game_over(&self, color: Color) -> bool {
        self.pieces(color)
            .all(|(from, _)| self.valid_moves(from).map_or(true, |m| m.is_empty()))
    }

    /// Commits `m` on a clone and reports whether `color`'s king is safe
    /// afterwards.
    pub(crate) fn is_legal(&self, m: Move, color: Color) -> bool {
        let mut simulated = self.clone();
        if let Err(err) = simulated.try_commit(m) {
            trace!(%m, %err, "candidate does not fit the board");
            return false;
        }
        if simulated.check(color) {
            trace!(%m, "candidate leaves king in check");
            return false;
        }
        true
    }

    /// Returns the move to `to` for a piece of `color`: a regular move onto
    /// an empty square, a capture of an opposing piece, or nothing if a piece
    /// of the same color stands there.
    pub(crate) fn move_to(&self, from: Location, to: Location, color: Color) -> Option<Move> {
        match self.piece(to) {
            None => Some(Move::regular(from, to)),
            Some(p) if p.color() != color => Some(Move::capture(from, to)),
            Some(_) => None,
        }
    }

    fn step_candidates(
        &self,
        from: Location,
        color: Color,
        targets: impl Iterator<Item = Location>,
        moves: &mut MoveList,
    ) {
        moves.extend(targets.filter_map(|to| self.move_to(from, to, color)));
    }

    fn slide_candidates<const N: usize>(
        &self,
        from: Location,
        color: Color,
        directions: [Offset; N],
        moves: &mut MoveList,
    ) {
        for step in directions {
            for to in from.ray(step) {
                match self.move_to(from, to, color) {
                    Some(m) => moves.push(m),
                    None => break,
                }
                if !self.is_empty(to) {
                    break;
                }
            }
        }
    }
}
