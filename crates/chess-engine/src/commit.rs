//! Applying moves to a board.
//!
//! A committed move lifts the moving piece(s), removes any captured piece,
//! places the mover(s) and appends the move to the board history and to the
//! history of every piece it touched. A captured piece keeps its history and
//! moves to [`BoardState::captured`].

use chess_core::{Color, Location, Move, Offset, PieceKind};
use thiserror::Error;

use crate::{BoardState, Piece};

/// A move that does not fit the board it is committed to.
///
/// Moves produced by move generation never cause these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("no piece on {0}")]
    EmptySource(Location),

    #[error("destination {0} is occupied")]
    DestinationOccupied(Location),

    #[error("no piece to capture on {0}")]
    MissingCapture(Location),

    #[error("cannot capture own piece on {0}")]
    FriendlyCapture(Location),

    #[error("expected {expected} on {location}, found {found}")]
    WrongPiece {
        location: Location,
        expected: PieceKind,
        found: PieceKind,
    },

    #[error("piece on {0} belongs to the other side")]
    ColorMismatch(Location),

    #[error("castle {king_from}-{king_to} with rook {rook_from}-{rook_to} does not fit the board")]
    MalformedCastle {
        king_from: Location,
        king_to: Location,
        rook_from: Location,
        rook_to: Location,
    },
}

impl BoardState {
    /// Commits `m` to this board.
    ///
    /// The move is checked against the current occupancy before anything
    /// changes, so on error the board is untouched. Legality (self-check,
    /// castling rights, en passant window) is not checked here; ask
    /// [`BoardState::valid_moves`] for that.
    pub fn try_commit(&mut self, m: Move) -> Result<(), CommitError> {
        self.validate(m)?;

        match m {
            Move::Regular { from, to } => {
                let mover = self.lift(from, m)?;
                self.set_piece(mover, to);
                self.record(m, None);
            }
            Move::Capture { from, to, capture } | Move::EnPassant { from, to, capture } => {
                let mover = self.lift(from, m)?;
                let captured = self.lift(capture, m)?;
                self.set_piece(mover, to);
                self.record(m, Some(captured));
            }
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                let king = self.lift(king_from, m)?;
                let rook = self.lift(rook_from, m)?;
                let displaced = [self.set_piece(king, king_to), self.set_piece(rook, rook_to)];
                debug_assert!(
                    displaced.iter().all(Option::is_none),
                    "castle {m} overwrote a piece"
                );
                self.record(m, None);
            }
            Move::Promotion { from, to, piece } => {
                let pawn = self.remove_piece(from).ok_or(CommitError::EmptySource(from))?;
                let mut promoted = pawn.promoted(piece);
                promoted.record(m);
                let captured = match self.remove_piece(to) {
                    Some(mut captured) => {
                        captured.record(m);
                        Some(captured)
                    }
                    None => None,
                };
                self.set_piece(promoted, to);
                self.record(m, captured);
            }
        }
        Ok(())
    }

    /// Commits `m` to this board.
    ///
    /// # Panics
    ///
    /// Panics if the move does not fit the board (see
    /// [`BoardState::try_commit`]). Committing such a move is a bug in the
    /// caller.
    pub fn commit(&mut self, m: Move) {
        if let Err(err) = self.try_commit(m) {
            panic!("cannot commit {}: {}", m, err);
        }
    }

    /// Removes the piece on `location` and appends `m` to its history.
    fn lift(&mut self, location: Location, m: Move) -> Result<Piece, CommitError> {
        let mut piece = self
            .remove_piece(location)
            .ok_or(CommitError::EmptySource(location))?;
        piece.record(m);
        Ok(piece)
    }

    fn validate(&self, m: Move) -> Result<(), CommitError> {
        let mover = self
            .piece(m.from())
            .ok_or(CommitError::EmptySource(m.from()))?;
        let color = mover.color();

        match m {
            Move::Regular { to, .. } => self.require_empty(to),
            Move::Capture { to, capture, .. } => {
                self.require_enemy(capture, color)?;
                if capture != to {
                    self.require_empty(to)?;
                }
                Ok(())
            }
            Move::EnPassant { from, to, capture } => {
                self.require_kind(from, PieceKind::Pawn)?;
                self.require_enemy(capture, color)?;
                self.require_kind(capture, PieceKind::Pawn)?;
                self.require_empty(to)
            }
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                Self::require_castle_shape(king_from, king_to, rook_from, rook_to)?;
                self.require_kind(king_from, PieceKind::King)?;
                let rook = self
                    .piece(rook_from)
                    .ok_or(CommitError::EmptySource(rook_from))?;
                self.require_kind(rook_from, PieceKind::Rook)?;
                if rook.color() != color {
                    return Err(CommitError::ColorMismatch(rook_from));
                }
                self.require_empty(king_to)?;
                self.require_empty(rook_to)
            }
            Move::Promotion { from, to, .. } => {
                self.require_kind(from, PieceKind::Pawn)?;
                if self.is_empty(to) {
                    Ok(())
                } else {
                    self.require_enemy(to, color)
                }
            }
        }
    }

    /// The king moves two files along its rank towards a rook on the same
    /// rank, and the rook lands on the square the king crossed.
    fn require_castle_shape(
        king_from: Location,
        king_to: Location,
        rook_from: Location,
        rook_to: Location,
    ) -> Result<(), CommitError> {
        let rank = king_from.rank();
        let same_rank = [king_to, rook_from, rook_to]
            .iter()
            .all(|l| l.rank() == rank);
        let step = (king_to.file() as i8 - king_from.file() as i8).signum();
        let towards_rook = (rook_from.file() as i8 - king_from.file() as i8).signum() == step;
        let shaped = same_rank
            && towards_rook
            && king_from.offset(Offset::new(step * 2, 0)) == Some(king_to)
            && king_from.offset(Offset::new(step, 0)) == Some(rook_to)
            && rook_from != king_to;
        if shaped {
            Ok(())
        } else {
            Err(CommitError::MalformedCastle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            })
        }
    }

    fn require_empty(&self, location: Location) -> Result<(), CommitError> {
        if self.is_empty(location) {
            Ok(())
        } else {
            Err(CommitError::DestinationOccupied(location))
        }
    }

    fn require_enemy(&self, location: Location, color: Color) -> Result<(), CommitError> {
        match self.piece(location) {
            None => Err(CommitError::MissingCapture(location)),
            Some(p) if p.color() == color => Err(CommitError::FriendlyCapture(location)),
            Some(_) => Ok(()),
        }
    }

    fn require_kind(&self, location: Location, expected: PieceKind) -> Result<(), CommitError> {
        let piece = self
            .piece(location)
            .ok_or(CommitError::EmptySource(location))?;
        if piece.kind() == expected {
            Ok(())
        } else {
            Err(CommitError::WrongPiece {
                location,
                expected,
                found: piece.kind(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{GameProperties, Placement, PromotionPiece};

    fn loc(s: &str) -> Location {
        Location::from_algebraic(s).unwrap()
    }

    fn board(placement: &str) -> BoardState {
        BoardState::from_placement(
            &Placement::parse(placement).unwrap(),
            GameProperties::default(),
        )
    }

    #[test]
    fn regular_move_records_history() {
        let mut b = BoardState::standard(GameProperties::default());
        let m = Move::regular(loc("g1"), loc("f3"));
        b.commit(m);

        assert!(b.is_empty(loc("g1")));
        let knight = b.piece(loc("f3")).unwrap();
        assert_eq!(knight.history().as_slice(), &[m]);
        assert_eq!(b.history().as_slice(), &[m]);
        assert_eq!(b.last_move(), Some(m));
    }

    #[test]
    fn capture_keeps_captured_history() {
        let mut b = board("4k3/8/8/3p4/4P3/8/8/4K3");
        let m = Move::capture(loc("e4"), loc("d5"));
        b.commit(m);

        assert!(b.piece(loc("d5")).unwrap().is(Color::White, PieceKind::Pawn));
        assert_eq!(b.captured().len(), 1);
        assert_eq!(b.captured()[0].color(), Color::Black);
        assert_eq!(b.captured()[0].history().as_slice(), &[m]);
    }

    #[test]
    fn en_passant_removes_beside() {
        let mut b = board("4k3/8/8/3pP3/8/8/8/4K3");
        let m = Move::en_passant(loc("e5"), loc("d6"), loc("d5"));
        b.commit(m);

        assert!(b.is_empty(loc("d5")));
        assert!(b.is_empty(loc("e5")));
        assert!(b.piece(loc("d6")).is_some());
        assert_eq!(b.captured()[0].kind(), PieceKind::Pawn);
    }

    #[test]
    fn castle_moves_both_pieces() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K3");
        let m = Move::castle(loc("e1"), loc("c1"), loc("a1"), loc("d1"));
        b.commit(m);

        let king = b.piece(loc("c1")).unwrap();
        let rook = b.piece(loc("d1")).unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert_eq!(king.history().as_slice(), &[m]);
        assert_eq!(rook.history().as_slice(), &[m]);
        assert_eq!(b.king_location(Color::White), Some(loc("c1")));
        assert_eq!(b.history().len(), 1);
    }

    #[test]
    fn promotion_capture() {
        let mut b = board("1n2k3/P7/8/8/8/8/8/4K3");
        b.commit(Move::regular(loc("e1"), loc("d1")));
        let m = Move::promotion(loc("a7"), loc("b8")).with_promotion_piece(PromotionPiece::Knight);
        b.commit(m);

        let knight = b.piece(loc("b8")).unwrap();
        assert!(knight.is(Color::White, PieceKind::Knight));
        assert_eq!(knight.history().as_slice(), &[m]);
        assert!(b.is_empty(loc("a7")));
        assert_eq!(b.captured()[0].history().as_slice(), &[m]);
    }

    #[test]
    fn errors_leave_board_untouched() {
        let mut b = board("4k3/8/8/8/8/8/4P3/4K3");
        let before = b.clone();

        assert_eq!(
            b.try_commit(Move::regular(loc("a3"), loc("a4"))),
            Err(CommitError::EmptySource(loc("a3")))
        );
        assert_eq!(
            b.try_commit(Move::regular(loc("e1"), loc("e2"))),
            Err(CommitError::DestinationOccupied(loc("e2")))
        );
        assert_eq!(
            b.try_commit(Move::capture(loc("e1"), loc("e2"))),
            Err(CommitError::FriendlyCapture(loc("e2")))
        );
        assert_eq!(
            b.try_commit(Move::capture(loc("e1"), loc("d1"))),
            Err(CommitError::MissingCapture(loc("d1")))
        );
        assert_eq!(
            b.try_commit(Move::promotion(loc("e1"), loc("e2"))),
            Err(CommitError::WrongPiece {
                location: loc("e1"),
                expected: PieceKind::Pawn,
                found: PieceKind::King,
            })
        );
        assert_eq!(b, before);
    }

    #[test]
    fn castle_with_enemy_rook_is_rejected() {
        let mut b = board("4k3/8/8/8/8/8/8/r3K3");
        assert_eq!(
            b.try_commit(Move::castle(loc("e1"), loc("c1"), loc("a1"), loc("d1"))),
            Err(CommitError::ColorMismatch(loc("a1")))
        );
    }

    #[test]
    fn castle_onto_its_own_squares_is_rejected() {
        let mut b = board("4k3/8/8/8/8/8/8/4K2R");
        let before = b.clone();
        let malformed = [
            // Rook lands where the king lands.
            Move::castle(loc("e1"), loc("f1"), loc("h1"), loc("f1")),
            // King lands where the rook starts.
            Move::castle(loc("e1"), loc("g1"), loc("g1"), loc("f1")),
            // Rook lands where the king starts.
            Move::castle(loc("e1"), loc("g1"), loc("h1"), loc("e1")),
            // Rook beyond the king's landing square on the wrong side.
            Move::castle(loc("e1"), loc("c1"), loc("h1"), loc("d1")),
            // Rook on another rank.
            Move::castle(loc("e1"), loc("g1"), loc("h2"), loc("f1")),
        ];
        for m in malformed {
            assert!(
                matches!(b.try_commit(m), Err(CommitError::MalformedCastle { .. })),
                "{m} should be rejected"
            );
        }
        assert_eq!(b, before);
        assert!(b.piece(loc("e1")).unwrap().is(Color::White, PieceKind::King));
        assert_eq!(b.king(Color::White).map(|(l, _)| l), Some(loc("e1")));
    }

    #[test]
    fn castle_from_deserialized_move() {
        let mut b = board("4k3/8/8/8/8/8/8/4K2R");
        let bad = Move::castle(loc("e1"), loc("f1"), loc("h1"), loc("f1"));
        let relayed: Move = serde_json::from_str(&serde_json::to_string(&bad).unwrap()).unwrap();
        assert!(b.try_commit(relayed).is_err());

        let good = Move::castle(loc("e1"), loc("g1"), loc("h1"), loc("f1"));
        let relayed: Move = serde_json::from_str(&serde_json::to_string(&good).unwrap()).unwrap();
        assert_eq!(b.try_commit(relayed), Ok(()));
        assert!(b.piece(loc("g1")).unwrap().is(Color::White, PieceKind::King));
        assert!(b.piece(loc("f1")).unwrap().is(Color::White, PieceKind::Rook));
    }

    #[test]
    #[should_panic(expected = "cannot commit")]
    fn commit_panics_on_inconsistent_move() {
        let mut b = BoardState::new(GameProperties::default());
        b.set_piece(Piece::king(Color::White), loc("e1"));
        b.commit(Move::regular(loc("e2"), loc("e4")));
    }
}
