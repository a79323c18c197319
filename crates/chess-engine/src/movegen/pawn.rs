//! Pawn candidates: pushes, captures, promotion and en passant.

use chess_core::{Color, Location, Move, MoveList, Offset, PieceKind};

use crate::BoardState;

impl BoardState {
    pub(super) fn pawn_candidates(&self, from: Location, color: Color, moves: &mut MoveList) {
        let forward = self.properties().direction(color).rank_step();

        if let Some(one) = from.offset(Offset::new(0, forward)) {
            if self.is_empty(one) {
                moves.push(advance(from, one));

                if from.rank() == self.properties().pawn_rank(color) {
                    if let Some(two) = from.offset(Offset::new(0, 2 * forward)) {
                        if self.is_empty(two) {
                            moves.push(Move::regular(from, two));
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(to) = from.offset(Offset::new(side, forward)) else {
                continue;
            };
            if self.is_enemy(to, color) {
                moves.push(if to.is_end_row() {
                    Move::promotion(from, to)
                } else {
                    Move::capture(from, to)
                });
            } else if let Some(m) = self.en_passant(from, color, side, forward) {
                moves.push(m);
            }
        }
    }

    /// Returns the en passant capture towards `side` if the pawn beside
    /// `from` has moved exactly once, with a double step, and that was the
    /// last move of the game.
    fn en_passant(&self, from: Location, color: Color, side: i8, forward: i8) -> Option<Move> {
        let beside = from.offset(Offset::new(side, 0))?;
        let to = from.offset(Offset::new(side, forward))?;
        let victim = self.piece(beside)?;
        if !victim.is(color.opposite(), PieceKind::Pawn) || victim.history().len() != 1 {
            return None;
        }
        let double_step = victim.history().last()?;
        if !double_step.is_double_advance()
            || double_step.to() != beside
            || self.last_move() != Some(double_step)
        {
            return None;
        }
        self.is_empty(to)
            .then(|| Move::en_passant(from, to, beside))
    }
}

fn advance(from: Location, to: Location) -> Move {
    if to.is_end_row() {
        Move::promotion(from, to)
    } else {
        Move::regular(from, to)
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
    fn single_and_double_step() {
        let b = BoardState::standard(GameProperties::default());
        let moves = b.valid_moves(loc("e2")).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Move::regular(loc("e2"), loc("e3"))));
        assert!(moves.contains(&Move::regular(loc("e2"), loc("e4"))));

        let moves = b.valid_moves(loc("d7")).unwrap();
        assert!(moves.contains(&Move::regular(loc("d7"), loc("d5"))));
    }

    #[test]
    fn double_step_needs_both_squares_empty() {
        let b = board("4k3/8/8/8/8/4n3/4P3/4K3");
        assert!(b.valid_moves(loc("e2")).unwrap().is_empty());

        let b = board("4k3/8/8/8/4n3/8/4P3/4K3");
        let moves = b.valid_moves(loc("e2")).unwrap();
        assert_eq!(moves.as_slice(), &[Move::regular(loc("e2"), loc("e3"))]);
    }

    #[test]
    fn no_double_step_off_start_rank() {
        let b = board("4k3/8/8/8/8/4P3/8/4K3");
        let moves = b.valid_moves(loc("e3")).unwrap();
        assert_eq!(moves.as_slice(), &[Move::regular(loc("e3"), loc("e4"))]);
    }

    #[test]
    fn captures_only_opponents() {
        let b = board("4k3/8/8/8/8/3p1N2/4P3/4K3");
        let moves = b.valid_moves(loc("e2")).unwrap();
        assert!(moves.contains(&Move::capture(loc("e2"), loc("d3"))));
        assert!(!moves.iter().any(|m| m.to() == loc("f3")));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn promotion_on_push_and_capture() {
        let b = board("1r2k3/P7/8/8/8/8/8/4K3");
        let moves = b.valid_moves(loc("a7")).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.is_promotion()));
        assert!(moves.contains(&Move::promotion(loc("a7"), loc("a8"))));
        assert!(moves.contains(&Move::promotion(loc("a7"), loc("b8"))));
        assert!(moves
            .iter()
            .all(|m| m.promotion_piece() == Some(PromotionPiece::Queen)));
    }

    #[test]
    fn black_promotes_on_first_rank() {
        let b = board("4k3/8/8/8/8/8/6p1/K7");
        let moves = b.valid_moves(loc("g2")).unwrap();
        assert_eq!(moves.as_slice(), &[Move::promotion(loc("g2"), loc("g1"))]);
    }

    #[test]
    fn en_passant_right_after_double_step() {
        let mut b = board("4k3/3p4/8/4P3/8/8/8/4K3");
        b.commit(Move::regular(loc("d7"), loc("d5")));

        let moves = b.valid_moves(loc("e5")).unwrap();
        let ep = Move::en_passant(loc("e5"), loc("d6"), loc("d5"));
        assert!(moves.contains(&ep));
    }

    #[test]
    fn en_passant_window_closes() {
        let mut b = board("4k3/3p4/8/4P3/8/8/8/4K3");
        b.commit(Move::regular(loc("d7"), loc("d5")));
        b.commit(Move::regular(loc("e1"), loc("f1")));
        b.commit(Move::regular(loc("e8"), loc("f8")));

        let moves = b.valid_moves(loc("e5")).unwrap();
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn no_en_passant_after_two_single_steps() {
        let mut b = board("4k3/3p4/8/4P3/8/8/8/4K3");
        b.commit(Move::regular(loc("d7"), loc("d6")));
        b.commit(Move::regular(loc("e1"), loc("f1")));
        b.commit(Move::regular(loc("d6"), loc("d5")));

        let moves = b.valid_moves(loc("e5")).unwrap();
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn no_en_passant_for_placed_pawn() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3");
        let moves = b.valid_moves(loc("e5")).unwrap();
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }
}
