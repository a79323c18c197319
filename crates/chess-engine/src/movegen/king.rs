//! Castling candidates.

use chess_core::{Color, Location, Move, MoveList, Offset, PieceKind};

use crate::BoardState;

/// Files the rooks start on.
const ROOK_FILES: [i8; 2] = [0, 7];

impl BoardState {
    /// Adds castling towards each home rook that qualifies.
    ///
    /// King and rook must both be unmoved, the squares between them empty,
    /// and the king must not be in check on its square, the square it
    /// crosses, or the square it lands on.
    pub(super) fn castle_candidates(&self, from: Location, color: Color, moves: &mut MoveList) {
        let Some(king) = self.piece(from) else {
            return;
        };
        if !king.is_unmoved() || from.rank() != self.properties().home_rank(color) {
            return;
        }
        if self.check(color) {
            return;
        }

        for rook_file in ROOK_FILES {
            if let Some(m) = self.castle_towards(from, color, rook_file) {
                moves.push(m);
            }
        }
    }

    fn castle_towards(&self, from: Location, color: Color, rook_file: i8) -> Option<Move> {
        let rook_from = Location::of(rook_file, from.rank() as i8)?;
        let rook = self.piece(rook_from)?;
        if !rook.is(color, PieceKind::Rook) || !rook.is_unmoved() {
            return None;
        }

        let step = Offset::new((rook_file - from.file() as i8).signum(), 0);
        if from.ray(step).take_while(|&l| l != rook_from).any(|l| !self.is_empty(l)) {
            return None;
        }

        let crossed = from.offset(step)?;
        let king_to = from.offset(step.times(2))?;
        for square in [crossed, king_to] {
            if !self.is_legal(Move::regular(from, square), color) {
                return None;
            }
        }

        Some(Move::castle(from, king_to, rook_from, crossed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{GameProperties, Placement};

    fn loc(s: &str) -> Location {
        Location::from_algebraic(s).unwrap()
    }

    fn board(placement: &str) -> BoardState {
        BoardState::from_placement(
            &Placement::parse(placement).unwrap(),
            GameProperties::default(),
        )
    }

    fn castles(board: &BoardState, from: &str) -> Vec<Move> {
        board
            .valid_moves(loc(from))
            .unwrap()
            .into_iter()
            .filter(|m| m.is_castle())
            .collect()
    }

    #[test]
    fn both_sides() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R");
        let white = castles(&b, "e1");
        assert_eq!(white.len(), 2);
        assert!(white.contains(&Move::castle(loc("e1"), loc("g1"), loc("h1"), loc("f1"))));
        assert!(white.contains(&Move::castle(loc("e1"), loc("c1"), loc("a1"), loc("d1"))));

        let black = castles(&b, "e8");
        assert!(black.contains(&Move::castle(loc("e8"), loc("g8"), loc("h8"), loc("f8"))));
        assert!(black.contains(&Move::castle(loc("e8"), loc("c8"), loc("a8"), loc("d8"))));
    }

    #[test]
    fn blocked_by_piece_between() {
        let b = board("4k3/8/8/8/8/8/8/RN2K1NR");
        assert!(castles(&b, "e1").is_empty());

        // b1 must be empty for the long castle even though the king never
        // crosses it.
        let b = board("4k3/8/8/8/8/8/8/RN2K2R");
        assert_eq!(
            castles(&b, "e1"),
            vec![Move::castle(loc("e1"), loc("g1"), loc("h1"), loc("f1"))]
        );
    }

    #[test]
    fn not_out_of_or_through_check() {
        // In check.
        assert!(castles(&board("4r1k1/8/8/8/8/8/8/R3K2R"), "e1").is_empty());

        // f1 attacked: no short castle.
        let b = board("5rk1/8/8/8/8/8/8/R3K2R");
        assert_eq!(
            castles(&b, "e1"),
            vec![Move::castle(loc("e1"), loc("c1"), loc("a1"), loc("d1"))]
        );

        // c1 attacked: no long castle.
        let b = board("2r3k1/8/8/8/8/8/8/R3K2R");
        assert_eq!(
            castles(&b, "e1"),
            vec![Move::castle(loc("e1"), loc("g1"), loc("h1"), loc("f1"))]
        );

        // Only b1 attacked: long castle still allowed.
        let b = board("1r4k1/8/8/8/8/8/8/R3K2R");
        assert_eq!(castles(&b, "e1").len(), 2);
    }

    #[test]
    fn lost_after_king_moves_and_returns() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R");
        b.commit(Move::regular(loc("e1"), loc("f1")));
        b.commit(Move::regular(loc("e8"), loc("d8")));
        b.commit(Move::regular(loc("f1"), loc("e1")));
        b.commit(Move::regular(loc("d8"), loc("e8")));

        assert!(castles(&b, "e1").is_empty());
        assert!(castles(&b, "e8").is_empty());
    }

    #[test]
    fn lost_after_rook_moves_and_returns() {
        let mut b = board("4k3/8/8/8/8/8/8/R3K2R");
        b.commit(Move::regular(loc("h1"), loc("h2")));
        b.commit(Move::regular(loc("e8"), loc("d8")));
        b.commit(Move::regular(loc("h2"), loc("h1")));

        assert_eq!(
            castles(&b, "e1"),
            vec![Move::castle(loc("e1"), loc("c1"), loc("a1"), loc("d1"))]
        );
    }

    #[test]
    fn castling_commit_leaves_king_safe() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R");
        let m = Move::castle(loc("e1"), loc("g1"), loc("h1"), loc("f1"));
        assert!(b.valid_moves(loc("e1")).unwrap().contains(&m));
        b.commit(m);
        assert!(b.piece(loc("g1")).unwrap().is(Color::White, PieceKind::King));
        assert!(b.piece(loc("f1")).unwrap().is(Color::White, PieceKind::Rook));
        assert!(b.is_empty(loc("h1")));
        assert!(!b.check(Color::White));
    }
}
