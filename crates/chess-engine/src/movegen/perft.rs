//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions count once for each piece a pawn may become.

use chess_core::{Color, Move, PromotionPiece};

use crate::BoardState;

/// Returns every move `side` can play, with each promotion expanded into
/// all four choices.
pub fn expanded_moves(board: &BoardState, side: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for m in &board.all_valid_moves(side) {
        if m.is_promotion() {
            moves.extend(
                PromotionPiece::ALL
                    .into_iter()
                    .map(|p| m.with_promotion_piece(p)),
            );
        } else {
            moves.push(*m);
        }
    }
    moves
}

/// Counts the number of leaf nodes at the given depth with `side` to move.
pub fn perft(board: &BoardState, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expanded_moves(board, side);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        let mut next = board.clone();
        next.commit(m);
        nodes += perft(&next, side.opposite(), depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &BoardState, side: Color, depth: u32) -> Vec<(String, u64)> {
    let moves = expanded_moves(board, side);
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let mut next = board.clone();
        next.commit(m);
        let nodes = if depth > 1 {
            perft(&next, side.opposite(), depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{GameProperties, Placement};

    fn startpos() -> BoardState {
        BoardState::standard(GameProperties::default())
    }

    fn position(placement: &str) -> BoardState {
        BoardState::from_placement(
            &Placement::parse(placement).unwrap(),
            GameProperties::default(),
        )
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&startpos(), Color::White, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&startpos(), Color::White, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&startpos(), Color::White, 3), 8902);
    }

    // Slow with a clone per candidate; run with --ignored.
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&startpos(), Color::White, 4), 197281);
    }

    // Kiwipete - a position with lots of special moves. All pieces start
    // unmoved, so both sides may castle both ways.
    #[test]
    fn perft_kiwipete_depth_1() {
        let board = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
        assert_eq!(perft(&board, Color::White, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let board = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
        assert_eq!(perft(&board, Color::White, 2), 2039);
    }

    // Position 3: check evasion and en passant, no castling pieces.
    #[test]
    fn perft_position3_depth_1() {
        let board = position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8");
        assert_eq!(perft(&board, Color::White, 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        let board = position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8");
        assert_eq!(perft(&board, Color::White, 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        let board = position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8");
        assert_eq!(perft(&board, Color::White, 3), 2812);
    }

    #[test]
    fn promotions_count_four_times() {
        let board = position("4k3/P7/8/8/8/8/8/4K3");
        let divide = perft_divide(&board, Color::White, 1);
        let promotions: Vec<&str> = divide
            .iter()
            .map(|(m, _)| m.as_str())
            .filter(|m| m.starts_with("a7"))
            .collect();
        assert_eq!(promotions, ["a7a8b", "a7a8n", "a7a8q", "a7a8r"]);
    }

    #[test]
    fn perft_divide_works() {
        let results = perft_divide(&startpos(), Color::White, 1);
        assert_eq!(results.len(), 20);
        // Total should equal perft(1)
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let board = startpos();
        let total: u64 = perft_divide(&board, Color::White, 2)
            .iter()
            .map(|(_, n)| n)
            .sum();
        assert_eq!(total, perft(&board, Color::White, 2));
    }
}
