use clap::ValueEnum;
use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{Board, Side};
use crate::move_generator::legal_moves;

/// AI tiers. `Random` picks uniformly; the other two run fixed-depth
/// minimax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Random,
    Shallow,
    Deep,
}

impl Difficulty {
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Random => 0,
            Difficulty::Shallow => 2,
            Difficulty::Deep => 4,
        }
    }
}

/// Every board reachable by one move of the given side, each candidate
/// applied to an independent clone. When any piece can capture, only the
/// capture-resulting boards are returned; this side-wide restriction is on
/// top of the per-piece priority inside `legal_moves`.
pub fn resulting_boards(board: &Board, side: Side) -> Vec<Board> {
    let mut captures = Vec::new();
    let mut quiets = Vec::new();

    for piece in board.pieces(side) {
        for (destination, chain) in legal_moves(board, piece) {
            let mut next = board.clone();
            next.apply_move(piece.square(), destination);
            if chain.is_empty() {
                quiets.push(next);
            } else {
                next.remove_captured(&chain);
                captures.push(next);
            }
        }
    }

    if captures.is_empty() { quiets } else { captures }
}

/// Plain depth-limited minimax over cloned boards, scored for `reference`.
///
/// Terminal positions (depth exhausted or a side eliminated) return the
/// static evaluation with the board unchanged, as does a position where the
/// side to move has nothing to play (an immobility leaf). Ties keep the
/// first child encountered.
pub fn minimax(board: &Board, depth: u8, maximizing: bool, reference: Side) -> (f32, Board) {
    if depth == 0 || board.winner().is_some() {
        return (board.evaluate(reference), board.clone());
    }

    let to_move = if maximizing { reference } else { reference.opponent() };
    let children = resulting_boards(board, to_move);
    if children.is_empty() {
        return (board.evaluate(reference), board.clone());
    }

    let mut best_value = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };
    let mut best_board = board.clone();
    for child in children {
        let (value, _) = minimax(&child, depth - 1, !maximizing, reference);
        let better = if maximizing { value > best_value } else { value < best_value };
        if better {
            best_value = value;
            best_board = child;
        }
    }

    (best_value, best_board)
}

/// Picks the board the AI adopts for its turn, or `None` when the side to
/// move has no legal move at all.
pub fn choose_move<R: Rng>(board: &Board, side: Side, difficulty: Difficulty, rng: &mut R) -> Option<Board> {
    match difficulty {
        Difficulty::Random => {
            let candidates = resulting_boards(board, side);
            trace!("random tier picking among {} boards for {side}", candidates.len());
            candidates.choose(rng).cloned()
        }
        Difficulty::Shallow | Difficulty::Deep => {
            if resulting_boards(board, side).is_empty() {
                return None;
            }
            let (score, next) = minimax(board, difficulty.depth(), true, side);
            debug!(
                "minimax depth {} chose a line scored {score:.2} for {side}",
                difficulty.depth()
            );
            Some(next)
        }
    }
}

#[cfg(test)]
mod search_tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::board::Square;

    #[test]
    fn depth_zero_returns_static_evaluation_unchanged() {
        let board = Board::new();

        let (score, result) = minimax(&board, 0, true, Side::Red);

        assert_eq!(score, board.evaluate(Side::Red));
        assert_eq!(result, board);
    }

    #[test]
    fn forced_single_move_is_taken_regardless_of_score() {
        let board = Board::from_layout(
            ".b......\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             r.......",
        )
        .unwrap();

        let (_, result) = minimax(&board, 2, true, Side::Red);

        assert_eq!(result.get(Square::new(7, 0)), None);
        assert!(result.get(Square::new(6, 1)).is_some_and(|p| p.side == Side::Red));
    }

    #[test]
    fn resulting_boards_restricted_to_captures_side_wide() {
        // One red piece has a two-branch capture, the other only quiet
        // moves; no quiet-resulting board may survive.
        let board = Board::from_layout(
            "........\n\
             ........\n\
             ...b....\n\
             ........\n\
             ...b....\n\
             ....r...\n\
             ........\n\
             r.......",
        )
        .unwrap();

        let boards = resulting_boards(&board, Side::Red);

        assert_eq!(boards.len(), 2);
        for next in &boards {
            assert!(next.remaining(Side::Black) < 2);
        }
    }

    #[test]
    fn capture_chain_shrinks_opponent_by_its_length() {
        let board = Board::from_layout(
            "........\n\
             ........\n\
             ...b....\n\
             ........\n\
             ...b....\n\
             ....r...\n\
             ........\n\
             ........",
        )
        .unwrap();

        let piece = board.get(Square::new(5, 4)).unwrap();
        let moves = legal_moves(&board, piece);
        let chain = moves[&Square::new(1, 4)].clone();
        assert_eq!(chain.len(), 2);

        let mut next = board.clone();
        next.apply_move(Square::new(5, 4), Square::new(1, 4));
        next.remove_captured(&chain);
        assert_eq!(next.remaining(Side::Black), board.remaining(Side::Black) - 2);
    }

    #[test]
    fn random_tier_prefers_captures() {
        let board = Board::from_layout(
            "........\n\
             ........\n\
             ...b....\n\
             ........\n\
             ...b....\n\
             ....r...\n\
             ........\n\
             r.......",
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..8 {
            let next = choose_move(&board, Side::Red, Difficulty::Random, &mut rng).unwrap();
            assert!(next.remaining(Side::Black) < board.remaining(Side::Black));
        }
    }

    #[test]
    fn deep_search_takes_the_two_piece_chain() {
        // Depth-4 search for Red: the double jump wins more material than
        // the single jump branch.
        let board = Board::from_layout(
            "........\n\
             ........\n\
             ...b....\n\
             ........\n\
             ...b....\n\
             ....r...\n\
             ........\n\
             ........",
        )
        .unwrap();

        let next = choose_move(&board, Side::Red, Difficulty::Deep, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(next.remaining(Side::Black), 0);
        assert_eq!(next.winner(), Some(Side::Red));
    }

    #[test]
    fn no_moves_returns_none_from_every_tier() {
        let board = Board::from_layout(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ...b....\n\
             b.b.....\n\
             .r......\n\
             r.......",
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        for difficulty in [Difficulty::Random, Difficulty::Shallow, Difficulty::Deep] {
            assert!(choose_move(&board, Side::Red, difficulty, &mut rng).is_none());
        }
    }
}
