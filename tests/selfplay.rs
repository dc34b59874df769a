use rand::SeedableRng;
use rand::rngs::StdRng;

use marten_checkers::{Board, Difficulty, Game, PIECES_PER_SIDE, Side};

/// Counts pieces on the grid and checks they agree with the cached totals.
fn assert_counts_consistent(board: &Board) {
    for side in [Side::Red, Side::Black] {
        assert_eq!(
            board.pieces(side).count(),
            board.remaining(side) as usize,
            "cached count diverged from the grid for {side}"
        );
        let kings = board
            .pieces(side)
            .filter(|p| p.rank == marten_checkers::Rank::King)
            .count();
        assert_eq!(kings, board.kings(side) as usize);
        assert!(board.remaining(side) <= PIECES_PER_SIDE);
    }
}

fn play_out(red: Difficulty, black: Difficulty, seed: u64, ply_limit: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    let mut previous = [PIECES_PER_SIDE, PIECES_PER_SIDE];

    for _ in 0..ply_limit {
        if let Some(winner) = game.outcome() {
            // The loser is either eliminated or completely immobile.
            let loser = winner.opponent();
            assert!(
                game.board().is_eliminated(loser)
                    || !marten_checkers::has_any_legal_move(game.board(), loser)
            );
            return;
        }

        let tier = match game.turn() {
            Side::Red => red,
            Side::Black => black,
        };
        assert!(game.ai_move(tier, &mut rng), "outcome() said the game was live");

        assert_counts_consistent(game.board());
        for (i, side) in [Side::Red, Side::Black].into_iter().enumerate() {
            assert!(
                game.board().remaining(side) <= previous[i],
                "piece count increased for {side}"
            );
            previous[i] = game.board().remaining(side);
        }
    }
}

#[test]
fn random_selfplay_preserves_board_invariants() {
    for seed in 0..4 {
        play_out(Difficulty::Random, Difficulty::Random, seed, 300);
    }
}

#[test]
fn shallow_search_selfplay_preserves_board_invariants() {
    play_out(Difficulty::Shallow, Difficulty::Random, 42, 150);
}

#[test]
fn shallow_search_as_second_player_preserves_board_invariants() {
    play_out(Difficulty::Random, Difficulty::Shallow, 7, 120);
}
