//! Checkers rules: move generation, move application, outcome and setup

pub mod apply;
pub mod movegen;
pub mod outcome;
pub mod setup;

pub use apply::{apply_move, MoveRequest, MoveResult, Transition};
pub use movegen::{legal_moves, legal_moves_for_side, LegalMoves};
pub use outcome::{evaluate_outcome, Outcome, Verdict};
pub use setup::{new_game, populate_board, PIECES_PER_SIDE};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GameId, PlayerId};
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    #[test]
    fn test_random_games_keep_invariants() {
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = new_game(GameId(1), PlayerId(1), PlayerId(2)).unwrap();

            for _ in 0..300 {
                let side = state.to_move();
                let Some(player) = state.game().seat(side) else {
                    break;
                };
                let moves = legal_moves_for_side(&state, side);
                let Some((from, to)) = moves.choose(&mut rng).copied() else {
                    break;
                };

                let mover = *state.board().piece_at(from).unwrap();
                let own_before = state.board().count_owned(player);
                let total_before = state.board().len();

                let request = MoveRequest::new(player, from.to_string(), to.to_string());
                let t = apply_move(&state, &request).unwrap();

                assert_eq!(t.state.to_move(), side.other());
                assert_eq!(t.state.board().count_owned(player), own_before);
                assert_eq!(t.state.board().len() + t.result.is_capture as usize, total_before);

                let moved = t.state.board().find(mover.id).unwrap();
                assert_eq!(moved.square, to);
                assert!(moved.king || !mover.king);
                assert_eq!(moved.king, mover.king || t.result.promoted);

                let over = t.outcome.is_over();
                state = t.state;
                if over {
                    assert!(legal_moves_for_side(&state, state.to_move()).is_empty());
                    break;
                }
            }
        }
    }
}
