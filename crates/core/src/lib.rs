//! Checkers Core Library
//!
//! Rules engine for checkers on the 32 dark squares of an 8x8 board: move
//! generation, move application with captures and crowning, turn order and
//! elimination. Storage and the per-game service sit on top of the engine;
//! the engine itself does no I/O.

pub mod board;
pub mod error;
pub mod game;
pub mod rules;
pub mod service;
pub mod storage;

pub use board::{is_legal_square, Board, Direction, GameId, Piece, PieceId, PlayerId, PlayerNumber, Square};
pub use error::{Error, MoveError, Result};
pub use game::{GameRecord, GameState};
pub use rules::{
    apply_move, evaluate_outcome, legal_moves, new_game, populate_board, MoveRequest, MoveResult, Outcome,
    Transition,
};
pub use service::{GameService, MoveResponse};
pub use storage::{GameStore, MemoryStore, MoveRecord};

/// Basic information about a game in progress
#[derive(Debug)]
pub struct PositionInfo {
    pub piece_count: u32,
    pub legal_move_count: u32,
    pub side_to_move: PlayerNumber,
    pub kings: u32,
    pub outcome: Outcome,
}

/// Summarizes a game state
pub fn analyze_position(state: &GameState) -> PositionInfo {
    let board = state.board();
    let game = state.game();
    let piece_count = board.len() as u32;
    let legal_move_count = rules::legal_moves_for_side(state, game.to_move).len() as u32;
    let kings = board.pieces().filter(|p| p.king).count() as u32;
    let outcome = evaluate_outcome(board, game.player1, game.player2);

    PositionInfo {
        piece_count,
        legal_move_count,
        side_to_move: game.to_move,
        kings,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let state = new_game(GameId(1), PlayerId(1), PlayerId(2)).unwrap();
        let info = analyze_position(&state);

        assert_eq!(info.piece_count, 24);
        assert_eq!(info.side_to_move, PlayerNumber::One);
        // four men on rank 3, the a3 man has one diagonal
        assert_eq!(info.legal_move_count, 7);
        assert_eq!(info.kings, 0);
        assert_eq!(info.outcome, Outcome::Ongoing);
    }
}
