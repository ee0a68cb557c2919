//! Starting positions

use crate::board::{GameId, Piece, PieceId, PlayerId, PlayerNumber, Square};
use crate::error::Result;
use crate::game::GameState;

pub const PIECES_PER_SIDE: usize = 12;

/// The twelve starting pieces of one side.
///
/// Player 1 fills the twelve lowest squares in rank order (`a1` first) with
/// ids 1-12. Player 2 fills the twelve highest from `h8` backwards with ids
/// 13-24.
pub fn populate_board(game: GameId, player: PlayerId, number: PlayerNumber) -> Vec<Piece> {
    let (squares, first_id): (Vec<Square>, u8) = match number {
        PlayerNumber::One => (Square::all().take(PIECES_PER_SIDE).collect(), 1),
        PlayerNumber::Two => (
            Square::all().rev().take(PIECES_PER_SIDE).collect(),
            PIECES_PER_SIDE as u8 + 1,
        ),
    };

    squares
        .into_iter()
        .enumerate()
        .map(|(i, square)| Piece::new(PieceId(first_id + i as u8), game, player, square))
        .collect()
}

/// A game with both players seated and all 24 pieces set out.
pub fn new_game(game: GameId, player1: PlayerId, player2: PlayerId) -> Result<GameState> {
    let (state, _) = GameState::open(game).seat(player1)?;
    let (state, _) = state.seat(player2)?;
    Ok(state)
}
