//! Error types for checkers-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{GameId, PieceId, PlayerId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("Two pieces on square {0}")]
    DuplicateSquare(String),

    #[error("Piece id {0} used twice")]
    DuplicatePiece(PieceId),

    #[error("Piece {piece} belongs to game {found}, not game {expected}")]
    ForeignPiece {
        piece: PieceId,
        expected: GameId,
        found: GameId,
    },

    #[error("Game {0} not found")]
    GameNotFound(GameId),

    #[error("Game {0} has no open seat")]
    GameFull(GameId),

    #[error("Player {player} is already seated in game {game}")]
    AlreadySeated { game: GameId, player: PlayerId },

    #[error("Move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a move request is rejected.
///
/// These are validation outcomes shown to the player, never fatal. A rejected
/// request leaves the game untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveError {
    #[error("It is not your turn.")]
    NotYourTurn,

    #[error("That is not a legal position.")]
    InvalidSourceSquare,

    #[error("You have no piece at that location.")]
    NoPieceAtSource,

    #[error("Piece destination is required.")]
    MissingDestination,

    #[error("That is not a legal move.")]
    IllegalMove,

    #[error("There is a piece there already.")]
    DestinationOccupied,
}

impl MoveError {
    pub const ALL: [MoveError; 6] = [
        MoveError::NotYourTurn,
        MoveError::InvalidSourceSquare,
        MoveError::NoPieceAtSource,
        MoveError::MissingDestination,
        MoveError::IllegalMove,
        MoveError::DestinationOccupied,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveError::NotYourTurn => "not_your_turn",
            MoveError::InvalidSourceSquare => "invalid_source_square",
            MoveError::NoPieceAtSource => "no_piece_at_source",
            MoveError::MissingDestination => "missing_destination",
            MoveError::IllegalMove => "illegal_move",
            MoveError::DestinationOccupied => "destination_occupied",
        }
    }
}
