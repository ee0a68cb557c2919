//! Pieces and the identities that own them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::square::{Direction, Square};

/// A user id as handed to us by the account layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

/// In-game piece number: 1..=12 for player 1, 13..=24 for player 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seat at the table. Player 1 starts on ranks 1-3 and moves up the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    pub fn other(self) -> Self {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }

    /// Diagonals a non-king piece of this seat may use.
    pub fn forward(self) -> [Direction; 2] {
        match self {
            PlayerNumber::One => [Direction::UpLeft, Direction::UpRight],
            PlayerNumber::Two => [Direction::DownLeft, Direction::DownRight],
        }
    }

    /// Zero-based rank on which this seat's pieces are crowned.
    pub fn crowning_rank(self) -> i8 {
        match self {
            PlayerNumber::One => 7,
            PlayerNumber::Two => 0,
        }
    }
}

impl TryFrom<u8> for PlayerNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerNumber::One),
            2 => Ok(PlayerNumber::Two),
            n => Err(format!("player number must be 1 or 2, got {}", n)),
        }
    }
}

impl From<PlayerNumber> for u8 {
    fn from(number: PlayerNumber) -> Self {
        number.as_u8()
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub game: GameId,
    pub owner: PlayerId,
    pub square: Square,
    #[serde(default)]
    pub king: bool,
}

impl Piece {
    pub fn new(id: PieceId, game: GameId, owner: PlayerId, square: Square) -> Self {
        Self {
            id,
            game,
            owner,
            square,
            king: false,
        }
    }

    pub fn crowned(mut self) -> Self {
        self.king = true;
        self
    }

    /// Diagonals this piece may move along when it belongs to `side`.
    pub fn directions(&self, side: PlayerNumber) -> Vec<Direction> {
        if self.king {
            Direction::ALL.to_vec()
        } else {
            side.forward().to_vec()
        }
    }
}
