//! Win/loss detection

use serde::{Deserialize, Serialize};

use crate::board::{Board, PlayerId, PlayerNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Player1Eliminated,
    Player2Eliminated,
    /// A seat is still open; nobody can lose yet.
    WaitingForOpponent,
}

/// Result of a finished game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Won,
    Lost,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        matches!(self, Outcome::Player1Eliminated | Outcome::Player2Eliminated)
    }

    pub fn loser(&self) -> Option<PlayerNumber> {
        match self {
            Outcome::Player1Eliminated => Some(PlayerNumber::One),
            Outcome::Player2Eliminated => Some(PlayerNumber::Two),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerNumber> {
        self.loser().map(PlayerNumber::other)
    }

    pub fn verdict_for(&self, seat: PlayerNumber) -> Option<Verdict> {
        self.loser()
            .map(|loser| if loser == seat { Verdict::Lost } else { Verdict::Won })
    }

    /// Message shown to the player in `seat`, if the game has ended.
    pub fn message(&self, seat: PlayerNumber) -> Option<&'static str> {
        self.verdict_for(seat).map(|verdict| match verdict {
            Verdict::Won => "You won!",
            Verdict::Lost => "You lost!",
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ongoing => "ongoing",
            Outcome::Player1Eliminated => "player1_eliminated",
            Outcome::Player2Eliminated => "player2_eliminated",
            Outcome::WaitingForOpponent => "waiting_for_opponent",
        }
    }
}

/// Reports whether either seated player has run out of pieces.
///
/// Advisory only: nothing stops a caller from loading a finished game.
pub fn evaluate_outcome(board: &Board, player1: Option<PlayerId>, player2: Option<PlayerId>) -> Outcome {
    let (Some(player1), Some(player2)) = (player1, player2) else {
        return Outcome::WaitingForOpponent;
    };

    if board.count_owned(player1) == 0 {
        Outcome::Player1Eliminated
    } else if board.count_owned(player2) == 0 {
        Outcome::Player2Eliminated
    } else {
        Outcome::Ongoing
    }
}
