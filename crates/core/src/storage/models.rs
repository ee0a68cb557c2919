//! Stored models

use serde::{Deserialize, Serialize};

use crate::board::{GameId, PieceId, PlayerId, Square};
use crate::rules::MoveResult;

/// One entry of a game's move history. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: i64,
    pub game: GameId,
    pub player: PlayerId,
    pub piece: PieceId,
    pub position_before: Square,
    pub position_after: Square,
    pub captured: Option<PieceId>,
    pub promoted: bool,
    pub created_at: u64,
}

impl MoveRecord {
    pub fn from_result(id: i64, game: GameId, result: &MoveResult, created_at: u64) -> Self {
        Self {
            id,
            game,
            player: result.player,
            piece: result.piece,
            position_before: result.source,
            position_after: result.destination,
            captured: result.captured,
            promoted: result.promoted,
            created_at,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
