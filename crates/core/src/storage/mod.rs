//! Persistence seam for games and move history
//!
//! The rules engine never touches storage; the game service loads a
//! [`GameState`] through a [`GameStore`], hands it to the engine, and saves
//! what comes back.

mod memory;
mod models;

pub use memory::MemoryStore;
pub use models::*;

use crate::board::GameId;
use crate::error::Result;
use crate::game::{GameRecord, GameState};
use crate::rules::MoveResult;

pub trait GameStore: Send + Sync {
    /// Creates an empty game with both seats open.
    fn create_game(&self) -> Result<GameId>;

    fn load(&self, id: GameId) -> Result<GameState>;

    /// Replaces the stored record and pieces of an existing game.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Appends an applied move to the game's history.
    fn record_move(&self, game: GameId, result: &MoveResult) -> Result<MoveRecord>;

    /// Moves in the order they were played.
    fn history(&self, game: GameId) -> Result<Vec<MoveRecord>>;

    /// Removes the game, its pieces and its history.
    fn delete_game(&self, id: GameId) -> Result<()>;

    fn list_games(&self) -> Result<Vec<GameRecord>>;
}
