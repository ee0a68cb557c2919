//! In-memory game store

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::models::MoveRecord;
use super::GameStore;
use crate::board::GameId;
use crate::error::{Error, Result};
use crate::game::{GameRecord, GameState};
use crate::rules::MoveResult;

#[derive(Default)]
struct Tables {
    last_game_id: i64,
    last_move_id: i64,
    games: BTreeMap<GameId, GameState>,
    moves: BTreeMap<GameId, Vec<MoveRecord>>,
}

/// Keeps every game in process memory. Ids start at 1, like SQLite rowids.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

impl GameStore for MemoryStore {
    fn create_game(&self) -> Result<GameId> {
        let mut tables = self.tables();
        tables.last_game_id += 1;
        let id = GameId(tables.last_game_id);
        tables.games.insert(id, GameState::open(id));
        tables.moves.insert(id, Vec::new());
        debug!(game = %id, "created game");
        Ok(id)
    }

    fn load(&self, id: GameId) -> Result<GameState> {
        self.tables()
            .games
            .get(&id)
            .cloned()
            .ok_or(Error::GameNotFound(id))
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let mut tables = self.tables();
        let slot = tables
            .games
            .get_mut(&state.id())
            .ok_or(Error::GameNotFound(state.id()))?;
        *slot = state.clone();
        debug!(game = %state.id(), pieces = state.board().len(), "saved game");
        Ok(())
    }

    fn record_move(&self, game: GameId, result: &MoveResult) -> Result<MoveRecord> {
        let mut tables = self.tables();
        if !tables.games.contains_key(&game) {
            return Err(Error::GameNotFound(game));
        }
        tables.last_move_id += 1;
        let record = MoveRecord::from_result(tables.last_move_id, game, result, Self::now());
        tables.moves.entry(game).or_default().push(record.clone());
        Ok(record)
    }

    fn history(&self, game: GameId) -> Result<Vec<MoveRecord>> {
        self.tables()
            .moves
            .get(&game)
            .cloned()
            .ok_or(Error::GameNotFound(game))
    }

    fn delete_game(&self, id: GameId) -> Result<()> {
        let mut tables = self.tables();
        tables.games.remove(&id).ok_or(Error::GameNotFound(id))?;
        tables.moves.remove(&id);
        debug!(game = %id, "deleted game");
        Ok(())
    }

    fn list_games(&self) -> Result<Vec<GameRecord>> {
        Ok(self.tables().games.values().map(|s| *s.game()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceId, PlayerId, PlayerNumber};
    use crate::rules::{apply_move, MoveRequest};

    #[test]
    fn test_create_and_load() {
        let store = MemoryStore::new();
        let first = store.create_game().unwrap();
        let second = store.create_game().unwrap();
        assert_eq!(first, GameId(1));
        assert_eq!(second, GameId(2));

        let state = store.load(first).unwrap();
        assert!(state.board().is_empty());
        assert_eq!(state.game().open_seat(), Some(PlayerNumber::One));
        assert_eq!(store.list_games().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_game() {
        let store = MemoryStore::new();
        assert!(matches!(store.load(GameId(9)), Err(Error::GameNotFound(GameId(9)))));
        assert!(matches!(
            store.save(&GameState::open(GameId(9))),
            Err(Error::GameNotFound(_))
        ));
        assert!(store.history(GameId(9)).is_err());
        assert!(store.delete_game(GameId(9)).is_err());
    }

    #[test]
    fn test_save_and_record_history() {
        let store = MemoryStore::new();
        let id = store.create_game().unwrap();
        let (state, _) = store.load(id).unwrap().seat(PlayerId(10)).unwrap();
        let (state, _) = state.seat(PlayerId(20)).unwrap();
        store.save(&state).unwrap();

        let t = apply_move(&state, &MoveRequest::new(PlayerId(10), "e3", "f4")).unwrap();
        store.save(&t.state).unwrap();
        let record = store.record_move(id, &t.result).unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.piece, PieceId(11));
        assert_eq!(record.position_before.to_string(), "e3");
        assert_eq!(record.position_after.to_string(), "f4");
        assert!(!record.is_capture());

        assert_eq!(store.history(id).unwrap(), vec![record]);
        assert_eq!(store.load(id).unwrap(), t.state);
    }

    #[test]
    fn test_delete_drops_history() {
        let store = MemoryStore::new();
        let id = store.create_game().unwrap();
        store.delete_game(id).unwrap();
        assert!(store.load(id).is_err());
        assert!(store.history(id).is_err());
        assert!(store.list_games().unwrap().is_empty());
    }
}
