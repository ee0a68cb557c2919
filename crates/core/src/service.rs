//! Game service: the caller that wraps the rules engine with storage
//!
//! Every move runs as load, apply, save, then record under a per-game lock,
//! so two requests for the same game can never interleave. Different games do
//! not block each other. A game's lock only lives in the table while some
//! request holds it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{GameId, PieceId, PlayerId, PlayerNumber};
use crate::error::{MoveError, Result};
use crate::game::GameState;
use crate::rules::{apply_move, evaluate_outcome, MoveRequest, Outcome, Transition};
use crate::storage::{GameStore, MoveRecord};

/// Reply to a move request, applied or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<MoveError>,
    pub is_capture: bool,
    pub captured_piece_id: Option<PieceId>,
    pub promoted: bool,
    pub next_to_move: PlayerNumber,
    pub outcome: Outcome,
}

impl MoveResponse {
    pub fn applied(transition: &Transition) -> Self {
        let result = &transition.result;
        Self {
            applied: true,
            error: None,
            is_capture: result.is_capture,
            captured_piece_id: result.captured,
            promoted: result.promoted,
            next_to_move: result.next_to_move,
            outcome: transition.outcome,
        }
    }

    /// A rejection leaves the turn where it was.
    pub fn rejected(error: MoveError, state: &GameState) -> Self {
        let game = state.game();
        Self {
            applied: false,
            error: Some(error),
            is_capture: false,
            captured_piece_id: None,
            promoted: false,
            next_to_move: game.to_move,
            outcome: evaluate_outcome(state.board(), game.player1, game.player2),
        }
    }

    pub fn message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

type LockTable = Mutex<HashMap<GameId, Arc<Mutex<()>>>>;

/// A claim on one game's lock. The last claim to go removes the table entry.
struct GameLock<'a> {
    table: &'a LockTable,
    id: GameId,
    lock: Arc<Mutex<()>>,
}

impl GameLock<'_> {
    fn hold(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GameLock<'_> {
    fn drop(&mut self) {
        // claims are only cloned under the table lock, so the count is stable here
        let mut locks = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let last = locks
            .get(&self.id)
            .is_some_and(|l| Arc::ptr_eq(l, &self.lock) && Arc::strong_count(l) == 2);
        if last {
            locks.remove(&self.id);
        }
    }
}

pub struct GameService<S> {
    store: S,
    locks: LockTable,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn game_lock(&self, id: GameId) -> GameLock<'_> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        GameLock {
            table: &self.locks,
            id,
            lock: locks.entry(id).or_default().clone(),
        }
    }

    pub fn create_game(&self) -> Result<GameId> {
        let id = self.store.create_game()?;
        info!(game = %id, "game created");
        Ok(id)
    }

    /// Seats `player` in the first open seat and sets out their pieces.
    pub fn join_game(&self, id: GameId, player: PlayerId) -> Result<PlayerNumber> {
        let lock = self.game_lock(id);
        let _guard = lock.hold();

        let state = self.store.load(id)?;
        let (state, number) = state.seat(player)?;
        self.store.save(&state)?;

        info!(game = %id, player = %player, seat = %number, "player joined");
        Ok(number)
    }

    /// Validates and plays one move.
    ///
    /// Rule violations come back inside the response with the game
    /// unchanged; only storage failures are errors.
    pub fn play(&self, id: GameId, request: &MoveRequest) -> Result<MoveResponse> {
        let lock = self.game_lock(id);
        let _guard = lock.hold();

        let state = self.store.load(id)?;
        let transition = match apply_move(&state, request) {
            Ok(t) => t,
            Err(error) => {
                warn!(
                    game = %id,
                    player = %request.player,
                    from = %request.source,
                    to = %request.destination,
                    %error,
                    "move rejected"
                );
                return Ok(MoveResponse::rejected(error, &state));
            }
        };

        self.store.save(&transition.state)?;
        self.store.record_move(id, &transition.result)?;

        info!(
            game = %id,
            player = %request.player,
            from = %transition.result.source,
            to = %transition.result.destination,
            "move played"
        );
        if let Some(loser) = transition.outcome.loser() {
            info!(game = %id, seat = %loser, "player eliminated");
        }

        Ok(MoveResponse::applied(&transition))
    }

    pub fn state(&self, id: GameId) -> Result<GameState> {
        self.store.load(id)
    }

    pub fn outcome(&self, id: GameId) -> Result<Outcome> {
        let state = self.store.load(id)?;
        let game = state.game();
        Ok(evaluate_outcome(state.board(), game.player1, game.player2))
    }

    pub fn history(&self, id: GameId) -> Result<Vec<MoveRecord>> {
        self.store.history(id)
    }

    pub fn delete_game(&self, id: GameId) -> Result<()> {
        let lock = self.game_lock(id);
        let _guard = lock.hold();

        self.store.delete_game(id)?;
        info!(game = %id, "game deleted");
        Ok(())
    }
}
