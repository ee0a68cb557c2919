//! Move validation and application

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::movegen::legal_moves;
use super::outcome::{evaluate_outcome, Outcome};
use crate::board::{PieceId, PlayerId, PlayerNumber, Square};
use crate::error::MoveError;
use crate::game::{GameRecord, GameState};

/// A move as typed by a player: raw square names plus who is asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub source: String,
    #[serde(default)]
    pub destination: String,
    pub player: PlayerId,
}

impl MoveRequest {
    pub fn new(player: PlayerId, source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            player,
        }
    }
}

/// What an applied move did, for the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub source: Square,
    pub destination: Square,
    pub player: PlayerId,
    pub piece: PieceId,
    pub is_capture: bool,
    pub captured: Option<PieceId>,
    pub promoted: bool,
    pub next_to_move: PlayerNumber,
}

/// The state after a move, with the move's summary and the new outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub result: MoveResult,
    pub outcome: Outcome,
}

/// Validates `request` against `state` and plays it.
///
/// Checks run in a fixed order and the first failure is returned. `state` is
/// only borrowed, so a rejected request never changes anything.
pub fn apply_move(state: &GameState, request: &MoveRequest) -> Result<Transition, MoveError> {
    let game = state.game();
    let board = state.board();
    let side = game.to_move;

    if game.seat(side) != Some(request.player) {
        return Err(MoveError::NotYourTurn);
    }

    let source: Square = request
        .source
        .parse()
        .map_err(|_| MoveError::InvalidSourceSquare)?;

    // someone else's piece and no piece at all look the same to the player
    let piece = board
        .piece_at(source)
        .filter(|p| p.owner == request.player)
        .copied()
        .ok_or(MoveError::NoPieceAtSource)?;

    if request.destination.trim().is_empty() {
        return Err(MoveError::MissingDestination);
    }

    let moves = legal_moves(board, &piece, side, request.player);
    let destination = request
        .destination
        .parse::<Square>()
        .ok()
        .filter(|d| moves.contains(*d))
        .ok_or(MoveError::IllegalMove)?;

    if board.is_occupied(destination) {
        return Err(MoveError::DestinationOccupied);
    }

    let mut next_board = board.clone();
    let captured = moves.victim(destination).copied();
    if let Some(victim) = captured {
        next_board.remove(victim.square);
    }

    let moved = next_board
        .relocate(source, destination)
        .ok_or(MoveError::DestinationOccupied)?;
    let promoted = !moved.king && destination.rank() == side.crowning_rank();
    if promoted {
        moved.king = true;
    }

    let next_game = GameRecord {
        to_move: side.other(),
        ..*game
    };
    let outcome = evaluate_outcome(&next_board, next_game.player1, next_game.player2);

    let result = MoveResult {
        source,
        destination,
        player: request.player,
        piece: piece.id,
        is_capture: captured.is_some(),
        captured: captured.map(|v| v.id),
        promoted,
        next_to_move: next_game.to_move,
    };

    debug!(game = %game.id, from = %source, to = %destination, "applied move");
    if let Some(victim) = captured {
        info!(game = %game.id, piece = %piece.id, captured = %victim.id, "capture");
    }
    if promoted {
        info!(game = %game.id, piece = %piece.id, square = %destination, "crowned");
    }

    Ok(Transition {
        state: GameState::from_trusted(next_game, next_board),
        result,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, GameId, Piece};
    use crate::rules::setup::new_game;

    const P1: PlayerId = PlayerId(10);
    const P2: PlayerId = PlayerId(20);

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn piece(id: u8, owner: PlayerId, square: &str) -> Piece {
        Piece::new(PieceId(id), GameId(1), owner, sq(square))
    }

    fn state_with(to_move: PlayerNumber, pieces: Vec<Piece>) -> GameState {
        let game = GameRecord {
            id: GameId(1),
            player1: Some(P1),
            player2: Some(P2),
            to_move,
        };
        GameState::from_parts(game, pieces).unwrap()
    }

    #[test]
    fn test_simple_move_advances_turn() {
        let state = new_game(GameId(1), P1, P2).unwrap();
        let t = apply_move(&state, &MoveRequest::new(P1, "c3", "d4")).unwrap();

        assert_eq!(t.result.next_to_move, PlayerNumber::Two);
        assert!(!t.result.is_capture);
        assert_eq!(t.result.captured, None);
        assert_eq!(t.state.to_move(), PlayerNumber::Two);
        assert!(t.state.board().piece_at(sq("d4")).is_some());
        assert!(t.state.board().piece_at(sq("c3")).is_none());
        assert_eq!(t.outcome, Outcome::Ongoing);

        // same player again
        let again = apply_move(&t.state, &MoveRequest::new(P1, "d4", "e5"));
        assert_eq!(again.unwrap_err(), MoveError::NotYourTurn);

        let reply = apply_move(&t.state, &MoveRequest::new(P2, "f6", "e5")).unwrap();
        assert_eq!(reply.state.to_move(), PlayerNumber::One);
    }

    #[test]
    fn test_capture_removes_victim() {
        let state = state_with(
            PlayerNumber::One,
            vec![piece(1, P1, "c3"), piece(13, P2, "d4"), piece(14, P2, "h8")],
        );
        let t = apply_move(&state, &MoveRequest::new(P1, "c3", "e5")).unwrap();

        assert!(t.result.is_capture);
        assert_eq!(t.result.captured, Some(PieceId(13)));
        assert!(t.state.board().find(PieceId(13)).is_none());
        assert_eq!(t.state.board().len(), 2);
        // captures do not grant another turn
        assert_eq!(t.state.to_move(), PlayerNumber::Two);
    }

    #[test]
    fn test_last_capture_eliminates() {
        let state = state_with(
            PlayerNumber::Two,
            vec![piece(1, P1, "d4"), piece(13, P2, "e5")],
        );
        let t = apply_move(&state, &MoveRequest::new(P2, "e5", "c3")).unwrap();
        assert_eq!(t.outcome, Outcome::Player1Eliminated);
    }

    #[test]
    fn test_promotion_on_far_rank() {
        let state = state_with(
            PlayerNumber::One,
            vec![piece(1, P1, "c7"), piece(13, P2, "h2")],
        );
        let t = apply_move(&state, &MoveRequest::new(P1, "c7", "d8")).unwrap();
        assert!(t.result.promoted);
        assert!(t.state.board().piece_at(sq("d8")).unwrap().king);

        let t = apply_move(&t.state, &MoveRequest::new(P2, "h2", "g1")).unwrap();
        assert!(t.result.promoted);
        assert!(t.state.board().piece_at(sq("g1")).unwrap().king);
    }

    #[test]
    fn test_kings_stay_kings() {
        let state = state_with(
            PlayerNumber::One,
            vec![piece(1, P1, "d8").crowned(), piece(13, P2, "h4")],
        );
        let t = apply_move(&state, &MoveRequest::new(P1, "d8", "c7")).unwrap();
        assert!(!t.result.promoted);
        assert!(t.state.board().piece_at(sq("c7")).unwrap().king);

        // a king moving back onto its crowning rank is not promoted again
        let t = apply_move(&t.state, &MoveRequest::new(P2, "h4", "g3"));
        let t = apply_move(&t.unwrap().state, &MoveRequest::new(P1, "c7", "b8")).unwrap();
        assert!(!t.result.promoted);
        assert!(t.state.board().piece_at(sq("b8")).unwrap().king);
    }

    #[test]
    fn test_men_cannot_move_backwards() {
        let state = state_with(
            PlayerNumber::One,
            vec![piece(1, P1, "d4"), piece(13, P2, "h8")],
        );
        let err = apply_move(&state, &MoveRequest::new(P1, "d4", "c3")).unwrap_err();
        assert_eq!(err, MoveError::IllegalMove);
    }

    #[test]
    fn test_unseated_player_is_not_on_turn() {
        let state = new_game(GameId(1), P1, P2).unwrap();
        let err = apply_move(&state, &MoveRequest::new(PlayerId(99), "c3", "d4")).unwrap_err();
        assert_eq!(err, MoveError::NotYourTurn);
    }

    #[test]
    fn test_checks_run_in_order() {
        let state = new_game(GameId(1), P1, P2).unwrap();

        // wrong turn beats a bad square
        let err = apply_move(&state, &MoveRequest::new(P2, "zz", "")).unwrap_err();
        assert_eq!(err, MoveError::NotYourTurn);

        // a bad source beats a missing destination
        let err = apply_move(&state, &MoveRequest::new(P1, "", "")).unwrap_err();
        assert_eq!(err, MoveError::InvalidSourceSquare);

        // no piece beats a missing destination
        let err = apply_move(&state, &MoveRequest::new(P1, "d4", "")).unwrap_err();
        assert_eq!(err, MoveError::NoPieceAtSource);

        let err = apply_move(&state, &MoveRequest::new(P1, "c3", "  ")).unwrap_err();
        assert_eq!(err, MoveError::MissingDestination);

        // unparseable and unreachable destinations are both illegal
        let err = apply_move(&state, &MoveRequest::new(P1, "c3", "q9")).unwrap_err();
        assert_eq!(err, MoveError::IllegalMove);
        let err = apply_move(&state, &MoveRequest::new(P1, "c3", "c5")).unwrap_err();
        assert_eq!(err, MoveError::IllegalMove);
    }

    #[test]
    fn test_square_names_must_be_exact() {
        let state = new_game(GameId(1), P1, P2).unwrap();

        for source in ["C3", " c3", "c3 "] {
            let err = apply_move(&state, &MoveRequest::new(P1, source, "d4")).unwrap_err();
            assert_eq!(err, MoveError::InvalidSourceSquare, "source {:?}", source);
        }

        let err = apply_move(&state, &MoveRequest::new(P1, "c3", "D4")).unwrap_err();
        assert_eq!(err, MoveError::IllegalMove);
    }

    #[test]
    fn test_opponent_piece_reads_as_no_piece() {
        let state = new_game(GameId(1), P1, P2).unwrap();
        let err = apply_move(&state, &MoveRequest::new(P1, "f6", "e5")).unwrap_err();
        assert_eq!(err, MoveError::NoPieceAtSource);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let state = state_with(
            PlayerNumber::One,
            vec![piece(1, P1, "c3"), piece(2, P1, "b2"), piece(13, P2, "d4")],
        );
        let before = serde_json::to_string(&state).unwrap();

        let requests = [
            (MoveRequest::new(P2, "d4", "c3"), MoveError::NotYourTurn),
            (MoveRequest::new(P1, "c4", "d5"), MoveError::InvalidSourceSquare),
            (MoveRequest::new(P1, "e3", "f4"), MoveError::NoPieceAtSource),
            (MoveRequest::new(P1, "d4", "e5"), MoveError::NoPieceAtSource),
            (MoveRequest::new(P1, "c3", ""), MoveError::MissingDestination),
            (MoveRequest::new(P1, "c3", "d4"), MoveError::IllegalMove),
        ];
        for (request, expected) in requests {
            assert_eq!(apply_move(&state, &request).unwrap_err(), expected);
            assert_eq!(serde_json::to_string(&state).unwrap(), before);
        }
    }

    #[test]
    fn test_request_json_allows_missing_destination() {
        let request: MoveRequest = serde_json::from_str(r#"{"source": "c3", "player": 10}"#).unwrap();
        assert_eq!(request.destination, "");

        let state = new_game(GameId(1), P1, P2).unwrap();
        assert_eq!(
            apply_move(&state, &request).unwrap_err(),
            MoveError::MissingDestination
        );
    }

    #[test]
    fn test_empty_board_move_fails_cleanly() {
        let state = state_with(PlayerNumber::One, Vec::new());
        assert_eq!(state.board(), &Board::empty());
        let err = apply_move(&state, &MoveRequest::new(P1, "c3", "d4")).unwrap_err();
        assert_eq!(err, MoveError::NoPieceAtSource);
    }
}
