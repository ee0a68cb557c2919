//! Legal destinations for a single piece

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::board::{Board, Piece, PlayerId, PlayerNumber, Square};
use crate::game::GameState;

/// Everything one piece may do this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoves {
    /// One-step moves onto an empty neighbour.
    pub simple: BTreeSet<Square>,
    /// Jump landing square mapped to the piece jumped over.
    pub captures: BTreeMap<Square, Piece>,
}

impl LegalMoves {
    pub fn contains(&self, square: Square) -> bool {
        self.simple.contains(&square) || self.captures.contains_key(&square)
    }

    pub fn victim(&self, destination: Square) -> Option<&Piece> {
        self.captures.get(&destination)
    }

    pub fn capture_destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.captures.keys().copied()
    }

    /// Simple and capture destinations together.
    pub fn destinations(&self) -> BTreeSet<Square> {
        self.simple
            .iter()
            .copied()
            .chain(self.capture_destinations())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.captures.is_empty()
    }
}

/// Enumerates the moves of `piece`, sitting in seat `side`, on behalf of
/// `acting`. Any piece not owned by `acting` can be jumped.
///
/// Captures are single jumps; landing squares are never searched for a
/// follow-up jump.
pub fn legal_moves(board: &Board, piece: &Piece, side: PlayerNumber, acting: PlayerId) -> LegalMoves {
    let mut moves = LegalMoves::default();

    for direction in piece.directions(side) {
        let Some(next) = piece.square.neighbor(direction) else {
            continue;
        };

        match board.piece_at(next) {
            None => {
                moves.simple.insert(next);
            }
            Some(other) if other.owner != acting => {
                if let Some(landing) = next.neighbor(direction) {
                    if !board.is_occupied(landing) {
                        moves.captures.insert(landing, *other);
                    }
                }
            }
            Some(_) => {}
        }
    }

    debug!(
        piece = %piece.id,
        from = %piece.square,
        simple = moves.simple.len(),
        captures = moves.captures.len(),
        "enumerated moves"
    );

    moves
}

/// Every `(source, destination)` pair open to the player in seat `side`.
///
/// Empty when the seat is open or the player is boxed in.
pub fn legal_moves_for_side(state: &GameState, side: PlayerNumber) -> Vec<(Square, Square)> {
    let Some(player) = state.game().seat(side) else {
        return Vec::new();
    };

    state
        .board()
        .pieces_of(player)
        .flat_map(|piece| {
            legal_moves(state.board(), piece, side, player)
                .destinations()
                .into_iter()
                .map(move |to| (piece.square, to))
        })
        .collect()
}
