//! Board model: squares, pieces and per-game snapshots

mod piece;
mod snapshot;
mod square;

pub use piece::{GameId, Piece, PieceId, PlayerId, PlayerNumber};
pub use snapshot::Board;
pub use square::{is_legal_square, Direction, Square};
