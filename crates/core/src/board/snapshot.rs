//! Board snapshot: every live piece of one game, keyed by square.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId, PlayerId};
use super::square::Square;
use crate::error::{Error, Result};

/// The pieces of one game at one instant.
///
/// Built fresh from the stored piece list for every call. Holds at most one
/// piece per square, and piece ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Piece>", into = "Vec<Piece>")]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    pub fn from_pieces<I>(pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Self::empty();
        let mut ids = HashSet::new();

        for piece in pieces {
            if !ids.insert(piece.id) {
                return Err(Error::DuplicatePiece(piece.id));
            }
            let slot = &mut board.squares[piece.square.index()];
            if slot.is_some() {
                return Err(Error::DuplicateSquare(piece.square.to_string()));
            }
            *slot = Some(piece);
        }

        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index()].as_ref()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Live pieces in square order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces_of(&self, owner: PlayerId) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.owner == owner)
    }

    pub fn count_owned(&self, owner: PlayerId) -> usize {
        self.pieces_of(owner).count()
    }

    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pieces().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The piece list handed back to the persistence layer.
    pub fn to_pieces(&self) -> Vec<Piece> {
        self.pieces().copied().collect()
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Relocates the piece on `from` to the empty square `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<&mut Piece> {
        if self.is_occupied(to) {
            return None;
        }
        let mut piece = self.remove(from)?;
        piece.square = to;
        let slot = &mut self.squares[to.index()];
        *slot = Some(piece);
        slot.as_mut()
    }
}

impl TryFrom<Vec<Piece>> for Board {
    type Error = Error;

    fn try_from(pieces: Vec<Piece>) -> Result<Self> {
        Board::from_pieces(pieces)
    }
}

impl From<Board> for Vec<Piece> {
    fn from(board: Board) -> Self {
        board.to_pieces()
    }
}
