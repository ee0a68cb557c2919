//! Game record and the full state handed to the rules engine

use serde::{Deserialize, Serialize};

use crate::board::{Board, GameId, Piece, PlayerId, PlayerNumber, Square};
use crate::error::{Error, Result};
use crate::rules::setup::populate_board;

/// Who sits where and whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    #[serde(default)]
    pub player1: Option<PlayerId>,
    #[serde(default)]
    pub player2: Option<PlayerId>,
    pub to_move: PlayerNumber,
}

impl GameRecord {
    /// A game with both seats open and player 1 to move.
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            player1: None,
            player2: None,
            to_move: PlayerNumber::One,
        }
    }

    pub fn seat(&self, number: PlayerNumber) -> Option<PlayerId> {
        match number {
            PlayerNumber::One => self.player1,
            PlayerNumber::Two => self.player2,
        }
    }

    pub fn seat_of(&self, player: PlayerId) -> Option<PlayerNumber> {
        if self.player1 == Some(player) {
            Some(PlayerNumber::One)
        } else if self.player2 == Some(player) {
            Some(PlayerNumber::Two)
        } else {
            None
        }
    }

    pub fn open_seat(&self) -> Option<PlayerNumber> {
        if self.player1.is_none() {
            Some(PlayerNumber::One)
        } else if self.player2.is_none() {
            Some(PlayerNumber::Two)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.open_seat().is_none()
    }

    /// The player whose turn it is, if that seat is filled.
    pub fn player_to_move(&self) -> Option<PlayerId> {
        self.seat(self.to_move)
    }
}

/// A game record together with its board.
///
/// Every piece on the board belongs to the record's game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    game: GameRecord,
    #[serde(rename = "pieces")]
    board: Board,
}

#[derive(Deserialize)]
struct RawGameState {
    game: GameRecord,
    pieces: Board,
}

impl TryFrom<RawGameState> for GameState {
    type Error = Error;

    fn try_from(raw: RawGameState) -> Result<Self> {
        GameState::new(raw.game, raw.pieces)
    }
}

impl GameState {
    pub fn new(game: GameRecord, board: Board) -> Result<Self> {
        if let Some(stray) = board.pieces().find(|p| p.game != game.id) {
            return Err(Error::ForeignPiece {
                piece: stray.id,
                expected: game.id,
                found: stray.game,
            });
        }
        Ok(Self { game, board })
    }

    /// Builds a state from the rows the persistence layer keeps.
    pub fn from_parts(game: GameRecord, pieces: Vec<Piece>) -> Result<Self> {
        Self::new(game, Board::from_pieces(pieces)?)
    }

    /// An empty game waiting for both players.
    pub fn open(id: GameId) -> Self {
        Self {
            game: GameRecord::new(id),
            board: Board::empty(),
        }
    }

    pub(crate) fn from_trusted(game: GameRecord, board: Board) -> Self {
        Self { game, board }
    }

    pub fn game(&self) -> &GameRecord {
        &self.game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn id(&self) -> GameId {
        self.game.id
    }

    pub fn to_move(&self) -> PlayerNumber {
        self.game.to_move
    }

    /// Seats `player` in the first open seat and sets out their pieces.
    pub fn seat(&self, player: PlayerId) -> Result<(GameState, PlayerNumber)> {
        if self.game.seat_of(player).is_some() {
            return Err(Error::AlreadySeated {
                game: self.game.id,
                player,
            });
        }
        let number = self.game.open_seat().ok_or(Error::GameFull(self.game.id))?;

        let mut game = self.game;
        match number {
            PlayerNumber::One => game.player1 = Some(player),
            PlayerNumber::Two => game.player2 = Some(player),
        }

        let pieces = self
            .board
            .to_pieces()
            .into_iter()
            .chain(populate_board(game.id, player, number));
        let board = Board::from_pieces(pieces)?;

        Ok((GameState { game, board }, number))
    }

    /// Text diagram with rank 8 on top. Player 1 is `x`, player 2 is `o`,
    /// kings are upper case.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8 {
                let cell = match Square::new(file, rank) {
                    None => ' ',
                    Some(square) => match self.board.piece_at(square) {
                        None => '.',
                        Some(piece) => self.glyph(piece),
                    },
                };
                out.push(' ');
                out.push(cell);
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h\n");
        out
    }

    fn glyph(&self, piece: &Piece) -> char {
        let glyph = match self.game.seat_of(piece.owner) {
            Some(PlayerNumber::One) => 'x',
            Some(PlayerNumber::Two) => 'o',
            None => '?',
        };
        if piece.king {
            glyph.to_ascii_uppercase()
        } else {
            glyph
        }
    }
}
