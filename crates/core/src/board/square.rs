//! Dark-square coordinates and diagonal adjacency.
//!
//! Only the 32 squares where file and rank share parity are playable. A
//! [`Square`] can only ever hold one of those, so every other module can
//! treat squares as already validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the 32 playable squares.
///
/// Stored as a dense index ordered by rank, then file: `a1` is 0, `c1` is 1,
/// `b2` is 4 and `h8` is 31.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 32;

    /// Builds a square from zero-based file and rank indices.
    ///
    /// Returns `None` off the board or on a light square.
    pub fn new(file: i8, rank: i8) -> Option<Self> {
        if !Self::is_dark(file, rank) {
            return None;
        }
        Some(Square((rank as u8) * 4 + (file as u8) / 2))
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Square(index as u8))
    }

    /// Whether zero-based `(file, rank)` names a playable square.
    pub fn is_dark(file: i8, rank: i8) -> bool {
        (0..8).contains(&file) && (0..8).contains(&rank) && (file + rank) % 2 == 0
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Square)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based rank, 0 for rank `1`.
    pub fn rank(self) -> i8 {
        (self.0 / 4) as i8
    }

    /// Zero-based file, 0 for file `a`.
    pub fn file(self) -> i8 {
        let rank = self.rank();
        2 * (self.0 % 4) as i8 + rank % 2
    }

    /// Rank as written on the board, `1..=8`.
    pub fn rank_number(self) -> u8 {
        self.rank() as u8 + 1
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file() as u8) as char
    }

    /// The diagonal neighbour in `direction`, or `None` past the edge.
    pub fn neighbor(self, direction: Direction) -> Option<Square> {
        let (df, dr) = direction.offset();
        Square::new(self.file() + df, self.rank() + dr)
    }
}

/// Whether `text` names one of the 32 playable squares, e.g. `"c3"`.
///
/// Only the exact lower-case name counts: `"C3"` and `" c3"` do not.
pub fn is_legal_square(text: &str) -> bool {
    text.parse::<Square>().is_ok()
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] = s.as_bytes() else {
            return Err(Error::InvalidSquare(s.to_string()));
        };

        let file = (file - b'a') as i8;
        let rank = (rank - b'1') as i8;
        Square::new(file, rank).ok_or_else(|| Error::InvalidSquare(s.to_string()))
    }
}

impl TryFrom<String> for Square {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

/// The four diagonals a piece can travel along.
///
/// "Up" is towards rank 8. The numpad codes mirror a keypad seen from
/// player 1's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    pub fn numpad(self) -> u8 {
        match self {
            Direction::UpLeft => 7,
            Direction::UpRight => 9,
            Direction::DownLeft => 1,
            Direction::DownRight => 3,
        }
    }

    /// Only the diagonal keys map to a direction.
    pub fn from_numpad(code: u8) -> Option<Self> {
        match code {
            7 => Some(Direction::UpLeft),
            9 => Some(Direction::UpRight),
            1 => Some(Direction::DownLeft),
            3 => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// `(file, rank)` step.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::UpLeft => (-1, 1),
            Direction::UpRight => (1, 1),
            Direction::DownLeft => (-1, -1),
            Direction::DownRight => (1, -1),
        }
    }
}
