//! Board coordinates and ray directions.

use std::fmt;
use thiserror::Error;

/// File letters indexed by column.
const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank digits indexed by row. Row 0 is rank 8, row 7 is rank 1.
const RANKS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// Errors produced when building a [`Position`] from external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("invalid square name: {0:?}")]
    InvalidAlgebraic(String),
}

/// A square coordinate on the 8x8 board.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's (rank 1);
/// column 0 is the a-file. A `Position` is always on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, rejecting coordinates outside `[0, 7]`.
    pub fn new(row: i32, col: i32) -> Result<Self, PositionError> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(PositionError::OutOfBounds { row, col })
        }
    }

    /// Creates a position from on-board indices, returning `None` otherwise.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Parses a square name such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Result<Self, PositionError> {
        let invalid = || PositionError::InvalidAlgebraic(s.to_string());
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let col = FILES
            .iter()
            .position(|&c| c == f.to_ascii_lowercase())
            .ok_or_else(invalid)?;
        let row = RANKS.iter().position(|&c| c == r).ok_or_else(invalid)?;
        Ok(Position {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the position `steps` squares away along `dir`, if on the board.
    #[inline]
    pub fn step(self, dir: Direction, steps: i8) -> Option<Self> {
        self.offset(dir.dr * steps, dir.dc * steps)
    }

    /// Returns the position shifted by the given row and column deltas.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterates over all 64 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position { row, col }))
    }

    /// Returns the file letter of this position.
    #[inline]
    pub const fn file_char(self) -> char {
        FILES[self.col as usize]
    }

    /// Returns the rank digit of this position.
    #[inline]
    pub const fn rank_char(self) -> char {
        RANKS[self.row as usize]
    }

    /// Returns the algebraic name of this position (e.g. `"e4"`).
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = PositionError;

    fn try_from((row, col): (i32, i32)) -> Result<Self, Self::Error> {
        Position::new(row, col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {} = {})", self.row, self.col, self.to_algebraic())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// A unit step on the board, used for rays, pins, and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const UP: Direction = Direction::new(-1, 0);
    pub const DOWN: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(0, -1);
    pub const RIGHT: Direction = Direction::new(0, 1);
    pub const UP_LEFT: Direction = Direction::new(-1, -1);
    pub const UP_RIGHT: Direction = Direction::new(-1, 1);
    pub const DOWN_LEFT: Direction = Direction::new(1, -1);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);

    /// Rook directions: up, left, down, right.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::UP,
        Direction::LEFT,
        Direction::DOWN,
        Direction::RIGHT,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::UP_LEFT,
        Direction::UP_RIGHT,
        Direction::DOWN_LEFT,
        Direction::DOWN_RIGHT,
    ];

    /// Orthogonal rays followed by diagonal rays.
    pub const ALL: [Direction; 8] = [
        Direction::UP,
        Direction::LEFT,
        Direction::DOWN,
        Direction::RIGHT,
        Direction::UP_LEFT,
        Direction::UP_RIGHT,
        Direction::DOWN_LEFT,
        Direction::DOWN_RIGHT,
    ];

    #[inline]
    pub const fn new(dr: i8, dc: i8) -> Self {
        Direction { dr, dc }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Direction::new(-self.dr, -self.dc)
    }

    /// Returns true if both components are non-zero.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0
    }

    /// Returns true if `other` lies on the same line as `self`, in either sense.
    #[inline]
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }
}
