//! Parsing of the lines typed at the `chess-play` prompt.

use chess_core::{Position, PositionError};
use thiserror::Error;

/// Errors produced by [`Command::parse`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid square: {0}")]
    Square(#[from] PositionError),
    #[error("expected four numbers (from-row from-col to-row to-col), got '{0}'")]
    Coordinates(String),
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
}

/// A single prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move given as two square names, e.g. `e2e4` or `e2 e4`.
    Move { from: Position, to: Position },
    /// A move given as raw `(row, col)` pairs, row 0 being Black's back rank.
    /// Range checking is left to the engine.
    Coords { from: (i32, i32), to: (i32, i32) },
    Undo,
    New,
    /// List legal moves, optionally only those starting on a square.
    Moves(Option<Position>),
    Board,
    Help,
    Quit,
    Empty,
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            [] => Ok(Command::Empty),
            ["undo"] | ["u"] => Ok(Command::Undo),
            ["new"] => Ok(Command::New),
            ["board"] | ["b"] => Ok(Command::Board),
            ["help"] | ["?"] => Ok(Command::Help),
            ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
            ["moves"] => Ok(Command::Moves(None)),
            ["moves", square] => Ok(Command::Moves(Some(Position::from_algebraic(square)?))),
            [from, to] => Ok(Command::Move {
                from: Position::from_algebraic(from)?,
                to: Position::from_algebraic(to)?,
            }),
            [pair] if pair.len() == 4 && pair.is_ascii() => Ok(Command::Move {
                from: Position::from_algebraic(&pair[..2])?,
                to: Position::from_algebraic(&pair[2..])?,
            }),
            [r1, c1, r2, c2] => {
                let nums = [r1, c1, r2, c2]
                    .iter()
                    .map(|s| s.parse::<i32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| CommandError::Coordinates(input.to_string()))?;
                Ok(Command::Coords {
                    from: (nums[0], nums[1]),
                    to: (nums[2], nums[3]),
                })
            }
            _ => Err(CommandError::Unknown(input.to_string())),
        }
    }
}

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  e2e4 | e2 e4     move a piece between two squares
  6 4 4 4          move by raw row/col (row 0 is Black's back rank)
  moves [square]   list legal moves, optionally from one square
  undo             take back the last move
  new              start a new game
  board            redraw the board
  quit             leave";
