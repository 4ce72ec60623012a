//! An interactive game: one [`GameState`] plus display settings, driven one
//! input line at a time.

use crate::command::{Command, HELP};
use crate::config::DisplayConfig;
use chess_core::{Move, Position};
use chess_engine::{new_game, GameState};
use std::io::{self, Write};
use tracing::info;

/// What the input loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    game: GameState,
    display: DisplayConfig,
}

impl Session {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            game: new_game(),
            display,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Handles one input line, writing any response to `out`.
    ///
    /// Bad input and illegal moves are reported to `out`; only I/O failures
    /// are returned as errors.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Move { from, to } => {
                if self.refuse_if_over(out)? {
                    return Ok(Flow::Continue);
                }
                let result = self.game.try_move(from, to);
                self.report_move(result, out)?;
            }
            Command::Coords { from, to } => {
                if self.refuse_if_over(out)? {
                    return Ok(Flow::Continue);
                }
                let result = self.game.try_move_coords(from, to);
                self.report_move(result, out)?;
            }
            Command::Undo => match self.game.undo_last_move() {
                Some(m) => {
                    writeln!(out, "took back {m}")?;
                    self.print_position(out)?;
                }
                None => writeln!(out, "nothing to undo")?,
            },
            Command::New => {
                info!("starting a new game");
                self.game = new_game();
                self.print_position(out)?;
            }
            Command::Moves(from) => self.print_moves(from, out)?,
            Command::Board => self.print_position(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    /// Draws the board followed by the status line.
    pub fn print_position<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let unicode = self.display.unicode;
        let diagram = self.game.board().render(self.display.coordinates, |color, piece| {
            if unicode {
                piece.to_unicode(color)
            } else {
                piece.to_char(color)
            }
        });
        write!(out, "{diagram}")?;

        match self.game.result() {
            Some(result) => writeln!(out, "{result}")?,
            None if self.game.in_check() => {
                writeln!(out, "{} to move, in check", self.game.side_to_move())?
            }
            None => writeln!(out, "{} to move", self.game.side_to_move())?,
        }

        if self.display.show_moves && !self.game.is_game_over() {
            self.print_moves(None, out)?;
        }
        Ok(())
    }

    fn print_moves<W: Write>(&self, from: Option<Position>, out: &mut W) -> io::Result<()> {
        let moves: Vec<String> = match from {
            Some(square) => self.game.moves_from(square).map(Move::notation).collect(),
            None => self.game.legal_moves().iter().map(Move::notation).collect(),
        };
        if moves.is_empty() {
            writeln!(out, "no legal moves")
        } else {
            writeln!(out, "{}", moves.join(" "))
        }
    }

    fn refuse_if_over<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        match self.game.result() {
            Some(result) => {
                writeln!(out, "{result}; 'undo' or 'new' to continue")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn report_move<W: Write, E: std::fmt::Display>(
        &self,
        result: Result<Move, E>,
        out: &mut W,
    ) -> io::Result<()> {
        match result {
            Ok(_) => self.print_position(out),
            Err(e) => writeln!(out, "error: {e}"),
        }
    }
}
