//! Game state with legal move computation and reversible move application.
//!
//! The [`GameState`] struct owns the board and everything needed to answer
//! what may be played next:
//! - The side to move and both kings' squares
//! - The en-passant target left by a pawn double step
//! - Move history, enough to undo every ply exactly
//! - The legal moves, check, pins, and checkmate/stalemate flags, refreshed
//!   after every applied or undone move

use crate::movegen::detect::{self, Check, Detection, Pin};
use crate::movegen::{Generator, MoveList};
use chess_core::{Board, Color, Move, Piece, Position, PositionError, Square};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;
use tracing::{debug, trace};

/// One entry of the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The move that was played.
    pub mov: Move,
    /// The en-passant target in force before the move.
    pub prior_en_passant: Option<Position>,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "White wins by checkmate"),
            GameResult::BlackWins => write!(f, "Black wins by checkmate"),
            GameResult::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Error type for game operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The move does not match any legal move in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error(transparent)]
    InvalidPosition(#[from] PositionError),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("more than one {0} king on the board")]
    ExtraKing(Color),

    #[error("{0} is in check but not on move")]
    OpponentInCheck(Color),
}

/// A chess game in progress.
///
/// Mutated only through [`apply_move`](GameState::apply_move),
/// [`try_move`](GameState::try_move) and
/// [`undo_last_move`](GameState::undo_last_move).
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    /// King squares indexed by [`Color::index`].
    kings: [Position; 2],
    en_passant: Option<Position>,
    history: Vec<HistoryEntry>,
    in_check: bool,
    pins: Vec<Pin>,
    checks: Vec<Check>,
    legal: MoveList,
    checkmate: bool,
    stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
            .expect("standard board is a valid setup")
    }

    /// Creates a game from an arbitrary arrangement.
    ///
    /// Each side must have exactly one king, and the side that just moved
    /// must not be in check. No en-passant target is set.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, GameError> {
        let king_of = |color: Color| match board.find(color, Piece::King).as_slice() {
            [] => Err(GameError::MissingKing(color)),
            [king] => Ok(*king),
            _ => Err(GameError::ExtraKing(color)),
        };
        let kings = [king_of(Color::White)?, king_of(Color::Black)?];

        let them = side_to_move.opposite();
        if detect::scan(&board, kings[them.index()], them).in_check {
            return Err(GameError::OpponentInCheck(them));
        }
        Ok(Self::assemble(board, side_to_move, kings))
    }

    fn assemble(board: Board, side_to_move: Color, kings: [Position; 2]) -> Self {
        let mut state = GameState {
            board,
            side_to_move,
            kings,
            en_passant: None,
            history: Vec::new(),
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            legal: MoveList::new(),
            checkmate: false,
            stalemate: false,
        };
        state.refresh();
        state
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns a copy of the board for rendering.
    pub fn board_snapshot(&self) -> Board {
        self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the square of the given side's king.
    pub fn king_position(&self, color: Color) -> Position {
        self.kings[color.index()]
    }

    /// The square a pawn may capture onto en passant, if any.
    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> &[Move] {
        self.legal.as_slice()
    }

    /// Returns the legal moves starting on `from`.
    pub fn moves_from(&self, from: Position) -> impl Iterator<Item = &Move> + '_ {
        self.legal.as_slice().iter().filter(move |m| m.from() == from)
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Pins against the side to move.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pieces currently giving check to the side to move.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        if self.checkmate {
            Some(match self.side_to_move {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            })
        } else if self.stalemate {
            Some(GameResult::Stalemate)
        } else {
            None
        }
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.stalemate
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|entry| &entry.mov)
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the square-pair notation of every move played.
    pub fn move_log(&self) -> Vec<String> {
        self.history.iter().map(|entry| entry.mov.notation()).collect()
    }

    /// Applies a move equal to one of the current legal moves.
    pub fn apply_move(&mut self, m: &Move) -> Result<(), GameError> {
        if !self.legal.as_slice().contains(m) {
            debug!(mv = %m, "rejected move");
            return Err(GameError::IllegalMove(m.notation()));
        }
        self.play(*m);
        Ok(())
    }

    /// Plays the legal move travelling from `from` to `to`, as chosen by two
    /// clicks. Returns the move that was played.
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Move, GameError> {
        let found = self.legal.as_slice().iter().find(|m| m.connects(from, to));
        match found {
            Some(&m) => {
                self.play(m);
                Ok(m)
            }
            None => {
                debug!(from = %from, to = %to, "no legal move between squares");
                Err(GameError::IllegalMove(format!("{}{}", from, to)))
            }
        }
    }

    /// Like [`try_move`](GameState::try_move), taking raw `(row, col)` pairs.
    pub fn try_move_coords(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<Move, GameError> {
        let from = Position::try_from(from)?;
        let to = Position::try_from(to)?;
        self.try_move(from, to)
    }

    /// Applies a move known to be legal.
    pub(crate) fn play(&mut self, m: Move) {
        let us = m.mover();

        self.board.set(m.from(), Square::Empty);
        let placed = if m.is_promotion() {
            Square::Occupied(us, Piece::Queen)
        } else {
            m.moved()
        };
        self.board.set(m.to(), placed);
        if let Some(victim) = m.en_passant_victim() {
            self.board.set(victim, Square::Empty);
        }

        if m.piece() == Piece::King {
            self.kings[us.index()] = m.to();
        }

        let prior_en_passant = self.en_passant;
        self.en_passant = if m.is_double_step() {
            Position::at((m.from().row() + m.to().row()) / 2, m.from().col())
        } else {
            None
        };

        self.side_to_move = us.opposite();
        self.history.push(HistoryEntry {
            mov: m,
            prior_en_passant,
        });
        debug!(mv = %m, ply = self.history.len(), "applied move");

        self.refresh();
    }

    /// Takes back the last move. Returns it, or `None` if nothing was played.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let HistoryEntry {
            mov: m,
            prior_en_passant,
        } = self.history.pop()?;

        self.board.set(m.from(), m.moved());
        match m.en_passant_victim() {
            Some(victim) => {
                self.board.set(m.to(), Square::Empty);
                self.board.set(victim, m.captured());
            }
            None => self.board.set(m.to(), m.captured()),
        }

        if m.piece() == Piece::King {
            self.kings[m.mover().index()] = m.from();
        }
        self.en_passant = prior_en_passant;
        self.side_to_move = m.mover();
        debug!(mv = %m, ply = self.history.len(), "undid move");

        self.refresh();
        Some(m)
    }

    /// Runs the pin/check scan from the side to move's king.
    fn detect(&self) -> Detection {
        let us = self.side_to_move;
        detect::scan(&self.board, self.kings[us.index()], us)
    }

    /// Returns true if the side to move's king could stand on `to`.
    fn king_square_is_safe(&mut self, to: Position) -> bool {
        let probe = KingProbe::relocate(self, to);
        !probe.detect().in_check
    }

    /// Recomputes legal moves and the check and terminal flags.
    fn refresh(&mut self) {
        let detection = self.detect();
        trace!(
            checks = detection.checks.len(),
            pins = detection.pins.len(),
            "scanned king"
        );
        let legal = self.compute_legal(&detection);

        self.checkmate = legal.is_empty() && detection.in_check;
        self.stalemate = legal.is_empty() && !detection.in_check;
        self.in_check = detection.in_check;
        self.pins = detection.pins;
        self.checks = detection.checks;
        self.legal = legal;

        if let Some(result) = self.result() {
            debug!(%result, "game over");
        }
    }

    fn compute_legal(&mut self, detection: &Detection) -> MoveList {
        let us = self.side_to_move;
        let king = self.kings[us.index()];
        let generator = Generator::new(self.board, us, king, self.en_passant, &detection.pins);
        let mut moves = MoveList::new();

        match detection.checks.as_slice() {
            [] => generator.generate_all(&mut moves, |to| self.king_square_is_safe(to)),
            [check] => {
                generator.generate_all(&mut moves, |to| self.king_square_is_safe(to));
                let targets = detect::evasion_squares(king, check);
                moves.retain(|m| {
                    m.piece() == Piece::King
                        || targets.contains(&m.to())
                        || m.en_passant_victim() == Some(check.square)
                });
            }
            // Double check: only the king can answer.
            _ => generator.king_moves(king, &mut moves, &mut |to| self.king_square_is_safe(to)),
        }
        moves
    }
}

/// Temporarily relocates the tracked king of the side to move.
///
/// The original square is restored when the probe is dropped.
struct KingProbe<'a> {
    game: &'a mut GameState,
    color: Color,
    home: Position,
}

impl<'a> KingProbe<'a> {
    fn relocate(game: &'a mut GameState, to: Position) -> Self {
        let color = game.side_to_move;
        let home = std::mem::replace(&mut game.kings[color.index()], to);
        KingProbe { game, color, home }
    }
}

impl Deref for KingProbe<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game
    }
}

impl Drop for KingProbe<'_> {
    fn drop(&mut self) {
        self.game.kings[self.color.index()] = self.home;
    }
}
