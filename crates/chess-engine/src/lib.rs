//! Chess rules engine.
//!
//! This crate provides:
//! - [`GameState`] - board, side to move, king tracking, en-passant target
//!   and history, with legal moves kept current after every ply
//! - Pseudo-legal move generation per piece type ([`movegen`])
//! - Pin and check detection by ray casting from the king ([`movegen::detect`])
//! - Perft counting for validating the generator ([`movegen::perft`])
//!
//! # Example
//!
//! ```
//! use chess_core::Position;
//! use chess_engine::GameState;
//!
//! let mut game = GameState::new();
//! assert_eq!(game.legal_moves().len(), 20);
//!
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//! game.try_move(e2, e4).unwrap();
//! assert_eq!(game.en_passant_target(), Position::from_algebraic("e3").ok());
//!
//! game.undo_last_move();
//! assert_eq!(game.ply_count(), 0);
//! ```

mod game;
pub mod movegen;

pub use game::{GameError, GameResult, GameState, HistoryEntry};
pub use movegen::detect::{Check, Detection, Pin};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::MoveList;

/// Starts a game from the standard position, White to move.
pub fn new_game() -> GameState {
    GameState::new()
}
