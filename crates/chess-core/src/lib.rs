//! Core types for chess.
//!
//! This crate provides the fundamental types used across the chess engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Position`] and [`Direction`] for board coordinates and rays
//! - [`Square`] and [`Board`] for board contents
//! - [`Move`] for move representation

mod board;
mod color;
mod mov;
mod piece;
mod position;

pub use board::{Board, Square};
pub use color::Color;
pub use mov::Move;
pub use piece::Piece;
pub use position::{Direction, Position, PositionError};
