//! The 8x8 board and its squares.

use crate::{Color, Piece, Position};
use std::fmt;
use std::ops::{Index, IndexMut};

/// The contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    #[default]
    Empty,
    Occupied(Color, Piece),
}

impl Square {
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// Returns the color of the occupant, if any.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Square::Empty => None,
            Square::Occupied(color, _) => Some(color),
        }
    }

    /// Returns the piece type of the occupant, if any.
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Square::Empty => None,
            Square::Occupied(_, piece) => Some(piece),
        }
    }

    /// Returns true if this square holds a piece of the given color.
    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Returns true if this square holds exactly this piece.
    #[inline]
    pub fn is(self, color: Color, piece: Piece) -> bool {
        self == Square::Occupied(color, piece)
    }
}

/// Row-major 8x8 grid of squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Square; 8]; 8],
}

impl Board {
    /// Back rank piece order from the a-file to the h-file.
    const BACK_RANK: [Piece; 8] = [
        Piece::Rook,
        Piece::Knight,
        Piece::Bishop,
        Piece::Queen,
        Piece::King,
        Piece::Bishop,
        Piece::Knight,
        Piece::Rook,
    ];

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[Square::Empty; 8]; 8],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_row() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, piece) in Self::BACK_RANK.iter().enumerate() {
                board.squares[back][col] = Square::Occupied(color, *piece);
                board.squares[pawns][col] = Square::Occupied(color, Piece::Pawn);
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.row() as usize][pos.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.row() as usize][pos.col() as usize] = square;
    }

    /// Empties a square and returns what was there.
    #[inline]
    pub fn take(&mut self, pos: Position) -> Square {
        std::mem::take(&mut self[pos])
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Color, Piece)> + '_ {
        Position::all().filter_map(move |pos| match self.get(pos) {
            Square::Occupied(color, piece) => Some((pos, color, piece)),
            Square::Empty => None,
        })
    }

    /// Returns every position holding the given piece.
    pub fn find(&self, color: Color, piece: Piece) -> Vec<Position> {
        self.pieces()
            .filter(|&(_, c, p)| c == color && p == piece)
            .map(|(pos, _, _)| pos)
            .collect()
    }

    /// Renders the board one row per line, Black's back rank first.
    ///
    /// `glyph` maps an occupant to its character; empty squares print as `.`.
    pub fn render<F>(&self, coordinates: bool, glyph: F) -> String
    where
        F: Fn(Color, Piece) -> char,
    {
        let mut out = String::new();
        for (row, squares) in self.squares.iter().enumerate() {
            if coordinates {
                out.push(Position::at(row as u8, 0).map_or('?', |p| p.rank_char()));
                out.push(' ');
            }
            for (col, square) in squares.iter().enumerate() {
                if col > 0 {
                    out.push(' ');
                }
                out.push(match square {
                    Square::Empty => '.',
                    Square::Occupied(color, piece) => glyph(*color, *piece),
                });
            }
            out.push('\n');
        }
        if coordinates {
            out.push_str("  a b c d e f g h\n");
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<Position> for Board {
    type Output = Square;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        &self.squares[pos.row() as usize][pos.col() as usize]
    }
}

impl IndexMut<Position> for Board {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.squares[pos.row() as usize][pos.col() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, |color, piece| piece.to_char(color)))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        f.write_str(&self.render(true, |color, piece| piece.to_char(color)))
    }
}
