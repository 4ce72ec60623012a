//! Move representation.

use crate::{Board, Color, Piece, Position, Square};
use std::fmt;

/// A single ply.
///
/// Equality is structural over every field, so two independently built moves
/// with the same endpoints, occupants and flags compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Position,
    to: Position,
    mover: Color,
    piece: Piece,
    captured: Square,
    en_passant: bool,
    promotion: bool,
}

impl Move {
    /// Creates a move of `piece` from `from` to `to`, reading the captured
    /// occupant from `board`.
    ///
    /// An en-passant move records the opposing pawn as captured, since the
    /// destination square itself is empty. A pawn reaching its last row is
    /// flagged as a promotion.
    pub fn new(
        from: Position,
        to: Position,
        mover: Color,
        piece: Piece,
        board: &Board,
        en_passant: bool,
    ) -> Self {
        let captured = if en_passant {
            Square::Occupied(mover.opposite(), Piece::Pawn)
        } else {
            board.get(to)
        };
        Move {
            from,
            to,
            mover,
            piece,
            captured,
            en_passant,
            promotion: piece == Piece::Pawn && to.row() == mover.promotion_row(),
        }
    }

    /// Builds a move from a board snapshot, taking the mover from `from`.
    ///
    /// Returns `None` if `from` is empty.
    pub fn from_board(from: Position, to: Position, board: &Board, en_passant: bool) -> Option<Self> {
        match board.get(from) {
            Square::Occupied(color, piece) => {
                Some(Move::new(from, to, color, piece, board, en_passant))
            }
            Square::Empty => None,
        }
    }

    #[inline]
    pub const fn from(&self) -> Position {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Position {
        self.to
    }

    /// The color of the moving piece.
    #[inline]
    pub const fn mover(&self) -> Color {
        self.mover
    }

    /// The type of the moving piece, before any promotion.
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The moving piece as it sat on the origin square.
    #[inline]
    pub const fn moved(&self) -> Square {
        Square::Occupied(self.mover, self.piece)
    }

    /// What the move captures; `Square::Empty` for quiet moves.
    #[inline]
    pub const fn captured(&self) -> Square {
        self.captured
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion
    }

    /// Returns true for a pawn advancing two rows.
    #[inline]
    pub fn is_double_step(&self) -> bool {
        self.piece == Piece::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// The square the captured pawn actually stands on for an en-passant move:
    /// beside the destination, on the origin row.
    #[inline]
    pub fn en_passant_victim(&self) -> Option<Position> {
        if self.en_passant {
            Position::at(self.from.row(), self.to.col())
        } else {
            None
        }
    }

    /// Returns true if this move travels between the two given squares.
    #[inline]
    pub fn connects(&self, from: Position, to: Position) -> bool {
        self.from == from && self.to == to
    }

    /// Returns the square-pair notation for this move (e.g., "e2e4").
    pub fn notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.notation())?;
        if self.en_passant {
            write!(f, " e.p.")?;
        }
        if self.promotion {
            write!(f, " =Q")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
