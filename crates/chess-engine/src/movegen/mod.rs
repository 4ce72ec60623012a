//! Move generation.
//!
//! This module provides pseudo-legal move generation by piece type. Check
//! safety is left to [`GameState`](crate::GameState), except that pinned
//! pieces already stay on their pin line and king steps are vetted through a
//! caller-supplied probe.

pub mod detect;
pub mod perft;

use chess_core::{Board, Color, Direction, Move, Piece, Position, Square};
use detect::{Pin, KNIGHT_OFFSETS};

/// An ordered list of moves.
///
/// Order is generation order: board squares row-major, then each piece's
/// direction or offset order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// King step offsets, top row first.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Pseudo-legal move generator for one side.
///
/// Holds its own copy of the board so the caller stays free to mutate game
/// state from inside the king probe.
pub(crate) struct Generator<'a> {
    board: Board,
    us: Color,
    king: Position,
    en_passant: Option<Position>,
    pins: &'a [Pin],
}

impl<'a> Generator<'a> {
    pub(crate) fn new(
        board: Board,
        us: Color,
        king: Position,
        en_passant: Option<Position>,
        pins: &'a [Pin],
    ) -> Self {
        Generator {
            board,
            us,
            king,
            en_passant,
            pins,
        }
    }

    fn pin_on(&self, square: Position) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }

    /// A pinned piece may only travel along its pin line.
    fn allowed(pin: Option<Direction>, dir: Direction) -> bool {
        pin.map_or(true, |p| p.is_parallel(dir))
    }

    fn push(&self, moves: &mut MoveList, from: Position, to: Position, piece: Piece) {
        moves.push(Move::new(from, to, self.us, piece, &self.board, false));
    }

    /// Generates moves for every piece of the side to move.
    ///
    /// `king_safe` is asked whether the king may stand on a given square.
    pub(crate) fn generate_all<F>(&self, moves: &mut MoveList, mut king_safe: F)
    where
        F: FnMut(Position) -> bool,
    {
        for (from, color, piece) in self.board.pieces() {
            if color != self.us {
                continue;
            }
            match piece {
                Piece::Pawn => self.pawn_moves(from, moves),
                Piece::Knight => self.knight_moves(from, moves),
                Piece::Bishop => self.slider_moves(from, Piece::Bishop, &Direction::DIAGONAL, moves),
                Piece::Rook => self.slider_moves(from, Piece::Rook, &Direction::ORTHOGONAL, moves),
                Piece::Queen => {
                    self.slider_moves(from, Piece::Queen, &Direction::ORTHOGONAL, moves);
                    self.slider_moves(from, Piece::Queen, &Direction::DIAGONAL, moves);
                }
                Piece::King => self.king_moves(from, moves, &mut king_safe),
            }
        }
    }

    pub(crate) fn pawn_moves(&self, from: Position, moves: &mut MoveList) {
        let pin = self.pin_on(from);
        let forward = self.us.pawn_direction();
        let them = self.us.opposite();

        let advance = Direction::new(forward, 0);
        if let Some(one) = from.step(advance, 1) {
            if self.board.get(one).is_empty() && Self::allowed(pin, advance) {
                self.push(moves, from, one, Piece::Pawn);
                if from.row() == self.us.pawn_start_row() {
                    if let Some(two) = from.step(advance, 2) {
                        if self.board.get(two).is_empty() {
                            self.push(moves, from, two, Piece::Pawn);
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let capture = Direction::new(forward, dc);
            let Some(to) = from.step(capture, 1) else {
                continue;
            };
            if !Self::allowed(pin, capture) {
                continue;
            }
            if self.board.get(to).is_color(them) {
                self.push(moves, from, to, Piece::Pawn);
            } else if self.en_passant == Some(to) && self.en_passant_keeps_king_safe(from, to) {
                moves.push(Move::new(from, to, self.us, Piece::Pawn, &self.board, true));
            }
        }
    }

    /// An en-passant capture empties two squares on one row, which can open
    /// a rank onto the king that no single pin describes. Replay it on a
    /// scratch board and rescan.
    fn en_passant_keeps_king_safe(&self, from: Position, to: Position) -> bool {
        let Some(victim) = Position::at(from.row(), to.col()) else {
            return false;
        };
        let mut board = self.board;
        let pawn = board.take(from);
        board.set(victim, Square::Empty);
        board.set(to, pawn);
        !detect::scan(&board, self.king, self.us).in_check
    }

    pub(crate) fn knight_moves(&self, from: Position, moves: &mut MoveList) {
        // A knight never stays on a line through its own square.
        if self.pin_on(from).is_some() {
            return;
        }
        for (dr, dc) in KNIGHT_OFFSETS {
            if let Some(to) = from.offset(dr, dc) {
                if !self.board.get(to).is_color(self.us) {
                    self.push(moves, from, to, Piece::Knight);
                }
            }
        }
    }

    pub(crate) fn slider_moves(
        &self,
        from: Position,
        piece: Piece,
        directions: &[Direction],
        moves: &mut MoveList,
    ) {
        let pin = self.pin_on(from);
        for &dir in directions {
            if !Self::allowed(pin, dir) {
                continue;
            }
            for distance in 1..8 {
                let Some(to) = from.step(dir, distance) else {
                    break;
                };
                match self.board.get(to) {
                    Square::Empty => self.push(moves, from, to, piece),
                    Square::Occupied(color, _) => {
                        if color != self.us {
                            self.push(moves, from, to, piece);
                        }
                        break;
                    }
                }
            }
        }
    }

    pub(crate) fn king_moves<F>(&self, from: Position, moves: &mut MoveList, king_safe: &mut F)
    where
        F: FnMut(Position) -> bool,
    {
        for (dr, dc) in KING_OFFSETS {
            let Some(to) = from.offset(dr, dc) else {
                continue;
            };
            if !self.board.get(to).is_color(self.us) && king_safe(to) {
                self.push(moves, from, to, Piece::King);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn place(board: &mut Board, s: &str, color: Color, piece: Piece) {
        board.set(pos(s), Square::Occupied(color, piece));
    }

    fn targets(moves: &MoveList) -> Vec<String> {
        let mut out: Vec<String> = moves.into_iter().map(|m| m.to().to_algebraic()).collect();
        out.sort();
        out
    }

    #[test]
    fn movelist_retain() {
        let board = Board::standard();
        let mut list = MoveList::new();
        list.push(Move::from_board(pos("e2"), pos("e3"), &board, false).unwrap());
        list.push(Move::from_board(pos("e2"), pos("e4"), &board, false).unwrap());
        list.push(Move::from_board(pos("g1"), pos("f3"), &board, false).unwrap());

        list.retain(|m| m.from() == pos("e2"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].notation(), "e2e4");

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn startpos_pseudo_legal() {
        let board = Board::standard();
        let gen = Generator::new(board, Color::White, pos("e1"), None, &[]);
        let mut moves = MoveList::new();
        gen.generate_all(&mut moves, |_| true);
        assert_eq!(moves.len(), 20);
        // Row-major scan reaches the a-pawn before the knights.
        assert_eq!(moves[0].notation(), "a2a3");
    }

    #[test]
    fn pawn_double_step_needs_both_squares_clear() {
        let mut board = Board::standard();
        place(&mut board, "e4", Color::Black, Piece::Knight);
        let gen = Generator::new(board, Color::White, pos("e1"), None, &[]);
        let mut moves = MoveList::new();
        gen.pawn_moves(pos("e2"), &mut moves);
        assert_eq!(targets(&moves), vec!["e3"]);

        place(&mut board, "e3", Color::Black, Piece::Knight);
        let gen = Generator::new(board, Color::White, pos("e1"), None, &[]);
        let mut moves = MoveList::new();
        gen.pawn_moves(pos("e2"), &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn pawn_captures_and_en_passant() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "e5", Color::White, Piece::Pawn);
        place(&mut board, "d5", Color::Black, Piece::Pawn);
        place(&mut board, "f6", Color::Black, Piece::Rook);

        let gen = Generator::new(board, Color::White, pos("e1"), Some(pos("d6")), &[]);
        let mut moves = MoveList::new();
        gen.pawn_moves(pos("e5"), &mut moves);
        assert_eq!(targets(&moves), vec!["d6", "e6", "f6"]);
        let ep = moves.into_iter().find(|m| m.to() == pos("d6")).unwrap();
        assert!(ep.is_en_passant());
        assert_eq!(ep.en_passant_victim(), Some(pos("d5")));
    }

    #[test]
    fn en_passant_that_opens_rank_is_skipped() {
        let mut board = Board::empty();
        place(&mut board, "a5", Color::White, Piece::King);
        place(&mut board, "e5", Color::White, Piece::Pawn);
        place(&mut board, "d5", Color::Black, Piece::Pawn);
        place(&mut board, "h5", Color::Black, Piece::Rook);

        let gen = Generator::new(board, Color::White, pos("a5"), Some(pos("d6")), &[]);
        let mut moves = MoveList::new();
        gen.pawn_moves(pos("e5"), &mut moves);
        assert_eq!(targets(&moves), vec!["e6"]);
    }

    #[test]
    fn black_pawn_promotes_on_row_seven() {
        let mut board = Board::empty();
        place(&mut board, "b2", Color::Black, Piece::Pawn);
        place(&mut board, "a1", Color::White, Piece::Rook);

        let gen = Generator::new(board, Color::Black, pos("h8"), None, &[]);
        let mut moves = MoveList::new();
        gen.pawn_moves(pos("b2"), &mut moves);
        assert_eq!(targets(&moves), vec!["a1", "b1"]);
        assert!(moves.into_iter().all(|m| m.is_promotion()));
    }

    #[test]
    fn pinned_pawn_moves_along_pin_in_either_sense() {
        // King above the pawn: the pin ray points down the board, yet the
        // pawn's advance still runs along it.
        let mut board = Board::empty();
        place(&mut board, "e8", Color::White, Piece::King);
        place(&mut board, "e5", Color::White, Piece::Pawn);
        place(&mut board, "e1", Color::Black, Piece::Rook);
        place(&mut board, "d6", Color::Black, Piece::Knight);

        let pins = [Pin {
            square: pos("e5"),
            direction: Direction::DOWN,
        }];
        let gen = Generator::new(board, Color::White, pos("e8"), None, &pins);
        let mut moves = MoveList::new();
        gen.pawn_moves(pos("e5"), &mut moves);
        assert_eq!(targets(&moves), vec!["e6"]);
    }

    #[test]
    fn pinned_knight_is_frozen() {
        let board = Board::standard();
        let pins = [Pin {
            square: pos("g1"),
            direction: Direction::RIGHT,
        }];
        let gen = Generator::new(board, Color::White, pos("e1"), None, &pins);
        let mut moves = MoveList::new();
        gen.knight_moves(pos("g1"), &mut moves);
        assert!(moves.is_empty());
        gen.knight_moves(pos("b1"), &mut moves);
        assert_eq!(targets(&moves), vec!["a3", "c3"]);
    }

    #[test]
    fn pinned_rook_slides_on_pin_line() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "e3", Color::White, Piece::Rook);
        place(&mut board, "e6", Color::Black, Piece::Queen);

        let pins = [Pin {
            square: pos("e3"),
            direction: Direction::UP,
        }];
        let gen = Generator::new(board, Color::White, pos("e1"), None, &pins);
        let mut moves = MoveList::new();
        gen.slider_moves(pos("e3"), Piece::Rook, &Direction::ORTHOGONAL, &mut moves);
        assert_eq!(targets(&moves), vec!["e2", "e4", "e5", "e6"]);

        // A bishop pinned on a file has nowhere to go.
        let mut moves = MoveList::new();
        gen.slider_moves(pos("e3"), Piece::Bishop, &Direction::DIAGONAL, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn slider_stops_at_blockers() {
        let mut board = Board::empty();
        place(&mut board, "d4", Color::White, Piece::Queen);
        place(&mut board, "d6", Color::White, Piece::Pawn);
        place(&mut board, "f6", Color::Black, Piece::Pawn);

        let gen = Generator::new(board, Color::White, pos("h1"), None, &[]);
        let mut moves = MoveList::new();
        gen.slider_moves(pos("d4"), Piece::Queen, &Direction::ORTHOGONAL, &mut moves);
        gen.slider_moves(pos("d4"), Piece::Queen, &Direction::DIAGONAL, &mut moves);
        let t = targets(&moves);
        assert!(t.contains(&"d5".to_string()));
        assert!(!t.contains(&"d6".to_string()));
        assert!(t.contains(&"f6".to_string()));
        assert!(!t.contains(&"g7".to_string()));
        assert_eq!(moves.len(), 22);
    }

    #[test]
    fn king_moves_consult_probe() {
        let mut board = Board::empty();
        place(&mut board, "a1", Color::White, Piece::King);
        place(&mut board, "a2", Color::White, Piece::Pawn);

        let gen = Generator::new(board, Color::White, pos("a1"), None, &[]);
        let mut moves = MoveList::new();
        let mut asked = Vec::new();
        gen.king_moves(pos("a1"), &mut moves, &mut |to| {
            asked.push(to);
            to != pos("b1")
        });
        assert_eq!(targets(&moves), vec!["b2"]);
        assert_eq!(asked.len(), 2);
    }
}
