//! Pin and check detection.
//!
//! Everything is found by walking outward from the king: along the eight
//! rays for sliders, pawns and the enemy king, and over the knight offsets.

use chess_core::{Board, Color, Direction, Piece, Position, Square};

/// Knight jumps as (row, col) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// An allied piece that shields its king from an enemy slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    /// Where the pinned piece stands.
    pub square: Position,
    /// Ray direction from the king through the pinned piece.
    pub direction: Direction,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    /// Where the checking piece stands.
    pub square: Position,
    /// Ray direction from the king towards the checker; `None` for a knight.
    pub direction: Option<Direction>,
}

/// The result of scanning from a king.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl Detection {
    /// Returns the pin direction constraining the piece on `square`, if any.
    pub fn pin_on(&self, square: Position) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }

    /// Returns true if two or more pieces give check at once.
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() > 1
    }
}

/// Returns true if `piece`, met first at `distance` along `dir` from a king
/// of the opposite color, attacks that king through the ray.
fn attacks_along(piece: Piece, attacker: Color, dir: Direction, distance: i8) -> bool {
    match piece {
        Piece::Rook => !dir.is_diagonal(),
        Piece::Bishop => dir.is_diagonal(),
        Piece::Queen => true,
        // The pawn must be one diagonal step away and advancing towards the king.
        Piece::Pawn => distance == 1 && dir.is_diagonal() && dir.dr == -attacker.pawn_direction(),
        Piece::King => distance == 1,
        Piece::Knight => false,
    }
}

/// Scans from `king` for pins on `us` pieces and checks by the opponent.
///
/// `king` need not be where the board's king actually stands: a king of
/// color `us` met along a ray is stepped over, so a king square can be probed
/// without moving the piece on the board.
pub fn scan(board: &Board, king: Position, us: Color) -> Detection {
    let them = us.opposite();
    let mut detection = Detection::default();

    for dir in Direction::ALL {
        let mut blocker: Option<Position> = None;
        for distance in 1..8 {
            let Some(pos) = king.step(dir, distance) else {
                break;
            };
            match board.get(pos) {
                Square::Empty => {}
                Square::Occupied(color, Piece::King) if color == us => {}
                Square::Occupied(color, _) if color == us => {
                    if blocker.is_some() {
                        break;
                    }
                    blocker = Some(pos);
                }
                Square::Occupied(_, piece) => {
                    if attacks_along(piece, them, dir, distance) {
                        match blocker {
                            None => {
                                detection.in_check = true;
                                detection.checks.push(Check {
                                    square: pos,
                                    direction: Some(dir),
                                });
                            }
                            Some(square) => detection.pins.push(Pin {
                                square,
                                direction: dir,
                            }),
                        }
                    }
                    break;
                }
            }
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        let Some(pos) = king.offset(dr, dc) else {
            continue;
        };
        if board.get(pos).is(them, Piece::Knight) {
            detection.in_check = true;
            detection.checks.push(Check {
                square: pos,
                direction: None,
            });
        }
    }

    detection
}

/// Squares a non-king piece may move to in order to answer a single check:
/// the checker's square, plus the squares between it and the king for a
/// ray attack.
pub fn evasion_squares(king: Position, check: &Check) -> Vec<Position> {
    let Some(dir) = check.direction else {
        return vec![check.square];
    };
    let mut squares = Vec::new();
    for distance in 1..8 {
        let Some(pos) = king.step(dir, distance) else {
            break;
        };
        squares.push(pos);
        if pos == check.square {
            break;
        }
    }
    squares
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

    #[test]
    fn starting_position_is_quiet() {
        let board = Board::standard();
        assert_eq!(scan(&board, pos("e1"), Color::White), Detection::default());
        assert_eq!(scan(&board, pos("e8"), Color::Black), Detection::default());
    }

    #[test]
    fn rook_check_on_file() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "e8", Color::Black, Piece::Rook);

        let d = scan(&board, pos("e1"), Color::White);
        assert!(d.in_check);
        assert_eq!(
            d.checks,
            vec![Check {
                square: pos("e8"),
                direction: Some(Direction::UP),
            }]
        );
        assert!(d.pins.is_empty());
    }

    #[test]
    fn bishop_pins_knight() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "d2", Color::White, Piece::Knight);
        place(&mut board, "a5", Color::Black, Piece::Bishop);

        let d = scan(&board, pos("e1"), Color::White);
        assert!(!d.in_check);
        assert_eq!(
            d.pins,
            vec![Pin {
                square: pos("d2"),
                direction: Direction::UP_LEFT,
            }]
        );
        assert_eq!(d.pin_on(pos("d2")), Some(Direction::UP_LEFT));
    }

    #[test]
    fn two_blockers_mean_no_pin() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "e2", Color::White, Piece::Rook);
        place(&mut board, "e3", Color::White, Piece::Bishop);
        place(&mut board, "e8", Color::Black, Piece::Queen);

        assert_eq!(scan(&board, pos("e1"), Color::White), Detection::default());
    }

    #[test]
    fn rook_on_diagonal_is_inert() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "h4", Color::Black, Piece::Rook);
        place(&mut board, "a1", Color::Black, Piece::Bishop);

        assert_eq!(scan(&board, pos("e1"), Color::White), Detection::default());
    }

    #[test]
    fn pawn_checks_only_forward_diagonal() {
        let mut board = Board::empty();
        place(&mut board, "e4", Color::White, Piece::King);
        place(&mut board, "d5", Color::Black, Piece::Pawn);
        assert!(scan(&board, pos("e4"), Color::White).in_check);

        let mut board = Board::empty();
        place(&mut board, "e4", Color::White, Piece::King);
        place(&mut board, "d3", Color::Black, Piece::Pawn);
        assert!(!scan(&board, pos("e4"), Color::White).in_check);

        let mut board = Board::empty();
        place(&mut board, "e5", Color::Black, Piece::King);
        place(&mut board, "f4", Color::White, Piece::Pawn);
        assert!(scan(&board, pos("e5"), Color::Black).in_check);
    }

    #[test]
    fn adjacent_king_counts_as_check() {
        let mut board = Board::empty();
        place(&mut board, "e4", Color::White, Piece::King);
        place(&mut board, "e6", Color::Black, Piece::King);
        assert!(!scan(&board, pos("e4"), Color::White).in_check);
        assert!(scan(&board, pos("e5"), Color::White).in_check);
    }

    // Knight checks are found by adding the offsets to the king's square.
    #[test]
    fn knight_check_relative_to_king() {
        let mut board = Board::empty();
        place(&mut board, "e4", Color::White, Piece::King);
        place(&mut board, "f6", Color::Black, Piece::Knight);

        let d = scan(&board, pos("e4"), Color::White);
        assert!(d.in_check);
        assert_eq!(
            d.checks,
            vec![Check {
                square: pos("f6"),
                direction: None,
            }]
        );

        // A knight on a square that is a raw offset from the corner, but not
        // a knight's jump from the king, gives no check.
        let mut board = Board::empty();
        place(&mut board, "e4", Color::White, Piece::King);
        place(&mut board, "b7", Color::Black, Piece::Knight);
        assert!(!scan(&board, pos("e4"), Color::White).in_check);
    }

    #[test]
    fn own_king_is_transparent_when_probing() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "a1", Color::Black, Piece::Rook);

        // Stepping to f1 stays on the rook's rank.
        assert!(scan(&board, pos("f1"), Color::White).in_check);
        assert!(!scan(&board, pos("f2"), Color::White).in_check);
    }

    #[test]
    fn double_check() {
        let mut board = Board::empty();
        place(&mut board, "e1", Color::White, Piece::King);
        place(&mut board, "e8", Color::Black, Piece::Rook);
        place(&mut board, "d3", Color::Black, Piece::Knight);

        let d = scan(&board, pos("e1"), Color::White);
        assert!(d.is_double_check());
    }

    #[test]
    fn evasion_squares_for_slider_and_knight() {
        let king = pos("e1");
        let rook = Check {
            square: pos("e4"),
            direction: Some(Direction::UP),
        };
        assert_eq!(
            evasion_squares(king, &rook),
            vec![pos("e2"), pos("e3"), pos("e4")]
        );

        let knight = Check {
            square: pos("d3"),
            direction: None,
        };
        assert_eq!(evasion_squares(king, &knight), vec![pos("d3")]);
    }
}
