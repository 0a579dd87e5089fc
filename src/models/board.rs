use chess::{Color, Piece, Square, ALL_SQUARES};

use crate::error::ProtocolError;
use crate::game::board_string;

/// A piece as the client sees it: color plus kind, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardPiece {
    pub color: Color,
    pub kind: Piece,
}

impl BoardPiece {
    pub fn new(color: Color, kind: Piece) -> Self {
        Self { color, kind }
    }
}

/// What an apply touched, handed on to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardChange {
    /// Squares whose occupant was written with a different value, in first-touched order.
    Squares(Vec<Square>),
    /// The whole board was replaced.
    All,
}

impl BoardChange {
    pub fn is_empty(&self) -> bool {
        matches!(self, BoardChange::Squares(squares) if squares.is_empty())
    }
}

/// Occupancy of all 64 squares. There is always exactly one slot per square;
/// `None` is an empty square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    squares: [Option<BoardPiece>; 64],
}

impl Default for BoardState {
    fn default() -> Self {
        Self { squares: [None; 64] }
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_squares(squares: [Option<BoardPiece>; 64]) -> Self {
        Self { squares }
    }

    pub fn occupant(&self, square: Square) -> Option<BoardPiece> {
        self.squares[square.to_index()]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupant(square).is_some()
    }

    /// Occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, BoardPiece)> + '_ {
        ALL_SQUARES
            .iter()
            .filter_map(move |&square| self.occupant(square).map(|piece| (square, piece)))
    }

    /// Write each entry in order. Squares not named keep their occupant, and a
    /// square named twice ends up with the later value.
    pub fn apply_update(&mut self, entries: &[(Square, Option<BoardPiece>)]) -> BoardChange {
        let mut changed: Vec<Square> = Vec::new();
        for &(square, occupant) in entries {
            let slot = &mut self.squares[square.to_index()];
            if *slot != occupant {
                *slot = occupant;
                if !changed.contains(&square) {
                    changed.push(square);
                }
            }
        }
        BoardChange::Squares(changed)
    }

    /// Replace every square from a full board string. On error the board is
    /// left as it was.
    pub fn apply_full_board(&mut self, encoded: &str) -> Result<BoardChange, ProtocolError> {
        let decoded = board_string::decode(encoded)?;
        *self = decoded;
        Ok(BoardChange::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::utils::parse_square;

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    fn white_pawn() -> BoardPiece {
        BoardPiece::new(Color::White, Piece::Pawn)
    }

    fn opening() -> BoardState {
        let mut board = BoardState::new();
        board
            .apply_full_board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .unwrap();
        board
    }

    #[test]
    fn new_board_is_empty() {
        let board = BoardState::new();
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board.occupant(sq("e4")), None);
    }

    #[test]
    fn empty_diff_is_identity() {
        let mut board = opening();
        let before = board.clone();
        let change = board.apply_update(&[]);
        assert!(change.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn diff_is_idempotent() {
        let diff = [(sq("e2"), None), (sq("e4"), Some(white_pawn()))];

        let mut once = opening();
        once.apply_update(&diff);

        let mut twice = opening();
        twice.apply_update(&diff);
        let second = twice.apply_update(&diff);

        assert_eq!(once, twice);
        assert!(second.is_empty());
    }

    #[test]
    fn diff_leaves_other_squares_untouched() {
        let mut board = opening();
        let before = board.clone();
        let change = board.apply_update(&[(sq("e2"), None), (sq("e4"), Some(white_pawn()))]);

        assert_eq!(change, BoardChange::Squares(vec![sq("e2"), sq("e4")]));
        assert_eq!(board.occupant(sq("e2")), None);
        assert_eq!(board.occupant(sq("e4")), Some(white_pawn()));
        for &square in ALL_SQUARES.iter() {
            if square != sq("e2") && square != sq("e4") {
                assert_eq!(board.occupant(square), before.occupant(square));
            }
        }
    }

    #[test]
    fn repeated_square_last_write_wins() {
        let mut board = BoardState::new();
        let black_queen = BoardPiece::new(Color::Black, Piece::Queen);
        board.apply_update(&[(sq("d5"), Some(white_pawn())), (sq("d5"), Some(black_queen))]);
        assert_eq!(board.occupant(sq("d5")), Some(black_queen));
    }

    #[test]
    fn full_board_overwrites_stale_squares() {
        let mut board = BoardState::new();
        board.apply_update(&[(sq("e5"), Some(white_pawn()))]);

        let change = board
            .apply_full_board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
            .unwrap();

        assert_eq!(change, BoardChange::All);
        assert_eq!(board.occupant(sq("e5")), None);
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn bad_full_board_leaves_board_alone() {
        let mut board = opening();
        let before = board.clone();
        assert!(board.apply_full_board("not a board").is_err());
        assert_eq!(board, before);
    }
}
