//! The 10×9 Janggi board.
//!
//! The board only stores pieces and answers queries about them. It never checks
//! whether a move is legal; see `game::systems::rules` for that.

use std::fmt::{Display, Formatter};

use crate::config::game::{BOARD_COLS, BOARD_ROWS};
use crate::game::types::{CapturedPiece, Color, Piece, PieceKind, Position};

/// Pieces of the back rank, left to right, identical for both sides.
const BACK_RANK: [Option<PieceKind>; 9] = [
    Some(PieceKind::Chariot),
    Some(PieceKind::Horse),
    Some(PieceKind::Elephant),
    Some(PieceKind::Guard),
    None,
    Some(PieceKind::Guard),
    Some(PieceKind::Elephant),
    Some(PieceKind::Horse),
    Some(PieceKind::Chariot),
];

const KING_COL: i32 = 4;
const CANNON_COLS: [i32; 2] = [1, 7];
const SOLDIER_COLS: [i32; 5] = [0, 2, 4, 6, 8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Option<Piece>>,
    captured: Vec<CapturedPiece>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const CELLS: usize = (BOARD_ROWS * BOARD_COLS) as usize;

    /// An empty board with no captures.
    pub fn new() -> Self {
        Self {
            cells: vec![None; Self::CELLS],
            captured: Vec::new(),
        }
    }

    /// A board set up with the opening layout.
    pub fn opening() -> Self {
        let mut board = Self::new();
        board.initialize();
        board
    }

    /// Reset to the canonical starting layout: red on rows 0-3, blue mirrored on rows 6-9.
    pub fn initialize(&mut self) {
        *self = Self::new();

        // (color, back rank, king, cannons, soldiers)
        let sides = [(Color::Red, 0, 1, 2, 3), (Color::Blue, 9, 8, 7, 6)];
        for (color, back, king, cannon, soldier) in sides {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                if let Some(kind) = kind {
                    self.set(back, col as i32, Some(Piece::new(*kind, color)));
                }
            }
            self.set(king, KING_COL, Some(Piece::new(PieceKind::King, color)));
            for col in CANNON_COLS {
                self.set(cannon, col, Some(Piece::new(PieceKind::Cannon, color)));
            }
            for col in SOLDIER_COLS {
                self.set(soldier, col, Some(Piece::new(PieceKind::Soldier, color)));
            }
        }
    }

    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        Position::new(row, col).is_valid()
    }

    /// The piece at `(row, col)`. Off-board reads are empty, not an error.
    pub fn get(&self, row: i32, col: i32) -> Option<Piece> {
        self.at(Position::new(row, col))
    }

    pub fn at(&self, pos: Position) -> Option<Piece> {
        pos.index().and_then(|i| self.cells[i])
    }

    /// Place or clear a cell. Off-board writes are ignored.
    pub fn set(&mut self, row: i32, col: i32, piece: Option<Piece>) {
        if let Some(i) = Position::new(row, col).index() {
            self.cells[i] = piece;
        }
    }

    /// Move whatever is on `from` to `to` without any rule check.
    ///
    /// A piece already on `to` is recorded as captured and returned. Moving from an
    /// empty or off-board cell changes nothing.
    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let (Some(src), Some(dst)) = (from.index(), to.index()) else {
            return None;
        };
        let piece = self.cells[src].take()?;
        let taken = self.cells[dst].replace(piece);
        if let Some(taken) = taken {
            self.captured.push(CapturedPiece { piece: taken, at: to });
        }
        taken
    }

    pub fn captured(&self) -> &[CapturedPiece] {
        &self.captured
    }

    pub(crate) fn push_captured(&mut self, captured: CapturedPiece) {
        self.captured.push(captured);
    }

    /// Iterate over occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let piece = (*cell)?;
            Position::from_index(i).map(|pos| (pos, piece))
        })
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.pieces()
            .any(|(_, p)| p.kind == PieceKind::King && p.color == color)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_ROWS {
            write!(f, "{row} ")?;
            for col in 0..BOARD_COLS {
                match self.get(row, col) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for col in 0..BOARD_COLS {
            write!(f, " {col}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(kind: PieceKind, color: Color) -> Option<Piece> {
        Some(Piece::new(kind, color))
    }

    #[test]
    fn test_opening_layout_exact() {
        let board = Board::opening();
        assert_eq!(board.pieces().count(), 32);
        assert!(board.captured().is_empty());

        for (back, color) in [(0, Color::Red), (9, Color::Blue)] {
            assert_eq!(board.get(back, 0), piece(PieceKind::Chariot, color));
            assert_eq!(board.get(back, 1), piece(PieceKind::Horse, color));
            assert_eq!(board.get(back, 2), piece(PieceKind::Elephant, color));
            assert_eq!(board.get(back, 3), piece(PieceKind::Guard, color));
            assert_eq!(board.get(back, 4), None);
            assert_eq!(board.get(back, 5), piece(PieceKind::Guard, color));
            assert_eq!(board.get(back, 6), piece(PieceKind::Elephant, color));
            assert_eq!(board.get(back, 7), piece(PieceKind::Horse, color));
            assert_eq!(board.get(back, 8), piece(PieceKind::Chariot, color));
        }

        assert_eq!(board.get(1, 4), piece(PieceKind::King, Color::Red));
        assert_eq!(board.get(8, 4), piece(PieceKind::King, Color::Blue));
        for col in [1, 7] {
            assert_eq!(board.get(2, col), piece(PieceKind::Cannon, Color::Red));
            assert_eq!(board.get(7, col), piece(PieceKind::Cannon, Color::Blue));
        }
        for col in [0, 2, 4, 6, 8] {
            assert_eq!(board.get(3, col), piece(PieceKind::Soldier, Color::Red));
            assert_eq!(board.get(6, col), piece(PieceKind::Soldier, Color::Blue));
        }
        for row in [4, 5] {
            assert!((0..9).all(|col| board.get(row, col).is_none()));
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut board = Board::opening();
        board.relocate(Position::new(3, 0), Position::new(4, 0));
        board.initialize();
        assert_eq!(board, Board::opening());
        board.initialize();
        assert_eq!(board, Board::opening());
    }

    #[test]
    fn test_out_of_range_access() {
        let mut board = Board::opening();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(10, 4), None);
        assert_eq!(board.get(0, 9), None);
        assert!(!board.is_valid(0, -1));

        let before = board.clone();
        board.set(12, 3, piece(PieceKind::King, Color::Red));
        board.set(-3, 3, None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_relocate_records_capture() {
        let mut board = Board::new();
        board.set(0, 0, piece(PieceKind::Chariot, Color::Red));
        board.set(5, 0, piece(PieceKind::Horse, Color::Blue));

        let taken = board.relocate(Position::new(0, 0), Position::new(5, 0));
        assert_eq!(taken, piece(PieceKind::Horse, Color::Blue));
        assert_eq!(board.get(0, 0), None);
        assert_eq!(board.get(5, 0), piece(PieceKind::Chariot, Color::Red));
        assert_eq!(
            board.captured(),
            &[CapturedPiece { piece: Piece::new(PieceKind::Horse, Color::Blue), at: Position::new(5, 0) }]
        );
    }

    #[test]
    fn test_relocate_from_empty_is_noop() {
        let mut board = Board::opening();
        let before = board.clone();
        assert_eq!(board.relocate(Position::new(4, 4), Position::new(3, 4)), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clone_is_deep() {
        let board = Board::opening();
        let mut copy = board.clone();
        copy.relocate(Position::new(0, 0), Position::new(9, 0));
        assert_eq!(copy.captured().len(), 1);
        assert!(board.captured().is_empty());
        assert_eq!(board.get(0, 0), piece(PieceKind::Chariot, Color::Red));
    }

    #[test]
    fn test_has_king() {
        let mut board = Board::opening();
        assert!(board.has_king(Color::Red) && board.has_king(Color::Blue));
        board.set(8, 4, None);
        assert!(!board.has_king(Color::Blue));
    }
}
