use std::fmt::{Display, Formatter};

use serde::{Serialize, Deserialize};

use crate::config::game::{
    BOARD_COLS, BOARD_ROWS, BLUE_PALACE_ROWS, PALACE_COLS, RED_PALACE_ROWS, RIVER_LAST_RED_ROW,
};

/// A cell coordinate. Zero-based, `row` in `0..10` and `col` in `0..9` when valid.
///
/// Coordinates are signed so that out-of-range input (including negatives coming
/// from clients) can be represented and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..BOARD_ROWS).contains(&self.row) && (0..BOARD_COLS).contains(&self.col)
    }

    /// Flat index into a row-major 10×9 grid, `None` when off the board.
    pub fn index(&self) -> Option<usize> {
        self.is_valid().then(|| (self.row * BOARD_COLS + self.col) as usize)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        let index = i32::try_from(index).ok()?;
        let pos = Self::new(index / BOARD_COLS, index % BOARD_COLS);
        pos.is_valid().then_some(pos)
    }

    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    /// Top side, rows 0-4. Always opens the game.
    Red,
    /// Bottom side, rows 5-9.
    Blue,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Row delta of one step towards the enemy side.
    pub fn forward(self) -> i32 {
        match self {
            Color::Red => 1,
            Color::Blue => -1,
        }
    }

    pub fn in_palace(self, pos: Position) -> bool {
        let rows = match self {
            Color::Red => RED_PALACE_ROWS,
            Color::Blue => BLUE_PALACE_ROWS,
        };
        rows.contains(&pos.row) && PALACE_COLS.contains(&pos.col)
    }

    /// Whether `row` lies on this side's own half of the river.
    pub fn owns_row(self, row: i32) -> bool {
        match self {
            Color::Red => row <= RIVER_LAST_RED_ROW,
            Color::Blue => row > RIVER_LAST_RED_ROW,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "RED"),
            Color::Blue => write!(f, "BLUE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceKind {
    King,
    Guard,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub fn letter(&self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Guard => 'g',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 's',
        }
    }
}

/// A piece on the board. Its position is the cell that holds it, never a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Ascii letter, uppercase for red and lowercase for blue.
    pub fn letter(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::Red => c.to_ascii_uppercase(),
            Color::Blue => c,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A piece removed from play, with the cell it was taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedPiece {
    pub piece: Piece,
    pub at: Position,
}
