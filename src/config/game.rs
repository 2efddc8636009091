/// Board geometry constants.
/// 
/// This module defines the fixed dimensions of the Janggi board and the
/// special zones (palaces and river) that constrain piece movement.

/// Number of rows on the board.
pub const BOARD_ROWS: i32 = 10;

/// Number of columns on the board.
pub const BOARD_COLS: i32 = 9;

/// Columns shared by both palaces.
pub const PALACE_COLS: std::ops::RangeInclusive<i32> = 3..=5;

/// Rows of the red palace (top of the board).
pub const RED_PALACE_ROWS: std::ops::RangeInclusive<i32> = 0..=2;

/// Rows of the blue palace (bottom of the board).
pub const BLUE_PALACE_ROWS: std::ops::RangeInclusive<i32> = 7..=9;

/// Last row on red's side of the river. Blue's side starts at the next row.
pub const RIVER_LAST_RED_ROW: i32 = 4;
