//! Move legality.
//!
//! Pure functions over a board snapshot: nothing here mutates the board, and the
//! same arguments always give the same answer.

use crate::game::board::Board;
use crate::game::types::{Color, Piece, PieceKind, Position};

/// Whether `mover` may move the piece on `from` to `to`.
pub fn is_legal(board: &Board, from: Position, to: Position, mover: Color) -> bool {
    if !board.is_valid(from.row, from.col) || !board.is_valid(to.row, to.col) {
        return false;
    }
    let Some(piece) = board.at(from) else {
        return false;
    };
    if piece.color != mover {
        return false;
    }
    if board.at(to).is_some_and(|target| target.color == mover) {
        return false;
    }
    is_legal_for_piece(board, piece, from, to)
}

fn is_legal_for_piece(board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    let (abs_row, abs_col) = (d_row.abs(), d_col.abs());

    match piece.kind {
        PieceKind::King => {
            piece.color.in_palace(to) && abs_row <= 1 && abs_col <= 1 && (abs_row, abs_col) != (0, 0)
        }
        PieceKind::Guard => piece.color.in_palace(to) && abs_row == 1 && abs_col == 1,
        PieceKind::Elephant => {
            piece.color.owns_row(to.row)
                && abs_row == 2
                && abs_col == 2
                && board.at(from.offset(d_row / 2, d_col / 2)).is_none()
        }
        PieceKind::Horse => {
            let leg = match (abs_row, abs_col) {
                (2, 1) => from.offset(d_row.signum(), 0),
                (1, 2) => from.offset(0, d_col.signum()),
                _ => return false,
            };
            board.at(leg).is_none()
        }
        PieceKind::Chariot => is_straight(from, to) && pieces_between(board, from, to) == 0,
        PieceKind::Cannon => {
            if !is_straight(from, to) {
                return false;
            }
            let screens = pieces_between(board, from, to);
            match board.at(to) {
                None => screens == 0,
                Some(_) => screens == 1,
            }
        }
        PieceKind::Soldier => {
            let forward = piece.color.forward();
            let crossed = !piece.color.owns_row(from.row);
            match (d_row, abs_col) {
                (r, 0) if r == forward => true,
                (0, 1) => crossed,
                _ => false,
            }
        }
    }
}

fn is_straight(from: Position, to: Position) -> bool {
    from != to && (from.row == to.row || from.col == to.col)
}

/// Count occupied cells strictly between two cells on a shared row or column,
/// walking one unit step at a time.
fn pieces_between(board: &Board, from: Position, to: Position) -> usize {
    let step_row = (to.row - from.row).signum();
    let step_col = (to.col - from.col).signum();
    let mut count = 0;
    let mut cur = from.offset(step_row, step_col);
    while cur != to {
        if board.at(cur).is_some() {
            count += 1;
        }
        cur = cur.offset(step_row, step_col);
    }
    count
}

/// True once at least one king has left the board.
pub fn is_game_over(board: &Board) -> bool {
    !board.has_king(Color::Red) || !board.has_king(Color::Blue)
}

/// The side whose king is still standing, if exactly one is.
pub fn surviving_side(board: &Board) -> Option<Color> {
    match (board.has_king(Color::Red), board.has_king(Color::Blue)) {
        (true, false) => Some(Color::Red),
        (false, true) => Some(Color::Blue),
        _ => None,
    }
}

/// Every cell the piece on `from` may legally move to, by scanning the whole board.
/// Empty when `from` holds no piece.
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    let Some(piece) = board.at(from) else {
        return Vec::new();
    };
    (0..Board::CELLS)
        .filter_map(Position::from_index)
        .filter(|to| is_legal(board, from, *to, piece.color))
        .collect()
}
