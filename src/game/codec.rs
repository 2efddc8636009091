//! Board snapshot encoding.
//!
//! A board is stored as a JSON document: a 10×9 array of optional pieces plus the
//! list of captured pieces. Pieces carry their row/col for readers of the
//! document, but decoding always takes the position from the grid cell.

use serde::{Serialize, Deserialize};

use crate::config::game::{BOARD_COLS, BOARD_ROWS};
use crate::game::board::Board;
use crate::game::error::GameError;
use crate::game::types::{CapturedPiece, Color, Piece, PieceKind, Position};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PieceDocument {
    #[serde(rename = "type")]
    kind: PieceKind,
    color: Color,
    row: i32,
    col: i32,
    is_captured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardDocument {
    board: Vec<Vec<Option<PieceDocument>>>,
    #[serde(default)]
    captured_pieces: Vec<PieceDocument>,
}

impl PieceDocument {
    fn new(piece: Piece, at: Position, is_captured: bool) -> Self {
        Self { kind: piece.kind, color: piece.color, row: at.row, col: at.col, is_captured }
    }

    fn piece(&self) -> Piece {
        Piece::new(self.kind, self.color)
    }
}

pub fn encode_board(board: &Board) -> Result<String, GameError> {
    let grid = (0..BOARD_ROWS)
        .map(|row| {
            (0..BOARD_COLS)
                .map(|col| {
                    let at = Position::new(row, col);
                    board.at(at).map(|piece| PieceDocument::new(piece, at, false))
                })
                .collect()
        })
        .collect();
    let captured_pieces = board
        .captured()
        .iter()
        .map(|c| PieceDocument::new(c.piece, c.at, true))
        .collect();

    serde_json::to_string(&BoardDocument { board: grid, captured_pieces })
        .map_err(|e| GameError::Snapshot(e.to_string()))
}

pub fn decode_board(raw: &str) -> Result<Board, GameError> {
    let doc: BoardDocument =
        serde_json::from_str(raw).map_err(|e| GameError::Snapshot(e.to_string()))?;

    if doc.board.len() != BOARD_ROWS as usize
        || doc.board.iter().any(|row| row.len() != BOARD_COLS as usize)
    {
        return Err(GameError::Snapshot(format!(
            "expected a {}x{} grid",
            BOARD_ROWS, BOARD_COLS
        )));
    }

    let mut board = Board::new();
    for (row, cells) in doc.board.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(cell) = cell {
                board.set(row as i32, col as i32, Some(cell.piece()));
            }
        }
    }
    for captured in &doc.captured_pieces {
        board.push_captured(CapturedPiece {
            piece: captured.piece(),
            at: Position::new(captured.row, captured.col),
        });
    }
    Ok(board)
}
