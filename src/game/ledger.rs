//! Append-only log of applied plies, one ordered sequence per game.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::game::error::GameError;
use crate::game::types::{Color, PieceKind};

/// One applied ply. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub game_id: Uuid,
    pub player_name: String,
    pub from_row: i32,
    pub from_col: i32,
    pub to_row: i32,
    pub to_col: i32,
    pub piece_type: PieceKind,
    pub piece_color: Color,
    pub captured_piece_type: Option<PieceKind>,
    pub sequence_number: u32,
    /// Stamped by the store when the move is appended.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct MoveLedger {
    moves: HashMap<Uuid, Vec<MoveRecord>>,
}

impl MoveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move. Its sequence number must be exactly one past the current count.
    pub fn append(&mut self, record: MoveRecord) -> Result<&MoveRecord, GameError> {
        let entries = self.moves.entry(record.game_id).or_default();
        let expected = entries.len() as u32 + 1;
        if record.sequence_number != expected {
            return Err(GameError::invalid_state(format!(
                "move {} out of sequence for game {}, expected {}",
                record.sequence_number, record.game_id, expected
            )));
        }
        entries.push(record);
        Ok(&entries[entries.len() - 1])
    }

    /// All moves of a game, oldest first.
    pub fn moves_for(&self, game_id: Uuid) -> &[MoveRecord] {
        self.moves.get(&game_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_for(&self, game_id: Uuid) -> u32 {
        self.moves_for(game_id).len() as u32
    }

    pub fn remove_game(&mut self, game_id: Uuid) {
        self.moves.remove(&game_id);
    }
}
