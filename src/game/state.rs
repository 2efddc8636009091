//! Game lifecycle and turn discipline.
//!
//! A game moves through `Waiting -> InProgress -> Finished`. Every transition
//! below either fully applies or returns an error with the game untouched.
//! The board is kept as an encoded snapshot and rebuilt for each operation.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::game::board::Board;
use crate::game::codec::{decode_board, encode_board};
use crate::game::error::GameError;
use crate::game::ledger::MoveRecord;
use crate::game::systems::rules::{is_game_over, is_legal, surviving_side};
use crate::game::types::{Color, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
    Abandoned,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Abandoned)
    }
}

/// What `Game::leave` did to the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveOutcome {
    /// Red left an empty room; the game should be deleted.
    Deleted,
    /// Red left and blue took over the red seat.
    Promoted,
    /// Blue left; the room is waiting for a new opponent.
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Assigned by the store on first save.
    pub id: Option<Uuid>,
    pub room_title: Option<String>,
    pub red_player_name: Option<String>,
    pub blue_player_name: Option<String>,
    pub current_turn: Color,
    pub game_status: GameStatus,
    pub winner_name: Option<String>,
    /// Encoded board document, see `game::codec`.
    pub board_state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn require_name(name: &str, what: &str) -> Result<(), GameError> {
    if name.trim().is_empty() {
        return Err(GameError::validation(format!("{} is required", what)));
    }
    Ok(())
}

impl Game {
    /// Open a new room with `red_player` seated. Red always moves first.
    pub fn create(red_player: &str, room_title: Option<String>) -> Result<Self, GameError> {
        require_name(red_player, "playerName")?;
        let board_state = encode_board(&Board::opening())?;

        Ok(Self {
            id: None,
            room_title,
            red_player_name: Some(red_player.to_string()),
            blue_player_name: None,
            current_turn: Color::Red,
            game_status: GameStatus::Waiting,
            winner_name: None,
            board_state: Some(board_state),
            created_at: None,
            updated_at: None,
        })
    }

    /// Seat `blue_player` and start the game.
    pub fn join(&mut self, blue_player: &str) -> Result<(), GameError> {
        require_name(blue_player, "playerName")?;
        if self.game_status != GameStatus::Waiting {
            return Err(GameError::invalid_state("game has already started"));
        }
        let Some(red) = self.red_player_name.as_deref() else {
            return Err(GameError::invalid_state("game has no host"));
        };
        if red == blue_player {
            return Err(GameError::invalid_state("cannot join your own game"));
        }
        if self.blue_player_name.is_some() {
            return Err(GameError::invalid_state("another player has already joined"));
        }

        if self.board_state.as_deref().is_none_or(|raw| raw.trim().is_empty()) {
            debug!("[Game] Missing board snapshot for {:?}, starting from the opening", self.id);
            self.board_state = Some(encode_board(&Board::opening())?);
        }
        self.blue_player_name = Some(blue_player.to_string());
        self.game_status = GameStatus::InProgress;
        Ok(())
    }

    /// The side `name` plays, if seated.
    pub fn color_of(&self, name: &str) -> Option<Color> {
        if self.red_player_name.as_deref() == Some(name) {
            Some(Color::Red)
        } else if self.blue_player_name.as_deref() == Some(name) {
            Some(Color::Blue)
        } else {
            None
        }
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.color_of(name).is_some()
    }

    /// Rebuild the board from the stored snapshot.
    pub fn board(&self) -> Result<Board, GameError> {
        match self.board_state.as_deref() {
            Some(raw) if !raw.trim().is_empty() => decode_board(raw),
            _ => Err(GameError::Snapshot("game has no board snapshot".to_string())),
        }
    }

    /// Apply one ply for `mover`, recording it as move number `sequence_number`.
    ///
    /// On success the board, turn, and status are updated together and the new
    /// ledger entry is returned for the caller to append.
    pub fn apply_move(
        &mut self,
        mover: &str,
        from: Position,
        to: Position,
        sequence_number: u32,
    ) -> Result<MoveRecord, GameError> {
        require_name(mover, "playerName")?;
        if self.game_status.is_terminal() {
            return Err(GameError::invalid_state("game is over"));
        }
        if self.game_status != GameStatus::InProgress {
            return Err(GameError::invalid_state("game has not started"));
        }
        let game_id = self
            .id
            .ok_or_else(|| GameError::invalid_state("game has not been saved"))?;
        let color = self
            .color_of(mover)
            .ok_or_else(|| GameError::unauthorized(format!("{} is not a player in this game", mover)))?;
        if color != self.current_turn {
            return Err(GameError::unauthorized(format!("it is not {}'s turn", mover)));
        }

        let mut board = self.board()?;
        if !is_legal(&board, from, to, color) {
            return Err(GameError::illegal_move(from, to));
        }
        let Some(piece) = board.at(from) else {
            return Err(GameError::illegal_move(from, to));
        };
        let captured = board.relocate(from, to);
        let board_state = encode_board(&board)?;

        let record = MoveRecord {
            game_id,
            player_name: mover.to_string(),
            from_row: from.row,
            from_col: from.col,
            to_row: to.row,
            to_col: to.col,
            piece_type: piece.kind,
            piece_color: piece.color,
            captured_piece_type: captured.map(|p| p.kind),
            sequence_number,
            created_at: None,
        };

        debug!("[Game] {} after move #{}:\n{}", game_id, sequence_number, board);
        self.board_state = Some(board_state);
        self.current_turn = color.opponent();
        if is_game_over(&board) {
            info!(
                "[Game] {} finished, winner={} ({:?} king standing)",
                game_id, mover, surviving_side(&board)
            );
            self.game_status = GameStatus::Finished;
            self.winner_name = Some(mover.to_string());
        }
        Ok(record)
    }

    /// Remove `player` from the room.
    ///
    /// Red leaving an empty room asks for deletion; red leaving a full room hands
    /// the red seat to blue. Blue leaving sends the room back to `Waiting` with
    /// board and turn kept as they are, so the game resumes when someone joins.
    pub fn leave(&mut self, player: &str) -> Result<LeaveOutcome, GameError> {
        require_name(player, "playerName")?;
        match self.color_of(player) {
            Some(Color::Red) => match self.blue_player_name.take() {
                Some(blue) => {
                    self.red_player_name = Some(blue);
                    Ok(LeaveOutcome::Promoted)
                }
                None => Ok(LeaveOutcome::Deleted),
            },
            Some(Color::Blue) => {
                self.blue_player_name = None;
                self.game_status = GameStatus::Waiting;
                Ok(LeaveOutcome::Reverted)
            }
            None => Err(GameError::unauthorized(format!(
                "{} is not a player in this game",
                player
            ))),
        }
    }
}
