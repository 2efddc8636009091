use actix::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::game::error::GameError;
use crate::game::ledger::MoveRecord;
use crate::game::state::{Game, LeaveOutcome};
use crate::game::types::Position;

#[derive(Message)]
#[rtype(result = "Result<Game, GameError>")]
pub struct CreateGame {
    pub player_name: String,
    pub room_title: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<Game, GameError>")]
pub struct JoinGame {
    pub game_id: Uuid,
    pub player_name: String,
}

#[derive(Message)]
#[rtype(result = "Result<Game, GameError>")]
pub struct MakeMove {
    pub game_id: Uuid,
    pub player_name: String,
    pub from: Position,
    pub to: Position,
}

#[derive(Message)]
#[rtype(result = "Result<(LeaveOutcome, Option<Game>), GameError>")]
pub struct LeaveGame {
    pub game_id: Uuid,
    pub player_name: String,
}

#[derive(Message)]
#[rtype(result = "Result<Game, GameError>")]
pub struct GetGame {
    pub game_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "Result<Vec<MoveRecord>, GameError>")]
pub struct GetGameHistory {
    pub game_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "Vec<Game>")]
pub struct ListWaitingGames;

#[derive(Message)]
#[rtype(result = "Option<Game>")]
pub struct GetActiveGame {
    pub player_name: String,
}

#[derive(Message)]
#[rtype(result = "Result<Vec<Position>, GameError>")]
pub struct GetLegalDestinations {
    pub game_id: Uuid,
    pub at: Position,
}

/// A watcher starts following a game.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub game_id: Uuid,
    pub watcher_id: Uuid,
    pub addr: Recipient<WatcherUpdate>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Unsubscribe {
    pub game_id: Uuid,
    pub watcher_id: Uuid,
}

/// Pushed to watchers after every accepted change to their game.
#[derive(Message, Clone, Serialize, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum WatcherUpdate {
    GameStateUpdate(Game),
    GameDeleted,
}
