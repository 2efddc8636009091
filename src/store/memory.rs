//! In-memory game store.

use std::collections::HashMap;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::game::error::GameError;
use crate::game::ledger::{MoveLedger, MoveRecord};
use crate::game::state::{Game, GameStatus};
use crate::store::GameStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<Uuid, Game>,
    // Ids in creation order.
    order: Vec<Uuid>,
    ledger: MoveLedger,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            games: HashMap::new(),
            order: Vec::new(),
            ledger: MoveLedger::new(),
        }
    }

    fn in_creation_order(&self) -> impl Iterator<Item = &Game> {
        self.order.iter().filter_map(|id| self.games.get(id))
    }
}

impl GameStore for MemoryStore {
    fn load(&self, game_id: Uuid) -> Result<Game, GameError> {
        self.games.get(&game_id).cloned().ok_or(GameError::NotFound(game_id))
    }

    fn save(&mut self, mut game: Game) -> Result<Game, GameError> {
        let now = Utc::now();
        let id = match game.id {
            Some(id) if self.games.contains_key(&id) => id,
            Some(id) => return Err(GameError::NotFound(id)),
            None => {
                let id = Uuid::new_v4();
                game.id = Some(id);
                game.created_at = Some(now);
                self.order.push(id);
                debug!("[MemoryStore] Assigned id {}", id);
                id
            }
        };
        game.updated_at = Some(now);
        self.games.insert(id, game.clone());
        Ok(game)
    }

    fn delete_game(&mut self, game_id: Uuid) -> Result<(), GameError> {
        if self.games.remove(&game_id).is_none() {
            return Err(GameError::NotFound(game_id));
        }
        self.order.retain(|id| *id != game_id);
        self.ledger.remove_game(game_id);
        Ok(())
    }

    fn append_move(&mut self, mut record: MoveRecord) -> Result<MoveRecord, GameError> {
        if !self.games.contains_key(&record.game_id) {
            return Err(GameError::NotFound(record.game_id));
        }
        record.created_at = Some(Utc::now());
        self.ledger.append(record).cloned()
    }

    fn list_moves_by_game(&self, game_id: Uuid) -> Vec<MoveRecord> {
        self.ledger.moves_for(game_id).to_vec()
    }

    fn count_moves(&self, game_id: Uuid) -> u32 {
        self.ledger.count_for(game_id)
    }

    fn list_waiting_games(&self) -> Vec<Game> {
        self.in_creation_order()
            .filter(|g| g.game_status == GameStatus::Waiting)
            .cloned()
            .collect()
    }

    fn find_active_game_by_player(&self, player_name: &str) -> Option<Game> {
        self.in_creation_order()
            .find(|g| g.game_status == GameStatus::InProgress && g.has_player(player_name))
            .cloned()
    }
}
