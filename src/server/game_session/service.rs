//! Game operations exposed to the transport layer.
//!
//! Each operation loads the game, runs the state machine on it, and persists
//! the result. Failures return before anything is written.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::game::error::GameError;
use crate::game::ledger::MoveRecord;
use crate::game::state::{Game, LeaveOutcome};
use crate::game::systems::rules::legal_destinations;
use crate::game::types::Position;
use crate::store::GameStore;

pub struct GameService<S: GameStore> {
    store: S,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create_game(&mut self, player_name: &str, room_title: Option<String>) -> Result<Game, GameError> {
        let game = self.store.save(Game::create(player_name, room_title)?)?;
        info!("[GameService] {} created game {:?}", player_name, game.id);
        Ok(game)
    }

    pub fn join_game(&mut self, game_id: Uuid, player_name: &str) -> Result<Game, GameError> {
        let mut game = self.store.load(game_id)?;
        game.join(player_name).inspect_err(|e| {
            warn!("[GameService] {} could not join {}: {}", player_name, game_id, e);
        })?;
        let game = self.store.save(game)?;
        info!("[GameService] {} joined game {}", player_name, game_id);
        Ok(game)
    }

    pub fn make_move(
        &mut self,
        game_id: Uuid,
        player_name: &str,
        from: Position,
        to: Position,
    ) -> Result<Game, GameError> {
        let before = self.store.load(game_id)?;
        let sequence_number = self.store.count_moves(game_id) + 1;

        let mut game = before.clone();
        let record = game
            .apply_move(player_name, from, to, sequence_number)
            .inspect_err(|e| {
                warn!("[GameService] Rejected move {} -> {} by {} in {}: {}", from, to, player_name, game_id, e);
            })?;

        // Board first; the ledger entry only lands once the board is stored.
        let game = self.store.save(game)?;
        if let Err(e) = self.store.append_move(record) {
            warn!("[GameService] Ledger append failed in {}, restoring board: {}", game_id, e);
            self.store.save(before)?;
            return Err(e);
        }
        debug!(
            "[GameService] Move #{} in {}: {} {} -> {}",
            sequence_number, game_id, player_name, from, to
        );
        Ok(game)
    }

    /// Returns the outcome and, unless the game was deleted, the updated game.
    pub fn leave_game(&mut self, game_id: Uuid, player_name: &str) -> Result<(LeaveOutcome, Option<Game>), GameError> {
        let mut game = self.store.load(game_id)?;
        let outcome = game.leave(player_name)?;
        info!("[GameService] {} left game {} ({:?})", player_name, game_id, outcome);

        match outcome {
            LeaveOutcome::Deleted => {
                self.store.delete_game(game_id)?;
                Ok((outcome, None))
            }
            LeaveOutcome::Promoted | LeaveOutcome::Reverted => {
                let game = self.store.save(game)?;
                Ok((outcome, Some(game)))
            }
        }
    }

    pub fn get_game(&self, game_id: Uuid) -> Result<Game, GameError> {
        self.store.load(game_id)
    }

    pub fn get_game_history(&self, game_id: Uuid) -> Result<Vec<MoveRecord>, GameError> {
        self.store.load(game_id)?;
        Ok(self.store.list_moves_by_game(game_id))
    }

    pub fn waiting_games(&self) -> Vec<Game> {
        self.store.list_waiting_games()
    }

    pub fn active_game(&self, player_name: &str) -> Option<Game> {
        self.store.find_active_game_by_player(player_name)
    }

    /// Cells the piece on `at` may move to on the game's current board.
    pub fn legal_destinations(&self, game_id: Uuid, at: Position) -> Result<Vec<Position>, GameError> {
        let game = self.store.load(game_id)?;
        Ok(legal_destinations(&game.board()?, at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameStatus;
    use crate::game::types::Color;
    use crate::store::MemoryStore;

    /// Memory store whose ledger refuses every append.
    struct RefusingLedger(MemoryStore);

    impl GameStore for RefusingLedger {
        fn load(&self, game_id: Uuid) -> Result<Game, GameError> {
            self.0.load(game_id)
        }

        fn save(&mut self, game: Game) -> Result<Game, GameError> {
            self.0.save(game)
        }

        fn delete_game(&mut self, game_id: Uuid) -> Result<(), GameError> {
            self.0.delete_game(game_id)
        }

        fn append_move(&mut self, record: MoveRecord) -> Result<MoveRecord, GameError> {
            Err(GameError::invalid_state(format!("ledger closed for {}", record.game_id)))
        }

        fn list_moves_by_game(&self, game_id: Uuid) -> Vec<MoveRecord> {
            self.0.list_moves_by_game(game_id)
        }

        fn count_moves(&self, game_id: Uuid) -> u32 {
            self.0.count_moves(game_id)
        }

        fn list_waiting_games(&self) -> Vec<Game> {
            self.0.list_waiting_games()
        }

        fn find_active_game_by_player(&self, player_name: &str) -> Option<Game> {
            self.0.find_active_game_by_player(player_name)
        }
    }

    fn service() -> GameService<MemoryStore> {
        GameService::new(MemoryStore::new())
    }

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_sequence_numbers_skip_rejected_moves() {
        let mut svc = service();
        let id = svc.create_game("A", None).unwrap().id.unwrap();
        svc.join_game(id, "B").unwrap();

        svc.make_move(id, "A", pos(3, 0), pos(4, 0)).unwrap();
        assert!(svc.make_move(id, "A", pos(3, 2), pos(4, 2)).is_err());
        assert!(svc.make_move(id, "B", pos(6, 0), pos(4, 0)).is_err());
        svc.make_move(id, "B", pos(6, 0), pos(5, 0)).unwrap();
        svc.make_move(id, "A", pos(3, 2), pos(4, 2)).unwrap();

        let numbers: Vec<u32> = svc
            .get_game_history(id)
            .unwrap()
            .iter()
            .map(|m| m.sequence_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_move_persists_nothing() {
        let mut svc = service();
        let id = svc.create_game("A", None).unwrap().id.unwrap();
        let before = svc.join_game(id, "B").unwrap();

        let err = svc.make_move(id, "A", pos(0, 0), pos(5, 5)).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove { .. }));
        assert_eq!(svc.get_game(id).unwrap(), before);
        assert!(svc.get_game_history(id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_game() {
        let mut svc = service();
        let id = Uuid::new_v4();
        assert_eq!(svc.join_game(id, "B"), Err(GameError::NotFound(id)));
        assert_eq!(svc.get_game_history(id), Err(GameError::NotFound(id)));
        assert!(matches!(
            svc.make_move(id, "A", pos(3, 0), pos(4, 0)),
            Err(GameError::NotFound(_))
        ));
    }

    #[test]
    fn test_leave_deletes_lonely_game() {
        let mut svc = service();
        let id = svc.create_game("A", None).unwrap().id.unwrap();
        let (outcome, game) = svc.leave_game(id, "A").unwrap();
        assert_eq!(outcome, LeaveOutcome::Deleted);
        assert!(game.is_none());
        assert_eq!(svc.get_game(id), Err(GameError::NotFound(id)));
        assert!(svc.waiting_games().is_empty());
    }

    #[test]
    fn test_active_game_and_waiting_list() {
        let mut svc = service();
        let first = svc.create_game("A", None).unwrap().id.unwrap();
        let second = svc.create_game("C", Some("Room2".to_string())).unwrap().id.unwrap();
        svc.join_game(first, "B").unwrap();

        let waiting: Vec<_> = svc.waiting_games().into_iter().filter_map(|g| g.id).collect();
        assert_eq!(waiting, vec![second]);
        let active = svc.active_game("B").unwrap();
        assert_eq!(active.id, Some(first));
        assert_eq!(active.game_status, GameStatus::InProgress);
        assert!(svc.active_game("C").is_none());
    }

    #[test]
    fn test_legal_destinations_for_opening_soldier() {
        let mut svc = service();
        let id = svc.create_game("A", None).unwrap().id.unwrap();
        assert_eq!(svc.legal_destinations(id, pos(3, 4)).unwrap(), vec![pos(4, 4)]);
        assert_eq!(svc.legal_destinations(id, pos(6, 4)).unwrap(), vec![pos(5, 4)]);
        assert!(svc.legal_destinations(id, pos(5, 5)).unwrap().is_empty());
        assert_eq!(svc.get_game(id).unwrap().current_turn, Color::Red);
    }

    #[test]
    fn test_failed_ledger_append_keeps_board() {
        let mut svc = GameService::new(RefusingLedger(MemoryStore::new()));
        let id = svc.create_game("A", None).unwrap().id.unwrap();
        let before = svc.join_game(id, "B").unwrap();

        let err = svc.make_move(id, "A", pos(3, 0), pos(4, 0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));

        let after = svc.get_game(id).unwrap();
        assert_eq!(after.board_state, before.board_state);
        assert_eq!(after.current_turn, Color::Red);
        assert_eq!(after.game_status, GameStatus::InProgress);
        assert!(svc.get_game_history(id).unwrap().is_empty());
    }
}
