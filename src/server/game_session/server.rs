//! Game session manager actor.
//!
//! Owns the game store and processes every game operation as a message, one at
//! a time, so a game never has two concurrent writers. Accepted changes are
//! pushed to the watcher sockets following that game.

use actix::prelude::*;
use actix::MessageResult;
use std::collections::HashMap;
use uuid::Uuid;
use log::{debug, info};

use crate::game::error::GameError;
use crate::game::ledger::MoveRecord;
use crate::game::state::{Game, LeaveOutcome};
use crate::game::types::Position;
use crate::server::game_session::messages::{
    CreateGame, GetActiveGame, GetGame, GetGameHistory, GetLegalDestinations, JoinGame,
    LeaveGame, ListWaitingGames, MakeMove, Subscribe, Unsubscribe, WatcherUpdate,
};
use crate::server::game_session::service::GameService;
use crate::store::MemoryStore;

pub struct GameSessionManager {
    service: GameService<MemoryStore>,
    watchers: HashMap<Uuid, HashMap<Uuid, Recipient<WatcherUpdate>>>,
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSessionManager {
    pub fn new() -> Self {
        Self {
            service: GameService::new(MemoryStore::new()),
            watchers: HashMap::new(),
        }
    }

    fn broadcast(&self, game_id: Uuid, update: WatcherUpdate) {
        let Some(watchers) = self.watchers.get(&game_id) else {
            return;
        };
        debug!("[GameSessionManager] Broadcast to {} watcher(s) of {}", watchers.len(), game_id);
        for addr in watchers.values() {
            addr.do_send(update.clone());
        }
    }

    fn publish(&self, game: &Game) {
        if let Some(game_id) = game.id {
            self.broadcast(game_id, WatcherUpdate::GameStateUpdate(game.clone()));
        }
    }
}

impl Actor for GameSessionManager {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("[GameSessionManager] Started");
    }
}

impl Handler<CreateGame> for GameSessionManager {
    type Result = Result<Game, GameError>;

    fn handle(&mut self, msg: CreateGame, _: &mut Context<Self>) -> Self::Result {
        self.service.create_game(&msg.player_name, msg.room_title)
    }
}

impl Handler<JoinGame> for GameSessionManager {
    type Result = Result<Game, GameError>;

    fn handle(&mut self, msg: JoinGame, _: &mut Context<Self>) -> Self::Result {
        let game = self.service.join_game(msg.game_id, &msg.player_name)?;
        self.publish(&game);
        Ok(game)
    }
}

impl Handler<MakeMove> for GameSessionManager {
    type Result = Result<Game, GameError>;

    fn handle(&mut self, msg: MakeMove, _: &mut Context<Self>) -> Self::Result {
        let game = self.service.make_move(msg.game_id, &msg.player_name, msg.from, msg.to)?;
        self.publish(&game);
        Ok(game)
    }
}

impl Handler<LeaveGame> for GameSessionManager {
    type Result = Result<(LeaveOutcome, Option<Game>), GameError>;

    fn handle(&mut self, msg: LeaveGame, _: &mut Context<Self>) -> Self::Result {
        let (outcome, game) = self.service.leave_game(msg.game_id, &msg.player_name)?;
        match &game {
            Some(game) => self.publish(game),
            None => {
                self.broadcast(msg.game_id, WatcherUpdate::GameDeleted);
                self.watchers.remove(&msg.game_id);
            }
        }
        Ok((outcome, game))
    }
}

impl Handler<GetGame> for GameSessionManager {
    type Result = Result<Game, GameError>;

    fn handle(&mut self, msg: GetGame, _: &mut Context<Self>) -> Self::Result {
        self.service.get_game(msg.game_id)
    }
}

impl Handler<GetGameHistory> for GameSessionManager {
    type Result = Result<Vec<MoveRecord>, GameError>;

    fn handle(&mut self, msg: GetGameHistory, _: &mut Context<Self>) -> Self::Result {
        self.service.get_game_history(msg.game_id)
    }
}

impl Handler<ListWaitingGames> for GameSessionManager {
    type Result = MessageResult<ListWaitingGames>;

    fn handle(&mut self, _: ListWaitingGames, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.service.waiting_games())
    }
}

impl Handler<GetActiveGame> for GameSessionManager {
    type Result = MessageResult<GetActiveGame>;

    fn handle(&mut self, msg: GetActiveGame, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.service.active_game(&msg.player_name))
    }
}

impl Handler<GetLegalDestinations> for GameSessionManager {
    type Result = Result<Vec<Position>, GameError>;

    fn handle(&mut self, msg: GetLegalDestinations, _: &mut Context<Self>) -> Self::Result {
        self.service.legal_destinations(msg.game_id, msg.at)
    }
}

impl Handler<Subscribe> for GameSessionManager {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        let update = match self.service.get_game(msg.game_id) {
            Ok(game) => WatcherUpdate::GameStateUpdate(game),
            Err(_) => {
                msg.addr.do_send(WatcherUpdate::GameDeleted);
                return;
            }
        };
        msg.addr.do_send(update);
        self.watchers
            .entry(msg.game_id)
            .or_default()
            .insert(msg.watcher_id, msg.addr);
        debug!("[GameSessionManager] Watcher {} subscribed to {}", msg.watcher_id, msg.game_id);
    }
}

impl Handler<Unsubscribe> for GameSessionManager {
    type Result = ();

    fn handle(&mut self, msg: Unsubscribe, _: &mut Context<Self>) -> Self::Result {
        if let Some(watchers) = self.watchers.get_mut(&msg.game_id) {
            watchers.remove(&msg.watcher_id);
            if watchers.is_empty() {
                self.watchers.remove(&msg.game_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameStatus;
    use crate::game::types::Color;
    use crate::server::game_session::messages::WatcherUpdate::{GameDeleted, GameStateUpdate};

    /// Stands in for a watcher socket and keeps every frame it is sent.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<WatcherUpdate>,
    }

    impl Actor for Recorder {
        type Context = Context<Self>;
    }

    impl Handler<WatcherUpdate> for Recorder {
        type Result = ();

        fn handle(&mut self, msg: WatcherUpdate, _: &mut Context<Self>) {
            self.frames.push(msg);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<WatcherUpdate>")]
    struct TakeFrames;

    impl Handler<TakeFrames> for Recorder {
        type Result = MessageResult<TakeFrames>;

        fn handle(&mut self, _: TakeFrames, _: &mut Context<Self>) -> Self::Result {
            MessageResult(std::mem::take(&mut self.frames))
        }
    }

    #[derive(Message)]
    #[rtype(result = "usize")]
    struct CountWatchers(Uuid);

    impl Handler<CountWatchers> for GameSessionManager {
        type Result = usize;

        fn handle(&mut self, msg: CountWatchers, _: &mut Context<Self>) -> usize {
            self.watchers.get(&msg.0).map_or(0, HashMap::len)
        }
    }

    async fn create(manager: &Addr<GameSessionManager>, player: &str) -> Uuid {
        manager
            .send(CreateGame { player_name: player.to_string(), room_title: None })
            .await
            .unwrap()
            .unwrap()
            .id
            .unwrap()
    }

    async fn watch(manager: &Addr<GameSessionManager>, game_id: Uuid) -> (Uuid, Addr<Recorder>) {
        let recorder = Recorder::default().start();
        let watcher_id = Uuid::new_v4();
        manager
            .send(Subscribe { game_id, watcher_id, addr: recorder.clone().recipient() })
            .await
            .unwrap();
        (watcher_id, recorder)
    }

    #[actix_web::test]
    async fn test_watcher_gets_current_state_then_updates() {
        let manager = GameSessionManager::new().start();
        let id = create(&manager, "A").await;
        let (_, recorder) = watch(&manager, id).await;

        manager.send(JoinGame { game_id: id, player_name: "B".to_string() }).await.unwrap().unwrap();
        manager
            .send(MakeMove {
                game_id: id,
                player_name: "A".to_string(),
                from: Position::new(3, 0),
                to: Position::new(4, 0),
            })
            .await
            .unwrap()
            .unwrap();
        // A rejected move is not broadcast.
        let rejected = manager
            .send(MakeMove {
                game_id: id,
                player_name: "A".to_string(),
                from: Position::new(4, 0),
                to: Position::new(5, 0),
            })
            .await
            .unwrap();
        assert!(rejected.is_err());

        let frames = recorder.send(TakeFrames).await.unwrap();
        assert_eq!(frames.len(), 3);
        match &frames[0] {
            GameStateUpdate(game) => assert_eq!(game.game_status, GameStatus::Waiting),
            other => panic!("unexpected frame {:?}", other),
        }
        match &frames[1] {
            GameStateUpdate(game) => assert_eq!(game.game_status, GameStatus::InProgress),
            other => panic!("unexpected frame {:?}", other),
        }
        match &frames[2] {
            GameStateUpdate(game) => assert_eq!(game.current_turn, Color::Blue),
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_deleted_game_notifies_and_drops_watchers() {
        let manager = GameSessionManager::new().start();
        let id = create(&manager, "A").await;
        let (_, first) = watch(&manager, id).await;
        let (_, second) = watch(&manager, id).await;
        assert_eq!(manager.send(CountWatchers(id)).await.unwrap(), 2);

        let (outcome, game) = manager
            .send(LeaveGame { game_id: id, player_name: "A".to_string() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome, LeaveOutcome::Deleted);
        assert!(game.is_none());
        assert_eq!(manager.send(CountWatchers(id)).await.unwrap(), 0);

        for recorder in [first, second] {
            let frames = recorder.send(TakeFrames).await.unwrap();
            assert_eq!(frames.len(), 2);
            assert!(matches!(frames[1], GameDeleted));
        }
    }

    #[actix_web::test]
    async fn test_subscribe_to_unknown_game_and_unsubscribe() {
        let manager = GameSessionManager::new().start();
        let unknown = Uuid::new_v4();
        let (_, recorder) = watch(&manager, unknown).await;
        let frames = recorder.send(TakeFrames).await.unwrap();
        assert!(matches!(frames.as_slice(), [GameDeleted]));
        assert_eq!(manager.send(CountWatchers(unknown)).await.unwrap(), 0);

        let id = create(&manager, "A").await;
        let (watcher_id, recorder) = watch(&manager, id).await;
        manager.send(Unsubscribe { game_id: id, watcher_id }).await.unwrap();
        assert_eq!(manager.send(CountWatchers(id)).await.unwrap(), 0);

        manager.send(JoinGame { game_id: id, player_name: "B".to_string() }).await.unwrap().unwrap();
        let frames = recorder.send(TakeFrames).await.unwrap();
        assert_eq!(frames.len(), 1);
    }
}
