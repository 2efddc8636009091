//! Persistence of games and their move ledgers.
//!
//! The game core only talks to storage through `GameStore`. Implementations own
//! id assignment and timestamps; callers must make sure a single writer touches
//! a given game at a time.

pub mod memory;

use uuid::Uuid;

use crate::game::error::GameError;
use crate::game::ledger::MoveRecord;
use crate::game::state::Game;

pub use memory::MemoryStore;

pub trait GameStore {
    /// Fetch a game, `NotFound` when the id is unknown.
    fn load(&self, game_id: Uuid) -> Result<Game, GameError>;

    /// Insert or update a game. Assigns an id on first save and returns the stored copy.
    fn save(&mut self, game: Game) -> Result<Game, GameError>;

    /// Drop a game along with its moves.
    fn delete_game(&mut self, game_id: Uuid) -> Result<(), GameError>;

    fn append_move(&mut self, record: MoveRecord) -> Result<MoveRecord, GameError>;

    /// Moves of a game, ascending by sequence number.
    fn list_moves_by_game(&self, game_id: Uuid) -> Vec<MoveRecord>;

    fn count_moves(&self, game_id: Uuid) -> u32;

    /// Games waiting for an opponent, oldest first.
    fn list_waiting_games(&self) -> Vec<Game>;

    /// The in-progress game `player_name` is seated in, if any.
    fn find_active_game_by_player(&self, player_name: &str) -> Option<Game>;
}
