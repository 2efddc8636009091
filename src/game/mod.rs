//! Game core: pieces, board, move legality, lifecycle, and the move ledger.
//!
//! Nothing in here performs I/O or reads the clock.

pub mod types;
pub mod error;
pub mod board;
pub mod codec;
pub mod ledger;
pub mod state;

pub mod systems;
