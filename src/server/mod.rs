// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and JSON handlers
//! - Game session orchestration (game lifecycle, moves, watchers)
//! - Error rendering

pub mod state;
pub mod router;
pub mod api;
pub mod game_session;
pub mod ws_error;
