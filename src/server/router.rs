//! HTTP and WebSocket routing configuration.
//!
//! JSON endpoints under `/api/game` drive the game lifecycle; `/ws/game/{game_id}`
//! streams updates of one game to read-only watchers.

use actix_web::web;
use crate::server::api;
use crate::server::game_session::session::ws_game;

/// Configure the application's HTTP/WebSocket routes.
///
/// Static segments are registered before `{game_id}` so they are not taken for ids.
/// Malformed bodies, queries, and ids come back as `VALIDATION_ERROR`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/game")
            .app_data(web::JsonConfig::default().error_handler(api::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(api::query_error_handler))
            .app_data(web::PathConfig::default().error_handler(api::path_error_handler))
            .route("/create", web::post().to(api::create_game))
            .route("/waiting", web::get().to(api::waiting_games))
            .route("/active/{player_name}", web::get().to(api::active_game))
            .route("/{game_id}", web::get().to(api::get_game))
            .route("/{game_id}/join", web::post().to(api::join_game))
            .route("/{game_id}/move", web::post().to(api::make_move))
            .route("/{game_id}/leave", web::post().to(api::leave_game))
            .route("/{game_id}/history", web::get().to(api::game_history))
            .route("/{game_id}/moves", web::get().to(api::legal_moves))
    )
    .service(
        web::resource("/ws/game/{game_id}")
            .to(ws_game)
    );
}
