//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with the JSON game API and WebSocket watchers.

use actix::Actor;
use actix_web::{web, App, HttpServer, middleware::Logger};
use log::info;
use server::game_session::server::GameSessionManager;

pub mod config;
mod game;
mod server;
mod store;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Start the GameSessionManager actor (owns every game and serializes writes).
    let game_session_manager = GameSessionManager::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(game_session_manager));

    let (host, port) = config::server::bind_address();
    info!("[Main] Listening on {}:{}", host, port);

    // Start the HTTP server with the game API and WebSocket endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((host, port))?
    .run()
    .await
}
