//! JSON handlers for the game API.
//!
//! Handlers validate request bodies, forward them to the game session manager,
//! and render its answer. Game errors become JSON error responses through
//! their `ResponseError` impl.

use actix_web::{HttpRequest, HttpResponse, web, Error, error, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::game::error::GameError;
use crate::game::types::Position;
use crate::server::game_session::messages::{
    CreateGame, GetActiveGame, GetGame, GetGameHistory, GetLegalDestinations, JoinGame,
    LeaveGame, ListWaitingGames, MakeMove,
};
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub player_name: Option<String>,
    pub room_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_name: Option<String>,
    pub from_row: Option<i64>,
    pub from_col: Option<i64>,
    pub to_row: Option<i64>,
    pub to_col: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SquareQuery {
    pub row: Option<i64>,
    pub col: Option<i64>,
}

fn required_name(name: Option<String>) -> Result<String, GameError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(GameError::validation("playerName is required")),
    }
}

fn required_coord(value: Option<i64>, field: &str) -> Result<i64, GameError> {
    value.ok_or_else(|| GameError::validation(format!("{} is required", field)))
}

/// The board cell at `(row, col)`, `None` when it lies off the board.
fn square(row: i64, col: i64) -> Option<Position> {
    let pos = Position::new(i32::try_from(row).ok()?, i32::try_from(col).ok()?);
    pos.is_valid().then_some(pos)
}

/// Body and query parse failures, rendered like every other game error.
pub fn json_error_handler(err: error::JsonPayloadError, _: &HttpRequest) -> Error {
    GameError::validation(err.to_string()).into()
}

pub fn query_error_handler(err: error::QueryPayloadError, _: &HttpRequest) -> Error {
    GameError::validation(err.to_string()).into()
}

pub fn path_error_handler(err: error::PathError, _: &HttpRequest) -> Error {
    GameError::validation(err.to_string()).into()
}

pub async fn create_game(
    data: web::Data<AppState>,
    body: web::Json<CreateRequest>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();
    let player_name = required_name(body.player_name)?;

    let game = data.game_session_manager
        .send(CreateGame { player_name, room_title: body.room_title })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn join_game(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PlayerRequest>,
) -> Result<HttpResponse, Error> {
    let player_name = required_name(body.into_inner().player_name)?;

    let game = data.game_session_manager
        .send(JoinGame { game_id: path.into_inner(), player_name })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn make_move(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<MoveRequest>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();
    let player_name = required_name(body.player_name)?;
    let from_row = required_coord(body.from_row, "fromRow")?;
    let from_col = required_coord(body.from_col, "fromCol")?;
    let to_row = required_coord(body.to_row, "toRow")?;
    let to_col = required_coord(body.to_col, "toCol")?;
    let (Some(from), Some(to)) = (square(from_row, from_col), square(to_row, to_col)) else {
        return Err(GameError::illegal_move(
            format!("({}, {})", from_row, from_col),
            format!("({}, {})", to_row, to_col),
        )
        .into());
    };

    let game = data.game_session_manager
        .send(MakeMove { game_id: path.into_inner(), player_name, from, to })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn leave_game(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PlayerRequest>,
) -> Result<HttpResponse, Error> {
    let player_name = required_name(body.into_inner().player_name)?;

    let (outcome, game) = data.game_session_manager
        .send(LeaveGame { game_id: path.into_inner(), player_name })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(json!({ "result": outcome, "game": game })))
}

pub async fn get_game(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, Error> {
    let game = data.game_session_manager
        .send(GetGame { game_id: path.into_inner() })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn game_history(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, Error> {
    let moves = data.game_session_manager
        .send(GetGameHistory { game_id: path.into_inner() })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(moves))
}

pub async fn legal_moves(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<SquareQuery>,
) -> Result<HttpResponse, Error> {
    let query = query.into_inner();
    let row = required_coord(query.row, "row")?;
    let col = required_coord(query.col, "col")?;
    let Some(at) = square(row, col) else {
        return Ok(HttpResponse::Ok().json(Vec::<Position>::new()));
    };

    let destinations = data.game_session_manager
        .send(GetLegalDestinations { game_id: path.into_inner(), at })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(destinations))
}

pub async fn waiting_games(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let games = data.game_session_manager
        .send(ListWaitingGames)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(games))
}

pub async fn active_game(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let player_name = path.into_inner();
    let game = data.game_session_manager
        .send(GetActiveGame { player_name: player_name.clone() })
        .await
        .map_err(error::ErrorInternalServerError)?;

    match game {
        Some(game) => Ok(HttpResponse::Ok().json(game)),
        None => Ok(http_error_response(
            "NOT_FOUND",
            "No active game for this player",
            Some(&player_name),
            StatusCode::NOT_FOUND,
        )),
    }
}
