/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

use crate::game::error::GameError;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "READ_ONLY").
/// - `message`: Human-readable error message.
/// - `context`: Optional context (e.g. game_id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    json!({
        "action": "Error",
        "data": { "code": code, "message": message, "context": context.unwrap_or("") }
    })
    .to_string()
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context string.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    let body = json!({
        "error": { "code": code, "message": message, "context": context.unwrap_or("") }
    });
    HttpResponse::build(status).json(body)
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::InvalidState(_) => StatusCode::CONFLICT,
            GameError::Unauthorized(_) => StatusCode::FORBIDDEN,
            GameError::IllegalMove { .. } | GameError::Validation(_) => StatusCode::BAD_REQUEST,
            GameError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let context = match self {
            GameError::NotFound(id) => Some(id.to_string()),
            _ => None,
        };
        http_error_response(self.code(), &self.to_string(), context.as_deref(), self.status_code())
    }
}
