use actix::{Actor, ActorContext, Addr, AsyncContext, Handler, StreamHandler};
use actix_web::{HttpRequest, HttpResponse, web, Error, error};
use actix_web_actors::ws;
use log::debug;
use uuid::Uuid;

use crate::server::game_session::messages::{GetGame, Subscribe, Unsubscribe, WatcherUpdate};
use crate::server::game_session::server::GameSessionManager;
use crate::server::state::AppState;
use crate::server::ws_error::ws_error_message;

/// Answer to any frame a watcher sends.
fn read_only_reply(game_id: Uuid) -> String {
    ws_error_message(
        "READ_ONLY",
        "Game sockets are read-only; use the HTTP API to play.",
        Some(&game_id.to_string()),
    )
}

/// Read-only WebSocket following one game.
pub struct GameWatcher {
    pub game_id: Uuid,
    pub watcher_id: Uuid,
    pub manager: Addr<GameSessionManager>,
}

impl Actor for GameWatcher {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.manager.do_send(Subscribe {
            game_id: self.game_id,
            watcher_id: self.watcher_id,
            addr: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        debug!("[GameWatcher] {} stopped watching {}", self.watcher_id, self.game_id);
        self.manager.do_send(Unsubscribe {
            game_id: self.game_id,
            watcher_id: self.watcher_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameWatcher {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(_)) | Ok(ws::Message::Binary(_)) => {
                ctx.text(read_only_reply(self.game_id));
            }
            Ok(ws::Message::Ping(bytes)) => ctx.pong(&bytes),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(_) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<WatcherUpdate> for GameWatcher {
    type Result = ();

    fn handle(&mut self, msg: WatcherUpdate, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(ws_error_message("SERIALIZATION", "Failed to serialize game state", None)),
        }
        if let WatcherUpdate::GameDeleted = msg {
            ctx.close(None);
            ctx.stop();
        }
    }
}

pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let game_id = path.into_inner();

    // Unknown games are refused before the upgrade.
    data.game_session_manager
        .send(GetGame { game_id })
        .await
        .map_err(error::ErrorInternalServerError)??;

    ws::start(
        GameWatcher {
            game_id,
            watcher_id: Uuid::new_v4(),
            manager: data.game_session_manager.clone(),
        },
        &req,
        stream,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_read_only_reply() {
        let game_id = Uuid::new_v4();
        let value: Value = serde_json::from_str(&read_only_reply(game_id)).unwrap();
        assert_eq!(value["action"], "Error");
        assert_eq!(value["data"]["code"], "READ_ONLY");
        assert_eq!(value["data"]["context"], game_id.to_string());
    }
}
