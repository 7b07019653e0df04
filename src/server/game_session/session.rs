/// WebSocket connection of one player to the game manager.
///
/// Parses client messages, forwards joins, inputs and grid queries to the
/// GameManager, and serializes everything the manager pushes back.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse, http::StatusCode};
use actix_web_actors::ws;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::server::PLAYER_QUERY_PARAM;
use crate::game::PlayerId;
use crate::server::matchmaking::types::ConnectionId;
use crate::server::ws_error::{http_error_response, ws_error_message};
use super::messages::{ClientWsMessage, ServerWsMessage};
use super::server::{Disconnect, GameManager, InitGrid, JoinGameRoom, UpdatePlayerMovePosition};

pub struct GameConnection {
    pub connection_id: ConnectionId,
    pub player_id: PlayerId,
    pub manager: Addr<GameManager>,
}

impl GameConnection {
    fn send_json(&self, msg: &ServerWsMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("[GameConnection] Failed to serialize {:?}: {}", msg, e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Failed to serialize server message", None));
            }
        }
    }

    fn handle_client_message(&mut self, msg: ClientWsMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientWsMessage::JoinGame { mode } => {
                let join = JoinGameRoom {
                    connection_id: self.connection_id,
                    player_id: self.player_id.clone(),
                    mode,
                    recipient: ctx.address().recipient(),
                };
                self.manager
                    .send(join)
                    .into_actor(self)
                    .then(|res, act, ctx| {
                        match res {
                            Ok(room_id) => debug!("[GameConnection] {} placed in room {}", act.player_id, room_id),
                            Err(e) => {
                                warn!("[GameConnection] Join failed for {}: {}", act.player_id, e);
                                ctx.text(ws_error_message("JOIN_FAILED", "Game manager unavailable", Some(&act.player_id)));
                            }
                        }
                        fut::ready(())
                    })
                    .spawn(ctx);
            }
            ClientWsMessage::SendUserInput { room_id, direction } => {
                self.manager.do_send(UpdatePlayerMovePosition {
                    room_id,
                    player_id: self.player_id.clone(),
                    direction,
                });
            }
            ClientWsMessage::InitGrid => {
                self.manager
                    .send(InitGrid)
                    .into_actor(self)
                    .then(|res, act, ctx| {
                        match res {
                            Ok(grid) => act.send_json(&ServerWsMessage::GridSize { rows: grid.rows, cols: grid.cols }, ctx),
                            Err(e) => {
                                warn!("[GameConnection] Grid query failed: {}", e);
                                ctx.text(ws_error_message("GRID_UNAVAILABLE", "Game manager unavailable", None));
                            }
                        }
                        fut::ready(())
                    })
                    .spawn(ctx);
            }
            ClientWsMessage::Ping => {}
        }
    }
}

impl Actor for GameConnection {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[GameConnection] {} connected as {}", self.player_id, self.connection_id);
    }

    /// Lets the manager close or forfeit whatever this connection had joined.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[GameConnection] {} disconnected", self.player_id);
        self.manager.do_send(Disconnect { connection_id: self.connection_id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameConnection {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientWsMessage>(&text) {
                Ok(client_msg) => self.handle_client_message(client_msg, ctx),
                Err(e) => {
                    debug!("[GameConnection] Invalid message from {}: {}", self.player_id, e);
                    ctx.text(ws_error_message("INVALID_MESSAGE", "Invalid client message", Some(&self.player_id)));
                }
            },
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[GameConnection] Protocol error for {}: {}", self.player_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for GameConnection {
    type Result = ();

    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) -> Self::Result {
        self.send_json(&msg, ctx);
    }
}

/// Extract the player id from a query string such as `player=alice%20b&x=1`.
pub fn player_from_query(query: &str) -> Option<PlayerId> {
    query
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .find(|(key, _)| *key == PLAYER_QUERY_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// WebSocket endpoint for players. Expects `?player=<id>`.
pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let Some(player_id) = player_from_query(req.query_string()) else {
        return Ok(http_error_response(
            "MISSING_PLAYER",
            "Missing player query parameter",
            None,
            StatusCode::BAD_REQUEST,
        ));
    };

    ws::start(
        GameConnection {
            connection_id: Uuid::new_v4(),
            player_id,
            manager: data.game_manager.clone(),
        },
        &req,
        stream,
    )
}
