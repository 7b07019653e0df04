//! HTTP and WebSocket routing configuration.
//!
//! A single endpoint: each player opens `/ws/game?player=<id>` and drives
//! matchmaking, input and grid queries over that connection.

use actix_web::web;
use crate::server::game_session::session::ws_game;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws/game")
            .to(ws_game)
    );
}
