//! Application state for the server.
//!
//! Holds the address of the GameManager actor so WebSocket handlers can reach it.

use actix::Addr;
use crate::server::game_session::GameManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the game manager actor (rooms, scheduler, broadcast).
    pub game_manager: Addr<GameManager>,
}

impl AppState {
    pub fn new(game_manager: Addr<GameManager>) -> Self {
        AppState { game_manager }
    }
}
