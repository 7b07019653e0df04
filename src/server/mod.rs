//! Server layer root module.
//!
//! - Application state and routing
//! - Matchmaking (room assignment per game mode)
//! - Game sessions (rooms, scheduler, WebSocket connections)

pub mod state;
pub mod router;
pub mod matchmaking;
pub mod game_session;
pub mod ws_error;
