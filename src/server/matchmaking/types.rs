use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Unique identifier of a game room.
pub type RoomId = Uuid;

/// Unique identifier of one transport connection (one WebSocket).
pub type ConnectionId = Uuid;

/// How players are grouped into rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One player per room, never shared.
    Solo,
    /// Two players share a room and start on the same tick.
    Duel,
}

impl GameMode {
    /// Number of Games a room of this mode holds before it can start.
    pub fn capacity(self) -> usize {
        match self {
            GameMode::Solo => 1,
            GameMode::Duel => 2,
        }
    }
}
