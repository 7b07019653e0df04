use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::{Direction, GameSnapshot};
use crate::server::matchmaking::types::{GameMode, RoomId};

// Client -> server
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    JoinGame { mode: GameMode },
    SendUserInput { room_id: RoomId, direction: Direction },
    InitGrid,
    Ping,
}

// Server -> client
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    GameJoined {
        room_id: RoomId,
    },
    GridSize {
        rows: i32,
        cols: i32,
    },
    ReceiveGameStates {
        snapshots: Vec<GameSnapshot>,
        initial: bool,
    },
    ReceiveCountdown {
        n: u32,
    },
    RoomClosed {
        room_id: RoomId,
    },
    /// Built by `ws_error::ws_error_message`.
    Error {
        code: String,
        message: String,
        context: String,
    },
}

impl ServerWsMessage {
    pub fn game_states(snapshots: &[GameSnapshot], initial: bool) -> Self {
        Self::ReceiveGameStates { snapshots: snapshots.to_vec(), initial }
    }

    pub fn countdown(n: u32) -> Self {
        Self::ReceiveCountdown { n }
    }
}
