/// Room assignment for joining players.
///
/// Solo players always get a fresh single-seat room. Duel players fill the first
/// open Duel room that will take them, otherwise a new two-seat room is opened.

use log::info;

use crate::game::Grid;
use crate::server::game_session::room::GameRoom;
use super::types::{GameMode, RoomId};

/// Place `player_id` in a room of `rooms`, creating one if needed.
/// Returns the id of the room the player joined.
pub fn assign_room(rooms: &mut Vec<GameRoom>, player_id: &str, mode: GameMode, grid: Grid) -> RoomId {
    match mode {
        GameMode::Solo => open_room(rooms, player_id, mode, grid),
        GameMode::Duel => {
            let existing = rooms
                .iter_mut()
                .find(|room| room.mode == mode && room.can_join(player_id));
            match existing {
                Some(room) => {
                    room.join(player_id);
                    room.id
                }
                None => open_room(rooms, player_id, mode, grid),
            }
        }
    }
}

fn open_room(rooms: &mut Vec<GameRoom>, player_id: &str, mode: GameMode, grid: Grid) -> RoomId {
    let mut room = GameRoom::new(mode, grid);
    room.join(player_id);
    let room_id = room.id;
    rooms.push(room);
    info!("[Matchmaking] Opened {:?} room {} for {}", mode, room_id, player_id);
    room_id
}
