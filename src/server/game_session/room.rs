/// Game room: a group of Games that start and tick together.
///
/// A room moves strictly through OpenToJoin -> ReadyToStart -> Starting -> Running
/// -> Finished. Every transition method is a silent no-op (returning false) when
/// called from the wrong state, so retried or racing requests stay harmless.

use log::{debug, info};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::game::{Direction, Game, GameSnapshot, GameStatus, Grid};
use crate::server::matchmaking::types::{GameMode, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    OpenToJoin,
    ReadyToStart,
    Starting,
    Running,
    Finished,
}

#[derive(Debug)]
pub struct GameRoom {
    pub id: RoomId,
    pub mode: GameMode,
    grid: Grid,
    capacity: usize,
    status: RoomStatus,
    games: Vec<Game>,
    /// Latest snapshot of each Game, in join order.
    snapshots: Vec<GameSnapshot>,
}

impl GameRoom {
    pub fn new(mode: GameMode, grid: Grid) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            grid,
            capacity: mode.capacity(),
            status: RoomStatus::OpenToJoin,
            games: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn snapshots(&self) -> &[GameSnapshot] {
        &self.snapshots
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.games.iter().any(|g| g.player_id() == player_id)
    }

    pub fn can_join(&self, player_id: &str) -> bool {
        self.status == RoomStatus::OpenToJoin
            && self.games.len() < self.capacity
            && !self.has_player(player_id)
    }

    /// Add a Game for `player_id`. Moves to ReadyToStart once the room is full.
    pub fn join(&mut self, player_id: &str) -> bool {
        if !self.can_join(player_id) {
            debug!("[GameRoom] {} rejected join from {} (status {:?})", self.id, player_id, self.status);
            return false;
        }
        let game = Game::new(player_id.to_string(), self.grid);
        self.snapshots.push(game.initial_state());
        self.games.push(game);
        info!("[GameRoom] {} joined room {} ({}/{})", player_id, self.id, self.games.len(), self.capacity());

        if self.games.len() >= self.capacity() {
            self.status = RoomStatus::ReadyToStart;
        }
        true
    }

    /// ReadyToStart -> Starting. The Games stay Initialized until `start`.
    pub fn pre_start_setup(&mut self) -> bool {
        if self.status != RoomStatus::ReadyToStart {
            return false;
        }
        self.status = RoomStatus::Starting;
        true
    }

    /// Starting -> Running; every Game starts on the same tick.
    pub fn start(&mut self) -> bool {
        if self.status != RoomStatus::Starting {
            return false;
        }
        for game in &mut self.games {
            game.start();
        }
        self.status = RoomStatus::Running;
        info!("[GameRoom] Room {} running with {} game(s)", self.id, self.games.len());
        true
    }

    /// Advance every running Game by one tick and refresh its snapshot.
    pub fn update_game_states(&mut self) {
        if self.status != RoomStatus::Running {
            return;
        }
        let mut finished = 0;
        for (game, snapshot) in self.games.iter_mut().zip(self.snapshots.iter_mut()) {
            if game.status() == GameStatus::Running {
                game.update_state();
                *snapshot = game.current_state();
            } else {
                // Finished on an earlier tick: keep the body, drop the eat delta.
                snapshot.score = None;
                snapshot.food = None;
            }
            if game.status() == GameStatus::Finished {
                finished += 1;
            }
        }
        if finished >= self.games.len() {
            self.status = RoomStatus::Finished;
            info!("[GameRoom] Room {} finished", self.id);
        }
    }

    /// Forward a steering input to the Game owned by `player_id`.
    pub fn update_player_move_position(&mut self, player_id: &str, direction: Direction) -> bool {
        match self.games.iter_mut().find(|g| g.player_id() == player_id) {
            Some(game) => game.update_move_direction(direction),
            None => false,
        }
    }

    /// End the Game of a player who left a running room.
    pub fn forfeit(&mut self, player_id: &str) -> bool {
        if self.status != RoomStatus::Running {
            return false;
        }
        let Some(index) = self.games.iter().position(|g| g.player_id() == player_id) else {
            return false;
        };
        if !self.games[index].finish() {
            return false;
        }
        self.snapshots[index] = self.games[index].current_state();
        true
    }
}
