/// Game manager actor.
///
/// Owns the registry of live rooms and is the only place they are mutated. Joins,
/// inputs and disconnects arrive as actor messages and are handled one at a time
/// between scheduler ticks, so a tick never observes a half-applied change.
/// Snapshots are pushed to subscribers with `do_send` and never awaited.

use actix::prelude::*;
use actix::MessageResult;
use std::collections::HashMap;
use std::time::Duration;
use log::{debug, info};

use crate::config::scheduler::TICK_INTERVAL_MS;
use crate::game::{Direction, Grid, PlayerId};
use crate::server::matchmaking::matchmaker::assign_room;
use crate::server::matchmaking::types::{ConnectionId, GameMode, RoomId};
use super::countdown::{begin_countdown, cancel_countdown};
use super::messages::ServerWsMessage;
use super::room::{GameRoom, RoomStatus};

/// A connection subscribed to a room's broadcasts.
pub(super) struct Subscriber {
    pub player_id: PlayerId,
    pub recipient: Recipient<ServerWsMessage>,
}

pub struct GameManager {
    pub(super) grid: Grid,
    pub(super) tick_interval: Duration,
    /// Live rooms in creation order; ticks and matchmaking walk them in this order.
    pub(super) rooms: Vec<GameRoom>,
    pub(super) subscribers: HashMap<RoomId, HashMap<ConnectionId, Subscriber>>,
    /// In-flight countdown step per room.
    pub(super) countdowns: HashMap<RoomId, SpawnHandle>,
}

impl GameManager {
    pub fn new() -> Self {
        Self::with_settings(Grid::default(), Duration::from_millis(TICK_INTERVAL_MS))
    }

    pub fn with_settings(grid: Grid, tick_interval: Duration) -> Self {
        Self {
            grid,
            tick_interval,
            rooms: Vec::new(),
            subscribers: HashMap::new(),
            countdowns: HashMap::new(),
        }
    }

    pub(super) fn room(&self, room_id: RoomId) -> Option<&GameRoom> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub(super) fn room_mut(&mut self, room_id: RoomId) -> Option<&mut GameRoom> {
        self.rooms.iter_mut().find(|r| r.id == room_id)
    }

    /// Send a message to every connection subscribed to `room_id`.
    pub(super) fn broadcast(&self, room_id: RoomId, msg: ServerWsMessage) {
        if let Some(subscribers) = self.subscribers.get(&room_id) {
            for subscriber in subscribers.values() {
                subscriber.recipient.do_send(msg.clone());
            }
        }
    }

    /// Place a player in a room and subscribe the connection to it.
    pub fn join_game_room(
        &mut self,
        connection_id: ConnectionId,
        player_id: PlayerId,
        mode: GameMode,
        recipient: Recipient<ServerWsMessage>,
    ) -> RoomId {
        let room_id = assign_room(&mut self.rooms, &player_id, mode, self.grid);
        // Reply before any broadcast of this room can reach the connection.
        recipient.do_send(ServerWsMessage::GameJoined { room_id });
        self.subscribers
            .entry(room_id)
            .or_default()
            .insert(connection_id, Subscriber { player_id, recipient });
        room_id
    }

    pub fn update_player_move_position(&mut self, room_id: RoomId, player_id: &str, direction: Direction) {
        let Some(room) = self.room_mut(room_id) else {
            debug!("[GameManager] Input for unknown room {} dropped", room_id);
            return;
        };
        if !room.update_player_move_position(player_id, direction) {
            debug!("[GameManager] Input {:?} from {} ignored in room {}", direction, player_id, room_id);
        }
    }

    /// One scheduler tick: start ready rooms, advance running ones, drop finished ones.
    fn tick(&mut self, ctx: &mut Context<Self>) {
        let mut ready = Vec::new();
        let mut updates = Vec::new();
        let mut finished = Vec::new();

        for room in &mut self.rooms {
            match room.status() {
                RoomStatus::ReadyToStart => ready.push(room.id),
                RoomStatus::Running => {
                    room.update_game_states();
                    updates.push((room.id, ServerWsMessage::game_states(room.snapshots(), false)));
                }
                RoomStatus::Finished => finished.push(room.id),
                RoomStatus::OpenToJoin | RoomStatus::Starting => {}
            }
        }

        for room_id in ready {
            if let Some(room) = self.room(room_id) {
                self.broadcast(room_id, ServerWsMessage::game_states(room.snapshots(), true));
            }
            begin_countdown(self, room_id, ctx);
        }
        for (room_id, msg) in updates {
            self.broadcast(room_id, msg);
        }
        for room_id in finished {
            self.remove_room(room_id, ctx, false);
        }
    }

    /// Drop a room, its countdown and its subscriptions.
    fn remove_room(&mut self, room_id: RoomId, ctx: &mut Context<Self>, notify: bool) {
        cancel_countdown(self, room_id, ctx);
        if notify {
            self.broadcast(room_id, ServerWsMessage::RoomClosed { room_id });
        }
        self.rooms.retain(|r| r.id != room_id);
        self.subscribers.remove(&room_id);
        info!("[GameManager] Room {} removed ({} live)", room_id, self.rooms.len());
    }

    /// Unsubscribe a closed connection. Rooms that have not started yet are closed;
    /// in running rooms the player's game is forfeited.
    fn disconnect(&mut self, connection_id: ConnectionId, ctx: &mut Context<Self>) {
        let mut left = Vec::new();
        for (room_id, subscribers) in self.subscribers.iter_mut() {
            if let Some(subscriber) = subscribers.remove(&connection_id) {
                left.push((*room_id, subscriber.player_id));
            }
        }

        for (room_id, player_id) in left {
            let Some(room) = self.room_mut(room_id) else { continue };
            if !room.has_player(&player_id) {
                continue;
            }
            match room.status() {
                RoomStatus::OpenToJoin | RoomStatus::ReadyToStart | RoomStatus::Starting => {
                    info!("[GameManager] {} left room {} before it started", player_id, room_id);
                    self.remove_room(room_id, ctx, true);
                }
                RoomStatus::Running => {
                    room.forfeit(&player_id);
                    info!("[GameManager] {} forfeited in room {}", player_id, room_id);
                }
                RoomStatus::Finished => {}
            }
        }
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for GameManager {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[GameManager] Started, ticking every {:?}", self.tick_interval);
        ctx.run_interval(self.tick_interval, |act, ctx| act.tick(ctx));
    }
}

/// Message: a player asks to be matched into a room. Returns the room id.
#[derive(Message)]
#[rtype(result = "RoomId")]
pub struct JoinGameRoom {
    pub connection_id: ConnectionId,
    pub player_id: PlayerId,
    pub mode: GameMode,
    pub recipient: Recipient<ServerWsMessage>,
}

/// Message: steering input for a player's snake. Fire-and-forget.
#[derive(Message)]
#[rtype(result = "()")]
pub struct UpdatePlayerMovePosition {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub direction: Direction,
}

/// Message: a connection went away.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub connection_id: ConnectionId,
}

/// Message: board dimensions.
#[derive(Message)]
#[rtype(result = "Grid")]
pub struct InitGrid;

/// Message: current status of a room, `None` once it is gone.
#[derive(Message)]
#[rtype(result = "Option<RoomStatus>")]
pub struct GetRoomStatus {
    pub room_id: RoomId,
}

impl Handler<JoinGameRoom> for GameManager {
    type Result = MessageResult<JoinGameRoom>;

    fn handle(&mut self, msg: JoinGameRoom, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.join_game_room(msg.connection_id, msg.player_id, msg.mode, msg.recipient))
    }
}

impl Handler<UpdatePlayerMovePosition> for GameManager {
    type Result = ();

    fn handle(&mut self, msg: UpdatePlayerMovePosition, _ctx: &mut Self::Context) -> Self::Result {
        self.update_player_move_position(msg.room_id, &msg.player_id, msg.direction);
    }
}

impl Handler<Disconnect> for GameManager {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        self.disconnect(msg.connection_id, ctx);
    }
}

impl Handler<InitGrid> for GameManager {
    type Result = MessageResult<InitGrid>;

    fn handle(&mut self, _msg: InitGrid, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.grid)
    }
}

impl Handler<GetRoomStatus> for GameManager {
    type Result = MessageResult<GetRoomStatus>;

    fn handle(&mut self, msg: GetRoomStatus, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.room(msg.room_id).map(|r| r.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    /// Stands in for a client connection and records everything it receives.
    struct Recorder {
        received: Arc<Mutex<Vec<ServerWsMessage>>>,
    }

    impl Actor for Recorder {
        type Context = Context<Self>;
    }

    impl Handler<ServerWsMessage> for Recorder {
        type Result = ();

        fn handle(&mut self, msg: ServerWsMessage, _ctx: &mut Self::Context) {
            self.received.lock().unwrap().push(msg);
        }
    }

    fn recorder() -> (Recipient<ServerWsMessage>, Arc<Mutex<Vec<ServerWsMessage>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let addr = Recorder { received: received.clone() }.start();
        (addr.recipient(), received)
    }

    fn fast_manager(tick_ms: u64) -> Addr<GameManager> {
        GameManager::with_settings(Grid::new(12, 12), Duration::from_millis(tick_ms)).start()
    }

    fn join(player: &str, mode: GameMode, recipient: Recipient<ServerWsMessage>) -> (ConnectionId, JoinGameRoom) {
        let connection_id = Uuid::new_v4();
        let msg = JoinGameRoom {
            connection_id,
            player_id: player.to_string(),
            mode,
            recipient,
        };
        (connection_id, msg)
    }

    #[actix::test]
    async fn test_solo_room_counts_down_then_runs() {
        let manager = fast_manager(20);
        let (recipient, received) = recorder();
        let (_, msg) = join("alice", GameMode::Solo, recipient);
        let room_id = manager.send(msg).await.unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        let events = received.lock().unwrap().clone();
        assert_eq!(events[0], ServerWsMessage::GameJoined { room_id });
        match &events[1] {
            ServerWsMessage::ReceiveGameStates { snapshots, initial } => {
                assert!(*initial);
                assert_eq!(snapshots.len(), 1);
                assert_eq!(snapshots[0].player_id, "alice");
            }
            other => panic!("expected initial game states, got {:?}", other),
        }
        let countdown: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                ServerWsMessage::ReceiveCountdown { n } => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, vec![1, 2, 3]);
        assert!(events.iter().any(|e| matches!(e, ServerWsMessage::ReceiveGameStates { initial: false, .. })));
    }

    #[actix::test]
    async fn test_finished_room_is_removed() {
        let manager = fast_manager(20);
        let (recipient, _received) = recorder();
        let (_, msg) = join("alice", GameMode::Solo, recipient);
        let room_id = manager.send(msg).await.unwrap();

        // Steer into the top wall as soon as the room is live.
        manager.do_send(UpdatePlayerMovePosition {
            room_id,
            player_id: "alice".to_string(),
            direction: Direction::Up,
        });
        tokio::time::sleep(Duration::from_millis(400)).await;

        let status = manager.send(GetRoomStatus { room_id }).await.unwrap();
        assert_eq!(status, None);
    }

    #[actix::test]
    async fn test_duel_players_share_a_room() {
        let manager = fast_manager(20);
        let (first, _) = recorder();
        let (second, _) = recorder();
        let (third, _) = recorder();

        let a = manager.send(join("alice", GameMode::Duel, first).1).await.unwrap();
        let b = manager.send(join("bob", GameMode::Duel, second).1).await.unwrap();
        let c = manager.send(join("carol", GameMode::Duel, third).1).await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let status = manager.send(GetRoomStatus { room_id: c }).await.unwrap();
        assert_eq!(status, Some(RoomStatus::OpenToJoin));
    }

    #[actix::test]
    async fn test_disconnect_during_countdown_cancels_room() {
        let manager = fast_manager(50);
        let (first, received) = recorder();
        let (second, _) = recorder();
        let (alice_conn, alice) = join("alice", GameMode::Duel, first);
        let (bob_conn, bob) = join("bob", GameMode::Duel, second);
        let room_id = manager.send(alice).await.unwrap();
        manager.send(bob).await.unwrap();

        // Let the first tick start the countdown, then drop bob mid-way.
        tokio::time::sleep(Duration::from_millis(70)).await;
        manager.send(Disconnect { connection_id: bob_conn }).await.unwrap();

        let status = manager.send(GetRoomStatus { room_id }).await.unwrap();
        assert_eq!(status, None);

        tokio::time::sleep(Duration::from_millis(250)).await;
        let events = received.lock().unwrap().clone();
        assert!(events.contains(&ServerWsMessage::RoomClosed { room_id }));
        let countdown_steps = events
            .iter()
            .filter(|e| matches!(e, ServerWsMessage::ReceiveCountdown { .. }))
            .count();
        assert!(countdown_steps < 3);
        assert!(!events.iter().any(|e| matches!(e, ServerWsMessage::ReceiveGameStates { initial: false, .. })));

        // Alice's connection is no longer subscribed anywhere; this must be a no-op.
        manager.send(Disconnect { connection_id: alice_conn }).await.unwrap();
    }

    #[actix::test]
    async fn test_open_room_closes_when_waiting_player_leaves() {
        let manager = fast_manager(20);
        let (recipient, _) = recorder();
        let (conn, msg) = join("alice", GameMode::Duel, recipient);
        let room_id = manager.send(msg).await.unwrap();
        manager.send(Disconnect { connection_id: conn }).await.unwrap();

        let status = manager.send(GetRoomStatus { room_id }).await.unwrap();
        assert_eq!(status, None);

        // A new duel player gets a fresh room.
        let (other, _) = recorder();
        let next = manager.send(join("bob", GameMode::Duel, other).1).await.unwrap();
        assert_ne!(room_id, next);
    }

    #[actix::test]
    async fn test_input_for_missing_room_is_harmless() {
        let manager = fast_manager(20);
        manager
            .send(UpdatePlayerMovePosition {
                room_id: Uuid::new_v4(),
                player_id: "ghost".to_string(),
                direction: Direction::Down,
            })
            .await
            .unwrap();
        let grid = manager.send(InitGrid).await.unwrap();
        assert_eq!(grid, Grid::new(12, 12));
    }

    /// Per-tick heads of every non-initial `ReceiveGameStates`, asserting two snapshots each.
    fn duel_heads(events: &[ServerWsMessage]) -> Vec<(i32, i32)> {
        events
            .iter()
            .filter_map(|e| match e {
                ServerWsMessage::ReceiveGameStates { snapshots, initial: false } => Some(snapshots),
                _ => None,
            })
            .map(|snapshots| {
                assert_eq!(snapshots.len(), 2);
                assert_eq!(snapshots[0].player_id, "alice");
                assert_eq!(snapshots[1].player_id, "bob");
                (snapshots[0].segments[0].x, snapshots[1].segments[0].x)
            })
            .collect()
    }

    #[actix::test]
    async fn test_duel_ticks_reach_both_players() {
        let manager = fast_manager(20);
        let (first, alice_events) = recorder();
        let (second, bob_events) = recorder();
        let room_id = manager.send(join("alice", GameMode::Duel, first).1).await.unwrap();
        manager.send(join("bob", GameMode::Duel, second).1).await.unwrap();

        // Countdown plus ten ticks until both snakes reach the right wall, then cleanup.
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(manager.send(GetRoomStatus { room_id }).await.unwrap(), None);

        let alice_events = alice_events.lock().unwrap().clone();
        let bob_events = bob_events.lock().unwrap().clone();
        let heads = duel_heads(&alice_events);
        assert_eq!(heads, duel_heads(&bob_events));

        // Both snakes start at x = 2 heading Right and move one cell per tick.
        let mut expected: Vec<(i32, i32)> = (3..=11).map(|x| (x, x)).collect();
        // The tick that hits the wall is still broadcast, with the body unchanged.
        expected.push((11, 11));
        assert_eq!(heads, expected);

        assert!(!alice_events.contains(&ServerWsMessage::RoomClosed { room_id }));
    }
}
