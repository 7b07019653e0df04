/// Pre-start countdown for GameManager rooms.
///
/// A full room is switched to Starting, then receives countdown values 1..=COUNTDOWN_STEPS,
/// one per tick interval, before its Games start. Each step is a separate timer on the
/// manager's context, so other rooms keep ticking meanwhile. Removing the room cancels
/// the pending step, and every step re-checks the room before doing anything.

use actix::prelude::*;
use log::{debug, info};

use crate::config::scheduler::COUNTDOWN_STEPS;
use crate::server::matchmaking::types::RoomId;
use super::messages::ServerWsMessage;
use super::room::RoomStatus;
use super::server::GameManager;

/// Move a ReadyToStart room to Starting and send the first countdown value.
pub fn begin_countdown(this: &mut GameManager, room_id: RoomId, ctx: &mut Context<GameManager>) {
    let Some(room) = this.room_mut(room_id) else {
        return;
    };
    if !room.pre_start_setup() {
        return;
    }
    info!("[Countdown] Room {} starting in {} steps", room_id, COUNTDOWN_STEPS);
    countdown_step(this, room_id, 1, ctx);
}

/// Stop a room's pending countdown step, if any.
pub fn cancel_countdown(this: &mut GameManager, room_id: RoomId, ctx: &mut Context<GameManager>) {
    if let Some(handle) = this.countdowns.remove(&room_id) {
        ctx.cancel_future(handle);
        info!("[Countdown] Room {} countdown cancelled", room_id);
    }
}

fn countdown_step(this: &mut GameManager, room_id: RoomId, n: u32, ctx: &mut Context<GameManager>) {
    if this.room(room_id).map(|r| r.status()) != Some(RoomStatus::Starting) {
        this.countdowns.remove(&room_id);
        return;
    }
    debug!("[Countdown] Room {}: {}", room_id, n);
    this.broadcast(room_id, ServerWsMessage::countdown(n));

    let handle = ctx.run_later(this.tick_interval, move |act, ctx| {
        if n < COUNTDOWN_STEPS {
            countdown_step(act, room_id, n + 1, ctx);
        } else {
            finish_countdown(act, room_id);
        }
    });
    this.countdowns.insert(room_id, handle);
}

fn finish_countdown(this: &mut GameManager, room_id: RoomId) {
    this.countdowns.remove(&room_id);
    if let Some(room) = this.room_mut(room_id) {
        room.start();
    }
}
