//! Clock advancement
//!
//! Advances the session clock and runs every deferred task that falls due.

use super::schedule::TaskSlot;
use super::state::{GameEvent, GameState};
use crate::consts::TICK_MS;

/// Advance the session clock by `dt_ms`, running due tasks in deadline order
pub fn tick(state: &mut GameState, dt_ms: u64) {
    let until = state.scheduler.now() + dt_ms;
    while let Some(slot) = state.scheduler.pop_due(until) {
        run_task(state, slot);
    }
    state.scheduler.advance_to(until);
}

fn run_task(state: &mut GameState, slot: TaskSlot) {
    match slot {
        TaskSlot::Render => state.render_all(),
        TaskSlot::LevelAdvance => state.advance_level(),
        TaskSlot::CountdownTick => countdown(state),
    }
}

/// One countdown step: restart the level on the first tick that goes negative
fn countdown(state: &mut GameState) {
    state.time_remaining_ms -= TICK_MS as i64;

    if state.time_remaining_ms < 0 {
        log::info!("Time up on level {}", state.level);
        state.push_event(GameEvent::TimeUp { level: state.level });
        state.start_level();
    } else {
        state.scheduler.schedule(TaskSlot::CountdownTick, TICK_MS);
    }
}
