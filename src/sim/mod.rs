//! Deterministic game logic
//!
//! All gameplay lives here. This module must stay pure and deterministic:
//! - Virtual millisecond clock only (advanced by `tick`)
//! - Seeded RNG only
//! - No DOM or platform dependencies

pub mod catalog;
pub mod layout;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod tube;

pub use catalog::EyeKind;
pub use layout::{Rect, eye_position, render_all, timer_bar, tube_rect};
pub use schedule::{Scheduler, TaskSlot};
pub use state::{FloatingEye, GameEvent, GameState, IgnoreReason, MoveOutcome};
pub use tick::tick;
pub use tube::{Eye, Tube, is_solved};
