//! Eye Sort - a water-sort style puzzle played with eyes and test tubes
//!
//! Core modules:
//! - `sim`: Deterministic game logic (tubes, moves, shuffle, layout, clock)
//! - `platform`: Browser DOM view
//! - `settings`: Session configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Progression, Settings};

/// Game configuration constants
pub mod consts {
    /// Eyes a single tube can hold
    pub const EYES_PER_TUBE: usize = 4;

    /// Eye diameter (px)
    pub const EYE_SIZE: f32 = 28.0;
    /// Vertical gap between stacked eyes (px)
    pub const EYE_GAP: f32 = 1.0;
    /// Inner width of a tube (px)
    pub const TUBE_SIZE: f32 = 32.0;
    /// Tube outline width (px)
    pub const TUBE_BORDER: f32 = 2.0;
    /// Horizontal gap between tubes (px)
    pub const TUBE_GAP: f32 = 16.0;

    /// Delay before a dropped eye falls into a different tube (ms)
    pub const DROP_DELAY_MS: u64 = 150;
    /// Pause between solving a level and building the next one (ms)
    pub const WIN_DELAY_MS: u64 = 800;
    /// Countdown tick interval, also the amount removed per tick (ms)
    pub const TICK_MS: u64 = 100;
    /// Longest frame the browser loop will feed into the clock (ms)
    pub const MAX_FRAME_MS: u64 = 250;

    /// Synthetic moves per tube when shuffling a fresh board
    pub const SHUFFLE_MOVES_PER_TUBE: u32 = 1000;
    /// Tubes on the first level (one starts empty)
    pub const INITIAL_TUBES: usize = 3;
    /// Time added to the clock on every level start (ms)
    pub const TIME_BONUS_MS: i64 = 30_000;

    /// Settings bounds
    pub const MAX_TUBES: usize = 16;
    pub const MAX_SHUFFLE_MOVES_PER_TUBE: u32 = 10_000;
    pub const MAX_TIME_BONUS_MS: i64 = 10 * 60 * 1000;
}
