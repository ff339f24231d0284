//! Board layout
//!
//! Every position is a pixel offset from the viewport centre to the top-left
//! corner of the element. Tubes are laid out symmetrically around the
//! horizontal centre, one column per tube; eyes stack bottom-up inside them.

use glam::Vec2;

use super::tube::Tube;
use crate::consts::*;

/// Horizontal space taken by one tube column
pub const COLUMN_PITCH: f32 = TUBE_SIZE + TUBE_BORDER + TUBE_GAP;

/// Outer width of a tube element
pub const TUBE_WIDTH: f32 = TUBE_SIZE + TUBE_BORDER * 2.0;

/// Outer height of a tube element
pub const TUBE_HEIGHT: f32 =
    EYES_PER_TUBE as f32 * (EYE_SIZE + EYE_GAP) + TUBE_SIZE - EYE_SIZE + TUBE_BORDER * 2.0;

/// Height of the row a lifted eye floats in
pub const LIFTED_Y: f32 = -(EYES_PER_TUBE as f32 * EYE_SIZE + TUBE_BORDER * 2.0);

/// Vertical offset of the countdown bar
pub const TIMER_BAR_Y: f32 = 100.0;

/// Clock milliseconds represented by one pixel of timer bar
pub const TIMER_MS_PER_PX: f32 = 300.0;

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Centre line of tube `index` among `count` tubes
#[inline]
pub fn column_center(index: usize, count: usize) -> f32 {
    (index as f32 + 0.5 - count as f32 / 2.0) * COLUMN_PITCH
}

/// Left edge of any eye sitting over column `index`
#[inline]
pub fn eye_x(index: usize, count: usize) -> f32 {
    column_center(index, count) - EYE_SIZE / 2.0
}

/// Resting position of the eye in `slot` (0 = bottom) of tube `index`
pub fn eye_position(index: usize, slot: usize, count: usize) -> Vec2 {
    Vec2::new(
        eye_x(index, count),
        TUBE_BORDER + TUBE_SIZE - (EYE_SIZE + EYE_GAP) * slot as f32,
    )
}

/// Bounds of tube `index` among `count` tubes
pub fn tube_rect(index: usize, count: usize) -> Rect {
    Rect {
        pos: Vec2::new(
            column_center(index, count) - TUBE_WIDTH / 2.0,
            -(EYE_SIZE + EYE_GAP) * 2.0,
        ),
        size: Vec2::new(TUBE_WIDTH, TUBE_HEIGHT),
    }
}

/// Countdown bar for `remaining_ms` left on the clock
pub fn timer_bar(remaining_ms: i64) -> Rect {
    let width = remaining_ms.max(0) as f32 / TIMER_MS_PER_PX;
    Rect {
        pos: Vec2::new(-width / 2.0, TIMER_BAR_Y),
        size: Vec2::new(width, TUBE_BORDER),
    }
}

/// Move every eye inside a tube to its resting position
///
/// Floating eyes are not part of `tubes` and are left where the move logic put them.
pub fn render_all(tubes: &mut [Tube]) {
    let count = tubes.len();
    for (index, tube) in tubes.iter_mut().enumerate() {
        for (slot, eye) in tube.eyes.iter_mut().enumerate() {
            eye.pos = eye_position(index, slot, count);
        }
    }
}
