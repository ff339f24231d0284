//! Game state and move logic
//!
//! `GameState` is the whole session: tubes, the floating eye, level and clock.
//! Real clicks and the shuffle both go through `apply_move`.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::EyeKind;
use super::layout;
use super::schedule::{Scheduler, TaskSlot};
use super::tube::{Eye, Tube, is_solved};
use crate::consts::*;
use crate::settings::{Progression, Settings};

/// An eye lifted out of its tube
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingEye {
    pub eye: Eye,
    /// Tube the eye was taken from
    pub origin: usize,
}

/// Why a click did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A level transition is pending
    Frozen,
    NoSuchTube,
    /// Nothing to pick up
    EmptyTube,
    /// No room for the held eye
    TubeFull,
}

/// Result of a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Picked { from: usize },
    Placed { to: usize, solved: bool },
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, MoveOutcome::Ignored(_))
    }
}

/// Notable transitions, drained by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh board was built (new level or restart)
    LevelStarted { level: u32, tubes: usize },
    /// The board was sorted; the next level follows after a pause
    Solved { level: u32 },
    /// The clock ran out and the level is being restarted
    TimeUp { level: u32 },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    /// Current level (1-based)
    pub level: u32,
    /// Tubes in display order
    pub tubes: Vec<Tube>,
    pub floating: Option<FloatingEye>,
    /// False while a level is being set up, which keeps the shuffle from winning
    pub started: bool,
    /// Countdown clock (ms); only runs in Countdown mode
    pub time_remaining_ms: i64,
    pub scheduler: Scheduler,
    rng: Pcg32,
    /// Catalog offset for tube colours, fixed for the session
    base_kind: usize,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session; call `start_level` to build the first board
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let base_kind = rng.random_range(0..EyeKind::COUNT);

        Self {
            seed,
            settings: settings.validated(),
            level: 1,
            tubes: Vec::new(),
            floating: None,
            started: false,
            time_remaining_ms: 0,
            scheduler: Scheduler::new(),
            rng,
            base_kind,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a started board from explicit tube contents (no shuffle, no clock)
    ///
    /// Tubes longer than `EYES_PER_TUBE` are cut to capacity.
    pub fn from_layout(settings: Settings, layout: &[&[EyeKind]]) -> Self {
        let mut state = Self::new(settings, 0);
        let mut tubes = Vec::with_capacity(layout.len());
        for kinds in layout {
            let mut tube = Tube::new();
            for &kind in kinds.iter().take(EYES_PER_TUBE) {
                let id = state.next_eye_id();
                tube.eyes.push(Eye::new(id, kind));
            }
            tubes.push(tube);
        }
        state.tubes = tubes;
        state.started = true;
        state.render_all();
        state
    }

    fn next_eye_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn tube_count(&self) -> usize {
        self.tubes.len()
    }

    /// Tubes the current level is built with
    pub fn tubes_for_level(&self) -> usize {
        let initial = self.settings.initial_tubes;
        match self.settings.progression {
            Progression::Growth => {
                (initial + self.level.saturating_sub(1) as usize).min(MAX_TUBES)
            }
            Progression::Countdown => initial,
        }
    }

    /// Eyes on the board, including a floating one
    pub fn eye_count(&self) -> usize {
        self.tubes.iter().map(Tube::len).sum::<usize>() + usize::from(self.floating.is_some())
    }

    /// Clicks are ignored while a level advance is pending
    pub fn is_frozen(&self) -> bool {
        self.scheduler.is_pending(TaskSlot::LevelAdvance)
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Tear down the board and build the current level from scratch
    pub fn start_level(&mut self) {
        self.scheduler.cancel_all();
        self.started = false;
        if let Some(floating) = self.floating.take() {
            log::debug!("Discarding floating eye {}", floating.eye.id);
        }

        let count = self.tubes_for_level();
        let mut tubes = Vec::with_capacity(count);
        for index in 0..count {
            let mut tube = Tube::new();
            // The first tube starts empty
            if index > 0 {
                let kind = EyeKind::from_index(self.base_kind + index);
                for _ in 0..EYES_PER_TUBE {
                    let id = self.next_eye_id();
                    tube.eyes.push(Eye::new(id, kind));
                }
            }
            tubes.push(tube);
        }
        self.tubes = tubes;
        self.render_all();

        self.shuffle();
        self.scheduler.cancel(TaskSlot::Render);
        self.render_all();
        self.started = true;

        if self.settings.progression.is_timed() {
            self.time_remaining_ms = self
                .time_remaining_ms
                .max(0)
                .saturating_add(self.settings.time_bonus_ms);
            self.scheduler.schedule(TaskSlot::CountdownTick, TICK_MS);
        }

        log::info!(
            "Level {} started with {} tubes ({} eyes)",
            self.level,
            count,
            self.eye_count()
        );
        self.push_event(GameEvent::LevelStarted {
            level: self.level,
            tubes: count,
        });
    }

    /// Move on to the next level
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.start_level();
    }

    /// Randomise the board by replaying random clicks
    ///
    /// Keeps clicking past the move budget until no eye is left floating.
    pub fn shuffle(&mut self) {
        let count = self.tubes.len();
        if count == 0 {
            return;
        }

        let mut remaining = self.settings.shuffle_moves_per_tube as usize * count;
        while remaining > 0 || self.floating.is_some() {
            remaining = remaining.saturating_sub(1);
            let index = self.rng.random_range(0..count);
            self.apply_move(index);
        }
    }

    /// Handle a click on tube `index`: pick up, put down, or nothing
    ///
    /// Either the whole move applies or the state is left untouched.
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        if self.is_frozen() {
            return MoveOutcome::Ignored(IgnoreReason::Frozen);
        }
        if index >= self.tubes.len() {
            return MoveOutcome::Ignored(IgnoreReason::NoSuchTube);
        }

        match self.floating.take() {
            Some(floating) => self.place(index, floating),
            None => self.pick(index),
        }
    }

    fn pick(&mut self, index: usize) -> MoveOutcome {
        if self.tubes[index].is_empty() {
            return MoveOutcome::Ignored(IgnoreReason::EmptyTube);
        }

        // Settle the previous drop before the board changes again
        self.flush_render();

        let Some(mut eye) = self.tubes[index].pop() else {
            return MoveOutcome::Ignored(IgnoreReason::EmptyTube);
        };
        eye.pos.y = layout::LIFTED_Y;
        self.floating = Some(FloatingEye { eye, origin: index });
        MoveOutcome::Picked { from: index }
    }

    fn place(&mut self, index: usize, floating: FloatingEye) -> MoveOutcome {
        let FloatingEye { eye, origin } = floating;
        if let Err(eye) = self.tubes[index].push(eye) {
            self.floating = Some(FloatingEye { eye, origin });
            return MoveOutcome::Ignored(IgnoreReason::TubeFull);
        }

        // Hover over the target column; the render task drops it into place
        let x = layout::eye_x(index, self.tubes.len());
        if let Some(eye) = self.tubes[index].eyes.last_mut() {
            eye.pos.x = x;
        }
        let delay = if origin == index { 0 } else { DROP_DELAY_MS };
        self.scheduler.schedule(TaskSlot::Render, delay);

        let solved = self.started && is_solved(&self.tubes);
        if solved {
            log::info!("Level {} solved", self.level);
            self.scheduler.cancel(TaskSlot::CountdownTick);
            self.scheduler.schedule(TaskSlot::LevelAdvance, WIN_DELAY_MS);
            self.push_event(GameEvent::Solved { level: self.level });
        }

        MoveOutcome::Placed { to: index, solved }
    }

    /// Put every in-tube eye at its resting position
    pub fn render_all(&mut self) {
        layout::render_all(&mut self.tubes);
    }

    fn flush_render(&mut self) {
        if self.scheduler.is_pending(TaskSlot::Render) {
            self.scheduler.cancel(TaskSlot::Render);
            self.render_all();
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {} ({}", self.level, self.settings.progression.as_str())?;
        if self.settings.progression.is_timed() {
            write!(f, ", {:.1}s left", self.time_remaining_ms as f64 / 1000.0)?;
        }
        writeln!(f, ")")?;

        for (index, tube) in self.tubes.iter().enumerate() {
            write!(f, "{:>2} |", index)?;
            for eye in &tube.eyes {
                write!(f, " {}", eye.kind)?;
            }
            writeln!(f)?;
        }
        if let Some(floating) = &self.floating {
            writeln!(f, "held: {} (from {})", floating.eye.kind, floating.origin)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EyeKind::{Feline as T, Owl as U};

    fn kinds(tube: &Tube) -> Vec<EyeKind> {
        tube.eyes.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_pick_and_place_scenario() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T; 4], &[U; 4]]);

        assert_eq!(state.apply_move(1), MoveOutcome::Picked { from: 1 });
        assert_eq!(state.floating.as_ref().map(|f| f.eye.kind), Some(T));
        assert_eq!(state.floating.as_ref().map(|f| f.eye.pos.y), Some(layout::LIFTED_Y));

        assert_eq!(
            state.apply_move(0),
            MoveOutcome::Placed {
                to: 0,
                solved: true
            }
        );
        assert_eq!(kinds(&state.tubes[0]), vec![T]);
        assert_eq!(kinds(&state.tubes[1]), vec![T, T, T]);
        assert!(state.floating.is_none());
    }

    #[test]
    fn test_pick_from_empty_is_noop() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T; 4]]);
        let before = state.tubes.clone();

        assert_eq!(
            state.apply_move(0),
            MoveOutcome::Ignored(IgnoreReason::EmptyTube)
        );
        assert_eq!(state.tubes, before);
        assert!(state.floating.is_none());
    }

    #[test]
    fn test_place_into_full_is_noop() {
        let mut state = GameState::from_layout(Settings::default(), &[&[T, U], &[U; 4]]);
        state.apply_move(0);
        let held = state.floating.clone();
        let target = state.tubes[1].clone();

        assert_eq!(state.apply_move(1), MoveOutcome::Ignored(IgnoreReason::TubeFull));
        assert_eq!(state.floating, held);
        assert_eq!(state.tubes[1], target);
    }

    #[test]
    fn test_unknown_tube_is_noop() {
        let mut state = GameState::from_layout(Settings::default(), &[&[T]]);
        assert_eq!(
            state.apply_move(5),
            MoveOutcome::Ignored(IgnoreReason::NoSuchTube)
        );
        assert_eq!(state.eye_count(), 1);
    }

    #[test]
    fn test_drop_delay_depends_on_origin() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T, U]]);

        state.apply_move(1);
        state.apply_move(1);
        assert_eq!(state.scheduler.deadline(TaskSlot::Render), Some(0));

        state.apply_move(1);
        state.apply_move(0);
        assert_eq!(state.scheduler.deadline(TaskSlot::Render), Some(DROP_DELAY_MS));
        // Hovering over the new column until the render task fires
        let dropped = &state.tubes[0].eyes[0];
        assert_eq!(dropped.pos.x, layout::eye_x(0, 2));
        assert_eq!(dropped.pos.y, layout::LIFTED_Y);
    }

    #[test]
    fn test_pick_flushes_pending_render() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T, U], &[U, T]]);
        state.apply_move(1);
        state.apply_move(0);
        assert!(state.scheduler.is_pending(TaskSlot::Render));

        state.apply_move(2);
        assert!(!state.scheduler.is_pending(TaskSlot::Render));
        assert_eq!(state.tubes[0].eyes[0].pos, layout::eye_position(0, 0, 3));
    }

    #[test]
    fn test_no_win_while_not_started() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T, U]]);
        state.started = false;
        state.apply_move(1);
        assert_eq!(
            state.apply_move(0),
            MoveOutcome::Placed {
                to: 0,
                solved: false
            }
        );
        assert!(!state.is_frozen());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_win_freezes_board() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T, U], &[U]]);
        state.apply_move(1);
        assert_eq!(
            state.apply_move(2),
            MoveOutcome::Placed {
                to: 2,
                solved: true
            }
        );
        assert!(state.is_frozen());
        assert_eq!(state.drain_events(), vec![GameEvent::Solved { level: 1 }]);
        assert_eq!(state.apply_move(1), MoveOutcome::Ignored(IgnoreReason::Frozen));
    }

    #[test]
    fn test_start_level_builds_shuffled_board() {
        let settings = Settings {
            progression: Progression::Growth,
            ..Settings::default()
        };
        let mut state = GameState::new(settings, 42);
        state.start_level();

        assert_eq!(state.tube_count(), 3);
        assert_eq!(state.eye_count(), 2 * EYES_PER_TUBE);
        assert!(state.floating.is_none());
        assert!(state.started);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelStarted { level: 1, tubes: 3 }]
        );
        for (i, tube) in state.tubes.iter().enumerate() {
            for (j, eye) in tube.eyes.iter().enumerate() {
                assert_eq!(eye.pos, layout::eye_position(i, j, 3));
            }
        }
    }

    #[test]
    fn test_start_level_discards_floating_eye() {
        let mut state = GameState::new(Settings::default(), 3);
        state.start_level();
        let from = state.tubes.iter().position(|t| !t.is_empty()).unwrap();
        state.apply_move(from);
        assert!(state.floating.is_some());

        state.start_level();
        assert!(state.floating.is_none());
        assert_eq!(state.eye_count(), (state.tube_count() - 1) * EYES_PER_TUBE);
    }

    #[test]
    fn test_growth_adds_tube_per_level() {
        let settings = Settings {
            progression: Progression::Growth,
            ..Settings::default()
        };
        let mut state = GameState::new(settings, 1);
        state.start_level();
        state.advance_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.tube_count(), 4);
        assert_eq!(state.time_remaining_ms, 0);
        assert!(!state.scheduler.is_pending(TaskSlot::CountdownTick));
    }

    #[test]
    fn test_countdown_keeps_tube_count() {
        let mut state = GameState::new(Settings::default(), 1);
        state.start_level();
        assert_eq!(state.time_remaining_ms, TIME_BONUS_MS);
        assert!(state.scheduler.is_pending(TaskSlot::CountdownTick));

        state.advance_level();
        assert_eq!(state.tube_count(), 3);
        assert_eq!(state.time_remaining_ms, 2 * TIME_BONUS_MS);
    }

    #[test]
    fn test_growth_stops_at_max_tubes() {
        let settings = Settings {
            progression: Progression::Growth,
            initial_tubes: MAX_TUBES,
            shuffle_moves_per_tube: 10,
            ..Settings::default()
        };
        let mut state = GameState::new(settings, 1);
        state.start_level();
        state.advance_level();
        assert_eq!(state.tube_count(), MAX_TUBES);
    }

    #[test]
    fn test_huge_time_bonus_never_overflows() {
        let settings =
            Settings::from_json(r#"{ "time_bonus_ms": 9000000000000000000 }"#).unwrap();
        let mut state = GameState::new(settings, 1);
        state.start_level();
        for _ in 0..5 {
            state.advance_level();
        }
        assert_eq!(state.time_remaining_ms, 6 * MAX_TIME_BONUS_MS);

        state.time_remaining_ms = i64::MAX;
        state.advance_level();
        assert_eq!(state.time_remaining_ms, i64::MAX);
    }

    #[test]
    fn test_same_seed_same_board() {
        let mut a = GameState::new(Settings::default(), 99999);
        let mut b = GameState::new(Settings::default(), 99999);
        a.start_level();
        b.start_level();
        assert_eq!(a.tubes, b.tubes);
    }

    #[test]
    fn test_display_lists_tubes() {
        let mut state = GameState::from_layout(Settings::default(), &[&[], &[T, U]]);
        state.apply_move(1);
        let text = state.to_string();
        assert!(text.contains(" 0 |\n"));
        assert!(text.contains(" 1 | F\n"));
        assert!(text.contains("held: O (from 1)"));
    }
}
