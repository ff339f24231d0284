//! Eye Sort entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::MouseEvent;

    use eye_sort::Settings;
    use eye_sort::consts::MAX_FRAME_MS;
    use eye_sort::platform::{BoardView, ClickHandler};
    use eye_sort::sim::{GameEvent, GameState, MoveOutcome, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        view: BoardView,
        /// Unspent fraction of a millisecond carried between frames
        accumulator: f64,
        last_time: f64,
        needs_rebuild: bool,
    }

    impl Game {
        fn new(state: GameState, view: BoardView) -> Self {
            Self {
                state,
                view,
                accumulator: 0.0,
                last_time: 0.0,
                needs_rebuild: false,
            }
        }

        /// Advance the session clock by the time since the last frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS as f64)
            } else {
                0.0
            };
            self.last_time = time;

            self.accumulator += dt;
            let whole_ms = self.accumulator.floor();
            self.accumulator -= whole_ms;

            tick(&mut self.state, whole_ms as u64);
            self.handle_events();
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::LevelStarted { .. } => self.needs_rebuild = true,
                    GameEvent::Solved { level } => log::debug!("Advancing past level {}", level),
                    GameEvent::TimeUp { level } => log::warn!("Out of time on level {}", level),
                }
            }
        }

        /// Push current positions to the DOM
        fn sync(&mut self) {
            if let Err(e) = self.view.sync(&self.state) {
                log::warn!("Board sync failed: {:?}", e);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Eye Sort starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let timed = settings.progression.is_timed();

        let mut state = GameState::new(settings, seed);
        state.start_level();

        let view = match BoardView::new(document, timed) {
            Ok(view) => view,
            Err(e) => {
                log::error!("Failed to create board: {:?}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(state, view)));
        log::info!("Game initialized with seed: {}", seed);

        // Start game loop
        request_animation_frame(game);
    }

    /// Recreate the DOM for a new level, binding one click listener per tube
    fn rebuild_board(game: &Rc<RefCell<Game>>) {
        let count = game.borrow().state.tube_count();
        let handlers: Vec<ClickHandler> = (0..count)
            .map(|index| {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    on_tube_click(&game, index);
                })
            })
            .collect();

        let mut g = game.borrow_mut();
        let Game { state, view, .. } = &mut *g;
        if let Err(e) = view.rebuild(state, handlers) {
            log::error!("Failed to rebuild board: {:?}", e);
        }
    }

    fn on_tube_click(game: &Rc<RefCell<Game>>, index: usize) {
        let mut g = game.borrow_mut();
        match g.state.apply_move(index) {
            MoveOutcome::Ignored(reason) => log::debug!("Click on tube {} ignored: {:?}", index, reason),
            outcome => log::debug!("Tube {}: {:?}", index, outcome),
        }
        g.handle_events();
        g.sync();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let rebuild = {
            let mut g = game.borrow_mut();
            g.update(time);
            std::mem::take(&mut g.needs_rebuild)
        };
        if rebuild {
            rebuild_board(&game);
        }
        game.borrow_mut().sync();

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eye Sort (native) starting...");
    log::info!("The board is interactive in the browser - run with `trunk serve` for the web version");

    // eye-sort [settings.json] [growth|countdown]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = args.first().map(std::path::PathBuf::from);
    let mut settings = eye_sort::Settings::load(path.as_deref());
    if let Some(mode) = args.get(1).and_then(|s| eye_sort::Progression::from_str(s)) {
        settings.progression = mode;
    }
    let seed = settings.seed.unwrap_or_else(clock_seed);

    play_headless(settings, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Clicks issued by the headless demo
#[cfg(not(target_arch = "wasm32"))]
const DEMO_CLICKS: usize = 200;

/// Simulated time between demo clicks (ms)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_CLICK_INTERVAL_MS: u64 = 200;

/// Shuffle a board and click through it at random, printing the result
#[cfg(not(target_arch = "wasm32"))]
fn play_headless(settings: eye_sort::Settings, seed: u64) {
    use eye_sort::sim::{GameState, tick};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    let mut state = GameState::new(settings, seed);
    state.start_level();
    state.drain_events();
    println!("Seed {}\n{}", seed, state);

    let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut moves = 0;
    for _ in 0..DEMO_CLICKS {
        let index = rng.random_range(0..state.tube_count());
        let outcome = state.apply_move(index);
        if !outcome.is_ignored() {
            moves += 1;
            log::debug!("Tube {}: {:?}", index, outcome);
        }

        tick(&mut state, DEMO_CLICK_INTERVAL_MS);
        for event in state.drain_events() {
            println!("{:?}", event);
        }
    }

    println!("{} moves applied\n{}", moves, state);
}
