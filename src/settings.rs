//! Session settings
//!
//! Read once at startup: from an inline JSON `<script>` block on the web, from
//! an optional JSON file natively. Every field has a default, so partial
//! documents are fine.

use serde::{Deserialize, Serialize};

use crate::consts::{
    INITIAL_TUBES, MAX_SHUFFLE_MOVES_PER_TUBE, MAX_TIME_BONUS_MS, MAX_TUBES,
    SHUFFLE_MOVES_PER_TUBE, TICK_MS, TIME_BONUS_MS,
};

/// How the game moves from one level to the next
///
/// `Countdown` is the game; `Growth` is an untimed practice variant. A session
/// runs exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Progression {
    /// Practice variant: every solved level adds a tube, no clock
    Growth,
    /// Fixed tube count, and the level restarts when the clock runs out
    #[default]
    Countdown,
}

impl Progression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Progression::Growth => "growth",
            Progression::Countdown => "countdown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "growth" | "grow" => Some(Progression::Growth),
            "countdown" | "timed" => Some(Progression::Countdown),
            _ => None,
        }
    }

    /// Whether this mode runs the countdown clock
    pub fn is_timed(&self) -> bool {
        matches!(self, Progression::Countdown)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub progression: Progression,
    /// Tubes on the first level, one of them empty
    pub initial_tubes: usize,
    /// Time added on each level start (ms, Countdown only)
    pub time_bonus_ms: i64,
    /// Synthetic shuffle moves per tube
    pub shuffle_moves_per_tube: u32,
    /// Fixed RNG seed; a clock-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            progression: Progression::default(),
            initial_tubes: INITIAL_TUBES,
            time_bonus_ms: TIME_BONUS_MS,
            shuffle_moves_per_tube: SHUFFLE_MOVES_PER_TUBE,
            seed: None,
        }
    }
}

impl Settings {
    /// Element id of the inline settings block (web)
    pub const ELEMENT_ID: &'static str = "eye-sort-settings";

    /// Parse settings from JSON and clamp them to playable values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    /// Clamp fields to values the game can run with
    pub fn validated(mut self) -> Self {
        // A board needs a spare tube plus at least one filled one
        self.initial_tubes = self.initial_tubes.clamp(2, MAX_TUBES);
        self.shuffle_moves_per_tube = self.shuffle_moves_per_tube.min(MAX_SHUFFLE_MOVES_PER_TUBE);
        // Less than one tick would restart the level on every tick
        self.time_bonus_ms = self.time_bonus_ms.clamp(TICK_MS as i64, MAX_TIME_BONUS_MS);
        self
    }

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::parse_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, or defaults when no path is given
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({} mode)", settings.progression.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
