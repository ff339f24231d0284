//! Platform layer
//!
//! Mirrors the simulation onto the browser DOM:
//! - One fixed-position element per eye and tube
//! - Click listeners owned by the view, dropped with the level
//! - Countdown bar

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{BoardView, ClickHandler};
