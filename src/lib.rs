//! ARC Clicker core crate.
//!
//! A clicker game compiled to WASM: manual clicks and auto clickers raise a
//! score that buys upgrades. A connected browser wallet can read and record the
//! score on the ARC test network contract. `start_game()` mounts the UI; the
//! rules (`game`), calldata and wallet sequencing (`chain`) and configuration
//! are plain Rust and testable natively.

use wasm_bindgen::prelude::*;

mod app;
pub mod chain;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use ui::format_thousands;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints exposed to the host page
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start()
}

/// Buy `"power"` or `"auto"` from script. Returns false when the game has not
/// started, the kind is unknown, or the score is too low.
#[wasm_bindgen]
pub fn purchase_upgrade(kind: &str) -> bool {
    app::purchase(kind)
}

/// Current local score (0 before `start_game`).
#[wasm_bindgen]
pub fn game_score() -> f64 {
    app::score() as f64
}
