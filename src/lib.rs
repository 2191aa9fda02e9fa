//! Bucket Drop core crate.
//!
//! Colored squares fall down a canvas; steer the newest one with the arrow keys
//! into the bucket of its color. Fill all four buckets before the clock runs
//! out. Game rules live in [`game`] and run without a browser; [`web`] binds
//! them to the page and is what `start_game()` launches.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod web;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{GameState, Outcome, Phase};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        // a logger is already installed (module started twice)
        return;
    }
    log::info!("bucket-drop {} loaded", env!("CARGO_PKG_VERSION"));
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Show the intro and start playing after the intro delay, with default settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::launch(GameConfig::default())?;
    Ok(())
}

/// Like [`start_game`] but with settings from a (partial) JSON object, e.g.
/// `{"time_limit_secs": 60, "fall_speed": 240}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::launch(config)?;
    Ok(())
}
