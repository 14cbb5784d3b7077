//! Dance with Tanssi core crate.
//!
//! A tap-on-the-beat rhythm game: the `engine` module holds the beat clock,
//! move queue, timing judge and session state machine as plain Rust (natively
//! testable), `share` builds the end-of-game post and score card, and the
//! browser shell in `web` wires it all to the page through wasm-bindgen.

use wasm_bindgen::prelude::*;

pub mod engine;
pub mod share;
pub mod web; // wasm-bindgen exports

mod error;
mod logging;

pub use engine::{Difficulty, HitTier, MoveKind, Rules, Session, Snapshot, Summary};
pub use error::DanceError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init(level);
}
