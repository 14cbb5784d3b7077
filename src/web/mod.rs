//! Browser shell around the rhythm engine.
//!
//! Holds the single `Session` in a `thread_local!`, drives the beat clock from
//! a `setInterval` timer and exposes the game to the page through
//! `#[wasm_bindgen]` functions. The page renders from `snapshot_json()` and
//! forwards taps; it never holds authoritative game state.

mod audio;
mod card;

use std::cell::RefCell;

use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::engine::{self, BEAT_TONE, Difficulty, Rules, Session, Tone};
use crate::share::{self, ShareTarget};

use audio::Audio;

// --- Beat timer ----------------------------------------------------------------

/// Live `setInterval` registration. Dropping it clears the interval, so a
/// stopped or reset session can never receive a stale beat.
struct BeatTimer {
    handle: i32,
    _tick: Closure<dyn FnMut()>,
}

impl BeatTimer {
    fn start(interval_ms: f64) -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let tick = Closure::wrap(Box::new(on_beat_tick) as Box<dyn FnMut()>);
        let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            interval_ms.round() as i32,
        )?;
        Ok(Self { handle, _tick: tick })
    }
}

impl Drop for BeatTimer {
    fn drop(&mut self) {
        if let Some(w) = window() {
            w.clear_interval_with_handle(self.handle);
        }
    }
}

fn on_beat_tick() {
    let now = now_ms();
    with_app(|app| {
        if app.session.on_beat(now) {
            app.play(BEAT_TONE);
        }
    });
}

// --- App state -------------------------------------------------------------------

struct App {
    session: Session,
    beat_timer: Option<BeatTimer>,
    audio: Option<Audio>,
    audio_tried: bool,
}

impl App {
    fn new() -> Self {
        Self {
            session: Session::new(
                Difficulty::default(),
                Rules::default(),
                SmallRng::seed_from_u64(entropy_seed()),
            ),
            beat_timer: None,
            audio: None,
            audio_tried: false,
        }
    }

    fn ensure_audio(&mut self) {
        if !self.audio_tried {
            self.audio_tried = true;
            self.audio = Audio::new();
        }
    }

    fn play(&self, tone: Tone) {
        if let Some(audio) = &self.audio {
            audio.play(tone);
        }
    }

    fn begin(&mut self, battle: Option<bool>) -> Result<(), JsValue> {
        self.ensure_audio();
        self.beat_timer = None;
        let now = now_ms();
        match battle {
            Some(battle) => self.session.start_game(battle, now),
            None => self.session.restart(now),
        }
        self.beat_timer = Some(BeatTimer::start(self.session.clock().interval_ms())?);
        Ok(())
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> T {
    APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        f(slot.get_or_insert_with(App::new))
    })
}

fn now_ms() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

fn entropy_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => return u64::from_le_bytes(buf),
            Err(err) => log::warn!("getrandom failed, seeding from the clock: {err}"),
        }
    }
    (now_ms() * 1000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

// --- Exports ---------------------------------------------------------------------

#[wasm_bindgen]
pub fn set_difficulty(name: &str) -> Result<(), JsValue> {
    let difficulty: Difficulty = name.parse()?;
    with_app(|app| app.session.set_difficulty(difficulty))?;
    Ok(())
}

#[wasm_bindgen]
pub fn start_game(battle: bool) -> Result<(), JsValue> {
    with_app(|app| app.begin(Some(battle)))
}

/// "Play again" with the previous battle setting.
#[wasm_bindgen]
pub fn restart_game() -> Result<(), JsValue> {
    with_app(|app| app.begin(None))
}

/// Returns the hit label (`PERFECT!`, `GOOD!`, `MISS!`), or `undefined` when
/// the tap was ignored.
#[wasm_bindgen]
pub fn tap() -> Option<String> {
    let now = now_ms();
    with_app(|app| {
        app.ensure_audio();
        let outcome = app.session.apply_tap(now)?;
        app.play(outcome.judgement.tier.tone());
        if outcome.ending.is_some() {
            app.beat_timer = None;
        }
        Some(outcome.judgement.tier.label().to_string())
    })
}

#[wasm_bindgen]
pub fn stop_game() {
    with_app(|app| {
        app.beat_timer = None;
        app.session.stop_game();
    });
}

#[wasm_bindgen]
pub fn return_to_menu() {
    with_app(|app| {
        app.beat_timer = None;
        app.session.return_to_menu();
    });
}

/// Drop all timers and audio (view teardown).
#[wasm_bindgen]
pub fn teardown() {
    if let Some(app) = APP.with(|cell| cell.borrow_mut().take()) {
        info!("tearing down at beat {}", app.session.clock().beats());
    }
}

/// Fraction of the current beat elapsed, for the pulse ring.
#[wasm_bindgen]
pub fn beat_phase() -> f64 {
    let now = now_ms();
    with_app(|app| app.session.clock().phase(now))
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn snapshot_json() -> Result<String, JsValue> {
    let now = now_ms();
    with_app(|app| {
        app.session.tick(now);
        serde_json::to_string(&app.session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Move cards and the difficulty list; static for the lifetime of the page.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn catalog_json() -> Result<String, JsValue> {
    serde_json::to_string(&engine::catalog()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn summary_json() -> Result<String, JsValue> {
    with_app(|app| serde_json::to_string(&app.session.summary()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure_rules(json: &str) -> Result<(), JsValue> {
    let rules = Rules::from_json(json)?;
    with_app(|app| app.session.set_rules(rules))?;
    Ok(())
}

#[wasm_bindgen]
pub fn share_text() -> String {
    with_app(|app| share::share_text(&app.session.summary()))
}

/// Export the result card. `copy` returns the post text for the page to put on
/// the clipboard; `download` and `twitter` act directly and return `undefined`.
#[wasm_bindgen]
pub fn share(target: &str) -> Result<Option<String>, JsValue> {
    let target: ShareTarget = target.parse()?;
    let summary = with_app(|app| app.session.summary());
    match target {
        ShareTarget::Copy => Ok(Some(share::share_text(&summary))),
        ShareTarget::Download => card::download(&summary).map(|()| None),
        ShareTarget::Twitter => card::open_intent(&summary).map(|()| None),
    }
}
