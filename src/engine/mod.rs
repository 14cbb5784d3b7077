//! Rhythm core: beat clock, move sequencer, timing judge and session state.
//!
//! Nothing in here touches the browser. Timestamps are plain milliseconds
//! (`performance.now()` in the wasm shell, arbitrary numbers in tests) and
//! every mutation happens through a named `Session` method, so the whole
//! engine runs under `cargo test` on the host.

pub mod catalog;
pub mod clock;
pub mod difficulty;
pub mod effects;
pub mod judge;
pub mod moves;
pub mod rules;
pub mod session;

pub use catalog::{Catalog, DifficultyEntry, catalog};
pub use clock::{BEAT_TONE, BeatClock};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use effects::{Effect, EffectKind, Effects, Popup, Tone};
pub use judge::{HitTier, Judgement, classify, combo_multiplier, judge, timing_error};
pub use moves::{MoveInfo, MoveKind, MoveSequencer, PREVIEW_LEN};
pub use rules::Rules;
pub use session::{Ending, Mode, Session, SessionState, Snapshot, Summary, TapOutcome};
