//! Session state machine: menu -> playing -> game over.
//!
//! `Session` owns everything a running game mutates (counters, beat clock,
//! move queue, transient effects). The host only forwards events (`start_game`,
//! `apply_tap`, `on_beat`, `tick`, `stop_game`) and renders [`Snapshot`]s.

use log::{debug, info};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::clock::BeatClock;
use super::difficulty::Difficulty;
use super::effects::{EffectKind, Effects, Popup};
use super::judge::{self, HitTier, Judgement};
use super::moves::{MoveKind, MoveSequencer, PREVIEW_LEN};
use super::rules::Rules;
use crate::error::DanceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub enum Mode {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Why a session left `Playing` on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Ending {
    /// Missed while already in the danger zone.
    Defeat,
    /// Opponent health reached zero in battle mode.
    Victory,
}

/// Authoritative counters for one session.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SessionState {
    pub mode: Mode,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub health: u32,
    pub perfect_hits: u32,
    pub good_hits: u32,
    pub missed_hits: u32,
    pub battle: bool,
    pub opponent_health: u32, // 0 outside battle mode
    pub ending: Option<Ending>,
}

impl SessionState {
    /// Fresh counters for a session that is about to start playing.
    pub fn new(battle: bool, rules: &Rules) -> Self {
        Self {
            mode: Mode::Playing,
            health: rules.max_health,
            battle,
            opponent_health: if battle { rules.opponent_health } else { 0 },
            ..Self::default()
        }
    }

    /// The per-tap transition. Returns the ending when this tap ends the game.
    ///
    /// The danger check reads health as it was *before* this miss, so the
    /// session ends one miss after the bar first reaches the threshold.
    pub fn apply(&mut self, judgement: &Judgement, rules: &Rules) -> Option<Ending> {
        let health_before = self.health;
        if judgement.tier.is_hit() {
            if judgement.tier == HitTier::Perfect {
                self.perfect_hits += 1;
            } else {
                self.good_hits += 1;
            }
            self.combo += 1;
            self.score += judgement.points;
            self.max_combo = self.max_combo.max(self.combo);
            if self.battle {
                let damage = if judgement.tier == HitTier::Perfect {
                    rules.perfect_damage
                } else {
                    rules.good_damage
                };
                self.opponent_health = self.opponent_health.saturating_sub(damage);
            }
        } else {
            self.combo = 0;
            self.missed_hits += 1;
            self.health = self.health.saturating_sub(rules.miss_penalty);
        }

        let ending = if !judgement.tier.is_hit() && health_before <= rules.danger_health {
            Some(Ending::Defeat)
        } else if self.battle && self.opponent_health == 0 {
            Some(Ending::Victory)
        } else {
            None
        };
        if let Some(end) = ending {
            if end == Ending::Victory {
                self.score += rules.victory_bonus;
            }
            self.mode = Mode::GameOver;
            self.ending = Some(end);
        }
        ending
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            max_combo: self.max_combo,
            accuracy: accuracy_percent(self.perfect_hits, self.good_hits, self.missed_hits),
            perfect_hits: self.perfect_hits,
            good_hits: self.good_hits,
            missed_hits: self.missed_hits,
            victory: self.ending == Some(Ending::Victory),
        }
    }
}

/// `round(100 * hits / taps)`, or 0 before the first tap. Halves round up.
pub fn accuracy_percent(perfect: u32, good: u32, missed: u32) -> u32 {
    let hits = perfect as u64 + good as u64;
    let total = hits + missed as u64;
    if total == 0 {
        return 0;
    }
    ((200 * hits + total) / (2 * total)) as u32
}

/// What the host gets back from a judged tap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TapOutcome {
    pub judgement: Judgement,
    /// The move that was performed (head of the queue before the tap).
    pub performed: MoveKind,
    pub ending: Option<Ending>,
}

/// End-of-session numbers consumed by the share card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Summary {
    pub score: u64,
    pub max_combo: u32,
    pub accuracy: u32,
    pub perfect_hits: u32,
    pub good_hits: u32,
    pub missed_hits: u32,
    pub victory: bool,
}

/// Read-only projection for rendering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Snapshot {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub health: u32,
    pub battle: bool,
    pub opponent_health: u32,
    pub perfect_hits: u32,
    pub good_hits: u32,
    pub missed_hits: u32,
    pub current_move: Option<MoveKind>,
    pub upcoming_moves: Vec<MoveKind>,
    pub ending: Option<Ending>,
    pub beat_pulse: bool,
    pub glitching: bool,
    /// Last award, shown until the popup expires.
    pub popup: Option<Popup>,
    /// Animation class for the mascot while a dance is live.
    pub dance: Option<&'static str>,
}

pub struct Session<R = SmallRng> {
    state: SessionState,
    difficulty: Difficulty,
    rules: Rules,
    clock: BeatClock,
    moves: MoveSequencer<R>,
    effects: Effects,
}

impl Session<SmallRng> {
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, Rules::default(), SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(difficulty: Difficulty, rules: Rules, rng: R) -> Self {
        Self {
            state: SessionState::default(),
            difficulty,
            rules,
            clock: BeatClock::new(difficulty.profile()),
            moves: MoveSequencer::new(rng),
            effects: Effects::default(),
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), DanceError> {
        if self.state.mode == Mode::Playing {
            return Err(DanceError::SessionInProgress);
        }
        self.difficulty = difficulty;
        self.clock.retune(difficulty.profile());
        info!("difficulty set to {difficulty} ({} bpm)", difficulty.profile().bpm);
        Ok(())
    }

    pub fn set_rules(&mut self, rules: Rules) -> Result<(), DanceError> {
        if self.state.mode == Mode::Playing {
            return Err(DanceError::SessionInProgress);
        }
        rules.validate()?;
        self.rules = rules;
        Ok(())
    }

    /// Reset every counter and start the beat clock at `now`.
    pub fn start_game(&mut self, battle: bool, now: f64) {
        self.clock.stop();
        self.state = SessionState::new(battle, &self.rules);
        self.moves.reset();
        self.effects.clear();
        self.clock.retune(self.difficulty.profile());
        self.clock.start(now);
        info!(
            "session started: difficulty={} battle={} interval={}ms",
            self.difficulty,
            battle,
            self.clock.interval_ms()
        );
    }

    /// Play again with the same battle setting.
    pub fn restart(&mut self, now: f64) {
        let battle = self.state.battle;
        self.start_game(battle, now);
    }

    /// Judge a tap. Ignored (returns `None`) unless a session is playing.
    pub fn apply_tap(&mut self, now: f64) -> Option<TapOutcome> {
        if self.state.mode != Mode::Playing {
            return None;
        }
        let performed = self.moves.current()?;
        let judgement = judge::judge(
            now,
            self.clock.last_beat_ms(),
            &self.difficulty.profile(),
            self.state.combo,
        );
        debug!(
            "tap {:?}: error={:.1}ms offset={:+.1}ms x{} +{}",
            judgement.tier,
            judgement.timing_error_ms,
            judgement.offset_ms,
            judgement.multiplier,
            judgement.points
        );

        let ending = self.state.apply(&judgement, &self.rules);

        if judgement.points > 0 {
            self.effects.push(
                EffectKind::ScorePopup { tier: judgement.tier, points: judgement.points },
                now,
            );
        }
        if !judgement.tier.is_hit() {
            self.effects.push(EffectKind::Glitch, now);
        }
        self.effects.push(EffectKind::dance(performed), now);
        self.moves.next();

        if let Some(end) = ending {
            self.clock.stop();
            info!(
                "game over ({end:?}): score={} max_combo={}",
                self.state.score, self.state.max_combo
            );
        }
        Some(TapOutcome { judgement, performed, ending })
    }

    /// Host timer emission. Returns false once the clock has been stopped.
    pub fn on_beat(&mut self, now: f64) -> bool {
        if self.state.mode != Mode::Playing || !self.clock.fire(now) {
            return false;
        }
        self.effects.push(EffectKind::BeatPulse, now);
        true
    }

    /// Expire transient effects.
    pub fn tick(&mut self, now: f64) {
        self.effects.expire(now);
    }

    /// Halt the beat clock. While not playing, taps are ignored.
    pub fn stop_game(&mut self) {
        if self.clock.stop() {
            info!("beat clock stopped at beat {}", self.clock.beats());
        }
        if self.state.mode == Mode::Playing {
            self.state.mode = Mode::GameOver;
        }
        self.effects.clear();
    }

    /// Leave the current session (pause or back-to-menu).
    pub fn return_to_menu(&mut self) {
        self.clock.stop();
        self.effects.clear();
        self.state.mode = Mode::Menu;
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        let (current_move, upcoming_moves) = if s.mode == Mode::Menu {
            (None, Vec::new())
        } else {
            (self.moves.current(), self.moves.peek(PREVIEW_LEN))
        };
        Snapshot {
            mode: s.mode,
            difficulty: self.difficulty,
            score: s.score,
            combo: s.combo,
            max_combo: s.max_combo,
            health: s.health,
            battle: s.battle,
            opponent_health: s.opponent_health,
            perfect_hits: s.perfect_hits,
            good_hits: s.good_hits,
            missed_hits: s.missed_hits,
            current_move,
            upcoming_moves,
            ending: s.ending,
            beat_pulse: self.effects.is_pulsing(),
            glitching: self.effects.is_glitching(),
            popup: self.effects.popup(),
            dance: self.effects.dance(),
        }
    }

    pub fn summary(&self) -> Summary {
        self.state.summary()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
    pub fn clock(&self) -> &BeatClock {
        &self.clock
    }
    pub fn effects(&self) -> &Effects {
        &self.effects
    }
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}
