use super::difficulty::DifficultyProfile;
use super::effects::Tone;

/// Click played on every beat emission.
pub const BEAT_TONE: Tone = Tone { frequency_hz: 220.0, duration_s: 0.1 };

/// BeatClock tracks the last emitted beat for the timing judge.
///
/// Emissions come from a host periodic timer (`fire`); the clock itself never
/// schedules anything and does not compensate drift between emissions.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatClock {
    /// 60000 / bpm
    interval_ms: f64,
    /// Timestamp of the most recent emission.
    last_beat_ms: f64,
    /// Emissions since start.
    beats: u64,
    running: bool,
}

impl BeatClock {
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            interval_ms: profile.beat_interval_ms(),
            last_beat_ms: 0.0,
            beats: 0,
            running: false,
        }
    }

    /// Recompute the interval for a new difficulty. Only valid between sessions.
    pub fn retune(&mut self, profile: DifficultyProfile) {
        debug_assert!(!self.running, "retune while the clock is running");
        self.interval_ms = profile.beat_interval_ms();
    }

    /// Session start counts as the first beat.
    pub fn start(&mut self, now: f64) {
        self.last_beat_ms = now;
        self.beats = 0;
        self.running = true;
    }

    /// Record a timer emission. Returns false (and records nothing) when stopped.
    pub fn fire(&mut self, now: f64) -> bool {
        if !self.running {
            return false;
        }
        self.last_beat_ms = now;
        self.beats += 1;
        true
    }

    /// Stop accepting emissions. Safe to call repeatedly; returns whether the
    /// clock was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
    pub fn last_beat_ms(&self) -> f64 {
        self.last_beat_ms
    }
    pub fn beats(&self) -> u64 {
        self.beats
    }
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the current beat elapsed at `now`, in [0, 1).
    pub fn phase(&self, now: f64) -> f64 {
        ((now - self.last_beat_ms) / self.interval_ms).rem_euclid(1.0)
    }
}
