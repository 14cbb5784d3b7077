// Difficulty catalog: tempo feeds the beat clock, tolerance feeds the judge.
use std::fmt;
use std::str::FromStr;

use crate::error::DanceError;

/// Fraction of the tolerance window that still counts as a perfect hit.
pub const PERFECT_WINDOW: f64 = 0.3;
/// Fraction of the tolerance window that still counts as a good hit.
pub const GOOD_WINDOW: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// Immutable tempo / tolerance pair selected before a session starts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DifficultyProfile {
    pub bpm: u32,
    pub tolerance_ms: f64,
}

impl DifficultyProfile {
    pub fn beat_interval_ms(&self) -> f64 {
        60_000.0 / self.bpm as f64
    }
    pub fn perfect_window_ms(&self) -> f64 {
        self.tolerance_ms * PERFECT_WINDOW
    }
    pub fn good_window_ms(&self) -> f64 {
        self.tolerance_ms * GOOD_WINDOW
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile { bpm: 80, tolerance_ms: 300.0 },
            Difficulty::Medium => DifficultyProfile { bpm: 120, tolerance_ms: 200.0 },
            Difficulty::Hard => DifficultyProfile { bpm: 160, tolerance_ms: 150.0 },
            Difficulty::Expert => DifficultyProfile { bpm: 200, tolerance_ms: 100.0 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DanceError::UnknownDifficulty(s.to_string()))
    }
}
