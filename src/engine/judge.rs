//! Timing judge: classifies a tap by its distance to the nearest beat.
//!
//! Pure functions only. The caller supplies the tap time, the last beat
//! emission, the difficulty profile and the combo before the tap.

use super::difficulty::DifficultyProfile;
use super::effects::Tone;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HitTier {
    Perfect,
    Good,
    Miss,
}

impl HitTier {
    pub fn base_points(self) -> u64 {
        match self {
            HitTier::Perfect => 100,
            HitTier::Good => 50,
            HitTier::Miss => 0,
        }
    }

    pub fn is_hit(self) -> bool {
        !matches!(self, HitTier::Miss)
    }

    pub fn label(self) -> &'static str {
        match self {
            HitTier::Perfect => "PERFECT!",
            HitTier::Good => "GOOD!",
            HitTier::Miss => "MISS!",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            HitTier::Perfect => Tone { frequency_hz: 440.0, duration_s: 0.2 },
            HitTier::Good => Tone { frequency_hz: 330.0, duration_s: 0.15 },
            HitTier::Miss => Tone { frequency_hz: 110.0, duration_s: 0.3 },
        }
    }
}

/// Result of judging one tap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Judgement {
    pub tier: HitTier,
    /// Distance to the nearest beat, always >= 0.
    pub timing_error_ms: f64,
    /// Signed offset to the nearest beat: negative = early, positive = late.
    pub offset_ms: f64,
    pub multiplier: u32,
    pub points: u64,
}

/// `floor(combo / 10) + 1`, using the combo before the tap is applied.
pub fn combo_multiplier(combo_before: u32) -> u32 {
    combo_before / 10 + 1
}

/// Signed offset from `tap_ms` to the nearest beat on the grid anchored at
/// `last_beat_ms`. Negative means the tap came before the upcoming beat.
pub fn beat_offset(tap_ms: f64, last_beat_ms: f64, interval_ms: f64) -> f64 {
    // A late or stalled timer can leave the tap more than one interval past
    // the last emission (or before it); fold back onto the beat grid.
    let since_last = (tap_ms - last_beat_ms).rem_euclid(interval_ms);
    let to_next = interval_ms - since_last;
    if since_last <= to_next {
        since_last
    } else {
        -to_next
    }
}

/// `min(since_last_beat, to_next_beat)`.
pub fn timing_error(tap_ms: f64, last_beat_ms: f64, interval_ms: f64) -> f64 {
    beat_offset(tap_ms, last_beat_ms, interval_ms).abs()
}

/// Tier boundaries: [0, 0.3T] perfect, (0.3T, 0.7T] good, beyond that a miss.
pub fn classify(timing_error_ms: f64, profile: &DifficultyProfile) -> HitTier {
    if timing_error_ms <= profile.perfect_window_ms() {
        HitTier::Perfect
    } else if timing_error_ms <= profile.good_window_ms() {
        HitTier::Good
    } else {
        HitTier::Miss
    }
}

pub fn judge(
    tap_ms: f64,
    last_beat_ms: f64,
    profile: &DifficultyProfile,
    combo_before: u32,
) -> Judgement {
    let offset_ms = beat_offset(tap_ms, last_beat_ms, profile.beat_interval_ms());
    let timing_error_ms = offset_ms.abs();
    let tier = classify(timing_error_ms, profile);
    let multiplier = combo_multiplier(combo_before);
    Judgement {
        tier,
        timing_error_ms,
        offset_ms,
        multiplier,
        points: tier.base_points() * multiplier as u64,
    }
}
