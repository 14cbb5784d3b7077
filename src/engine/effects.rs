// Short-lived visual feedback. Replaces fire-and-forget timeouts with an owned
// list that the session expires on every tick and clears when play ends.
use super::judge::HitTier;
use super::moves::MoveKind;

/// Oscillator beep requested from the audio layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_s: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum EffectKind {
    BeatPulse,
    ScorePopup { tier: HitTier, points: u64 },
    Glitch,
    Dance { animation: &'static str },
}

impl EffectKind {
    pub fn lifetime_ms(&self) -> f64 {
        match self {
            EffectKind::BeatPulse => 100.0,
            EffectKind::ScorePopup { .. } => 1000.0,
            EffectKind::Glitch => 300.0,
            EffectKind::Dance { .. } => 800.0,
        }
    }

    pub fn dance(mv: MoveKind) -> Self {
        EffectKind::Dance { animation: mv.info().animation }
    }

    fn same_slot(&self, other: &EffectKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub started_ms: f64,
}

impl Effect {
    pub fn expired(&self, now: f64) -> bool {
        now - self.started_ms >= self.kind.lifetime_ms()
    }
}

/// Score popup as the page draws it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Popup {
    pub tier: HitTier,
    pub label: &'static str,
    pub points: u64,
}

/// At most one effect of each kind is live; a new one restarts the slot.
#[derive(Clone, Debug, Default)]
pub struct Effects {
    active: Vec<Effect>,
}

impl Effects {
    pub fn push(&mut self, kind: EffectKind, now: f64) {
        self.active.retain(|e| !e.kind.same_slot(&kind));
        self.active.push(Effect { kind, started_ms: now });
    }

    pub fn expire(&mut self, now: f64) {
        self.active.retain(|e| !e.expired(now));
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.active.iter()
    }

    pub fn is_glitching(&self) -> bool {
        self.active.iter().any(|e| e.kind == EffectKind::Glitch)
    }

    pub fn is_pulsing(&self) -> bool {
        self.active.iter().any(|e| e.kind == EffectKind::BeatPulse)
    }

    pub fn popup(&self) -> Option<Popup> {
        self.active.iter().find_map(|e| match e.kind {
            EffectKind::ScorePopup { tier, points } => {
                Some(Popup { tier, label: tier.label(), points })
            }
            _ => None,
        })
    }

    /// Animation class of the live mascot dance, if any.
    pub fn dance(&self) -> Option<&'static str> {
        self.active.iter().find_map(|e| match e.kind {
            EffectKind::Dance { animation } => Some(animation),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_expire_after_lifetime() {
        let mut fx = Effects::default();
        fx.push(EffectKind::BeatPulse, 0.0);
        fx.push(EffectKind::Glitch, 0.0);
        fx.push(EffectKind::ScorePopup { tier: HitTier::Good, points: 50 }, 0.0);

        fx.expire(99.0);
        assert_eq!(fx.len(), 3);
        fx.expire(100.0);
        assert!(!fx.is_pulsing());
        assert!(fx.is_glitching());
        fx.expire(300.0);
        assert!(!fx.is_glitching());
        fx.expire(1000.0);
        assert!(fx.is_empty());
    }

    #[test]
    fn push_restarts_same_kind() {
        let mut fx = Effects::default();
        fx.push(EffectKind::ScorePopup { tier: HitTier::Good, points: 50 }, 0.0);
        fx.push(EffectKind::ScorePopup { tier: HitTier::Perfect, points: 200 }, 600.0);
        assert_eq!(fx.len(), 1);
        fx.expire(1200.0);
        let popup = fx.iter().next().unwrap();
        assert_eq!(popup.kind, EffectKind::ScorePopup { tier: HitTier::Perfect, points: 200 });
    }

    #[test]
    fn popup_and_dance_are_readable_until_expiry() {
        let mut fx = Effects::default();
        assert_eq!(fx.popup(), None);
        fx.push(EffectKind::ScorePopup { tier: HitTier::Perfect, points: 200 }, 0.0);
        fx.push(EffectKind::dance(MoveKind::Launch), 0.0);
        assert_eq!(
            fx.popup(),
            Some(Popup { tier: HitTier::Perfect, label: "PERFECT!", points: 200 })
        );
        assert_eq!(fx.dance(), Some("dance-jump"));
        fx.expire(800.0);
        assert_eq!(fx.dance(), None);
        assert!(fx.popup().is_some());
        fx.expire(1000.0);
        assert_eq!(fx.popup(), None);
    }

    #[test]
    fn dance_uses_move_animation() {
        assert_eq!(
            EffectKind::dance(MoveKind::Sync),
            EffectKind::Dance { animation: "dance-slide" }
        );
    }
}
