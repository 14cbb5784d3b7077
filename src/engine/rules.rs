//! Gameplay constants. Defaults reproduce the stock game; hosts can override
//! individual fields from JSON when the `serde_json` feature is enabled.

use crate::error::DanceError;

/// Health and opponent health never exceed this value.
pub const HEALTH_CAP: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Rules {
    /// Health at session start.
    pub max_health: u32,
    /// Health lost per miss.
    pub miss_penalty: u32,
    /// A miss taken while health is at or below this value ends the session.
    pub danger_health: u32,
    /// Opponent health at the start of a battle.
    pub opponent_health: u32,
    pub perfect_damage: u32,
    pub good_damage: u32,
    /// Flat score awarded for defeating the opponent.
    pub victory_bonus: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_health: 100,
            miss_penalty: 10,
            danger_health: 10,
            opponent_health: 100,
            perfect_damage: 15,
            good_damage: 8,
            victory_bonus: 1000,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), DanceError> {
        if !(1..=HEALTH_CAP).contains(&self.max_health) {
            return Err(DanceError::InvalidRules(format!(
                "max_health must be within 1..={HEALTH_CAP}, got {}",
                self.max_health
            )));
        }
        if !(1..=HEALTH_CAP).contains(&self.opponent_health) {
            return Err(DanceError::InvalidRules(format!(
                "opponent_health must be within 1..={HEALTH_CAP}, got {}",
                self.opponent_health
            )));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, DanceError> {
        let rules: Rules =
            serde_json::from_str(json).map_err(|e| DanceError::InvalidRules(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }
}
