//! Static display data the page reads once at load: the move cards and the
//! difficulty picker. Snapshots refer to both by their lowercase keys.

use super::difficulty::Difficulty;
use super::moves::{MoveInfo, MoveKind};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct DifficultyEntry {
    pub difficulty: Difficulty,
    pub bpm: u32,
    pub tolerance_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Catalog {
    pub moves: Vec<MoveInfo>,
    pub difficulties: Vec<DifficultyEntry>,
}

pub fn catalog() -> Catalog {
    Catalog {
        moves: MoveKind::ALL.iter().map(|m| m.info()).collect(),
        difficulties: Difficulty::ALL
            .iter()
            .map(|&difficulty| {
                let profile = difficulty.profile();
                DifficultyEntry { difficulty, bpm: profile.bpm, tolerance_ms: profile.tolerance_ms }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_move_and_difficulty() {
        let c = catalog();
        let keys: Vec<_> = c.moves.iter().map(|m| m.key).collect();
        assert_eq!(keys, ["deploy", "sync", "launch"]);
        let bpms: Vec<_> = c.difficulties.iter().map(|d| d.bpm).collect();
        assert_eq!(bpms, [80, 120, 160, 200]);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn keys_match_snapshot_tags() {
        let json = serde_json::to_value(catalog()).unwrap();
        for (entry, kind) in json["moves"].as_array().unwrap().iter().zip(MoveKind::ALL) {
            assert_eq!(entry["key"], serde_json::to_value(kind).unwrap());
            assert_eq!(entry["glyph"], kind.info().glyph);
            assert_eq!(entry["action"], kind.info().action);
        }
        assert_eq!(json["difficulties"][3]["difficulty"], "expert");
        assert_eq!(json["difficulties"][3]["toleranceMs"], 100.0);
    }
}
