use serde::{Deserialize, Serialize};

// ============================================================================
// GameCode
// ============================================================================

/// A catalog record. Inactive codes stay on file but are never listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCode {
    pub code: String,
    pub game: String,
    pub reward: String,
    #[serde(default)]
    pub expires: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl GameCode {
    fn seed(code: &str, game: &str, reward: &str, expires: &str) -> Self {
        Self {
            code: code.to_string(),
            game: game.to_string(),
            reward: reward.to_string(),
            expires: Some(expires.to_string()),
            active: true,
        }
    }

    pub fn defaults() -> Vec<GameCode> {
        vec![
            GameCode::seed(
                "GENSHINGIFT",
                "Genshin Impact",
                "100 Primogems, 10 Mystic Enhancement Ore",
                "2025-12-31",
            ),
            GameCode::seed(
                "STARRAILGIFT",
                "Honkai: Star Rail",
                "50 Stellar Jade, 5 Traveler's Guide",
                "2025-12-31",
            ),
            GameCode::seed(
                "IMPACTCODE123",
                "Genshin Impact",
                "60 Primogems, 5 Hero's Wit",
                "2025-11-30",
            ),
        ]
    }
}

impl From<&GameCode> for shared::CodeEntry {
    fn from(c: &GameCode) -> Self {
        shared::CodeEntry {
            game: c.game.clone(),
            code: c.code.clone(),
            reward: c.reward.clone(),
            expires: c.expires.clone(),
        }
    }
}
