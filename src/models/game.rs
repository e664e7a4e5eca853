//! Completed game instances.

use serde::{Deserialize, Serialize};

use super::{parse_f64, parse_u32};

/// One completed game, tying a player to a seed with a score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub seed_link: String,
    pub player_id: String,
    pub player_name: String,
    pub score: f64,
    pub test_id: String,
    pub round: u32,
}

impl GameRecord {
    /// Canonical GAME_SUM layout: GAME_ID, SEED_LINK, PLAYER_ID,
    /// PLAYER_NAME, SCORE, TEST_ID, ROUND.
    pub fn parse_row(row: &[String]) -> Option<GameRecord> {
        if row.len() < 7 {
            return None;
        }
        let player_name = row[3].trim();
        if player_name.is_empty() {
            return None;
        }
        Some(GameRecord {
            game_id: row[0].trim().to_string(),
            seed_link: row[1].trim().to_string(),
            player_id: row[2].trim().to_string(),
            player_name: player_name.to_string(),
            score: parse_f64(&row[4]),
            test_id: row[5].trim().to_string(),
            round: parse_u32(&row[6]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_row() {
        let game = GameRecord::parse_row(&row(&[
            "g-991",
            "https://example.com/maps/abc",
            "5f1a",
            "Magellan",
            "24350",
            "t-2025-06",
            "2",
        ]))
        .unwrap();

        assert_eq!(game.player_name, "Magellan");
        assert!((game.score - 24350.0).abs() < 1e-9);
        assert_eq!(game.round, 2);
    }

    #[test]
    fn test_parse_row_short() {
        assert!(GameRecord::parse_row(&row(&["g-991", "link", "id", "name"])).is_none());
    }
}
