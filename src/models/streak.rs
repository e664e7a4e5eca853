//! Hedge streaks.

use serde::{Deserialize, Serialize};

use super::parse_u32;

/// A player's best run of consecutive hedged rounds, with its endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRecord {
    pub player_id: String,
    pub player_name: String,
    pub length: u32,
    pub start_link: String,
    pub end_link: String,
    pub start_test_id: String,
    pub start_round: u32,
    pub end_test_id: String,
    pub end_round: u32,
}

impl StreakRecord {
    /// Canonical STREAKS layout: PLAYER_ID, PLAYER_NAME, STREAK_LENGTH,
    /// START_LINK, END_LINK, START_TEST_ID, START_ROUND, END_TEST_ID,
    /// END_ROUND.
    pub fn parse_row(row: &[String]) -> Option<StreakRecord> {
        if row.len() < 9 {
            return None;
        }
        let player_name = row[1].trim();
        if player_name.is_empty() {
            return None;
        }
        Some(StreakRecord {
            player_id: row[0].trim().to_string(),
            player_name: player_name.to_string(),
            length: parse_u32(&row[2]),
            start_link: row[3].trim().to_string(),
            end_link: row[4].trim().to_string(),
            start_test_id: row[5].trim().to_string(),
            start_round: parse_u32(&row[6]),
            end_test_id: row[7].trim().to_string(),
            end_round: parse_u32(&row[8]),
        })
    }
}
