//! All-time record categories.

use serde::{Deserialize, Serialize};

use super::{parse_f64, parse_u32};

/// Known record categories. Unknown categories are still loaded and served
/// by name; these constants exist for the built-in boards.
pub mod categories {
    pub const GAME_SCORE: &str = "GAME_SCORE";
    pub const TEST_ACCURACY: &str = "TEST_ACCURACY";
    pub const TEST_ACCURACY_NM: &str = "TEST_ACCURACY_NM";
    pub const TEST_ACCURACY_NMPZ: &str = "TEST_ACCURACY_NMPZ";
}

/// One qualifying row of a record category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRow {
    pub category: String,
    pub player_id: String,
    pub player_name: String,
    /// The recorded value: a game score for GAME_SCORE, an accuracy
    /// fraction for the TEST_ACCURACY categories.
    pub value: f64,
    pub test_id: Option<String>,
    pub link: Option<String>,
    pub round: Option<u32>,
}

impl RecordRow {
    /// Canonical RECORDS layout: CATEGORY, PLAYER_ID, PLAYER_NAME, VALUE,
    /// TEST_ID, LINK, ROUND.
    pub fn parse_row(row: &[String]) -> Option<RecordRow> {
        if row.len() < 4 {
            return None;
        }
        let category = row[0].trim();
        if category.is_empty() {
            return None;
        }
        let opt = |idx: usize| -> Option<String> {
            row.get(idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Some(RecordRow {
            category: category.to_string(),
            player_id: row[1].trim().to_string(),
            player_name: row[2].trim().to_string(),
            value: parse_f64(&row[3]),
            test_id: opt(4),
            link: opt(5),
            round: opt(6).map(|s| parse_u32(&s)),
        })
    }
}
