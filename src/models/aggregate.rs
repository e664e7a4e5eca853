//! Aggregate score views (per-game and per-round).

use serde::{Deserialize, Serialize};

use super::{parse_f64, parse_u32};

/// One row of the GAME_AGG / ROUND_AGG views: a player's overall score
/// distribution across every game (or round) ever played.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub player_id: String,
    pub player_name: String,
    /// Games played for GAME_AGG, rounds played for ROUND_AGG.
    pub played: u32,
    pub mean_score: f64,
    pub median_score: f64,
}

impl AggregateRecord {
    /// Canonical layout: PLAYER_ID, PLAYER_NAME, PLAYED, MEAN_SCORE,
    /// MEDIAN_SCORE.
    pub fn parse_row(row: &[String]) -> Option<AggregateRecord> {
        if row.len() < 5 {
            return None;
        }
        let player_name = row[1].trim();
        if player_name.is_empty() {
            return None;
        }
        Some(AggregateRecord {
            player_id: row[0].trim().to_string(),
            player_name: player_name.to_string(),
            played: parse_u32(&row[2]),
            mean_score: parse_f64(&row[3]),
            median_score: parse_f64(&row[4]),
        })
    }
}
