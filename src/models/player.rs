//! Lifetime player statistics (one PLAYER_CARD row).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{parse_f64, parse_u32, Mode, ModeMap};

/// Per-mode statistic block of a player card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeStats {
    pub games_played: u32,
    pub rounds_played: u32,
    pub accuracy: f64,
    pub adjusted_accuracy: f64,
    pub top_finishes: u32,
    pub top3_finishes: u32,
    pub top_finish_rate: f64,
    pub top3_finish_rate: f64,
    pub highest_hedge_streak: u32,
    pub average_hedge_streak: f64,
    pub avg_game_score: f64,
    pub median_game_score: f64,
    pub game_score_stddev: f64,
    pub lowest_game_score: f64,
    pub highest_game_score: f64,
    pub avg_round_score: f64,
    pub median_round_score: f64,
    pub round_score_stddev: f64,
    pub lowest_round_score: f64,
    pub highest_round_score: f64,
}

/// Lifetime statistics for one player, keyed by display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCard {
    /// Stable profile identifier (used for external profile links).
    pub player_id: String,
    /// Display name, unique within a snapshot.
    pub player_name: String,
    pub modes: ModeMap<ModeStats>,
}

impl PlayerCard {
    pub fn stats(&self, mode: Mode) -> &ModeStats {
        self.modes.get(mode)
    }

    /// Games-equivalent participation for the adjusted-accuracy boards:
    /// rounds played collapsed to 5-round games, truncating.
    pub fn adjusted_games(&self, mode: Mode) -> u32 {
        self.stats(mode).rounds_played / 5
    }

    /// Parse a header-addressed PLAYER_CARD row. Returns `None` when the
    /// identity columns are absent or blank.
    pub fn parse_row(header: &HashMap<String, usize>, row: &[String]) -> Option<PlayerCard> {
        let field = |name: &str| header.get(name).and_then(|&i| row.get(i)).map(|s| s.trim());

        let player_id = field("PLAYER_ID")?.to_string();
        let player_name = field("PLAYER_NAME")?.to_string();
        if player_id.is_empty() || player_name.is_empty() {
            return None;
        }

        let mode_stats = |mode: Mode| -> ModeStats {
            let prefix = mode.column_prefix();
            let num = |suffix: &str| parse_f64(field(&format!("{prefix}_{suffix}")).unwrap_or(""));
            let int = |suffix: &str| parse_u32(field(&format!("{prefix}_{suffix}")).unwrap_or(""));
            ModeStats {
                games_played: int("GAMES_PLAYED"),
                rounds_played: int("ROUNDS_PLAYED"),
                accuracy: num("ACCURACY"),
                adjusted_accuracy: num("ADJ_ACCURACY"),
                top_finishes: int("TOP_FINISHES"),
                top3_finishes: int("TOP3_FINISHES"),
                top_finish_rate: num("TOP_FINISH_RATE"),
                top3_finish_rate: num("TOP3_FINISH_RATE"),
                highest_hedge_streak: int("HIGHEST_HEDGE_STREAK"),
                average_hedge_streak: num("AVERAGE_HEDGE_STREAK"),
                avg_game_score: num("AVG_GAME_SCORE"),
                median_game_score: num("MEDIAN_GAME_SCORE"),
                game_score_stddev: num("GAME_SCORE_STD_DEV"),
                lowest_game_score: num("LOWEST_GAME_SCORE"),
                highest_game_score: num("HIGHEST_GAME_SCORE"),
                avg_round_score: num("AVG_ROUND_SCORE"),
                median_round_score: num("MED_ROUND_SCORE"),
                round_score_stddev: num("ROUND_SCORE_STD_DEV"),
                lowest_round_score: num("LOWEST_ROUND_SCORE"),
                highest_round_score: num("HIGHEST_ROUND_SCORE"),
            }
        };

        Some(PlayerCard {
            player_id,
            player_name,
            modes: ModeMap {
                all: mode_stats(Mode::All),
                nm: mode_stats(Mode::Nm),
                nmpz: mode_stats(Mode::Nmpz),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_table() -> (HashMap<String, usize>, Vec<String>) {
        let columns = [
            ("PLAYER_ID", "5f1a"),
            ("PLAYER_NAME", "Magellan"),
            ("OVERALL_GAMES_PLAYED", "42"),
            ("OVERALL_ROUNDS_PLAYED", "210"),
            ("OVERALL_ACCURACY", "0.8125"),
            ("OVERALL_ADJ_ACCURACY", "0.79"),
            ("NM_GAMES_PLAYED", "12"),
            ("NM_ACCURACY", "0.7"),
            ("NMPZ_GAMES_PLAYED", "0"),
        ];
        let header = columns
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.to_string(), i))
            .collect();
        let row = columns.iter().map(|(_, v)| v.to_string()).collect();
        (header, row)
    }

    #[test]
    fn test_parse_row() {
        let (header, row) = card_table();
        let card = PlayerCard::parse_row(&header, &row).unwrap();

        assert_eq!(card.player_name, "Magellan");
        assert_eq!(card.player_id, "5f1a");
        assert_eq!(card.stats(Mode::All).games_played, 42);
        assert!((card.stats(Mode::All).accuracy - 0.8125).abs() < 1e-9);
        assert_eq!(card.stats(Mode::Nm).games_played, 12);
        // Columns the export omits default to zero.
        assert_eq!(card.stats(Mode::Nmpz).rounds_played, 0);
    }

    #[test]
    fn test_parse_row_missing_identity() {
        let (mut header, row) = card_table();
        header.remove("PLAYER_NAME");
        assert!(PlayerCard::parse_row(&header, &row).is_none());
    }

    #[test]
    fn test_adjusted_games_truncates() {
        let (header, row) = card_table();
        let card = PlayerCard::parse_row(&header, &row).unwrap();
        // 210 rounds -> 42 games; truncation is exercised elsewhere with
        // non-multiples, this pins the happy path.
        assert_eq!(card.adjusted_games(Mode::All), 42);

        let mut card = card;
        card.modes.all.rounds_played = 214;
        assert_eq!(card.adjusted_games(Mode::All), 42);
    }
}
