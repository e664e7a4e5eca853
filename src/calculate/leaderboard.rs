//! The generic leaderboard pipeline and the lifetime board configurations.
//!
//! Every board is the same pipeline: filter by an eligibility predicate,
//! stable-sort by a comparator, truncate to a limit, then project rows for
//! rendering. Board variants differ only in the configuration they pass.

use std::cmp::Ordering;

use serde::Serialize;

use crate::calculate::eligibility::ParticipationThreshold;
use crate::models::{Mode, RecordRow};
use crate::snapshot::DataSnapshot;

/// Default result-set size for every board.
pub const BOARD_LIMIT: usize = 10;

/// Configuration of one board: what qualifies, how to order, how many.
pub struct BoardConfig<'a, T> {
    pub eligibility: Box<dyn Fn(&T) -> bool + 'a>,
    pub compare: Box<dyn Fn(&T, &T) -> Ordering + 'a>,
    pub limit: usize,
}

impl<'a, T> BoardConfig<'a, T> {
    pub fn new(
        eligibility: impl Fn(&T) -> bool + 'a,
        compare: impl Fn(&T, &T) -> Ordering + 'a,
    ) -> BoardConfig<'a, T> {
        BoardConfig {
            eligibility: Box::new(eligibility),
            compare: Box::new(compare),
            limit: BOARD_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Comparator ordering a numeric metric descending.
pub fn descending<'a, T>(metric: impl Fn(&T) -> f64 + 'a) -> impl Fn(&T, &T) -> Ordering + 'a {
    move |a, b| metric(b).total_cmp(&metric(a))
}

/// Comparator ordering a numeric metric ascending.
pub fn ascending<'a, T>(metric: impl Fn(&T) -> f64 + 'a) -> impl Fn(&T, &T) -> Ordering + 'a {
    move |a, b| metric(a).total_cmp(&metric(b))
}

/// Run the pipeline: filter, stable sort, truncate. Ties keep the input
/// order, so equal inputs produce deterministic output.
pub fn build_board<'a, T>(rows: impl IntoIterator<Item = &'a T>, config: &BoardConfig<'_, T>) -> Vec<&'a T> {
    let mut selected: Vec<&T> = rows
        .into_iter()
        .filter(|row| (config.eligibility)(row))
        .collect();
    selected.sort_by(|a, b| (config.compare)(a, b));
    selected.truncate(config.limit);
    selected
}

// ── Lifetime boards ─────────────────────────────────────────────

/// A row of the accuracy, adjusted-accuracy and aggregate boards.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    pub player_id: String,
    pub player_name: String,
    pub value: f64,
    pub played: u32,
}

/// Accuracy leaderboard for a mode (games played ≥ 1/3 of the mode's seeds).
pub fn accuracy_board(snapshot: &DataSnapshot, mode: Mode) -> Vec<BoardEntry> {
    let seed_count = snapshot.precompute.seed_count.get(mode);
    let candidates = lifetime_candidates(snapshot, mode, false);
    let config = BoardConfig::new(
        move |row: &BoardEntry| {
            ParticipationThreshold::ACCURACY_BOARD.is_eligible(row.played, seed_count)
        },
        descending(|row: &BoardEntry| row.value),
    );
    build_board(&candidates, &config).into_iter().cloned().collect()
}

/// Adjusted accuracy leaderboard: participation counts rounds ÷ 5 and the
/// cutoff tightens to 2/5 of the mode's seeds.
pub fn adjusted_accuracy_board(snapshot: &DataSnapshot, mode: Mode) -> Vec<BoardEntry> {
    let seed_count = snapshot.precompute.seed_count.get(mode);
    let candidates = lifetime_candidates(snapshot, mode, true);
    let config = BoardConfig::new(
        move |row: &BoardEntry| {
            ParticipationThreshold::ADJUSTED_BOARD.is_eligible(row.played, seed_count)
        },
        descending(|row: &BoardEntry| row.value),
    );
    build_board(&candidates, &config).into_iter().cloned().collect()
}

fn lifetime_candidates(snapshot: &DataSnapshot, mode: Mode, adjusted: bool) -> Vec<BoardEntry> {
    snapshot
        .player_order
        .iter()
        .filter_map(|name| snapshot.players.get(name))
        .map(|card| {
            let stats = card.stats(mode);
            BoardEntry {
                player_id: card.player_id.clone(),
                player_name: card.player_name.clone(),
                value: if adjusted {
                    stats.adjusted_accuracy
                } else {
                    stats.accuracy
                },
                played: if adjusted {
                    card.adjusted_games(mode)
                } else {
                    stats.games_played
                },
            }
        })
        .collect()
}

/// Which aggregate view a board runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateScope {
    Games,
    Rounds,
}

impl AggregateScope {
    pub fn parse(s: &str) -> Option<AggregateScope> {
        match s.trim().to_ascii_lowercase().as_str() {
            "games" => Some(AggregateScope::Games),
            "rounds" => Some(AggregateScope::Rounds),
            _ => None,
        }
    }
}

/// Median-score aggregate board. Eligibility is against the global "all"
/// seed count regardless of the view.
pub fn aggregate_board(snapshot: &DataSnapshot, scope: AggregateScope) -> Vec<BoardEntry> {
    let rows = match scope {
        AggregateScope::Games => &snapshot.game_agg,
        AggregateScope::Rounds => &snapshot.round_agg,
    };
    let all_seeds = snapshot.precompute.seed_count.get(Mode::All);
    let config = BoardConfig::new(
        move |row: &crate::models::AggregateRecord| {
            ParticipationThreshold::AGGREGATE_BOARD.is_eligible(row.played, all_seeds)
        },
        descending(|row: &crate::models::AggregateRecord| row.median_score),
    );
    build_board(rows, &config)
        .into_iter()
        .map(|row| BoardEntry {
            player_id: row.player_id.clone(),
            player_name: row.player_name.clone(),
            value: row.median_score,
            played: row.played,
        })
        .collect()
}

/// One end of a streak, resolved for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct StreakEndpoint {
    pub link: String,
    pub test_label: String,
    pub round: u32,
}

/// A row of the hedge-streak board.
#[derive(Debug, Clone, Serialize)]
pub struct StreakBoardEntry {
    pub player_id: String,
    pub player_name: String,
    pub length: u32,
    pub start: StreakEndpoint,
    pub end: StreakEndpoint,
}

/// Streak leaderboard: every streak row is considered, longest first.
pub fn streak_board(snapshot: &DataSnapshot) -> Vec<StreakBoardEntry> {
    let config = BoardConfig::new(
        |_: &crate::models::StreakRecord| true,
        descending(|row: &crate::models::StreakRecord| row.length as f64),
    );
    build_board(&snapshot.streaks, &config)
        .into_iter()
        .map(|row| StreakBoardEntry {
            player_id: row.player_id.clone(),
            player_name: row.player_name.clone(),
            length: row.length,
            start: StreakEndpoint {
                link: row.start_link.clone(),
                test_label: snapshot.precompute.test_label(&row.start_test_id),
                round: row.start_round,
            },
            end: StreakEndpoint {
                link: row.end_link.clone(),
                test_label: snapshot.precompute.test_label(&row.end_test_id),
                round: row.end_round,
            },
        })
        .collect()
}

/// A row of the high-score board.
#[derive(Debug, Clone, Serialize)]
pub struct HighScoreEntry {
    pub player_id: String,
    pub player_name: String,
    pub score: f64,
    pub seed_link: String,
    pub test_label: String,
    pub round: u32,
}

/// High scores over every completed game, unfiltered.
pub fn high_score_board(snapshot: &DataSnapshot) -> Vec<HighScoreEntry> {
    let config = BoardConfig::new(
        |_: &crate::models::GameRecord| true,
        descending(|row: &crate::models::GameRecord| row.score),
    );
    build_board(&snapshot.games, &config)
        .into_iter()
        .map(|row| HighScoreEntry {
            player_id: row.player_id.clone(),
            player_name: row.player_name.clone(),
            score: row.score,
            seed_link: row.seed_link.clone(),
            test_label: snapshot.precompute.test_label(&row.test_id),
            round: row.round,
        })
        .collect()
}

/// A row of a record-category board.
#[derive(Debug, Clone, Serialize)]
pub struct RecordBoardEntry {
    pub player_id: String,
    pub player_name: String,
    pub value: f64,
    pub test_label: Option<String>,
    pub link: Option<String>,
    pub round: Option<u32>,
}

/// Board over one record category, value descending. Unknown categories
/// yield an empty board.
pub fn record_board(snapshot: &DataSnapshot, category: &str) -> Vec<RecordBoardEntry> {
    let Some(rows) = snapshot.records.get(category) else {
        return Vec::new();
    };
    let config = BoardConfig::new(
        |_: &RecordRow| true,
        descending(|row: &RecordRow| row.value),
    );
    build_board(rows, &config)
        .into_iter()
        .map(|row| RecordBoardEntry {
            player_id: row.player_id.clone(),
            player_name: row.player_name.clone(),
            value: row.value,
            test_label: row
                .test_id
                .as_deref()
                .map(|id| snapshot.precompute.test_label(id)),
            link: row.link.clone(),
            round: row.round,
        })
        .collect()
}
