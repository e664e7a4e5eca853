//! Per-test leaderboards and overviews.

use std::cmp::Ordering;

use serde::Serialize;

use crate::calculate::eligibility::ParticipationThreshold;
use crate::calculate::leaderboard::{build_board, BoardConfig};
use crate::models::{Mode, PlayerTestRecord};
use crate::snapshot::DataSnapshot;

/// Metrics a per-test board can rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestMetric {
    Accuracy,
    MedianScore,
    /// Round-score standard deviation, lowest first.
    Consistency,
    /// Accuracy delta against the referenced prior test, positive only.
    Improvement,
    /// Top finishes, top-3 finishes as the tie-break.
    Finishes,
}

impl TestMetric {
    pub const ALL: [TestMetric; 5] = [
        TestMetric::Accuracy,
        TestMetric::MedianScore,
        TestMetric::Consistency,
        TestMetric::Improvement,
        TestMetric::Finishes,
    ];

    pub fn parse(s: &str) -> Option<TestMetric> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accuracy" => Some(TestMetric::Accuracy),
            "median-score" | "median_score" => Some(TestMetric::MedianScore),
            "consistency" => Some(TestMetric::Consistency),
            "improvement" => Some(TestMetric::Improvement),
            "finishes" => Some(TestMetric::Finishes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestMetric::Accuracy => "accuracy",
            TestMetric::MedianScore => "median-score",
            TestMetric::Consistency => "consistency",
            TestMetric::Improvement => "improvement",
            TestMetric::Finishes => "finishes",
        }
    }
}

/// A row of a per-test board.
#[derive(Debug, Clone, Serialize)]
pub struct TestBoardEntry {
    pub player_id: String,
    pub player_name: String,
    /// The ranked metric value.
    pub value: f64,
    pub games_played: u32,
    /// Tie-break count, present on the finishes board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top3_finishes: Option<u32>,
    /// Label of the prior test, present on the improvement board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compared_to: Option<String>,
}

/// Build a per-test board. Unknown tests yield an empty board.
///
/// Per-test eligibility (games played ≥ half the test's seed count) is a
/// separate system from the lifetime thresholds and always applies here.
pub fn test_board(snapshot: &DataSnapshot, test_id: &str, metric: TestMetric) -> Vec<TestBoardEntry> {
    let Some(test) = snapshot.tests.get(test_id) else {
        return Vec::new();
    };
    let seed_count = test.seed_count;

    let candidates: Vec<&PlayerTestRecord> = snapshot
        .participation_order
        .iter()
        .flat_map(|name| snapshot.participations(name))
        .filter(|rec| rec.test_id == test_id)
        .collect();

    let eligible = move |rec: &&PlayerTestRecord| {
        ParticipationThreshold::TEST_BOARD.is_eligible(rec.games_played, seed_count)
    };

    let config: BoardConfig<&PlayerTestRecord> = match metric {
        TestMetric::Accuracy => BoardConfig::new(eligible, |a, b| b.accuracy.total_cmp(&a.accuracy)),
        TestMetric::MedianScore => {
            BoardConfig::new(eligible, |a, b| b.median_score.total_cmp(&a.median_score))
        }
        TestMetric::Consistency => {
            BoardConfig::new(eligible, |a, b| a.score_stddev.total_cmp(&b.score_stddev))
        }
        TestMetric::Improvement => BoardConfig::new(
            move |rec: &&PlayerTestRecord| eligible(rec) && rec.improvement > 0.0,
            |a, b| b.improvement.total_cmp(&a.improvement),
        ),
        TestMetric::Finishes => BoardConfig::new(
            move |rec: &&PlayerTestRecord| {
                eligible(rec) && (rec.top_finishes > 0 || rec.top3_finishes > 0)
            },
            |a, b| match b.top_finishes.cmp(&a.top_finishes) {
                Ordering::Equal => b.top3_finishes.cmp(&a.top3_finishes),
                other => other,
            },
        ),
    };

    build_board(&candidates, &config)
        .into_iter()
        .map(|rec| project_entry(snapshot, rec, metric))
        .collect()
}

fn project_entry(
    snapshot: &DataSnapshot,
    rec: &PlayerTestRecord,
    metric: TestMetric,
) -> TestBoardEntry {
    let value = match metric {
        TestMetric::Accuracy => rec.accuracy,
        TestMetric::MedianScore => rec.median_score,
        TestMetric::Consistency => rec.score_stddev,
        TestMetric::Improvement => rec.improvement,
        TestMetric::Finishes => rec.top_finishes as f64,
    };
    let compared_to = match metric {
        TestMetric::Improvement => Some(
            rec.past_test_id
                .as_deref()
                .and_then(|id| snapshot.precompute.test_info(id))
                .map(|info| info.label())
                .unwrap_or_else(|| "Unknown".to_string()),
        ),
        _ => None,
    };
    TestBoardEntry {
        player_id: rec.player_id.clone(),
        player_name: rec.player_name.clone(),
        value,
        games_played: rec.games_played,
        top3_finishes: (metric == TestMetric::Finishes).then_some(rec.top3_finishes),
        compared_to,
    }
}

/// Overview of one test for rendering its header and summary table.
#[derive(Debug, Clone, Serialize)]
pub struct TestOverview {
    pub test_id: String,
    pub label: String,
    pub order: Option<u32>,
    pub map_name: Option<String>,
    pub mode: Option<Mode>,
    pub time_limit: Option<u32>,
    pub seed_count: u32,
    pub participants: u32,
    pub mean_accuracy: f64,
    pub median_round_score: f64,
    pub round_score_stddev: f64,
}

/// Summarize one test. Seed details come from the test's first seed.
pub fn test_overview(snapshot: &DataSnapshot, test_id: &str) -> Option<TestOverview> {
    let test = snapshot.tests.get(test_id)?;
    let seed = snapshot.seeds.iter().find(|s| s.test_id == test_id);
    Some(TestOverview {
        test_id: test.test_id.clone(),
        label: snapshot.precompute.test_label(test_id),
        order: snapshot.precompute.test_order(test_id),
        map_name: seed.map(|s| s.map_name.clone()),
        mode: seed.map(|s| s.mode),
        time_limit: seed.map(|s| s.time_limit),
        seed_count: test.seed_count,
        participants: test.participants,
        mean_accuracy: test.mean_accuracy,
        median_round_score: test.median_round_score,
        round_score_stddev: test.round_score_stddev,
    })
}

/// One catalogue row: a test with its calendar placement.
#[derive(Debug, Clone, Serialize)]
pub struct TestCatalogueEntry {
    pub test_id: String,
    pub label: String,
    pub order: Option<u32>,
    pub participants: u32,
    pub seed_count: u32,
}

/// All tests in chronological order.
pub fn test_catalogue(snapshot: &DataSnapshot) -> Vec<TestCatalogueEntry> {
    snapshot
        .tests_in_order()
        .into_iter()
        .map(|test| TestCatalogueEntry {
            test_id: test.test_id.clone(),
            label: snapshot.precompute.test_label(&test.test_id),
            order: snapshot.precompute.test_order(&test.test_id),
            participants: test.participants,
            seed_count: test.seed_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TestInfo, TestRecord};

    fn participation(
        test_id: &str,
        name: &str,
        games: u32,
        accuracy: f64,
    ) -> PlayerTestRecord {
        PlayerTestRecord {
            test_id: test_id.to_string(),
            player_id: name.to_lowercase(),
            player_name: name.to_string(),
            games_played: games,
            total_seeds: 20,
            accuracy,
            mode: "NM".to_string(),
            time_limit: 40,
            score_stddev: 500.0,
            top_finishes: 0,
            top3_finishes: 0,
            rank: 1,
            median_score: 4000.0,
            past_test_id: None,
            improvement: 0.0,
        }
    }

    fn add_participation(snapshot: &mut DataSnapshot, rec: PlayerTestRecord) {
        let name = rec.player_name.clone();
        if !snapshot.participation_order.contains(&name) {
            snapshot.participation_order.push(name.clone());
        }
        snapshot.player_tests.entry(name).or_default().push(rec);
    }

    fn snapshot_with_test() -> DataSnapshot {
        let mut snapshot = DataSnapshot::default();
        snapshot.tests.insert(
            "t1".to_string(),
            TestRecord {
                test_id: "t1".to_string(),
                mean_game_score: 19000.0,
                median_game_score: 19500.0,
                median_accuracy: 0.7,
                participants: 40,
                mean_accuracy: 0.68,
                round_score_stddev: 790.0,
                mean_round_score: 3900.0,
                median_round_score: 4000.0,
                seed_count: 20,
            },
        );
        snapshot.precompute.tests.insert(
            "t1".to_string(),
            TestInfo {
                month: "June".to_string(),
                year: 2025,
                order: 3,
            },
        );
        snapshot
    }

    #[test]
    fn test_accuracy_board_applies_half_seed_threshold() {
        let mut snapshot = snapshot_with_test();
        add_participation(&mut snapshot, participation("t1", "Alice", 10, 0.7));
        add_participation(&mut snapshot, participation("t1", "Bob", 9, 0.9));

        let board = test_board(&snapshot, "t1", TestMetric::Accuracy);
        // Cutoff is floor(20 / 2) = 10 games; Bob is out despite the score.
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].player_name, "Alice");
    }

    #[test]
    fn test_unknown_test_is_empty() {
        let snapshot = snapshot_with_test();
        assert!(test_board(&snapshot, "t9", TestMetric::Accuracy).is_empty());
    }

    #[test]
    fn test_consistency_sorts_ascending() {
        let mut snapshot = snapshot_with_test();
        let mut a = participation("t1", "Steady", 12, 0.7);
        a.score_stddev = 300.0;
        let mut b = participation("t1", "Swingy", 12, 0.7);
        b.score_stddev = 900.0;
        add_participation(&mut snapshot, b);
        add_participation(&mut snapshot, a);

        let board = test_board(&snapshot, "t1", TestMetric::Consistency);
        assert_eq!(board[0].player_name, "Steady");
        assert_eq!(board[1].player_name, "Swingy");
    }

    #[test]
    fn test_improvement_positive_only_with_labels() {
        let mut snapshot = snapshot_with_test();
        snapshot.precompute.tests.insert(
            "t0".to_string(),
            TestInfo {
                month: "May".to_string(),
                year: 2025,
                order: 2,
            },
        );
        let mut up = participation("t1", "Up", 12, 0.7);
        up.improvement = 0.05;
        up.past_test_id = Some("t0".to_string());
        let mut down = participation("t1", "Down", 12, 0.7);
        down.improvement = -0.02;
        down.past_test_id = Some("t0".to_string());
        let mut unknown = participation("t1", "Mystery", 12, 0.7);
        unknown.improvement = 0.01;
        unknown.past_test_id = Some("t-missing".to_string());
        add_participation(&mut snapshot, up);
        add_participation(&mut snapshot, down);
        add_participation(&mut snapshot, unknown);

        let board = test_board(&snapshot, "t1", TestMetric::Improvement);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].player_name, "Up");
        assert_eq!(board[0].compared_to.as_deref(), Some("May 2025"));
        assert_eq!(board[1].player_name, "Mystery");
        assert_eq!(board[1].compared_to.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_finishes_tie_break_on_top3() {
        let mut snapshot = snapshot_with_test();
        let mut a = participation("t1", "Strong", 12, 0.7);
        a.top_finishes = 2;
        a.top3_finishes = 3;
        let mut b = participation("t1", "Stronger", 12, 0.7);
        b.top_finishes = 2;
        b.top3_finishes = 6;
        let mut c = participation("t1", "NoFinish", 12, 0.7);
        c.top_finishes = 0;
        c.top3_finishes = 0;
        add_participation(&mut snapshot, a);
        add_participation(&mut snapshot, b);
        add_participation(&mut snapshot, c);

        let board = test_board(&snapshot, "t1", TestMetric::Finishes);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].player_name, "Stronger");
        assert_eq!(board[0].top3_finishes, Some(6));
        assert_eq!(board[1].player_name, "Strong");
    }

    #[test]
    fn test_overview_and_catalogue() {
        let mut snapshot = snapshot_with_test();
        snapshot.seeds.push(crate::models::SeedRecord {
            test_id: "t1".to_string(),
            seed_number: 1,
            seed_link: "s1".to_string(),
            map_name: "World".to_string(),
            time_limit: 40,
            mode: Mode::Nm,
        });

        let overview = test_overview(&snapshot, "t1").unwrap();
        assert_eq!(overview.label, "June 2025");
        assert_eq!(overview.map_name.as_deref(), Some("World"));
        assert_eq!(overview.participants, 40);
        assert!(test_overview(&snapshot, "t9").is_none());

        let catalogue = test_catalogue(&snapshot);
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue[0].order, Some(3));
    }

    #[test]
    fn test_metric_parse_round_trip() {
        for metric in TestMetric::ALL {
            assert_eq!(TestMetric::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(TestMetric::parse("median_score"), Some(TestMetric::MedianScore));
        assert!(TestMetric::parse("nope").is_none());
    }
}
