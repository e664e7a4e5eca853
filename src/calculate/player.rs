//! Player summaries: per-mode standings, test history, improvement windows,
//! unplayed seeds and per-test comparisons.

use serde::Serialize;

use crate::calculate::eligibility::ParticipationThreshold;
use crate::calculate::grade::{grade_against_leader, GradeReport};
use crate::calculate::rank::{resolve_rank, Rank};
use crate::models::{HistoryMode, Mode, PlayerCard, PlayerTestRecord};
use crate::snapshot::DataSnapshot;

/// A test reference resolved for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TestRef {
    pub test_id: String,
    pub label: String,
}

/// A player's standing within one mode.
#[derive(Debug, Clone, Serialize)]
pub struct ModeStanding {
    pub mode: Mode,
    pub rank: Rank,
    pub accuracy: f64,
    /// Players meeting the mode's ranking threshold (the rank denominator).
    pub eligible_players: u32,
    /// Every player in the snapshot, eligible or not.
    pub total_players: u32,
    /// Present only when the player is ranked in this mode.
    pub grade: Option<GradeReport>,
}

/// Test-history aggregates for one player.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistorySummary {
    pub total_tests: u32,
    pub first_test: Option<TestRef>,
    pub latest_test: Option<TestRef>,
    /// Sub-mode the improvement figures are computed over, taken from the
    /// player's most recent test.
    pub history_mode: Option<HistoryMode>,
    /// Latest minus earliest accuracy across the whole same-mode history;
    /// 0 with fewer than two qualifying tests.
    pub overall_improvement: f64,
    /// Same, over the last 3 qualifying tests.
    pub recent_improvement_3: f64,
    /// Same, over the last 5 qualifying tests.
    pub recent_improvement_5: f64,
}

/// The full player summary handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub player_name: String,
    pub standings: Vec<ModeStanding>,
    pub history: HistorySummary,
    pub card: PlayerCard,
}

/// Outcome of a player query. `NotFound` is a user-visible state the caller
/// must render distinctly, not an error.
#[derive(Debug, Clone)]
pub enum PlayerLookup {
    Found(Box<PlayerSummary>),
    NotFound { identity: String },
}

/// Summarize a player across modes and history.
pub fn summarize(snapshot: &DataSnapshot, identity: &str) -> PlayerLookup {
    let Some(card) = snapshot.find_player(identity) else {
        return PlayerLookup::NotFound {
            identity: identity.to_string(),
        };
    };

    let standings = Mode::ALL_MODES
        .iter()
        .map(|&mode| {
            let list = snapshot.ranked.get(mode);
            let rank = resolve_rank(&card.player_name, list);
            let accuracy = card.stats(mode).accuracy;
            let grade = match (rank, list.leader_accuracy()) {
                (Rank::Ranked(_), Some(leader)) => Some(grade_against_leader(accuracy, leader)),
                _ => None,
            };
            ModeStanding {
                mode,
                rank,
                accuracy,
                eligible_players: list.len() as u32,
                total_players: snapshot.player_order.len() as u32,
                grade,
            }
        })
        .collect();

    let history = summarize_history(snapshot, &card.player_name);

    PlayerLookup::Found(Box::new(PlayerSummary {
        player_id: card.player_id.clone(),
        player_name: card.player_name.clone(),
        standings,
        history,
        card: card.clone(),
    }))
}

fn summarize_history(snapshot: &DataSnapshot, player_name: &str) -> HistorySummary {
    // Tests the calendar does not know cannot be placed on the timeline and
    // are left out of the history aggregates.
    let mut dated: Vec<(u32, &PlayerTestRecord)> = snapshot
        .participations(player_name)
        .iter()
        .filter_map(|rec| {
            snapshot
                .precompute
                .test_order(&rec.test_id)
                .map(|order| (order, rec))
        })
        .collect();
    dated.sort_by_key(|(order, _)| *order);

    let mut summary = HistorySummary {
        total_tests: dated.len() as u32,
        ..Default::default()
    };

    let (Some((_, first)), Some((_, latest))) = (dated.first(), dated.last()) else {
        return summary;
    };
    summary.first_test = Some(test_ref(snapshot, &first.test_id));
    summary.latest_test = Some(test_ref(snapshot, &latest.test_id));

    let Some(history_mode) = latest.history_mode() else {
        return summary;
    };
    summary.history_mode = Some(history_mode);

    let accuracies: Vec<f64> = dated
        .iter()
        .filter(|(_, rec)| rec.history_mode() == Some(history_mode))
        .map(|(_, rec)| rec.accuracy)
        .collect();

    summary.overall_improvement = window_improvement(&accuracies, accuracies.len());
    summary.recent_improvement_3 = window_improvement(&accuracies, 3);
    summary.recent_improvement_5 = window_improvement(&accuracies, 5);
    summary
}

/// Improvement over the last `window` entries of a chronological accuracy
/// series: latest minus earliest, 0 when fewer than two entries qualify.
fn window_improvement(accuracies: &[f64], window: usize) -> f64 {
    let start = accuracies.len().saturating_sub(window);
    let slice = &accuracies[start..];
    match (slice.first(), slice.last()) {
        (Some(first), Some(last)) if slice.len() >= 2 => last - first,
        _ => 0.0,
    }
}

fn test_ref(snapshot: &DataSnapshot, test_id: &str) -> TestRef {
    TestRef {
        test_id: test_id.to_string(),
        label: snapshot.precompute.test_label(test_id),
    }
}

// ── Unplayed seeds ──────────────────────────────────────────────

/// An unplayed seed resolved for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct UnplayedSeed {
    pub seed_link: String,
    pub map_name: String,
    pub mode: Mode,
    pub time_limit: u32,
    pub seed_number: u32,
    pub test_id: String,
    pub test_label: String,
}

/// Unplayed-seed report. A player who has played every seed gets the
/// explicit `UpToDate` state rather than an ambiguous empty list.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnplayedReport {
    UpToDate,
    Pending {
        count: usize,
        seeds: Vec<UnplayedSeed>,
    },
}

/// Compute the seeds a player has not played, newest test first. Returns
/// `None` when the identity does not resolve.
pub fn unplayed_seeds(snapshot: &DataSnapshot, identity: &str) -> Option<UnplayedReport> {
    let card = snapshot.find_player(identity)?;
    let empty = std::collections::HashSet::new();
    let played = snapshot
        .played_seeds
        .get(&card.player_name)
        .unwrap_or(&empty);

    let mut unplayed: Vec<UnplayedSeed> = snapshot
        .seeds
        .iter()
        .filter(|seed| !played.contains(&seed.seed_link))
        .map(|seed| UnplayedSeed {
            seed_link: seed.seed_link.clone(),
            map_name: seed.map_name.clone(),
            mode: seed.mode,
            time_limit: seed.time_limit,
            seed_number: seed.seed_number,
            test_id: seed.test_id.clone(),
            test_label: snapshot.precompute.test_label(&seed.test_id),
        })
        .collect();

    // Newest test first, then highest seed number; tests missing from the
    // calendar sink to the end.
    unplayed.sort_by(|a, b| {
        let order_a = snapshot.precompute.test_order(&a.test_id).unwrap_or(0);
        let order_b = snapshot.precompute.test_order(&b.test_id).unwrap_or(0);
        order_b
            .cmp(&order_a)
            .then(b.seed_number.cmp(&a.seed_number))
    });

    if unplayed.is_empty() {
        Some(UnplayedReport::UpToDate)
    } else {
        Some(UnplayedReport::Pending {
            count: unplayed.len(),
            seeds: unplayed,
        })
    }
}

// ── Per-test comparison ─────────────────────────────────────────

/// A player's result for one test next to the test-wide figures.
#[derive(Debug, Clone, Serialize)]
pub struct TestComparison {
    pub test_id: String,
    pub test_label: String,
    pub accuracy: f64,
    pub mean_accuracy: f64,
    pub rank: u32,
    /// False when the player played fewer than half the test's seeds; the
    /// rank is then not meaningful and should be rendered as such.
    pub rank_reliable: bool,
    pub participants: u32,
    pub games_played: u32,
    pub total_seeds: u32,
    pub median_score: f64,
    pub overall_median_score: f64,
    pub score_stddev: f64,
    pub overall_score_stddev: f64,
}

/// Outcome of a per-test comparison query.
#[derive(Debug, Clone)]
pub enum TestComparisonLookup {
    Found(TestComparison),
    PlayerNotFound,
    NotParticipated,
}

/// Compare a player's participation in one test against the test itself.
pub fn test_comparison(
    snapshot: &DataSnapshot,
    identity: &str,
    test_id: &str,
) -> TestComparisonLookup {
    let Some(card) = snapshot.find_player(identity) else {
        return TestComparisonLookup::PlayerNotFound;
    };
    let Some(participation) = snapshot
        .participations(&card.player_name)
        .iter()
        .find(|rec| rec.test_id == test_id)
    else {
        return TestComparisonLookup::NotParticipated;
    };

    // The TEST_SUM row can be missing while the participation row exists;
    // the comparison then degrades to zeroed test-wide figures.
    let test = snapshot.tests.get(test_id);
    let rank_reliable = ParticipationThreshold::TEST_BOARD
        .is_eligible(participation.games_played, participation.total_seeds);

    TestComparisonLookup::Found(TestComparison {
        test_id: test_id.to_string(),
        test_label: snapshot.precompute.test_label(test_id),
        accuracy: participation.accuracy,
        mean_accuracy: test.map(|t| t.mean_accuracy).unwrap_or_default(),
        rank: participation.rank,
        rank_reliable,
        participants: test.map(|t| t.participants).unwrap_or_default(),
        games_played: participation.games_played,
        total_seeds: participation.total_seeds,
        median_score: participation.median_score,
        overall_median_score: test.map(|t| t.median_round_score).unwrap_or_default(),
        score_stddev: participation.score_stddev,
        overall_score_stddev: test.map(|t| t.round_score_stddev).unwrap_or_default(),
    })
}
