//! Statistics calculation engine.
//!
//! Pure query components over a loaded [`crate::snapshot::DataSnapshot`]:
//! - Minimum-participation eligibility thresholds
//! - The generic leaderboard pipeline and its board configurations
//! - Rank resolution with the "not applicable" outcome
//! - Player summaries, improvement windows and unplayed seeds
//! - Leader-relative letter grades
//! - Per-test leaderboards
//!
//! Nothing here mutates the snapshot; derived values (ranks, grades) live
//! only in the returned result objects, so repeated queries are idempotent.

pub mod eligibility;
pub mod grade;
pub mod leaderboard;
pub mod player;
pub mod rank;
pub mod test;

pub use eligibility::ParticipationThreshold;
pub use grade::{grade_against_leader, Grade, GradeReport};
pub use leaderboard::{
    accuracy_board, adjusted_accuracy_board, aggregate_board, build_board, high_score_board,
    record_board, streak_board, AggregateScope, BoardConfig, BoardEntry, BOARD_LIMIT,
};
pub use player::{summarize, test_comparison, unplayed_seeds, PlayerLookup, PlayerSummary};
pub use rank::{resolve_rank, Rank};
pub use test::{test_board, test_catalogue, test_overview, TestMetric};
