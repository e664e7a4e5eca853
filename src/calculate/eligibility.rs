//! Minimum-participation thresholds.
//!
//! Every ranked board excludes players below a minimum sample size,
//! expressed as a fraction of a seed count. The cutoff is computed with
//! integer arithmetic (numerator multiplication first, then truncating
//! division), so `1/4 of 39 seeds` is 9, not 10.

use serde::Serialize;

/// A participation cutoff: `fraction * base seed count`, floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParticipationThreshold {
    pub numerator: u32,
    pub denominator: u32,
}

impl ParticipationThreshold {
    /// Per-mode rank lists (player summary ranks).
    pub const RANKING: ParticipationThreshold = ParticipationThreshold::new(1, 4);
    /// The displayed accuracy leaderboard.
    pub const ACCURACY_BOARD: ParticipationThreshold = ParticipationThreshold::new(1, 3);
    /// The adjusted-accuracy leaderboard (against rounds ÷ 5).
    pub const ADJUSTED_BOARD: ParticipationThreshold = ParticipationThreshold::new(2, 5);
    /// Aggregate game/round score boards (against the "all" seed count).
    pub const AGGREGATE_BOARD: ParticipationThreshold = ParticipationThreshold::new(1, 4);
    /// Per-test boards (against that test's seed count).
    pub const TEST_BOARD: ParticipationThreshold = ParticipationThreshold::new(1, 2);

    pub const fn new(numerator: u32, denominator: u32) -> ParticipationThreshold {
        ParticipationThreshold {
            numerator,
            denominator,
        }
    }

    /// Minimum participation required against a base seed count.
    pub fn min_required(&self, base_seed_count: u32) -> u32 {
        if self.denominator == 0 {
            return 0;
        }
        base_seed_count * self.numerator / self.denominator
    }

    /// Whether a participation quantity meets the cutoff. The quantity is
    /// whatever the board counts: raw games played, or rounds ÷ 5 for the
    /// adjusted boards.
    pub fn is_eligible(&self, quantity: u32, base_seed_count: u32) -> bool {
        quantity >= self.min_required(base_seed_count)
    }
}
