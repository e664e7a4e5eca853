//! # Geotest Stats
//!
//! Leaderboard and statistics tracker for community geography tests.
//!
//! ## Architecture
//!
//! - **models**: Typed records for the exported tables (player cards,
//!   seeds, games, tests, records) and the precompute blob
//! - **storage**: Data directory layout and CSV table loading
//! - **snapshot**: The immutable in-memory `DataSnapshot` every query runs
//!   against
//! - **calculate**: Leaderboards, ranks, grades, player and test summaries
//! - **api**: REST API endpoints
//! - **fetch**: Downloading the published export set
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod snapshot;
pub mod storage;

pub use snapshot::DataSnapshot;

/// Format an accuracy fraction as a percentage ("0.8125" -> "81.25%").
pub fn format_accuracy(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Format a signed accuracy delta with its direction arrow.
pub fn format_improvement(delta: f64) -> String {
    let arrow = if delta >= 0.0 { "↑" } else { "↓" };
    format!("{arrow} {:.2}%", (delta * 100.0).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(0.8125), "81.25%");
        assert_eq!(format_accuracy(0.0), "0.00%");
        assert_eq!(format_accuracy(1.0), "100.00%");
    }

    #[test]
    fn test_format_accuracy_rounds() {
        assert_eq!(format_accuracy(0.69545), "69.55%");
    }

    #[test]
    fn test_format_improvement_positive() {
        assert_eq!(format_improvement(0.12), "↑ 12.00%");
    }

    #[test]
    fn test_format_improvement_negative() {
        assert_eq!(format_improvement(-0.034), "↓ 3.40%");
    }

    #[test]
    fn test_format_improvement_zero() {
        assert_eq!(format_improvement(0.0), "↑ 0.00%");
    }
}
