//! Precomputed summary blob (`precomp.json`).
//!
//! Supplies the per-mode seed counts every eligibility threshold is based
//! on, and the test calendar used for chronological ordering and labels.
//! Test month/year are display text only; ordering always uses the
//! explicit `order` field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Mode;

/// Total seed count per mode across every administered test.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeedCounts {
    #[serde(default)]
    pub all: u32,
    #[serde(default)]
    pub nm: u32,
    #[serde(default)]
    pub nmpz: u32,
}

impl SeedCounts {
    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::All => self.all,
            Mode::Nm => self.nm,
            Mode::Nmpz => self.nmpz,
        }
    }
}

/// Calendar entry for one test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestInfo {
    pub month: String,
    pub year: i32,
    /// Chronological sequence number, the only sort key for test order.
    pub order: u32,
}

impl TestInfo {
    /// Display label, e.g. "June 2025".
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// The precomputed summary blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Precompute {
    #[serde(default)]
    pub seed_count: SeedCounts,
    #[serde(default)]
    pub tests: HashMap<String, TestInfo>,
}

impl Precompute {
    pub fn test_info(&self, test_id: &str) -> Option<&TestInfo> {
        self.tests.get(test_id)
    }

    /// Chronological order of a test, when the calendar knows it.
    pub fn test_order(&self, test_id: &str) -> Option<u32> {
        self.tests.get(test_id).map(|t| t.order)
    }

    /// Display label for a test, falling back to the raw ID for tests the
    /// calendar does not know.
    pub fn test_label(&self, test_id: &str) -> String {
        match self.tests.get(test_id) {
            Some(info) => info.label(),
            None => test_id.to_string(),
        }
    }
}
