//! Individual map seeds.

use serde::{Deserialize, Serialize};

use super::{parse_u32, Mode};

/// One playable seed of a test, keyed by its unique link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRecord {
    pub test_id: String,
    pub seed_number: u32,
    pub seed_link: String,
    pub map_name: String,
    /// Round timer in seconds.
    pub time_limit: u32,
    pub mode: Mode,
}

impl SeedRecord {
    /// Canonical SEEDS layout: TEST_ID, SEED_NUMBER, SEED_LINK, SEED_MAP,
    /// SEED_TIME, SEED_MODE.
    pub fn parse_row(row: &[String]) -> Option<SeedRecord> {
        if row.len() < 6 {
            return None;
        }
        let seed_link = row[2].trim();
        if seed_link.is_empty() {
            return None;
        }
        Some(SeedRecord {
            test_id: row[0].trim().to_string(),
            seed_number: parse_u32(&row[1]),
            seed_link: seed_link.to_string(),
            map_name: row[3].trim().to_string(),
            time_limit: parse_u32(&row[4]),
            mode: Mode::parse(&row[5])?,
        })
    }
}
