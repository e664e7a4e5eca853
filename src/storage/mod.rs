//! Table storage.
//!
//! Handles reading the exported data set from the local data directory:
//! - CSV table exports (player cards, seeds, games, tests, records)
//! - The precomputed JSON summary blob

use std::path::PathBuf;
use thiserror::Error;

mod csv;

pub use self::csv::{CsvTable, HeaderIndex};

/// Errors that can occur while loading tables.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed table {table}: {reason}")]
    MalformedTable { table: String, reason: String },
}

/// The fixed set of tables the exports ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    PlayerCard,
    Seeds,
    GameSum,
    TestSum,
    PlayerTestSum,
    Streaks,
    GameAgg,
    RoundAgg,
    Records,
}

impl Table {
    pub const ALL: [Table; 9] = [
        Table::PlayerCard,
        Table::Seeds,
        Table::GameSum,
        Table::TestSum,
        Table::PlayerTestSum,
        Table::Streaks,
        Table::GameAgg,
        Table::RoundAgg,
        Table::Records,
    ];

    /// Get the filename for this table.
    pub fn filename(&self) -> &'static str {
        match self {
            Table::PlayerCard => "PLAYER_CARD.csv",
            Table::Seeds => "SEEDS.csv",
            Table::GameSum => "GAME_SUM.csv",
            Table::TestSum => "TEST_SUM.csv",
            Table::PlayerTestSum => "PLAYER_TEST_SUM.csv",
            Table::Streaks => "STREAKS.csv",
            Table::GameAgg => "GAME_AGG.csv",
            Table::RoundAgg => "ROUND_AGG.csv",
            Table::Records => "RECORDS.csv",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filename())
    }
}

/// Configuration for data paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.data_dir.join("csv")
    }

    pub fn json_dir(&self) -> PathBuf {
        self.data_dir.join("json")
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.csv_dir().join(table.filename())
    }

    pub fn precompute_path(&self) -> PathBuf {
        self.json_dir().join("precomp.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
