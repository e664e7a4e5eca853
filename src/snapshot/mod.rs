//! The in-memory data snapshot.
//!
//! [`DataSnapshot`] is built once from the exported tables and is immutable
//! afterwards; every query component borrows it. A table that fails to load
//! degrades to empty (the features backed by it return empty result sets)
//! instead of failing the whole load.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::calculate::eligibility::ParticipationThreshold;
use crate::models::{
    AggregateRecord, GameRecord, Mode, ModeMap, PlayerCard, PlayerTestRecord, Precompute,
    RecordRow, SeedRecord, StreakRecord, TestRecord,
};
use crate::storage::{CsvTable, StorageConfig, Table};

/// One entry of a per-mode ranked list: an eligible player in rank order.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub player_id: String,
    pub player_name: String,
    pub accuracy: f64,
    pub games_played: u32,
}

/// The eligible players of one mode, sorted by accuracy descending.
/// Equal accuracies keep their input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedList {
    pub entries: Vec<RankedEntry>,
}

impl RankedList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accuracy of the #1 ranked player, when anyone is eligible.
    pub fn leader_accuracy(&self) -> Option<f64> {
        self.entries.first().map(|e| e.accuracy)
    }
}

/// Load outcome for one table, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct TableLoad {
    pub table: String,
    pub rows: usize,
    pub skipped: usize,
    pub error: Option<String>,
}

/// One immutable load of the full data set.
#[derive(Debug, Clone)]
pub struct DataSnapshot {
    pub precompute: Precompute,

    /// Player cards keyed by display name.
    pub players: HashMap<String, PlayerCard>,
    /// Display names in export order; the stable iteration order for
    /// everything derived from the cards.
    pub player_order: Vec<String>,
    /// Per-mode eligible players in rank order.
    pub ranked: ModeMap<RankedList>,

    /// Seeds in export order, for the unplayed-seed scan.
    pub seeds: Vec<SeedRecord>,
    /// Played seed links per player display name.
    pub played_seeds: HashMap<String, HashSet<String>>,
    pub games: Vec<GameRecord>,

    pub tests: HashMap<String, TestRecord>,
    /// Participation rows grouped by player display name.
    pub player_tests: HashMap<String, Vec<PlayerTestRecord>>,
    /// Player display names in the order they first appear in
    /// PLAYER_TEST_SUM; the stable iteration order for cross-player scans.
    pub participation_order: Vec<String>,

    pub streaks: Vec<StreakRecord>,
    pub game_agg: Vec<AggregateRecord>,
    pub round_agg: Vec<AggregateRecord>,
    /// Record rows grouped by category.
    pub records: HashMap<String, Vec<RecordRow>>,

    pub loaded_at: DateTime<Utc>,
    pub load_report: Vec<TableLoad>,
}

impl Default for DataSnapshot {
    fn default() -> Self {
        Self {
            precompute: Precompute::default(),
            players: HashMap::new(),
            player_order: Vec::new(),
            ranked: ModeMap::default(),
            seeds: Vec::new(),
            played_seeds: HashMap::new(),
            games: Vec::new(),
            tests: HashMap::new(),
            player_tests: HashMap::new(),
            participation_order: Vec::new(),
            streaks: Vec::new(),
            game_agg: Vec::new(),
            round_agg: Vec::new(),
            records: HashMap::new(),
            loaded_at: Utc::now(),
            load_report: Vec::new(),
        }
    }
}

impl DataSnapshot {
    /// Load every table from the data directory. Never fails as a whole:
    /// missing or malformed tables are logged and their slice of the
    /// snapshot stays empty.
    pub fn load(storage: &StorageConfig) -> DataSnapshot {
        let mut snapshot = DataSnapshot::default();

        snapshot.precompute = match load_precompute(storage) {
            Ok(pre) => pre,
            Err(e) => {
                warn!("Failed to load precompute blob: {e}");
                Precompute::default()
            }
        };

        let cards = snapshot.load_player_cards(storage);
        for card in cards {
            if !snapshot.players.contains_key(&card.player_name) {
                snapshot.player_order.push(card.player_name.clone());
            }
            snapshot.players.insert(card.player_name.clone(), card);
        }
        snapshot.ranked = snapshot.build_ranked_lists();

        snapshot.seeds = snapshot.load_table(storage, Table::Seeds, SeedRecord::parse_row);

        snapshot.games = snapshot.load_table(storage, Table::GameSum, GameRecord::parse_row);
        for game in &snapshot.games {
            snapshot
                .played_seeds
                .entry(game.player_name.clone())
                .or_default()
                .insert(game.seed_link.clone());
        }

        let tests = snapshot.load_table(storage, Table::TestSum, TestRecord::parse_row);
        snapshot.tests = tests.into_iter().map(|t| (t.test_id.clone(), t)).collect();

        let participations =
            snapshot.load_table(storage, Table::PlayerTestSum, PlayerTestRecord::parse_row);
        for rec in participations {
            if !snapshot.player_tests.contains_key(&rec.player_name) {
                snapshot.participation_order.push(rec.player_name.clone());
            }
            snapshot
                .player_tests
                .entry(rec.player_name.clone())
                .or_default()
                .push(rec);
        }

        snapshot.streaks = snapshot.load_table(storage, Table::Streaks, StreakRecord::parse_row);
        snapshot.game_agg = snapshot.load_table(storage, Table::GameAgg, AggregateRecord::parse_row);
        snapshot.round_agg =
            snapshot.load_table(storage, Table::RoundAgg, AggregateRecord::parse_row);

        let record_rows = snapshot.load_table(storage, Table::Records, RecordRow::parse_row);
        for rec in record_rows {
            snapshot
                .records
                .entry(rec.category.clone())
                .or_default()
                .push(rec);
        }

        snapshot.loaded_at = Utc::now();
        info!(
            players = snapshot.players.len(),
            seeds = snapshot.seeds.len(),
            tests = snapshot.tests.len(),
            "Snapshot loaded"
        );
        snapshot
    }

    fn load_player_cards(&mut self, storage: &StorageConfig) -> Vec<PlayerCard> {
        let table = Table::PlayerCard;
        let loaded = match CsvTable::load(&storage.table_path(table))
            .and_then(|t| t.key_column("PLAYER_NAME").map(|_| t))
        {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Skipping table {table}: {e}");
                self.report_failure(table, e.to_string());
                return Vec::new();
            }
        };

        let header = loaded.header_index();
        self.collect_rows(table, loaded.rows(), |row| {
            PlayerCard::parse_row(header.as_map(), row)
        })
    }

    fn load_table<T>(
        &mut self,
        storage: &StorageConfig,
        table: Table,
        parse: impl Fn(&[String]) -> Option<T>,
    ) -> Vec<T> {
        let loaded = match CsvTable::load(&storage.table_path(table)) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Skipping table {table}: {e}");
                self.report_failure(table, e.to_string());
                return Vec::new();
            }
        };
        self.collect_rows(table, loaded.rows(), parse)
    }

    fn collect_rows<T>(
        &mut self,
        table: Table,
        rows: &[Vec<String>],
        parse: impl Fn(&[String]) -> Option<T>,
    ) -> Vec<T> {
        let mut parsed = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for row in rows {
            match parse(row) {
                Some(value) => parsed.push(value),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("Dropped {skipped} unparseable rows from {table}");
        }
        self.load_report.push(TableLoad {
            table: table.filename().to_string(),
            rows: parsed.len(),
            skipped,
            error: None,
        });
        parsed
    }

    fn report_failure(&mut self, table: Table, error: String) {
        self.load_report.push(TableLoad {
            table: table.filename().to_string(),
            rows: 0,
            skipped: 0,
            error: Some(error),
        });
    }

    /// Build the per-mode rank lists from the loaded cards.
    fn build_ranked_lists(&self) -> ModeMap<RankedList> {
        let mut ranked = ModeMap::<RankedList>::default();
        for mode in Mode::ALL_MODES {
            let seed_count = self.precompute.seed_count.get(mode);
            let mut entries: Vec<RankedEntry> = self
                .player_order
                .iter()
                .filter_map(|name| self.players.get(name))
                .filter(|card| {
                    ParticipationThreshold::RANKING
                        .is_eligible(card.stats(mode).games_played, seed_count)
                })
                .map(|card| RankedEntry {
                    player_id: card.player_id.clone(),
                    player_name: card.player_name.clone(),
                    accuracy: card.stats(mode).accuracy,
                    games_played: card.stats(mode).games_played,
                })
                .collect();
            entries.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
            *ranked.get_mut(mode) = RankedList { entries };
        }
        ranked
    }

    /// Resolve an identity to a player card: exact display name first, then
    /// case-insensitive stable ID.
    pub fn find_player(&self, identity: &str) -> Option<&PlayerCard> {
        if let Some(card) = self.players.get(identity) {
            return Some(card);
        }
        self.player_order
            .iter()
            .filter_map(|name| self.players.get(name))
            .find(|card| card.player_id.eq_ignore_ascii_case(identity))
    }

    /// Participation rows for a player, by display name.
    pub fn participations(&self, player_name: &str) -> &[PlayerTestRecord] {
        self.player_tests
            .get(player_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Test IDs in chronological order per the precompute calendar.
    pub fn tests_in_order(&self) -> Vec<&TestRecord> {
        let mut tests: Vec<&TestRecord> = self.tests.values().collect();
        tests.sort_by_key(|t| self.precompute.test_order(&t.test_id).unwrap_or(u32::MAX));
        tests
    }
}

fn load_precompute(storage: &StorageConfig) -> Result<Precompute, crate::storage::StorageError> {
    let text = std::fs::read_to_string(storage.precompute_path())?;
    Ok(serde_json::from_str(&text)?)
}
