use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geotest_stats::api::state::AppState;
use geotest_stats::calculate::{
    accuracy_board, adjusted_accuracy_board, aggregate_board, high_score_board, record_board,
    streak_board, test_board, test_catalogue, test_overview, AggregateScope, PlayerLookup,
    TestMetric,
};
use geotest_stats::calculate::player::{self, TestComparisonLookup, UnplayedReport};
use geotest_stats::config::AppConfig;
use geotest_stats::fetch::{Fetcher, FetcherConfig};
use geotest_stats::models::Mode;
use geotest_stats::storage::StorageConfig;
use geotest_stats::{format_accuracy, format_improvement, DataSnapshot};

#[derive(Parser)]
#[command(name = "geotest-stats")]
#[command(about = "Leaderboard and statistics tracker for community geography tests")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Download the published export set into the data directory
    Sync {
        /// Base URL of the exports (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print a lifetime leaderboard
    Leaderboard {
        /// Board: accuracy, streaks, games, rounds, high-scores,
        /// or a record category name
        #[arg(long, default_value = "accuracy")]
        board: String,

        /// Mode for the accuracy boards (all, nm, nmpz)
        #[arg(long, default_value = "all")]
        mode: String,

        /// Use the adjusted-accuracy variant
        #[arg(long)]
        adjusted: bool,
    },

    /// Print a player's summary
    Player {
        /// Display name or player ID
        identity: String,

        /// Also list the player's unplayed seeds
        #[arg(long)]
        unplayed: bool,

        /// Compare against one test by ID
        #[arg(long)]
        test: Option<String>,
    },

    /// Print per-test leaderboards, or the test catalogue with no ID
    Test {
        /// Test ID
        test_id: Option<String>,

        /// Metric: accuracy, median-score, consistency, improvement, finishes
        #[arg(long, default_value = "accuracy")]
        metric: String,
    },

    /// Report what each table loaded
    Tables,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting geotest-stats v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let storage = StorageConfig::new(data_dir);

    match cli.command {
        Commands::Serve { host, port } => {
            let snapshot = DataSnapshot::load(&storage);
            let state = AppState::new(snapshot);
            let app = geotest_stats::api::build_router(state);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Serving on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Sync { base_url } => {
            let fetcher = Fetcher::new(FetcherConfig {
                base_url: base_url.unwrap_or_else(|| config.source.base_url.clone()),
                timeout: std::time::Duration::from_secs(config.source.timeout_seconds),
                ..Default::default()
            })?;

            let report = fetcher.sync_all(&storage).await?;
            println!("\n=== Sync Results ===");
            println!("Fetched: {}", report.fetched.len());
            for name in &report.fetched {
                println!("  {}", name);
            }
            if !report.failed.is_empty() {
                println!("\nFailed:");
                for (name, err) in &report.failed {
                    println!("  {} - {}", name, err);
                }
            }
        }
        Commands::Leaderboard {
            board,
            mode,
            adjusted,
        } => {
            let snapshot = DataSnapshot::load(&storage);
            print_leaderboard(&snapshot, &board, &mode, adjusted);
        }
        Commands::Player {
            identity,
            unplayed,
            test,
        } => {
            let snapshot = DataSnapshot::load(&storage);
            print_player(&snapshot, &identity, unplayed, test.as_deref());
        }
        Commands::Test { test_id, metric } => {
            let snapshot = DataSnapshot::load(&storage);
            match test_id {
                None => {
                    println!("=== Tests ===");
                    for entry in test_catalogue(&snapshot) {
                        println!(
                            "  {:<24} {} ({} players, {} seeds)",
                            entry.test_id, entry.label, entry.participants, entry.seed_count
                        );
                    }
                }
                Some(test_id) => {
                    let Some(metric) = TestMetric::parse(&metric) else {
                        eprintln!("Unknown metric: {}. Use accuracy, median-score, consistency, improvement or finishes.", metric);
                        return Ok(());
                    };
                    match test_overview(&snapshot, &test_id) {
                        Some(overview) => {
                            println!("=== {} ===", overview.label);
                            if let Some(map) = &overview.map_name {
                                println!(
                                    "  {} | {} | {}s | {} seeds",
                                    map,
                                    overview.mode.map(|m| m.label()).unwrap_or("?"),
                                    overview.time_limit.unwrap_or(0),
                                    overview.seed_count
                                );
                            }
                            println!("  Participants:       {}", overview.participants);
                            println!(
                                "  Average accuracy:   {}",
                                format_accuracy(overview.mean_accuracy)
                            );
                            println!(
                                "  Median round score: {}",
                                overview.median_round_score.round()
                            );
                        }
                        None => {
                            println!("Test not found: {}", test_id);
                            return Ok(());
                        }
                    }

                    println!("\n--- {} ---", metric.as_str());
                    for (i, entry) in test_board(&snapshot, &test_id, metric).iter().enumerate() {
                        let value = match metric {
                            TestMetric::Accuracy | TestMetric::Improvement => {
                                format_accuracy(entry.value)
                            }
                            _ => format!("{}", entry.value.round()),
                        };
                        println!("  {:>2}. {:<24} {}", i + 1, entry.player_name, value);
                    }
                }
            }
        }
        Commands::Tables => {
            let snapshot = DataSnapshot::load(&storage);
            println!("=== Table Report ===");
            for load in &snapshot.load_report {
                match &load.error {
                    Some(err) => println!("  {:<24} ERROR: {}", load.table, err),
                    None => println!(
                        "  {:<24} {} rows ({} skipped)",
                        load.table, load.rows, load.skipped
                    ),
                }
            }
        }
    }

    Ok(())
}

fn print_leaderboard(snapshot: &DataSnapshot, board: &str, mode: &str, adjusted: bool) {
    match board {
        "accuracy" => {
            let Some(mode) = Mode::parse(mode) else {
                eprintln!("Unknown mode: {}. Use all, nm or nmpz.", mode);
                return;
            };
            let entries = if adjusted {
                adjusted_accuracy_board(snapshot, mode)
            } else {
                accuracy_board(snapshot, mode)
            };
            let title = if adjusted {
                "Adjusted accuracy leaderboard"
            } else {
                "Accuracy leaderboard"
            };
            println!("=== {} ({}) ===", title, mode.label());
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "  {:>2}. {:<24} {}  ({} games)",
                    i + 1,
                    entry.player_name,
                    format_accuracy(entry.value),
                    entry.played
                );
            }
        }
        "streaks" => {
            println!("=== Streak leaderboard ===");
            for (i, entry) in streak_board(snapshot).iter().enumerate() {
                println!(
                    "  {:>2}. {:<24} {}  ({} to {})",
                    i + 1,
                    entry.player_name,
                    entry.length,
                    entry.start.test_label,
                    entry.end.test_label
                );
            }
        }
        "games" | "rounds" => {
            let scope = if board == "games" {
                AggregateScope::Games
            } else {
                AggregateScope::Rounds
            };
            println!("=== Aggregate leaderboard ({}) ===", board);
            for (i, entry) in aggregate_board(snapshot, scope).iter().enumerate() {
                println!(
                    "  {:>2}. {:<24} {}  ({} played)",
                    i + 1,
                    entry.player_name,
                    entry.value.round(),
                    entry.played
                );
            }
        }
        "high-scores" => {
            println!("=== High scores ===");
            for (i, entry) in high_score_board(snapshot).iter().enumerate() {
                println!(
                    "  {:>2}. {:<24} {}  ({} - round {})",
                    i + 1,
                    entry.player_name,
                    entry.score.round(),
                    entry.test_label,
                    entry.round
                );
            }
        }
        category => {
            let entries = record_board(snapshot, category);
            if entries.is_empty() {
                eprintln!(
                    "Unknown board: {}. Use accuracy, streaks, games, rounds, high-scores or a record category.",
                    category
                );
                return;
            }
            println!("=== {} ===", category);
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "  {:>2}. {:<24} {}",
                    i + 1,
                    entry.player_name,
                    entry.value
                );
            }
        }
    }
}

fn print_player(snapshot: &DataSnapshot, identity: &str, unplayed: bool, test: Option<&str>) {
    let summary = match player::summarize(snapshot, identity) {
        PlayerLookup::Found(summary) => summary,
        PlayerLookup::NotFound { identity } => {
            println!(
                "Player not found: {}. Check the name and try again.",
                identity
            );
            return;
        }
    };

    println!("=== {} ===", summary.player_name);
    for standing in &summary.standings {
        let grade = standing
            .grade
            .as_ref()
            .map(|g| format!("  grade {} ({:.2}%)", g.grade, g.adjusted_percentage))
            .unwrap_or_default();
        println!(
            "  {:<9} rank {} / {}  accuracy {}{}",
            standing.mode.label(),
            standing.rank,
            standing.eligible_players,
            format_accuracy(standing.accuracy),
            grade
        );
    }

    let history = &summary.history;
    println!("\n  Tests taken: {}", history.total_tests);
    if let (Some(first), Some(latest)) = (&history.first_test, &history.latest_test) {
        println!("  First test:  {}", first.label);
        println!("  Latest test: {}", latest.label);
        println!(
            "  Improvement: {} overall, {} last 3, {} last 5",
            format_improvement(history.overall_improvement),
            format_improvement(history.recent_improvement_3),
            format_improvement(history.recent_improvement_5),
        );
    }

    if unplayed {
        match player::unplayed_seeds(snapshot, identity) {
            Some(UnplayedReport::UpToDate) => println!("\n  Player is up to date."),
            Some(UnplayedReport::Pending { count, seeds }) => {
                println!("\n  Unplayed seeds ({}):", count);
                for seed in seeds {
                    println!(
                        "    {} {} {}s - {} (seed {})",
                        seed.map_name,
                        seed.mode.label(),
                        seed.time_limit,
                        seed.test_label,
                        seed.seed_number
                    );
                }
            }
            None => {}
        }
    }

    if let Some(test_id) = test {
        match player::test_comparison(snapshot, identity, test_id) {
            TestComparisonLookup::Found(cmp) => {
                println!("\n  === {} ===", cmp.test_label);
                println!(
                    "  Accuracy:     {} (test average {})",
                    format_accuracy(cmp.accuracy),
                    format_accuracy(cmp.mean_accuracy)
                );
                if cmp.rank_reliable {
                    println!("  Rank:         {} / {}", cmp.rank, cmp.participants);
                } else {
                    println!(
                        "  Rank:         - / {} (not enough games played)",
                        cmp.participants
                    );
                }
                println!(
                    "  Games played: {} / {}",
                    cmp.games_played, cmp.total_seeds
                );
                println!(
                    "  Median score: {} (test {})",
                    cmp.median_score.round(),
                    cmp.overall_median_score.round()
                );
            }
            TestComparisonLookup::NotParticipated => {
                println!("\n  Test not found or player did not participate.");
            }
            TestComparisonLookup::PlayerNotFound => {}
        }
    }
}
