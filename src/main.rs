use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use open_leaderboard::calculate::{calculate_rankings_grouped, CohortGrouping};
use open_leaderboard::config::AppConfig;
use open_leaderboard::models::{
    EventConfigs, EventResult, EventSlot, LeaderboardFilter, RankedCompetitor, ScoringMode,
};
use open_leaderboard::storage::{
    read_roster, EntityType, JsonlWriter, LeaderboardSnapshot, StorageConfig,
};
use open_leaderboard::time::{
    format_duration, format_time_cap, is_valid_duration_text, parse_duration,
};

#[derive(Parser)]
#[command(name = "open-leaderboard")]
#[command(about = "Multi-event competition leaderboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./leaderboard.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a roster snapshot and print the leaderboard
    Rank {
        /// Roster file (JSONL, one competitor per line), or the name of a
        /// roster under `<data_dir>/rosters/`
        #[arg(long)]
        roster: PathBuf,

        /// Division filter (Rx, Scaled, Foundations, all)
        #[arg(long)]
        division: Option<String>,

        /// Sex filter (M, F, all)
        #[arg(long)]
        sex: Option<String>,

        /// Age group filter (e.g. "18-34", "55+", all)
        #[arg(long)]
        age_group: Option<String>,

        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Gym code filter
        #[arg(long)]
        gym: Option<String>,

        /// Cohort grouping override ("division" or "division_and_sex")
        #[arg(long)]
        grouping: Option<String>,

        /// Write the standings to this file (`.jsonl` for one row per line,
        /// otherwise a JSON snapshot document)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the snapshot under `<data_dir>/standings/<name>.json`
        #[arg(long)]
        save: Option<String>,

        /// Print standings as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a saved standings snapshot
    Show {
        /// Snapshot file, or the name of a snapshot under `<data_dir>/standings/`
        standings: PathBuf,

        /// Print the snapshot as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Duration text utilities
    Time {
        #[command(subcommand)]
        action: TimeAction,
    },

    /// Configuration utilities
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TimeAction {
    /// Convert MM:SS text to seconds
    Parse { text: String },

    /// Convert seconds to MM:SS text
    Format { seconds: f64 },

    /// Check MM:SS text against the accepted grammar
    Check { text: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    // Initialize tracing
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting open-leaderboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Rank {
            roster,
            division,
            sex,
            age_group,
            search,
            gym,
            grouping,
            output,
            save,
            json,
        } => {
            let filter = LeaderboardFilter::from_keys(
                division.as_deref(),
                sex.as_deref(),
                age_group.as_deref(),
                search.as_deref(),
                gym.as_deref(),
            )?;
            let grouping = match grouping {
                Some(g) => g.parse::<CohortGrouping>().map_err(anyhow::Error::msg)?,
                None => config.grouping,
            };

            let roster = resolve_path(&config, roster, EntityType::Roster);
            let competitors = read_roster(&roster)
                .with_context(|| format!("Failed to read roster {:?}", roster))?;
            let standings =
                calculate_rankings_grouped(&competitors, &config.events, &filter, grouping);
            tracing::info!(
                "Ranked {} competitors, showing {}",
                competitors.len(),
                standings.len()
            );

            let snapshot = LeaderboardSnapshot::new(filter, standings);
            if let Some(path) = output {
                if path.extension().is_some_and(|ext| ext == "jsonl") {
                    JsonlWriter::<RankedCompetitor>::new(path).write_all(&snapshot.entries)?;
                } else {
                    snapshot.write_to(&path)?;
                }
            }
            if let Some(name) = save {
                let storage = StorageConfig::new(config.data_dir.clone());
                snapshot.write_to(&storage.path_for(EntityType::Standings, &name))?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_table(&snapshot.entries, &config.events);
            }
        }

        Commands::Show { standings, json } => {
            let path = resolve_path(&config, standings, EntityType::Standings);
            let snapshot = LeaderboardSnapshot::read_from(&path)
                .with_context(|| format!("Failed to read standings {:?}", path))?;
            tracing::info!(
                "Loaded {} standings generated at {}",
                snapshot.entries.len(),
                snapshot.generated_at
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_table(&snapshot.entries, &config.events);
            }
        }

        Commands::Time { action } => match action {
            TimeAction::Parse { text } => {
                println!("{}", parse_duration(&text));
            }
            TimeAction::Format { seconds } => {
                println!("{}", format_duration(Some(seconds)));
            }
            TimeAction::Check { text } => {
                let valid = is_valid_duration_text(&text);
                println!("{}", if valid { "valid" } else { "invalid" });
                if !valid {
                    std::process::exit(1);
                }
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
                for (slot, event) in config.events.iter() {
                    let cap = event
                        .time_cap
                        .map(|c| format!(", cap {}", format_time_cap(c)))
                        .unwrap_or_default();
                    let state = if event.published { "published" } else { "hidden" };
                    println!("# {} {}: {}{} ({})", slot, event.name, event.scoring, cap, state);
                }
            }
        },
    }

    Ok(())
}

/// Bare names without an extension resolve against the data directory.
fn resolve_path(config: &AppConfig, path: PathBuf, kind: EntityType) -> PathBuf {
    if path.exists() || path.extension().is_some() {
        return path;
    }
    let storage = StorageConfig::new(config.data_dir.clone());
    let name = path.to_string_lossy();
    storage.path_for(kind, &name)
}

fn print_table(rows: &[RankedCompetitor], events: &EventConfigs) {
    println!("\n=== Leaderboard ===");
    print!("{:>4}  {:<24} {:<12} {:<3}", "#", "Name", "Division", "Sex");
    for slot in EventSlot::ALL {
        let label = events
            .get(slot)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| slot.to_string());
        print!(" {:>14}", label);
    }
    println!(" {:>6} {:>4}", "Points", "Done");

    for (position, row) in rows.iter().enumerate() {
        let c = &row.competitor;
        print!(
            "{:>4}  {:<24} {:<12} {:<3}",
            position + 1,
            c.name,
            c.division,
            c.sex
        );
        for slot in EventSlot::ALL {
            let cell = match row.placement(slot) {
                Some(place) if c.result(slot).is_submitted() => {
                    format!("{} ({})", display_score(c.result(slot), events, slot), place)
                }
                _ => "--".to_string(),
            };
            print!(" {:>14}", cell);
        }
        println!(" {:>6} {:>4}", row.total_points, row.participation);
    }
}

fn display_score(result: &EventResult, events: &EventConfigs, slot: EventSlot) -> String {
    let timed = match events.get(slot).map(|e| e.scoring) {
        Some(ScoringMode::LowerIsBetter) => true,
        Some(ScoringMode::CappedCompletion) => !result.capped,
        _ => false,
    };
    if timed {
        format_duration(Some(result.score()))
    } else if result.capped {
        format!("CAP+{}", result.score())
    } else {
        result.score().to_string()
    }
}
