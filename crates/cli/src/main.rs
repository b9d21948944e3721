//! Memoscope CLI - memo command

use anyhow::Result;
use clap::{Parser, Subcommand};
use memoscope_pipeline::{CategoryFilter, FilterParams, SortDirection, SortField};
use std::time::Duration;
use system_config::LoggingConfig;
use tracing::warn;

mod cmd;
mod logging;
mod system_config;
mod util;

/// Memoscope - debounced search and memoized statistics over a generated table
#[derive(Parser)]
#[command(name = "memo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Generator seed (overrides data.seed)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of rows to generate, 0 to 1,000,000 (overrides data.record_count)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(0..=1_000_000))]
    count: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated table
    Generate {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Filter the table once and print statistics
    Evaluate {
        /// Case-insensitive substring of name or email
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category to keep ("all" keeps every row)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// Order rows by name, email, category, magnitude or joined
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Rows to print (default: display.table_rows)
        #[arg(long)]
        rows: Option<usize>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List category selector options
    Categories,
    /// Count recomputations with and without memoization
    Compare {
        /// Number of unrelated re-renders to simulate
        #[arg(long, default_value = "100")]
        ticks: u64,
        /// Case-insensitive substring of name or email
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category to keep ("all" keeps every row)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Interactive search session reading stdin
    Session {
        /// Quiet period before a search settles (default: debounce.search_quiet_period_ms)
        #[arg(long)]
        quiet_period_ms: Option<u64>,
        /// Delay between simulated keystrokes; 0 submits whole lines
        #[arg(long, default_value = "0")]
        keystroke_interval_ms: u64,
    },
    /// View and edit configuration
    Config {
        /// List all configuration values
        #[arg(long)]
        list: bool,
        /// Get a specific configuration value
        #[arg(long)]
        get: Option<String>,
        /// Set a configuration value (key value)
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
        /// Show config file path
        #[arg(long)]
        path: bool,
        /// Create config file if it doesn't exist (use with --path)
        #[arg(long)]
        create: bool,
        /// Show example configuration
        #[arg(long)]
        example: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work without generating data, and with a file
    // that no longer validates so it can be repaired
    if let Commands::Config { list: _, get, set, path, create, example } = cli.command {
        let config = system_config::load();
        let logging = match &config {
            Ok(config) => config.logging.clone(),
            Err(_) => LoggingConfig::default(),
        };
        let _log_guard = logging::init(&logging)?;
        if let Err(err) = config {
            warn!(error = %format_args!("{:#}", err), "Configuration needs repair");
        }
        return cmd::config::run(cmd::config::ConfigAction::from_flags(get, set, path, create, example)).await;
    }

    let config = system_config::load()?;
    let _log_guard = logging::init(&config.logging)?;

    let records = util::build_records(&config, cli.count.map(|count| count as usize), cli.seed);

    match cli.command {
        Commands::Generate { json } => cmd::generate::run(&records, json).await,
        Commands::Evaluate { search, category, sort, desc, rows, json } => {
            let options = cmd::evaluate::EvaluateOptions {
                search,
                category,
                sort,
                direction: if desc { SortDirection::Desc } else { SortDirection::Asc },
                rows: rows.unwrap_or(config.display.table_rows),
                json,
            };
            cmd::evaluate::run(&records, options).await
        }
        Commands::Categories => cmd::categories::run(&records).await,
        Commands::Compare { ticks, search, category, json } => {
            cmd::compare::run(&records, FilterParams::new(search, category), ticks, json).await
        }
        Commands::Session { quiet_period_ms, keystroke_interval_ms } => {
            let quiet_period_ms = quiet_period_ms.unwrap_or(config.debounce.search_quiet_period_ms);
            let options = cmd::session::SessionOptions {
                quiet_period: Duration::from_millis(quiet_period_ms),
                category_quiet_period: Duration::from_millis(config.debounce.default_quiet_period_ms),
                keystroke_interval: Duration::from_millis(keystroke_interval_ms),
                rows: config.display.table_rows,
            };
            cmd::session::run(&records, options).await
        }
        Commands::Config { .. } => Ok(()),
    }
}
