use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use studio_core::EstimatePayload;
use studio_core::calculations::QuoteEstimator;
use studio_core::calculations::common::format_inr_range;
use studio_core::validation::estimate::sanitize;
use studio_server::config::ServerConfig;
use studio_server::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Backend for the Studio PARSA website: contact forms, phone leads and
/// instant project quotes.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to `studio.toml` in the working
    /// directory when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (the default).
    Serve {
        /// Address to listen on, e.g. `0.0.0.0:8080`.
        #[arg(long)]
        bind: Option<String>,

        /// Database connection string.
        /// For SQLite this is a file path (e.g. `studio.db`) or `:memory:`.
        #[arg(long)]
        db: Option<String>,
    },

    /// Print a quote range without starting the server.
    Estimate {
        /// `residential` or `commercial`.
        #[arg(long)]
        category: String,

        /// `basic`, `standard` or `luxury`.
        #[arg(long)]
        tier: String,

        /// Floor area in square feet (per floor for commercial projects).
        #[arg(long)]
        area: u32,

        #[arg(long)]
        bedrooms: Option<u32>,

        #[arg(long, default_value_t = false)]
        home_theatre: bool,

        #[arg(long)]
        floors: Option<u32>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        db: None,
    }) {
        Command::Serve { bind, db } => {
            let config = config.with_overrides(bind, db);
            logging::init_logging(&config.logging)?;
            debug!(?config, "configuration loaded");
            studio_server::serve(&config).await
        }
        Command::Estimate {
            category,
            tier,
            area,
            bedrooms,
            home_theatre,
            floors,
        } => {
            let payload = EstimatePayload {
                category: Some(category),
                tier: Some(tier),
                floor_area_sq_ft: Some(area),
                bedroom_count: bedrooms,
                has_home_theatre: Some(home_theatre),
                floor_count: floors,
            };
            let request = sanitize(&payload)?;
            let result = QuoteEstimator::default().estimate(&request);
            println!("{}", format_inr_range(result.min_cost, result.max_cost));
            Ok(())
        }
    }
}
