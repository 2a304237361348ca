//! Drumwatch
//!
//! Level dashboard and refill projection for chemical storage drums.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use drumwatch_core::projection::project;
use std::{env, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod dashboard;
mod plotting;
mod report;
mod server;

use config::{parse_timestamp, AppConfig};

#[derive(Parser)]
#[command(name = "drumwatch")]
#[command(about = "Level dashboard and refill projection for chemical storage drums")]
struct Cli {
    /// Path to the YAML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Listen address, overriding the configuration and PORT
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Print the current status of every drum
    Status {
        /// Evaluate at this timestamp instead of now (e.g. "2025-11-03 09:00")
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,

        /// Emit the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project the empty date for a single drum
    Project {
        /// When the drum went into service (e.g. "2025-11-01 09:00")
        #[arg(long, value_parser = parse_timestamp)]
        installed: NaiveDateTime,

        /// Current fill level in percent
        #[arg(short, long)]
        percent: f64,

        /// Evaluate at this timestamp instead of now
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            let port = env::var("PORT").ok();
            let addr = config.resolve_bind(bind.as_deref(), port.as_deref())?;
            let monitor = config.build_monitor()?;
            let state = server::AppState::new(config, monitor);
            server::serve(state, addr).await?;
        }

        Commands::Status { at, json } => {
            let monitor = config.build_monitor()?;
            let snapshot = monitor.snapshot(at.unwrap_or_else(now));
            if json {
                let out = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize snapshot")?;
                println!("{}", out);
            } else {
                print!("{}", report::format_status_report(&snapshot));
            }
        }

        Commands::Project { installed, percent, at } => {
            let now = at.unwrap_or_else(now);
            let projection = project(installed, now, percent);
            print!("{}", report::format_projection_report(installed, now, percent, &projection));
        }
    }

    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
