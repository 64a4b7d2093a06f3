//! # Annotation Activity CLI (`activity`)
//!
//! Buckets an exported annotation stream into recency time frames and
//! documents, and prints or exports the result.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `activity timeline <input>` | Print the bucketed timeline (text or JSON) |
//! | `activity export <input>` | Write the JSON view to a file or stdout |
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use annotation_activity::config::{self, Config};
use annotation_activity::timeline;

/// Annotation activity timelines, grouped by time frame and document.
#[derive(Parser)]
#[command(
    name = "activity",
    about = "Bucket annotations by recency window and document",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional. Without it, output is text, labels are English, and "now"
    /// is the system clock.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print annotations bucketed by time frame and document.
    Timeline {
        /// Activity file (JSON) with `documents` and `annotations`.
        input: PathBuf,

        /// Output format: `text` or `json`. Overrides `[output].format`.
        #[arg(long)]
        format: Option<String>,

        /// Fixed "now" (RFC 3339). Overrides `[clock].now`.
        #[arg(long)]
        now: Option<String>,
    },

    /// Export the bucketed timeline as JSON.
    Export {
        /// Activity file (JSON) with `documents` and `annotations`.
        input: PathBuf,

        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fixed "now" (RFC 3339). Overrides `[clock].now`.
        #[arg(long)]
        now: Option<String>,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Timeline { input, format, now } => {
            timeline::run_timeline(&cfg, &input, format.as_deref(), now.as_deref())?;
        }
        Commands::Export { input, output, now } => {
            timeline::run_export(&cfg, &input, output.as_deref(), now.as_deref())?;
        }
    }

    Ok(())
}
