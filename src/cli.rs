//! Command-line interface components.

use crate::config::{CompressionAlgorithm, ErrorPolicy, ImporterConfig, LoadConfig};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "lineitem-importer")]
#[command(about = "Load pipe-delimited TPC-H lineitem files into typed rows and Parquet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Lineitem files or glob patterns (e.g. 'lineitem.tbl.*')
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Directory for Parquet output; omit to only count rows
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Rows accumulated before a batch is flushed
    #[arg(short, long, default_value_t = 100_000)]
    pub batch_size: usize,

    /// Files imported concurrently (defaults to CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Each line ends with a terminating '|' (dbgen output)
    #[arg(long)]
    pub trailing_separator: bool,

    /// Log and skip malformed records instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors and hide the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    /// Build the load configuration described by the arguments
    pub fn to_config(&self) -> Result<LoadConfig> {
        let mut config = LoadConfig::default()
            .with_batch_size(self.batch_size)
            .with_compression(CompressionAlgorithm::from_name(&self.compression)?)
            .with_progress(!self.quiet)
            .with_importer(
                ImporterConfig::default().with_trailing_separator(self.trailing_separator),
            );

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if self.skip_malformed {
            config = config.with_error_policy(ErrorPolicy::Skip);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lineitem_importer={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
