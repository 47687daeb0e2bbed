//! Configuration for importing and loading lineitem files.
//!
//! `ImporterConfig` covers how a single line is split, `LoadConfig` covers
//! how the bulk load driver batches, parallelises and writes rows.

use crate::error::{ImportError, Result};
use crate::schema::FIELD_SEPARATOR;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};

/// Line splitting options for a single importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// Field separator character
    pub separator: char,

    /// Every line ends with one extra separator (dbgen output)
    pub trailing_separator: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            separator: FIELD_SEPARATOR,
            trailing_separator: false,
        }
    }
}

impl ImporterConfig {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_trailing_separator(mut self, trailing_separator: bool) -> Self {
        self.trailing_separator = trailing_separator;
        self
    }
}

/// What the load driver does with a malformed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop the whole load on the first malformed record
    Abort,
    /// Log and count the record, then continue with the next line
    Skip,
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }

    /// Parse a CLI compression name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(ImportError::Configuration {
                message: format!(
                    "unknown compression '{}' (expected snappy, zstd, lz4 or none)",
                    other
                ),
            }),
        }
    }
}

/// Global configuration for a bulk load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Number of files imported concurrently
    pub workers: usize,

    /// Rows accumulated before a batch is flushed
    pub batch_size: usize,

    /// Handling of malformed records
    pub error_policy: ErrorPolicy,

    /// Parquet compression for written files
    pub compression: CompressionAlgorithm,

    /// Show a progress bar over input files
    pub show_progress: bool,

    /// Line splitting options passed to every importer
    pub importer: ImporterConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            batch_size: 100_000,
            error_policy: ErrorPolicy::Abort,
            compression: CompressionAlgorithm::Snappy,
            show_progress: false,
            importer: ImporterConfig::default(),
        }
    }
}

impl LoadConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with custom batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_importer(mut self, importer: ImporterConfig) -> Self {
        self.importer = importer;
        self
    }

    /// Reject settings the driver cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ImportError::Configuration {
                message: "workers must be at least 1".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(ImportError::Configuration {
                message: "batch_size must be at least 1".to_string(),
            });
        }
        if self.importer.separator == '\n' {
            return Err(ImportError::Configuration {
                message: "separator cannot be a newline".to_string(),
            });
        }
        Ok(())
    }
}
