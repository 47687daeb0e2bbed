//! Load statistics reported by the bulk load driver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of importing a single lineitem file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileStats {
    pub path: PathBuf,
    /// Rows decoded and handed to the batcher
    pub rows: usize,
    /// Number of runs of consecutive rows sharing an order key
    pub orders: usize,
    /// Records dropped under the skip policy
    pub skipped: usize,
    /// Batches flushed to the sink
    pub batches: usize,
    /// Parquet file written for this input, if any
    pub output_path: Option<PathBuf>,
}

/// Aggregate statistics for a whole load
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoadStats {
    pub files: Vec<FileStats>,
    pub processing_time_ms: u128,
}

impl LoadStats {
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|file| file.rows).sum()
    }

    pub fn total_orders(&self) -> usize {
        self.files.iter().map(|file| file.orders).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.files.iter().map(|file| file.skipped).sum()
    }

    /// Rows per second over the whole load
    pub fn throughput(&self) -> f64 {
        if self.processing_time_ms == 0 {
            0.0
        } else {
            self.total_rows() as f64 * 1000.0 / self.processing_time_ms as f64
        }
    }
}
