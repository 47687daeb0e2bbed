//! Parquet output for loaded lineitem batches.
//!
//! The output file is opened on the first flushed batch and every batch is
//! written as its own row group, so memory is bounded by the batch size.
//! The footer is written by `finish`; a sink dropped before that removes
//! its partial file.

use crate::config::CompressionAlgorithm;
use crate::error::{ImportError, Result};
use polars::io::parquet::write::BatchedWriter;
use polars::prelude::{DataFrame, ParquetWriter as PolarsParquetWriter, PolarsError, Schema};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Streams batch frames into a single Parquet file
pub struct ParquetSink {
    output_path: PathBuf,
    compression: CompressionAlgorithm,
    writer: Option<BatchedWriter<File>>,
    batches: usize,
    rows: usize,
    created: bool,
    committed: bool,
}

impl ParquetSink {
    /// Create a sink; the file is not created until the first batch arrives
    pub fn new(output_path: PathBuf, compression: CompressionAlgorithm) -> Self {
        Self {
            output_path,
            compression,
            writer: None,
            batches: 0,
            rows: 0,
            created: false,
            committed: false,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Number of batches written so far
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Write one flushed batch as a row group
    pub fn append(&mut self, batch: DataFrame) -> Result<()> {
        debug!(
            "Writing batch of {} rows to {}",
            batch.height(),
            self.output_path.display()
        );

        if self.writer.is_none() {
            self.open(&batch.schema())?;
        }
        if let Some(writer) = self.writer.as_mut() {
            writer
                .write_batch(&batch)
                .map_err(|e| write_failed(&self.output_path, e))?;
        }

        self.batches += 1;
        self.rows += batch.height();
        Ok(())
    }

    /// Write the footer and return how many rows the file holds.
    ///
    /// A sink that never received a batch writes nothing.
    pub fn finish(mut self) -> Result<usize> {
        let Some(writer) = self.writer.take() else {
            return Ok(0);
        };

        writer
            .finish()
            .map_err(|e| write_failed(&self.output_path, e))?;
        self.committed = true;

        debug!("Wrote {} rows to {}", self.rows, self.output_path.display());
        Ok(self.rows)
    }

    fn open(&mut self, schema: &Schema) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.output_path)?;
        self.created = true;

        let writer = PolarsParquetWriter::new(file)
            .with_compression(self.compression.to_polars_compression())
            .batched(schema)
            .map_err(|e| write_failed(&self.output_path, e))?;
        self.writer = Some(writer);

        debug!("Opened parquet output {}", self.output_path.display());
        Ok(())
    }
}

impl Drop for ParquetSink {
    fn drop(&mut self) {
        if !self.created || self.committed {
            return;
        }

        // Close the handle before removing the file
        self.writer = None;
        match fs::remove_file(&self.output_path) {
            Ok(()) => debug!("Removed partial output {}", self.output_path.display()),
            Err(e) => warn!(
                "Failed to remove partial output {}: {}",
                self.output_path.display(),
                e
            ),
        }
    }
}

fn write_failed(path: &Path, error: PolarsError) -> ImportError {
    ImportError::LoadFailed {
        path: path.to_path_buf(),
        reason: format!("Failed to write parquet: {}", error),
    }
}
