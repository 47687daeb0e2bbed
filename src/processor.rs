//! Bulk load driver.
//!
//! Runs one [`LineItemImporter`] per input file on blocking tasks, batches
//! the decoded rows and hands each full batch to a Parquet sink. Files are
//! the unit of parallelism; a single importer is never shared, and no two
//! inputs may share an output file.

pub mod batch;
pub mod discovery;
pub mod writer;

#[cfg(test)]
mod tests;

use crate::config::{ErrorPolicy, LoadConfig};
use crate::error::{ImportError, Result};
use crate::importer::LineItemImporter;
use crate::models::{FileStats, LoadStats};
use crate::row::PartialRow;

use batch::RowBatch;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::task;
use tracing::{debug, info, warn};
use writer::ParquetSink;

/// Loads a set of lineitem files, optionally writing Parquet output
pub struct LoadProcessor {
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    config: LoadConfig,
}

impl LoadProcessor {
    /// Create a processor; without an output directory rows are only counted
    pub fn new(inputs: Vec<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir,
            config: LoadConfig::default(),
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: LoadConfig) -> Self {
        self.config = config;
        self
    }

    /// Load every input file.
    ///
    /// The first failing file aborts the load and its error is returned.
    /// Files not yet started are skipped and files in flight stop at their
    /// next record, removing their partial output; every task has finished
    /// by the time this returns. Output of files that completed before the
    /// failure is kept.
    pub async fn process(&self) -> Result<LoadStats> {
        self.config.validate()?;
        let plan = self.plan_outputs()?;
        let start_time = Instant::now();

        info!(
            "Loading {} files with {} workers",
            plan.len(),
            self.config.workers
        );

        let progress_bar = if self.config.show_progress && !plan.is_empty() {
            Some(create_progress_bar(plan.len() as u64))
        } else {
            None
        };

        let cancel = Arc::new(AtomicBool::new(false));
        let results: Vec<Result<FileStats>> = stream::iter(plan)
            .map(|(path, output_path)| {
                let config = self.config.clone();
                let cancel = Arc::clone(&cancel);
                let progress_bar = progress_bar.clone();

                async move {
                    let task_path = path.clone();
                    let task_cancel = Arc::clone(&cancel);
                    let result = match task::spawn_blocking(move || {
                        load_file_until(&task_path, output_path, &config, &task_cancel)
                    })
                    .await
                    {
                        Ok(result) => result,
                        Err(e) => Err(ImportError::LoadFailed {
                            path,
                            reason: format!("Load task failed: {}", e),
                        }),
                    };

                    match &result {
                        Ok(stats) => {
                            if let Some(pb) = &progress_bar {
                                pb.inc(1);
                                pb.set_message(format!(
                                    "{} rows from {}",
                                    stats.rows,
                                    stats.path.display()
                                ));
                            }
                        }
                        Err(_) => cancel.store(true, Ordering::Relaxed),
                    }
                    result
                }
            })
            .buffer_unordered(self.config.workers)
            .collect()
            .await;

        let mut files = Vec::with_capacity(results.len());
        let mut failure = None;
        for result in results {
            match result {
                Ok(stats) => files.push(stats),
                Err(ImportError::Cancelled) => {}
                Err(e) => {
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }

        if let Some(e) = failure {
            if let Some(pb) = &progress_bar {
                pb.abandon_with_message("Load aborted");
            }
            return Err(e);
        }
        if let Some(pb) = &progress_bar {
            pb.finish_with_message("Load complete");
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        let stats = LoadStats {
            files,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Loaded {} rows ({} orders) from {} files in {}ms",
            stats.total_rows(),
            stats.total_orders(),
            stats.files_processed(),
            stats.processing_time_ms
        );
        Ok(stats)
    }

    /// Pair each input with its output path, rejecting inputs that would
    /// overwrite each other's output
    fn plan_outputs(&self) -> Result<Vec<(PathBuf, Option<PathBuf>)>> {
        let Some(output_dir) = &self.output_dir else {
            return Ok(self.inputs.iter().map(|path| (path.clone(), None)).collect());
        };

        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
        let mut plan = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let output = output_path_for(output_dir, input);
            if let Some(previous) = claimed.insert(output.clone(), input) {
                return Err(ImportError::Configuration {
                    message: format!(
                        "{} and {} would both be written to {}",
                        previous.display(),
                        input.display(),
                        output.display()
                    ),
                });
            }
            plan.push((input.clone(), Some(output)));
        }
        Ok(plan)
    }
}

/// Parquet path for one input, e.g. `lineitem.tbl.1` -> `<output_dir>/lineitem_tbl_1.parquet`
pub fn output_path_for(output_dir: &Path, input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .replace('.', "_");
    output_dir.join(format!("{}.parquet", name))
}

/// Import one file synchronously
pub fn load_file(path: &Path, output_path: Option<PathBuf>, config: &LoadConfig) -> Result<FileStats> {
    load_file_until(path, output_path, config, &AtomicBool::new(false))
}

/// Import one file, stopping with `Cancelled` once `cancel` is set
fn load_file_until(
    path: &Path,
    output_path: Option<PathBuf>,
    config: &LoadConfig,
    cancel: &AtomicBool,
) -> Result<FileStats> {
    if cancel.load(Ordering::Relaxed) {
        debug!("Skipping {}: load aborted", path.display());
        return Err(ImportError::Cancelled);
    }

    let importer = LineItemImporter::open(path, config.importer)?;
    let sink = output_path.map(|output| ParquetSink::new(output, config.compression));
    let mut stats = load_rows(importer, sink, config, cancel)?;
    stats.path = path.to_path_buf();
    Ok(stats)
}

/// Drive the pull protocol over one importer, batching rows into `sink`.
///
/// On error the sink is dropped unfinished, which removes its partial file.
fn load_rows<R: BufRead>(
    mut importer: LineItemImporter<R>,
    mut sink: Option<ParquetSink>,
    config: &LoadConfig,
    cancel: &AtomicBool,
) -> Result<FileStats> {
    let mut stats = FileStats::default();
    let mut batch = RowBatch::new(config.batch_size);
    let mut last_order = None;

    while importer.has_next()? {
        if cancel.load(Ordering::Relaxed) {
            return Err(ImportError::Cancelled);
        }

        let mut row = PartialRow::new();
        let order_key = match importer.decode_next(&mut row) {
            Ok(Some(order_key)) => order_key,
            Ok(None) => break,
            Err(e) if config.error_policy == ErrorPolicy::Skip && is_record_error(&e) => {
                warn!("Skipping malformed record: {}", e);
                stats.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if last_order != Some(order_key) {
            stats.orders += 1;
            last_order = Some(order_key);
        }
        stats.rows += 1;
        batch.push(row);

        if batch.is_full() {
            flush(&mut batch, sink.as_mut(), &mut stats)?;
        }
    }
    flush(&mut batch, sink.as_mut(), &mut stats)?;

    if let Some(sink) = sink {
        let output_path = sink.output_path().to_path_buf();
        if sink.finish()? > 0 {
            stats.output_path = Some(output_path);
        }
    }

    debug!(
        "Loaded {} rows, {} orders, {} skipped",
        stats.rows, stats.orders, stats.skipped
    );
    Ok(stats)
}

fn flush(batch: &mut RowBatch, sink: Option<&mut ParquetSink>, stats: &mut FileStats) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }
    if let Some(sink) = sink {
        sink.append(batch.to_dataframe()?)?;
    }
    stats.batches += 1;
    batch.clear();
    Ok(())
}

/// Errors describing bad input data rather than a broken source or sink
fn is_record_error(error: &ImportError) -> bool {
    matches!(
        error,
        ImportError::FieldCount { .. }
            | ImportError::MissingTerminator { .. }
            | ImportError::InvalidField { .. }
            | ImportError::RowBuilder { .. }
    )
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
