//! Pull parser for pipe-delimited lineitem files.
//!
//! [`LineItemImporter`] reads one line at a time and decodes it into a
//! caller-supplied [`RowBuilder`]. Availability is checked with
//! [`LineItemImporter::has_next`] and consumption happens in
//! [`LineItemImporter::decode_next`]; at most one line is cached between the
//! two calls.
//!
//! Field views are `&str` slices borrowed from the importer's line buffer for
//! the duration of one decode. Anything that must outlive the decode is copied
//! by the row builder.

pub mod convert;
pub mod split;

#[cfg(test)]
mod tests;

use crate::config::ImporterConfig;
use crate::error::{ImportError, Result};
use crate::row::RowBuilder;
use crate::schema::{ColumnType, LINEITEM_COLUMN_COUNT, LINEITEM_SCHEMA, PRIMARY_KEY_FIELD};

use convert::{parse_integer, parse_scaled_decimal};
use split::{SplitError, split_fields};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Lookahead slot state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead {
    /// No line read since the last decode
    Pending,
    /// A line is cached in the buffer
    Ready,
    /// The source reported end of input; never read again
    Exhausted,
}

/// Line-oriented lineitem importer over any buffered source
#[derive(Debug)]
pub struct LineItemImporter<R> {
    reader: R,
    source_name: String,
    config: ImporterConfig,
    line: String,
    lookahead: Lookahead,
    line_number: u64,
}

impl LineItemImporter<BufReader<File>> {
    /// Open a lineitem file.
    ///
    /// An input that cannot be opened is a `SourceUnavailable` error; the
    /// importer is never constructed over a missing file.
    pub fn open(path: &Path, config: ImporterConfig) -> Result<Self> {
        let file = File::open(path).map_err(|source| ImportError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened lineitem source {}", path.display());
        Ok(Self::from_reader(
            path.display().to_string(),
            BufReader::new(file),
            config,
        ))
    }
}

impl<R: BufRead> LineItemImporter<R> {
    /// Wrap an already open source. `source_name` is only used in errors.
    pub fn from_reader(source_name: impl Into<String>, reader: R, config: ImporterConfig) -> Self {
        Self {
            reader,
            source_name: source_name.into(),
            config,
            line: String::new(),
            lookahead: Lookahead::Pending,
            line_number: 0,
        }
    }

    /// Whether another record is available.
    ///
    /// Reads at most one line per decode; repeated calls reuse the cached
    /// outcome, and once the source is exhausted this stays `false`.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.lookahead == Lookahead::Pending {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|source| ImportError::Read {
                    source_name: self.source_name.clone(),
                    line: self.line_number + 1,
                    source,
                })?;

            if read == 0 {
                debug!(
                    "Reached end of {} after {} lines",
                    self.source_name, self.line_number
                );
                self.lookahead = Lookahead::Exhausted;
            } else {
                self.line_number += 1;
                self.lookahead = Lookahead::Ready;
            }
        }
        Ok(self.lookahead == Lookahead::Ready)
    }

    /// Decode the next record into `row` and return its order key.
    ///
    /// Returns `Ok(None)` without touching `row` when no record is left. The
    /// cached line is consumed even if decoding fails; `row` may then hold
    /// some of the record's columns and should be discarded.
    pub fn decode_next<B: RowBuilder + ?Sized>(&mut self, row: &mut B) -> Result<Option<u32>> {
        if !self.has_next()? {
            return Ok(None);
        }
        self.lookahead = Lookahead::Pending;

        let line = self.line.strip_suffix('\n').unwrap_or(&self.line);
        let fields: [&str; LINEITEM_COLUMN_COUNT] =
            split_fields(line, &self.config).map_err(|e| match e {
                SplitError::FieldCount { found } => ImportError::FieldCount {
                    source_name: self.source_name.clone(),
                    line: self.line_number,
                    expected: LINEITEM_COLUMN_COUNT,
                    found,
                },
                SplitError::MissingTerminator => ImportError::MissingTerminator {
                    source_name: self.source_name.clone(),
                    line: self.line_number,
                    separator: self.config.separator,
                },
            })?;

        let mut order_key = 0;
        for (position, (spec, text)) in LINEITEM_SCHEMA.iter().zip(fields).enumerate() {
            let converted = match spec.column_type {
                ColumnType::Integer => parse_integer(text),
                ColumnType::ScaledDecimal { scale } => parse_scaled_decimal(text, scale),
                ColumnType::Text => {
                    row.set_string_copy(spec.index, text)?;
                    continue;
                }
            };

            let value = converted.map_err(|source| ImportError::InvalidField {
                source_name: self.source_name.clone(),
                line: self.line_number,
                column: spec.name,
                value: text.to_string(),
                source,
            })?;
            row.set_u32(spec.index, value)?;

            if position == PRIMARY_KEY_FIELD {
                order_key = value;
            }
        }

        trace!(
            "Decoded order {} from {}:{}",
            order_key, self.source_name, self.line_number
        );
        Ok(Some(order_key))
    }
}
