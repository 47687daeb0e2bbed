//! Error handling for lineitem import operations.
//!
//! Provides error types with enough context (source, line, column, raw value)
//! to diagnose a malformed record without re-reading the input.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Unable to open input file: {path} - {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line} of {source_name}: {source}")]
    Read {
        source_name: String,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Wrong field count at {source_name}:{line}: expected {expected} fields, found {found}")]
    FieldCount {
        source_name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Missing trailing '{separator}' at {source_name}:{line}")]
    MissingTerminator {
        source_name: String,
        line: u64,
        separator: char,
    },

    #[error("Invalid value for {column} at {source_name}:{line}: '{value}' ({source})")]
    InvalidField {
        source_name: String,
        line: u64,
        column: &'static str,
        value: String,
        #[source]
        source: FieldError,
    },

    #[error("Row builder rejected column {column}: {reason}")]
    RowBuilder { column: usize, reason: String },

    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No input files matched: {pattern}")]
    NoInputFiles { pattern: String },

    #[error("Loading failed for file: {path} - {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Load cancelled after another file failed")]
    Cancelled,
}

/// Why a single field could not be converted to its column type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("not a non-negative integer: {0}")]
    Integer(#[from] ParseIntError),

    #[error("not a decimal number: {0}")]
    Decimal(#[from] ParseFloatError),

    #[error("decimal value is not finite")]
    NonFinite,

    #[error("decimal value underflows")]
    Underflow,

    #[error("scaled value {0} does not fit an unsigned 32-bit column")]
    ScaledOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, ImportError>;
