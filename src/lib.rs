//! Lineitem Importer Library
//!
//! Loads pipe-delimited TPC-H `lineitem` data, one record per line, into
//! strongly-typed rows ready for bulk insertion.
//!
//! This library provides:
//! - A pull parser ([`LineItemImporter`]) with single-line lookahead
//! - Zero-copy field splitting and strict integer / scaled-decimal conversion
//! - A schema-checked row builder that owns copies of every value
//! - A parallel bulk load driver writing batches to Parquet

pub mod cli;
pub mod config;
pub mod error;
pub mod importer;
pub mod models;
pub mod processor;
pub mod row;
pub mod schema;

pub use config::{CompressionAlgorithm, ErrorPolicy, ImporterConfig, LoadConfig};
pub use error::{FieldError, ImportError, Result};
pub use importer::LineItemImporter;
pub use models::{FileStats, LoadStats};
pub use processor::LoadProcessor;
pub use row::{PartialRow, RowBuilder, Value};
