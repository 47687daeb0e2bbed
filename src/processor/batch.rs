//! Row batching between the importer and the Parquet sink.

use crate::error::{ImportError, Result};
use crate::row::PartialRow;
use crate::schema::{ColumnType, LINEITEM_SCHEMA};
use polars::prelude::*;

/// Owned rows waiting to be flushed
#[derive(Debug)]
pub struct RowBatch {
    rows: Vec<PartialRow>,
    capacity: usize,
}

impl RowBatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, row: PartialRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Build a DataFrame with one column per schema entry, in schema order.
    ///
    /// Every row must be complete; a missing value is a row builder error.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(LINEITEM_SCHEMA.len());

        for spec in &LINEITEM_SCHEMA {
            let name = PlSmallStr::from_static(spec.name);
            let column = match spec.column_type {
                ColumnType::Integer | ColumnType::ScaledDecimal { .. } => {
                    let values = self
                        .rows
                        .iter()
                        .map(|row| row.get_u32(spec.index).ok_or_else(|| missing(spec.index)))
                        .collect::<Result<Vec<u32>>>()?;
                    Column::new(name, values)
                }
                ColumnType::Text => {
                    let values = self
                        .rows
                        .iter()
                        .map(|row| row.get_str(spec.index).ok_or_else(|| missing(spec.index)))
                        .collect::<Result<Vec<&str>>>()?;
                    Column::new(name, values)
                }
            };
            columns.push(column);
        }

        Ok(DataFrame::new(columns)?)
    }
}

fn missing(column: usize) -> ImportError {
    ImportError::RowBuilder {
        column,
        reason: "row is incomplete".to_string(),
    }
}
