//! Row builder abstraction and the schema-checked in-memory row.
//!
//! A row builder receives typed values by column index and keeps its own
//! copy of each one, so a populated row never borrows from the importer's
//! line buffer.

use crate::error::{ImportError, Result};
use crate::schema::{ColumnSpec, ColumnType, LINEITEM_COLUMN_COUNT, column_spec};

/// Destination for decoded field values
pub trait RowBuilder {
    /// Store an unsigned integer in a numeric column
    fn set_u32(&mut self, column: usize, value: u32) -> Result<()>;

    /// Store a copy of `value` in a text column
    fn set_string_copy(&mut self, column: usize, value: &str) -> Result<()>;
}

/// A stored cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    UInt32(u32),
    Text(String),
}

/// Lineitem row accumulated column by column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRow {
    values: Vec<Option<Value>>,
}

impl Default for PartialRow {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialRow {
    pub fn new() -> Self {
        Self {
            values: vec![None; LINEITEM_COLUMN_COUNT],
        }
    }

    fn checked_spec(&self, column: usize) -> Result<&'static ColumnSpec> {
        column_spec(column).ok_or_else(|| ImportError::RowBuilder {
            column,
            reason: format!(
                "column index out of range (schema has {} columns)",
                LINEITEM_COLUMN_COUNT
            ),
        })
    }

    pub fn get(&self, column: usize) -> Option<&Value> {
        self.values.get(column).and_then(Option::as_ref)
    }

    pub fn get_u32(&self, column: usize) -> Option<u32> {
        match self.get(column) {
            Some(Value::UInt32(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_str(&self, column: usize) -> Option<&str> {
        match self.get(column) {
            Some(Value::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_set(&self, column: usize) -> bool {
        self.get(column).is_some()
    }

    /// True once every schema column holds a value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Number of columns holding a value
    pub fn set_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

impl RowBuilder for PartialRow {
    fn set_u32(&mut self, column: usize, value: u32) -> Result<()> {
        let spec = self.checked_spec(column)?;
        if !spec.column_type.is_numeric() {
            return Err(ImportError::RowBuilder {
                column,
                reason: format!("{} is a text column, cannot store integer {}", spec.name, value),
            });
        }
        self.values[column] = Some(Value::UInt32(value));
        Ok(())
    }

    fn set_string_copy(&mut self, column: usize, value: &str) -> Result<()> {
        let spec = self.checked_spec(column)?;
        if spec.column_type != ColumnType::Text {
            return Err(ImportError::RowBuilder {
                column,
                reason: format!("{} is a numeric column, cannot store text", spec.name),
            });
        }
        self.values[column] = Some(Value::Text(value.to_owned()));
        Ok(())
    }
}
