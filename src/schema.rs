//! Static TPC-H lineitem schema.
//!
//! Column positions, names and semantic types for the 16 lineitem fields,
//! plus the mapping onto polars dtypes used when batches are written out.

use polars::prelude::*;

/// Separator between fields on a lineitem line
pub const FIELD_SEPARATOR: char = '|';

/// Number of fields on every lineitem line
pub const LINEITEM_COLUMN_COUNT: usize = 16;

/// Field position holding the order key returned by each decode
pub const PRIMARY_KEY_FIELD: usize = 0;

/// Fractional digits kept by the money and rate columns (stored ×100)
pub const MONEY_SCALE: u32 = 2;

pub const ORDER_KEY_COL_IDX: usize = 0;
pub const PART_KEY_COL_IDX: usize = 1;
pub const SUPP_KEY_COL_IDX: usize = 2;
pub const LINE_NUMBER_COL_IDX: usize = 3;
pub const QUANTITY_COL_IDX: usize = 4;
pub const EXTENDED_PRICE_COL_IDX: usize = 5;
pub const DISCOUNT_COL_IDX: usize = 6;
pub const TAX_COL_IDX: usize = 7;
pub const RETURN_FLAG_COL_IDX: usize = 8;
pub const LINE_STATUS_COL_IDX: usize = 9;
pub const SHIP_DATE_COL_IDX: usize = 10;
pub const COMMIT_DATE_COL_IDX: usize = 11;
pub const RECEIPT_DATE_COL_IDX: usize = 12;
pub const SHIP_INSTRUCT_COL_IDX: usize = 13;
pub const SHIP_MODE_COL_IDX: usize = 14;
pub const COMMENT_COL_IDX: usize = 15;

/// Semantic type of a lineitem column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Base-10 unsigned whole number
    Integer,
    /// Decimal text stored as an unsigned integer scaled by `10^scale`
    ScaledDecimal { scale: u32 },
    /// Verbatim text
    Text,
}

impl ColumnType {
    /// Whether values of this column are stored as `u32`
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::Text)
    }

    /// Polars dtype used for this column in written batches
    pub fn to_polars_dtype(&self) -> DataType {
        match self {
            ColumnType::Integer | ColumnType::ScaledDecimal { .. } => DataType::UInt32,
            ColumnType::Text => DataType::String,
        }
    }
}

/// One entry of the record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column index in the row builder
    pub index: usize,
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn column(index: usize, name: &'static str, column_type: ColumnType) -> ColumnSpec {
    ColumnSpec {
        index,
        name,
        column_type,
    }
}

const MONEY: ColumnType = ColumnType::ScaledDecimal { scale: MONEY_SCALE };

/// Lineitem columns in field order
pub const LINEITEM_SCHEMA: [ColumnSpec; LINEITEM_COLUMN_COUNT] = [
    column(ORDER_KEY_COL_IDX, "l_orderkey", ColumnType::Integer),
    column(PART_KEY_COL_IDX, "l_partkey", ColumnType::Integer),
    column(SUPP_KEY_COL_IDX, "l_suppkey", ColumnType::Integer),
    column(LINE_NUMBER_COL_IDX, "l_linenumber", ColumnType::Integer),
    column(QUANTITY_COL_IDX, "l_quantity", ColumnType::Integer),
    column(EXTENDED_PRICE_COL_IDX, "l_extendedprice", MONEY),
    column(DISCOUNT_COL_IDX, "l_discount", MONEY),
    column(TAX_COL_IDX, "l_tax", MONEY),
    column(RETURN_FLAG_COL_IDX, "l_returnflag", ColumnType::Text),
    column(LINE_STATUS_COL_IDX, "l_linestatus", ColumnType::Text),
    column(SHIP_DATE_COL_IDX, "l_shipdate", ColumnType::Text),
    column(COMMIT_DATE_COL_IDX, "l_commitdate", ColumnType::Text),
    column(RECEIPT_DATE_COL_IDX, "l_receiptdate", ColumnType::Text),
    column(SHIP_INSTRUCT_COL_IDX, "l_shipinstruct", ColumnType::Text),
    column(SHIP_MODE_COL_IDX, "l_shipmode", ColumnType::Text),
    column(COMMENT_COL_IDX, "l_comment", ColumnType::Text),
];

/// Look up a column by its row-builder index
pub fn column_spec(index: usize) -> Option<&'static ColumnSpec> {
    LINEITEM_SCHEMA.iter().find(|spec| spec.index == index)
}

/// Polars schema matching the frames produced from lineitem rows
pub fn polars_schema() -> Schema {
    LINEITEM_SCHEMA
        .iter()
        .map(|spec| Field::new(spec.name.into(), spec.column_type.to_polars_dtype()))
        .collect()
}
