//! Core data model types for ingestion.
//!
//! Parsing produces an in-memory [`Table`]: an ordered list of named
//! [`Column`]s, each holding cells of one inferred [`ColumnType`]. Empty
//! input cells are stored as [`CellValue::Null`] regardless of the column
//! type, and every column in a table has the same number of cells.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Display format for date/time cells in previews and JSON output.
pub const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inferred logical type of a [`Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    /// UTF-8 text.
    Text,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point number.
    Float,
    /// Calendar date/time without timezone.
    DateTime,
}

/// A single cell in a [`Column`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/empty cell.
    Null,
    /// UTF-8 text.
    Text(String),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Calendar date/time without timezone.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Render the cell as a JSON value.
    ///
    /// Date/time cells become formatted strings; non-finite floats become
    /// JSON `null` (JSON has no NaN/Infinity).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Int(v) => serde_json::Value::Number((*v).into()),
            CellValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::DateTime(dt) => {
                serde_json::Value::String(dt.format(DATETIME_DISPLAY_FORMAT).to_string())
            }
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A named, typed, ordered list of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name, unique within its [`Table`].
    pub name: String,
    /// Inferred type; every non-null cell matches it.
    pub column_type: ColumnType,
    /// Cells in row order.
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a column from name, type, and cells.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }
}

/// In-memory tabular store.
///
/// Columns are stored column-major in parse order; the parsers guarantee
/// unique column names and equal cell counts across columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Ordered columns.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of rows (cells per column). Zero for a table with no columns.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the column with the given name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}
