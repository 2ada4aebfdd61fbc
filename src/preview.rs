//! Row-limited, read-only projections of a [`Table`].

use serde::Serialize;

use crate::table::{CellValue, Table};

/// Default row cap for previews.
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

/// First-N values of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewColumn {
    /// Column name.
    pub name: String,
    /// The first `min(limit, row_count)` cells, in row order.
    pub values: Vec<CellValue>,
}

/// Row-limited projection of a [`Table`] plus its full column-name list.
///
/// The name list always covers every column, regardless of the row cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    /// Capped per-column views, in column order.
    pub columns: Vec<PreviewColumn>,
    /// Every column name, unaffected by the row cap.
    pub column_names: Vec<String>,
}

impl Preview {
    /// Render the projection as a JSON object mapping column name to its
    /// capped value list, preserving column order.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.columns.len());
        for col in &self.columns {
            map.insert(
                col.name.clone(),
                serde_json::Value::Array(col.values.iter().map(CellValue::to_json).collect()),
            );
        }
        serde_json::Value::Object(map)
    }

    /// Column names joined for display, e.g. `date | description | amount`.
    pub fn column_names_joined(&self) -> String {
        self.column_names.join(" | ")
    }

    /// Number of rows included per column.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }
}

/// Project the first `min(limit, row_count)` rows of every column.
///
/// Pure and deterministic; `table` is never mutated. A `limit` of zero
/// yields empty value views while the column-name list stays complete.
pub fn preview(table: &Table, limit: usize) -> Preview {
    let rows = limit.min(table.row_count());
    let columns = table
        .columns
        .iter()
        .map(|col| PreviewColumn {
            name: col.name.clone(),
            values: col.values[..rows].to_vec(),
        })
        .collect();

    Preview {
        columns,
        column_names: table.column_names().map(str::to_owned).collect(),
    }
}
