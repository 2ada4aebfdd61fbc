//! Binary spreadsheet interpretation.
//!
//! Behavior:
//! - Opens the workbook from the in-memory byte source (format detected by
//!   `calamine` across `.xlsx`/`.xls`/`.xlsb`/`.ods` containers)
//! - Reads the first sheet; the first non-empty row is the header row
//! - Infers each column's type from the native cell kinds below the header

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;

use crate::error::SpreadsheetError;
use crate::table::{CellValue, Column, ColumnType, Table};

use super::delimited::parse_datetime;
use super::normalize_header_names;

/// Parse workbook bytes into a [`Table`].
pub fn parse_workbook(bytes: &[u8]) -> Result<Table, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SpreadsheetError::Sheet("workbook has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let rows: Vec<&[Data]> = range.rows().collect();
    let header_idx = rows
        .iter()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| {
            SpreadsheetError::Sheet(format!(
                "sheet '{sheet}' has no non-empty rows (no header row found)"
            ))
        })?;

    let names = normalize_header_names(rows[header_idx].iter().map(cell_to_header_string));

    // Column-major gather; short rows pad with empty cells.
    let data_rows = &rows[header_idx + 1..];
    let mut cells: Vec<Vec<&Data>> = vec![Vec::with_capacity(data_rows.len()); names.len()];
    for row in data_rows {
        for (idx, col) in cells.iter_mut().enumerate() {
            col.push(row.get(idx).unwrap_or(&Data::Empty));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, col)| build_column(name, &col))
        .collect();

    Ok(Table::new(columns))
}

fn build_column(name: String, cells: &[&Data]) -> Column {
    let column_type = infer_column_type(cells);
    let values = cells.iter().map(|c| convert_cell(c, column_type)).collect();
    Column::new(name, column_type, values)
}

/// Infer a column type from native cell kinds.
///
/// Numeric cells yield Int when every value is integral, Float otherwise;
/// date cells yield DateTime; any textual cell, or a mix of dates and
/// numbers, widens the column to Text. Empty and error cells do not vote.
fn infer_column_type(cells: &[&Data]) -> ColumnType {
    let mut has_number = false;
    let mut all_integral = true;
    let mut has_datetime = false;
    let mut has_text = false;

    for cell in cells {
        match cell {
            Data::Empty | Data::Error(_) => {}
            Data::Int(_) => has_number = true,
            Data::Float(f) => {
                has_number = true;
                if f.fract() != 0.0 {
                    all_integral = false;
                }
            }
            Data::DateTime(_) | Data::DateTimeIso(_) => has_datetime = true,
            Data::String(_) | Data::Bool(_) | Data::DurationIso(_) => has_text = true,
        }
    }

    if has_text || (has_datetime && has_number) {
        ColumnType::Text
    } else if has_datetime {
        ColumnType::DateTime
    } else if has_number {
        if all_integral {
            ColumnType::Int
        } else {
            ColumnType::Float
        }
    } else {
        ColumnType::Text
    }
}

fn convert_cell(cell: &Data, ty: ColumnType) -> CellValue {
    if matches!(cell, Data::Empty) {
        return CellValue::Null;
    }

    match ty {
        ColumnType::Int => match cell {
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Int(*f as i64),
            _ => CellValue::Null,
        },
        ColumnType::Float => match cell {
            Data::Int(i) => CellValue::Float(*i as f64),
            Data::Float(f) => CellValue::Float(*f),
            _ => CellValue::Null,
        },
        ColumnType::DateTime => cell_to_datetime(cell).map_or(CellValue::Null, CellValue::DateTime),
        ColumnType::Text => match cell {
            Data::Error(_) => CellValue::Null,
            _ => CellValue::Text(cell_to_string(cell)),
        },
    }
}

fn cell_to_datetime(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime(),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| parse_datetime(s)),
        _ => None,
    }
}

fn cell_to_header_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        Data::Error(e) => format!("{e:?}"),
        other => other.to_string(),
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
