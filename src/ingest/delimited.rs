//! Delimited-text interpretation.
//!
//! Rules:
//!
//! - The input must be valid UTF-8; anything else is a
//!   [`DelimitedError::Decode`], which the resolver treats as "try the
//!   spreadsheet interpretation" rather than a terminal failure.
//! - The first record is the header row; header names are deduplicated.
//! - Each column's type is inferred from its values (Int, then Float, then
//!   DateTime, then Text); empty cells become null and do not vote.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DelimitedError;
use crate::source::Delimiter;
use crate::table::{CellValue, Column, ColumnType, Table};

use super::normalize_header_names;

/// Delimiters checked when a parse collapses to a single column, to catch a
/// caller passing the wrong separator.
const COMMON_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Date/time shapes accepted during type inference, tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Parse delimited text into a [`Table`], inferring a type per column.
pub fn parse_delimited(bytes: &[u8], delimiter: Delimiter) -> Result<Table, DelimitedError> {
    let text = std::str::from_utf8(bytes)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter.byte())
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| DelimitedError::Malformed(e.to_string()))?
        .clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DelimitedError::Malformed(
            "input has no header row".to_string(),
        ));
    }

    // A single over-wide column whose header still contains a common
    // delimiter means the caller's separator did not match the data.
    if headers.len() == 1 {
        let lone = headers.get(0).unwrap_or("");
        if let Some(found) = COMMON_DELIMITERS
            .iter()
            .find(|&&d| d != delimiter.byte() && lone.contains(d as char))
        {
            return Err(DelimitedError::Malformed(format!(
                "parsed a single column whose header contains {:?}; the field delimiter {:?} does not match the data",
                *found as char,
                delimiter.as_char(),
            )));
        }
    }

    let names = normalize_header_names(headers.iter());

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record =
            result.map_err(|e| DelimitedError::Malformed(format!("row {user_row}: {e}")))?;

        for (col, raw) in raw_columns.iter_mut().zip(record.iter()) {
            col.push(raw.trim().to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| build_column(name, &raw))
        .collect();

    Ok(Table::new(columns))
}

fn build_column(name: String, raw: &[String]) -> Column {
    let column_type = infer_column_type(raw);
    let values = raw.iter().map(|s| convert(s, column_type)).collect();
    Column::new(name, column_type, values)
}

/// Pick the narrowest type every non-empty value in the column parses as.
fn infer_column_type(raw: &[String]) -> ColumnType {
    let mut non_empty = raw.iter().filter(|s| !s.is_empty()).peekable();
    if non_empty.peek().is_none() {
        return ColumnType::Text;
    }

    let candidates = [ColumnType::Int, ColumnType::Float, ColumnType::DateTime];
    for candidate in candidates {
        if raw
            .iter()
            .filter(|s| !s.is_empty())
            .all(|s| parses_as(s, candidate))
        {
            return candidate;
        }
    }
    ColumnType::Text
}

fn parses_as(s: &str, ty: ColumnType) -> bool {
    match ty {
        ColumnType::Int => s.parse::<i64>().is_ok(),
        ColumnType::Float => s.parse::<f64>().is_ok(),
        ColumnType::DateTime => parse_datetime(s).is_some(),
        ColumnType::Text => true,
    }
}

fn convert(s: &str, ty: ColumnType) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }

    // Inference already proved every non-empty value parses as `ty`.
    match ty {
        ColumnType::Text => CellValue::Text(s.to_string()),
        ColumnType::Int => s.parse::<i64>().map_or(CellValue::Null, CellValue::Int),
        ColumnType::Float => s.parse::<f64>().map_or(CellValue::Null, CellValue::Float),
        ColumnType::DateTime => parse_datetime(s).map_or(CellValue::Null, CellValue::DateTime),
    }
}

/// Try the accepted date/time shapes in order.
pub(crate) fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}
