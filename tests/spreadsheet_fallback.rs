use rust_xlsxwriter::Workbook;

use tabular_ingest::error::IngestError;
use tabular_ingest::ingest::resolve::{resolve, resolve_with_format, ResolvedFormat};
use tabular_ingest::ingest::spreadsheet::parse_workbook;
use tabular_ingest::source::{ByteSource, Delimiter};
use tabular_ingest::table::{CellValue, ColumnType};

fn comma() -> Delimiter {
    Delimiter::parse(",").unwrap()
}

fn people_workbook_bytes() -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();

    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_string(0, 2, "score").unwrap();

    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "Ada").unwrap();
    ws.write_number(1, 2, 98.5).unwrap();

    ws.write_number(2, 0, 2).unwrap();
    ws.write_string(2, 1, "Grace").unwrap();
    ws.write_number(2, 2, 87.25).unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn parse_workbook_reads_header_and_typed_columns() {
    let table = parse_workbook(&people_workbook_bytes()).unwrap();

    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["id", "name", "score"]
    );
    assert_eq!(table.row_count(), 2);

    // Workbooks store numbers as floats; integral values narrow to Int.
    let id = table.column("id").unwrap();
    assert_eq!(id.column_type, ColumnType::Int);
    assert_eq!(id.values, vec![CellValue::Int(1), CellValue::Int(2)]);

    let score = table.column("score").unwrap();
    assert_eq!(score.column_type, ColumnType::Float);
    assert_eq!(
        score.values,
        vec![CellValue::Float(98.5), CellValue::Float(87.25)]
    );

    let name = table.column("name").unwrap();
    assert_eq!(name.column_type, ColumnType::Text);
    assert_eq!(name.values[0], CellValue::Text("Ada".to_string()));
}

#[test]
fn resolve_takes_fallback_path_for_workbook_bytes() {
    let source = ByteSource::user(people_workbook_bytes());

    // The delimiter is irrelevant on the spreadsheet path.
    let (table, format) = resolve_with_format(&source, comma()).unwrap();
    assert_eq!(format, ResolvedFormat::Spreadsheet);
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["id", "name", "score"]
    );
    assert_eq!(table.row_count(), 2);
}

#[test]
fn resolve_prefers_delimited_for_text_bytes() {
    let source = ByteSource::user(b"a,b\n1,2\n".to_vec());
    let (table, format) = resolve_with_format(&source, comma()).unwrap();
    assert_eq!(format, ResolvedFormat::Delimited);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn resolve_fails_terminal_when_neither_interpretation_works() {
    // Not UTF-8, and not any workbook container either.
    let source = ByteSource::user(vec![0x00, 0xff, 0xfe, 0x80, 0x01, 0x02]);
    let err = resolve(&source, comma()).unwrap_err();
    assert!(matches!(err, IngestError::UnreadableFormat { .. }));
}

#[test]
fn resolve_surfaces_structural_text_failure_without_fallback() {
    // Decodes fine as text, so the spreadsheet attempt must not run; the
    // structural error surfaces as MalformedDelimited.
    let source = ByteSource::user(b"a,b\n1,2\n3,4\n".to_vec());
    let err = resolve(&source, Delimiter::parse(";").unwrap()).unwrap_err();
    assert!(matches!(err, IngestError::MalformedDelimited { .. }));
}

#[test]
fn parse_workbook_skips_leading_blank_rows_for_header() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    // Rows 0-1 left blank; header lands on row 2.
    ws.write_string(2, 0, "k").unwrap();
    ws.write_string(2, 1, "v").unwrap();
    ws.write_number(3, 0, 10).unwrap();
    ws.write_string(3, 1, "x").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let table = parse_workbook(&bytes).unwrap();
    assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["k", "v"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.column("k").unwrap().values[0], CellValue::Int(10));
}

#[test]
fn parse_workbook_errors_on_workbook_with_no_cells() {
    let mut wb = Workbook::new();
    let _ = wb.add_worksheet();
    let bytes = wb.save_to_buffer().unwrap();

    let err = parse_workbook(&bytes).unwrap_err();
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn parse_workbook_pads_short_rows_with_nulls() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "a").unwrap();
    ws.write_string(0, 1, "b").unwrap();
    ws.write_number(1, 0, 1).unwrap();
    ws.write_number(1, 1, 2).unwrap();
    ws.write_number(2, 0, 3).unwrap(); // second data row has no "b" cell
    let bytes = wb.save_to_buffer().unwrap();

    let table = parse_workbook(&bytes).unwrap();
    assert_eq!(table.row_count(), 2);
    let b = table.column("b").unwrap();
    assert_eq!(b.values, vec![CellValue::Int(2), CellValue::Null]);
}
