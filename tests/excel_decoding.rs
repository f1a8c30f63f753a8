mod common;

use common::xlsx_bytes;
use rust_xlsxwriter::{Format, Workbook};
use sheet_records::ingestion::decode_first_sheet;
use sheet_records::types::ByteStream;
use sheet_records::ErrorKind;

fn stream(bytes: Vec<u8>) -> ByteStream {
    ByteStream::new("test.xlsx", bytes)
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn decodes_first_sheet_rows_as_text() {
    let bytes = xlsx_bytes(&[(
        "People",
        vec![vec!["id", "name"], vec!["1", "Ada"], vec!["2", "Grace"]],
    )]);

    let doc = decode_first_sheet(stream(bytes)).unwrap();
    assert_eq!(doc.sheet, "People");
    assert_eq!(
        doc.rows,
        vec![row(&["id", "name"]), row(&["1", "Ada"]), row(&["2", "Grace"])]
    );
}

#[test]
fn only_the_first_declared_sheet_is_read() {
    let bytes = xlsx_bytes(&[
        ("First", vec![vec!["a"], vec!["1"]]),
        ("Second", vec![vec!["b"], vec!["2"], vec!["3"]]),
    ]);

    let doc = decode_first_sheet(stream(bytes)).unwrap();
    assert_eq!(doc.sheet, "First");
    assert_eq!(doc.rows, vec![row(&["a"]), row(&["1"])]);
}

#[test]
fn typed_cells_keep_their_stored_value() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "count").unwrap();
    ws.write_string(0, 1, "score").unwrap();
    ws.write_string(0, 2, "day").unwrap();
    ws.write_string(0, 3, "active").unwrap();
    ws.write_number(1, 0, 3).unwrap();
    ws.write_number(1, 1, 98.5).unwrap();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    ws.write_number_with_format(1, 2, 45000, &date).unwrap();
    ws.write_boolean(1, 3, true).unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let doc = decode_first_sheet(stream(bytes)).unwrap();
    assert_eq!(doc.rows[1], row(&["3", "98.5", "45000", "TRUE"]));
}

#[test]
fn short_rows_are_not_padded() {
    let bytes = xlsx_bytes(&[(
        "Sheet1",
        vec![vec!["id", "name", "team"], vec!["1"], vec!["2", "Bob"]],
    )]);

    let doc = decode_first_sheet(stream(bytes)).unwrap();
    assert_eq!(doc.rows[1], row(&["1"]));
    assert_eq!(doc.rows[2], row(&["2", "Bob"]));
}

#[test]
fn sheet_without_rows_is_an_empty_document() {
    let bytes = xlsx_bytes(&[("Blank", vec![]), ("Data", vec![vec!["id"], vec!["1"]])]);

    let err = decode_first_sheet(stream(bytes)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyDocument);
    assert!(err.to_string().contains("Blank"));
}

#[test]
fn header_only_sheet_decodes() {
    let bytes = xlsx_bytes(&[("Sheet1", vec![vec!["id", "name"]])]);
    let doc = decode_first_sheet(stream(bytes)).unwrap();
    assert_eq!(doc.data_row_count(), 0);
}

#[test]
fn non_spreadsheet_bytes_are_a_format_error() {
    let err = decode_first_sheet(stream(b"id,name\n1,Ada\n".to_vec())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = decode_first_sheet(stream(Vec::new())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}
