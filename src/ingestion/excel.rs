//! Spreadsheet decoding: first sheet of a workbook → raw cell text.

use std::io::{Read, Seek};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ByteStream, TabularDocument};

/// Decode the first sheet of a workbook (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
///
/// Behavior:
/// - The container format is detected from the bytes, not from a file name
/// - Uses the first sheet in the workbook's declared order
/// - Rows are positioned from cell A1; leading empty rows/columns are kept as empty rows/cells
/// - Trailing empty cells of each row, and trailing empty rows, are dropped
/// - Cell values are their stored representation (dates as serial numbers, no number formats)
///
/// The workbook is dropped before returning, on success and on failure.
pub fn decode_first_sheet(stream: ByteStream) -> PipelineResult<TabularDocument> {
    decode_first_sheet_from_reader(stream.into_reader())
}

/// Like [`decode_first_sheet`], from any seekable reader.
pub fn decode_first_sheet_from_reader<RS>(reader: RS) -> PipelineResult<TabularDocument>
where
    RS: Read + Seek + Clone,
{
    let mut workbook = open_workbook_auto_from_rs(reader)?;

    let sheet = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::EmptyDocument {
            sheet: String::new(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    let rows = range_to_rows(&range);
    if rows.is_empty() {
        return Err(PipelineError::EmptyDocument { sheet });
    }

    Ok(TabularDocument::new(sheet, rows))
}

fn range_to_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
    for cells in range.rows() {
        let mut row: Vec<String> = vec![String::new(); first_col as usize];
        row.extend(cells.iter().map(cell_to_raw_string));
        while row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        rows.push(row);
    }

    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    rows
}

/// Stored text of a cell.
fn cell_to_raw_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_literal(*f),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => float_literal(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

/// Shortest round-trip decimal, switching to the stored exponent form (`1E+21`, `1E-7`)
/// outside `1e-6 <= |f| < 1e21`.
fn float_literal(f: f64) -> String {
    let abs = f.abs();
    if !f.is_finite() || abs == 0.0 || (1e-6..1e21).contains(&abs) {
        return f.to_string();
    }
    let sci = format!("{f:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}E{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}E+{exp}"),
        None => sci,
    }
}
