//! Core data model types for the pipeline.
//!
//! A document travels as a [`ByteStream`], is decoded into a [`TabularDocument`] (raw cell text of
//! the first sheet) and finally mapped into a [`RecordSet`] of string-keyed [`Record`]s.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::time::SystemTime;

use serde::Serialize;

use crate::error::PipelineResult;

/// One entry of a directory listing (remote or local).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Entry name as listed (no directory prefix).
    pub name: String,
    /// Last modification time.
    pub modified_at: SystemTime,
    /// Size in bytes.
    pub size: u64,
}

impl RemoteEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, modified_at: SystemTime, size: u64) -> Self {
        Self {
            name: name.into(),
            modified_at,
            size,
        }
    }
}

/// The retrieved document bytes, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteStream {
    /// Human-readable origin (remote entry name, URL, path or `"upload"`).
    pub origin: String,
    /// Raw document content.
    pub bytes: Vec<u8>,
}

impl ByteStream {
    /// Create a new byte stream.
    pub fn new(origin: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            origin: origin.into(),
            bytes,
        }
    }

    /// Number of bytes in the document.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the stream into a seekable reader.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }
}

/// Raw cell text of one sheet.
///
/// Row 0 is the header row. A decoded document always has at least that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularDocument {
    /// Name of the sheet the rows were read from.
    pub sheet: String,
    /// Row-major cell text. Rows may have different lengths.
    pub rows: Vec<Vec<String>>,
}

impl TabularDocument {
    /// Create a document from a sheet name and rows.
    pub fn new(sheet: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet: sheet.into(),
            rows,
        }
    }

    /// The header row, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of rows after the header.
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// One output unit: field name → cell value.
pub type Record = BTreeMap<String, String>;

/// Records mapped from one document.
///
/// Serializes as a plain JSON array of objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    /// Header field names, de-duplicated, in order of first appearance.
    #[serde(skip)]
    pub fields: Vec<String>,
    /// Records in source row order.
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create a record set.
    pub fn new(fields: Vec<String>, records: Vec<Record>) -> Self {
        Self { fields, records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the records as a JSON array of objects.
    pub fn write_json<W: Write>(&self, writer: W) -> PipelineResult<()> {
        serde_json::to_writer(writer, &self.records)?;
        Ok(())
    }

    /// Write the records as CSV, one column per field.
    ///
    /// Fields absent from a record are written as empty cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> PipelineResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.fields)?;
        for record in &self.records {
            wtr.write_record(
                self.fields
                    .iter()
                    .map(|f| record.get(f).map(String::as_str).unwrap_or("")),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }
}
