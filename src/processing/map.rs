//! Header/row alignment: [`TabularDocument`] → [`Record`]s.

use std::vec;

use crate::types::{Record, RecordSet, TabularDocument};

/// One-pass iterator over the records of a document.
///
/// Created by [`records`]. Each item pairs row cell `j` with header field `j` for
/// `j < min(row.len(), header.len())`; cells beyond the header are dropped and header fields
/// beyond the row are absent. A repeated header name keeps the right-most column's value.
#[derive(Debug)]
pub struct Records {
    header: Vec<String>,
    rows: vec::IntoIter<Vec<String>>,
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let row = self.rows.next()?;
        Some(
            self.header
                .iter()
                .zip(row)
                .map(|(field, value)| (field.clone(), value))
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Records {}

/// Turn a document into a lazy record iterator, consuming it.
///
/// A document with no rows yields nothing.
pub fn records(doc: TabularDocument) -> Records {
    let mut rows = doc.rows.into_iter();
    let header = rows.next().unwrap_or_default();
    Records { header, rows }
}

/// Map a document into a [`RecordSet`].
///
/// A header-only document yields an empty set.
pub fn map_records(doc: TabularDocument) -> RecordSet {
    let fields = unique_fields(doc.header().unwrap_or_default());
    RecordSet::new(fields, records(doc).collect())
}

fn unique_fields(header: &[String]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::with_capacity(header.len());
    for name in header {
        if !fields.contains(name) {
            fields.push(name.clone());
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::{map_records, records};
    use crate::types::{Record, TabularDocument};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn short_rows_omit_trailing_fields() {
        let doc = TabularDocument::new(
            "Sheet1",
            vec![row(&["id", "name"]), row(&["1", "Alice"]), row(&["2"])],
        );

        let out = map_records(doc);
        assert_eq!(out.fields, vec!["id", "name"]);
        assert_eq!(
            out.records,
            vec![record(&[("id", "1"), ("name", "Alice")]), record(&[("id", "2")])]
        );
        assert!(!out.records[1].contains_key("name"));
    }

    #[test]
    fn record_size_is_min_of_row_and_header() {
        let header = row(&["a", "b", "c", "d"]);
        for k in 0..=6 {
            let cells: Vec<String> = (0..k).map(|i| i.to_string()).collect();
            let doc = TabularDocument::new("s", vec![header.clone(), cells]);
            let rec = records(doc).next().unwrap();
            assert_eq!(rec.len(), k.min(header.len()));
            for (j, name) in header.iter().take(k).enumerate() {
                assert_eq!(rec.get(name), Some(&j.to_string()));
            }
        }
    }

    #[test]
    fn cells_beyond_header_are_dropped() {
        let doc = TabularDocument::new("s", vec![row(&["id"]), row(&["1", "extra", "more"])]);
        assert_eq!(map_records(doc).records, vec![record(&[("id", "1")])]);
    }

    #[test]
    fn header_only_document_yields_no_records() {
        let doc = TabularDocument::new("s", vec![row(&["id", "name"])]);
        let out = map_records(doc);
        assert!(out.is_empty());
        assert_eq!(out.fields, vec!["id", "name"]);
    }

    #[test]
    fn duplicate_header_last_column_wins() {
        let doc = TabularDocument::new(
            "s",
            vec![row(&["k", "v", "k"]), row(&["first", "x", "last"]), row(&["only"])],
        );
        let out = map_records(doc);
        assert_eq!(out.fields, vec!["k", "v"]);
        assert_eq!(
            out.records,
            vec![record(&[("k", "last"), ("v", "x")]), record(&[("k", "only")])]
        );
    }

    #[test]
    fn output_preserves_row_order_and_is_exact_size() {
        let doc = TabularDocument::new(
            "s",
            vec![row(&["n"]), row(&["3"]), row(&["1"]), row(&["2"])],
        );
        let it = records(doc);
        assert_eq!(it.len(), 3);
        let values: Vec<String> = it.map(|r| r["n"].clone()).collect();
        assert_eq!(values, vec!["3", "1", "2"]);
    }

    #[test]
    fn empty_document_yields_nothing() {
        let doc = TabularDocument::new("s", Vec::new());
        assert_eq!(records(doc).count(), 0);
    }
}
