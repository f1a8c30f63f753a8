//! Record mapping.
//!
//! Turns a decoded [`crate::types::TabularDocument`] into string-keyed records: row 0 supplies
//! the field names, every following row becomes one record.
//!
//! ## Example
//!
//! ```rust
//! use sheet_records::processing::map_records;
//! use sheet_records::types::TabularDocument;
//!
//! let doc = TabularDocument::new(
//!     "Sheet1",
//!     vec![
//!         vec!["id".to_string(), "name".to_string()],
//!         vec!["1".to_string(), "Alice".to_string()],
//!         vec!["2".to_string()],
//!     ],
//! );
//!
//! let out = map_records(doc);
//! assert_eq!(out.len(), 2);
//! assert_eq!(out.records[0]["name"], "Alice");
//! // Short rows omit trailing fields instead of defaulting them.
//! assert!(!out.records[1].contains_key("name"));
//! ```

pub mod map;

pub use map::{map_records, records, Records};
