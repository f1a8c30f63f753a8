//! `sheet-records` locates a spreadsheet, reads its first sheet and turns the rows into an
//! ordered list of string-keyed records, ready to be serialized as JSON.
//!
//! The primary entrypoint is [`ingestion::records_from_config`], which takes a flat,
//! query-parameter shaped [`source::SourceConfig`] and returns a [`types::RecordSet`] or a typed
//! [`PipelineError`].
//!
//! ## Sources
//!
//! - **ftp** (remote transfer): connect (5 s timeout), login, list `/`, keep entries whose name
//!   contains `file_name_contain`, download the newest one, always quit. Cargo feature `ftp`.
//! - **url** (direct url): HTTP GET, the body is the document. Cargo feature `http`.
//! - **file** (local): an uploaded body, a file path, or a directory (newest matching file).
//!
//! ## Records
//!
//! Row 0 of the first sheet holds field names. Each following row becomes a [`types::Record`]
//! mapping field → raw cell text. Rows shorter than the header omit the missing fields; cells
//! past the header are dropped.
//!
//! ```no_run
//! use sheet_records::ingestion::{records_from_config, PipelineOptions};
//! use sheet_records::source::{SourceConfig, SourceKind};
//!
//! # fn main() -> Result<(), sheet_records::PipelineError> {
//! let config = SourceConfig {
//!     kind: Some(SourceKind::LocalFile),
//!     endpoint: "exports/".to_string(),
//!     name_filter: "report".to_string(),
//!     ..Default::default()
//! };
//! let out = records_from_config(config, &PipelineOptions::default())?;
//! out.write_json(std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`source`]: source kinds, configuration and resolvers
//! - [`ingestion`]: spreadsheet decoding, pipeline entrypoints and observers
//! - [`processing`]: header/row alignment into records
//! - [`types`]: entries, documents and records
//! - [`error`]: error type shared by every stage

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod source;
pub mod types;

pub use error::{ErrorKind, PipelineError, PipelineResult};
