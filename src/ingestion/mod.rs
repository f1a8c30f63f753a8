//! Pipeline entrypoints and the spreadsheet decoder.
//!
//! Most callers should use [`records_from_config`] or [`records_from_source`] (from
//! [`pipeline`]) which:
//!
//! - resolve the configured source into document bytes
//! - decode the first sheet with [`excel::decode_first_sheet`]
//! - map rows into records with [`crate::processing::map_records`]
//! - optionally report success/failure/alerts to a [`PipelineObserver`]

pub mod excel;
pub mod observability;
pub mod pipeline;

pub use excel::{decode_first_sheet, decode_first_sheet_from_reader};
pub use observability::{
    CompositeObserver, FileObserver, PipelineContext, PipelineObserver, PipelineSeverity, PipelineStats,
    StdErrObserver,
};
pub use pipeline::{records_from_config, records_from_source, records_from_source_with, PipelineOptions, PipelineRequest};
