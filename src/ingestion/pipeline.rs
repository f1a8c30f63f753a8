//! Pipeline entrypoints: resolve → decode → map.
//!
//! Most callers should use [`records_from_config`] (flat, query-shaped configuration) or
//! [`records_from_source`] (typed [`Source`]).
//!
//! - Stages run strictly in sequence within one call; nothing is shared between calls.
//! - If an [`super::observability::PipelineObserver`] is provided, success/failure/alerts and
//!   non-fatal warnings are reported to it.

use std::fmt;
use std::sync::Arc;

use crate::error::PipelineResult;
use crate::processing::map_records;
use crate::source::{RemoteConnector, ResolveOptions, Resolved, Source, SourceConfig};
use crate::types::RecordSet;

use super::excel::decode_first_sheet;
use super::observability::{PipelineContext, PipelineObserver, PipelineSeverity, PipelineStats};

/// Options controlling a pipeline run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Timeouts and release policy for source resolution.
    pub resolve: ResolveOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: PipelineSeverity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("resolve", &self.resolve)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            observer: None,
            alert_at_or_above: PipelineSeverity::Critical,
        }
    }
}

/// Run the pipeline for a flat [`SourceConfig`].
///
/// # Examples
///
/// ```no_run
/// use sheet_records::ingestion::{records_from_config, PipelineOptions};
/// use sheet_records::source::{SourceConfig, SourceKind};
///
/// # fn main() -> Result<(), sheet_records::PipelineError> {
/// let config = SourceConfig {
///     kind: Some(SourceKind::RemoteTransfer),
///     endpoint: "ftp.example.com:21".to_string(),
///     username: "reports".to_string(),
///     password: "secret".to_string(),
///     name_filter: "report".to_string(),
///     ..Default::default()
/// };
///
/// let out = records_from_config(config, &PipelineOptions::default())?;
/// println!("records={}", out.len());
/// # Ok(())
/// # }
/// ```
pub fn records_from_config(config: SourceConfig, options: &PipelineOptions) -> PipelineResult<RecordSet> {
    let source = config.into_source()?;
    records_from_source(&source, options)
}

/// Run the pipeline for a typed [`Source`] with the default remote client.
pub fn records_from_source(source: &Source, options: &PipelineOptions) -> PipelineResult<RecordSet> {
    observe(source, options, || source.resolve(&options.resolve))
}

/// Run the pipeline with an explicit remote connector (alternative protocol clients, tests).
pub fn records_from_source_with<C: RemoteConnector>(
    source: &Source,
    connector: &C,
    options: &PipelineOptions,
) -> PipelineResult<RecordSet> {
    observe(source, options, || source.resolve_with(connector, &options.resolve))
}

fn observe<F>(source: &Source, options: &PipelineOptions, resolve: F) -> PipelineResult<RecordSet>
where
    F: FnOnce() -> PipelineResult<Resolved>,
{
    let ctx = PipelineContext {
        kind: source.kind(),
        origin: source.origin(),
    };

    let result = resolve().and_then(|resolved| {
        if let (Some(obs), Some(err)) = (options.observer.as_ref(), resolved.release_error.as_ref()) {
            obs.on_warning(&ctx, err);
        }
        let bytes = resolved.stream.len();
        let doc = decode_first_sheet(resolved.stream)?;
        Ok((bytes, map_records(doc)))
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((bytes, set)) => obs.on_success(
                &ctx,
                PipelineStats {
                    bytes: *bytes,
                    records: set.len(),
                },
            ),
            Err(e) => {
                let sev = PipelineSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(_, set)| set)
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue pipeline runs in a job system.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Where to fetch the document from.
    pub source: Source,
    /// Options controlling the run.
    pub options: PipelineOptions,
}

impl PipelineRequest {
    /// Execute the request by calling [`records_from_source`].
    pub fn run(&self) -> PipelineResult<RecordSet> {
        records_from_source(&self.source, &self.options)
    }
}
