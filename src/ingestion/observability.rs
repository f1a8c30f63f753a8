use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ErrorKind, PipelineError};
use crate::source::SourceKind;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the invocation failed).
    Error,
    /// Critical error (network or other infrastructure failures).
    Critical,
}

impl PipelineSeverity {
    /// Severity of a failed invocation.
    pub fn for_error(e: &PipelineError) -> Self {
        match e.kind() {
            ErrorKind::Connection
            | ErrorKind::List
            | ErrorKind::Retrieval
            | ErrorKind::Io => Self::Critical,
            ErrorKind::Disconnect => Self::Warning,
            ErrorKind::Validation
            | ErrorKind::Auth
            | ErrorKind::EmptyListing
            | ErrorKind::NoMatch
            | ErrorKind::Format
            | ErrorKind::EmptyDocument
            | ErrorKind::Unsupported
            | ErrorKind::Csv
            | ErrorKind::Json => Self::Error,
        }
    }
}

/// Context about a pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineContext {
    /// Source kind being resolved.
    pub kind: SourceKind,
    /// Endpoint, URL, path or `"upload"`. Never contains credentials.
    pub origin: String,
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Size of the retrieved document.
    pub bytes: usize,
    /// Number of produced records.
    pub records: usize,
}

/// Observer interface for pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when the pipeline succeeds.
    fn on_success(&self, _ctx: &PipelineContext, _stats: PipelineStats) {}

    /// Called when the pipeline fails.
    fn on_failure(&self, _ctx: &PipelineContext, _severity: PipelineSeverity, _error: &PipelineError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }

    /// Called for non-fatal problems, e.g. a failed disconnect after a successful download.
    fn on_warning(&self, _ctx: &PipelineContext, _error: &PipelineError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_warning(&self, ctx: &PipelineContext, error: &PipelineError) {
        for o in &self.observers {
            o.on_warning(ctx, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        eprintln!(
            "[records][ok] source={} origin={} bytes={} records={}",
            ctx.kind, ctx.origin, stats.bytes, stats.records
        );
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        eprintln!(
            "[records][{:?}] source={} origin={} err={}",
            severity, ctx.kind, ctx.origin, error
        );
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        eprintln!(
            "[ALERT][records][{:?}] source={} origin={} err={}",
            severity, ctx.kind, ctx.origin, error
        );
    }

    fn on_warning(&self, ctx: &PipelineContext, error: &PipelineError) {
        eprintln!(
            "[records][Warning] source={} origin={} err={}",
            ctx.kind, ctx.origin, error
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &PipelineContext, stats: PipelineStats) {
        self.append_line(&format!(
            "{} ok source={} origin={} bytes={} records={}",
            unix_ts(),
            ctx.kind,
            ctx.origin,
            stats.bytes,
            stats.records
        ));
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        self.append_line(&format!(
            "{} fail severity={:?} source={} origin={} err={}",
            unix_ts(),
            severity,
            ctx.kind,
            ctx.origin,
            error
        ));
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} source={} origin={} err={}",
            unix_ts(),
            severity,
            ctx.kind,
            ctx.origin,
            error
        ));
    }

    fn on_warning(&self, ctx: &PipelineContext, error: &PipelineError) {
        self.append_line(&format!(
            "{} warn source={} origin={} err={}",
            unix_ts(),
            ctx.kind,
            ctx.origin,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
