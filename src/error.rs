use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by every stage of the pipeline (resolve → decode → map → export).
///
/// Each variant is scoped to the single invocation that produced it; none of them is fatal to
/// the host process.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required configuration field is missing or empty.
    #[error("invalid or empty {field} parameter")]
    Validation { field: &'static str },

    /// The remote session could not be established within the connect timeout.
    #[error("failed to connect to '{endpoint}': {message}")]
    Connection { endpoint: String, message: String },

    /// The remote endpoint rejected the credentials.
    #[error("failed to login as '{username}': {message}")]
    Auth { username: String, message: String },

    /// The directory listing could not be fetched or parsed.
    #[error("failed to fetch file list: {message}")]
    List { message: String },

    /// The listing succeeded but contained nothing.
    #[error("no files or directories found in the source storage")]
    EmptyListing,

    /// No listed entry matched the configured name filter.
    #[error("no document matching filter '{filter}' was found")]
    NoMatch { filter: String },

    /// The selected document could not be downloaded or read.
    #[error("failed to retrieve '{name}': {message}")]
    Retrieval { name: String, message: String },

    /// Releasing the remote session failed after the document was retrieved.
    #[error("failed to disconnect from '{endpoint}': {message}")]
    Disconnect { endpoint: String, message: String },

    /// The bytes are not a readable spreadsheet container.
    #[error("failed to read spreadsheet: {0}")]
    Format(#[from] calamine::Error),

    /// The first sheet has no rows, so there is no header row.
    #[error("sheet '{sheet}' has no rows (no header row found)")]
    EmptyDocument { sheet: String },

    /// The requested source kind is not compiled in.
    #[error("unsupported source: {message}")]
    Unsupported { message: String },

    /// Underlying I/O error (local files, export writers).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fieldless discriminant of [`PipelineError`], for mapping errors onto transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Connection,
    Auth,
    List,
    EmptyListing,
    NoMatch,
    Retrieval,
    Disconnect,
    Format,
    EmptyDocument,
    Unsupported,
    Io,
    Csv,
    Json,
}

impl PipelineError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::List { .. } => ErrorKind::List,
            Self::EmptyListing => ErrorKind::EmptyListing,
            Self::NoMatch { .. } => ErrorKind::NoMatch,
            Self::Retrieval { .. } => ErrorKind::Retrieval,
            Self::Disconnect { .. } => ErrorKind::Disconnect,
            Self::Format(_) => ErrorKind::Format,
            Self::EmptyDocument { .. } => ErrorKind::EmptyDocument,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Io(_) => ErrorKind::Io,
            Self::Csv(_) => ErrorKind::Csv,
            Self::Json(_) => ErrorKind::Json,
        }
    }
}

impl ErrorKind {
    /// Whether a transport layer should answer with a client-error status.
    ///
    /// Every failure of a single invocation is reported back to that caller; only the export
    /// writers (which run after the pipeline, inside the caller) are not the caller's fault.
    pub fn is_client_error(self) -> bool {
        !matches!(self, Self::Csv | Self::Json)
    }
}
