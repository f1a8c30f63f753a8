//! Source resolution: turn a caller's configuration into the bytes of one document.
//!
//! A flat [`SourceConfig`] (query-parameter shaped) is converted into a [`Source`], a closed set
//! of kinds each handled by its own [`SourceResolver`]:
//!
//! - [`Source::RemoteTransfer`]: FTP listing, newest entry whose name matches, see [`remote`]
//! - [`Source::DirectUrl`]: HTTP GET, see [`url`]
//! - [`Source::LocalFile`]: uploaded bytes or a local path, see [`local`]

pub mod ftp;
pub mod local;
pub mod remote;
pub mod select;
pub mod url;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::ByteStream;

pub use local::LocalFileSource;
pub use remote::{
    fetch_remote, RemoteConnector, RemoteSession, RemoteTransferConfig, RemoteTransferResolver, SessionError,
    SessionTimeouts,
};
pub use select::{select_entry, select_entry_matching, NameCriteria};
pub use url::DirectUrlConfig;

#[cfg(feature = "ftp")]
pub use ftp::FtpConnector;

/// Default bound on establishing a remote connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default bound on each blocking read/write after connecting.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SourceKind {
    /// Authenticated remote file store (FTP).
    #[serde(rename = "ftp", alias = "remote-transfer")]
    RemoteTransfer,
    /// Plain URL fetch.
    #[serde(rename = "url", alias = "direct-url")]
    DirectUrl,
    /// Caller-supplied bytes or a local path.
    #[serde(rename = "file", alias = "local-file")]
    LocalFile,
}

impl FromStr for SourceKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ftp" | "remote-transfer" => Ok(Self::RemoteTransfer),
            "url" | "direct-url" => Ok(Self::DirectUrl),
            "file" | "local-file" => Ok(Self::LocalFile),
            _ => Err(PipelineError::Validation { field: "source" }),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RemoteTransfer => "ftp",
            Self::DirectUrl => "url",
            Self::LocalFile => "file",
        })
    }
}

/// Flat caller configuration, shaped like the query parameters of the HTTP endpoint.
///
/// Missing parameters deserialize as empty strings; validation happens when the source is
/// resolved.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    #[serde(rename = "source")]
    pub kind: Option<SourceKind>,
    #[serde(rename = "url")]
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Exact entry name to pick (empty = any).
    pub file_name: String,
    /// Substring the entry name must contain (empty = any).
    #[serde(rename = "file_name_contain")]
    pub name_filter: String,
    /// Uploaded document body (local-file kind).
    #[serde(skip)]
    pub body: Option<Vec<u8>>,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("file_name", &self.file_name)
            .field("name_filter", &self.name_filter)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

impl SourceConfig {
    /// Attach an uploaded body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    fn criteria(&self) -> NameCriteria {
        NameCriteria {
            exact: (!self.file_name.is_empty()).then(|| self.file_name.clone()),
            contains: self.name_filter.clone(),
        }
    }

    /// Convert into a typed [`Source`].
    ///
    /// Fails with a validation error if `source` is missing, or if a local-file source has
    /// neither a body nor a path.
    pub fn into_source(self) -> PipelineResult<Source> {
        let kind = self.kind.ok_or(PipelineError::Validation { field: "source" })?;
        let criteria = self.criteria();
        Ok(match kind {
            SourceKind::RemoteTransfer => Source::RemoteTransfer(RemoteTransferConfig {
                endpoint: self.endpoint,
                username: self.username,
                password: self.password,
                criteria,
            }),
            SourceKind::DirectUrl => Source::DirectUrl(DirectUrlConfig { url: self.endpoint }),
            SourceKind::LocalFile => match self.body {
                Some(body) => Source::LocalFile(LocalFileSource::Bytes(body)),
                None if !self.endpoint.is_empty() => Source::LocalFile(LocalFileSource::Path {
                    path: self.endpoint.into(),
                    criteria,
                }),
                None => return Err(PipelineError::Validation { field: "url" }),
            },
        })
    }
}

/// Runtime knobs for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Bound on establishing a connection.
    pub connect_timeout: Duration,
    /// Bound on each blocking phase after connecting (`None` = unbounded).
    pub io_timeout: Option<Duration>,
    /// Return a release failure as the error instead of keeping the retrieved document.
    pub fail_on_disconnect_error: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: Some(DEFAULT_IO_TIMEOUT),
            fail_on_disconnect_error: false,
        }
    }
}

impl ResolveOptions {
    pub fn session_timeouts(&self) -> SessionTimeouts {
        SessionTimeouts {
            connect: self.connect_timeout,
            io: self.io_timeout,
        }
    }
}

/// A resolved document plus any non-fatal release problem.
#[derive(Debug)]
pub struct Resolved {
    pub stream: ByteStream,
    /// Session release failure that happened after a successful retrieval.
    pub release_error: Option<PipelineError>,
}

impl Resolved {
    pub fn new(stream: ByteStream) -> Self {
        Self {
            stream,
            release_error: None,
        }
    }
}

/// Produces the bytes of one document.
pub trait SourceResolver {
    fn resolve(&self, options: &ResolveOptions) -> PipelineResult<Resolved>;
}

/// A typed source description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    RemoteTransfer(RemoteTransferConfig),
    DirectUrl(DirectUrlConfig),
    LocalFile(LocalFileSource),
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::RemoteTransfer(_) => SourceKind::RemoteTransfer,
            Self::DirectUrl(_) => SourceKind::DirectUrl,
            Self::LocalFile(_) => SourceKind::LocalFile,
        }
    }

    /// Short description of where the document is fetched from (no credentials).
    pub fn origin(&self) -> String {
        match self {
            Self::RemoteTransfer(cfg) => cfg.endpoint.clone(),
            Self::DirectUrl(cfg) => cfg.url.clone(),
            Self::LocalFile(LocalFileSource::Bytes(_)) => "upload".to_string(),
            Self::LocalFile(LocalFileSource::Path { path, .. }) => path.display().to_string(),
        }
    }

    /// Resolve using the default remote client.
    pub fn resolve(&self, options: &ResolveOptions) -> PipelineResult<Resolved> {
        #[cfg(feature = "ftp")]
        {
            self.resolve_with(&FtpConnector, options)
        }

        #[cfg(not(feature = "ftp"))]
        {
            match self {
                Self::RemoteTransfer(cfg) => {
                    cfg.validate()?;
                    Err(PipelineError::Unsupported {
                        message: "remote-transfer source not enabled (enable cargo feature 'ftp')".to_string(),
                    })
                }
                Self::DirectUrl(cfg) => cfg.resolve(options),
                Self::LocalFile(local) => local.resolve(options),
            }
        }
    }

    /// Resolve with an explicit remote connector.
    pub fn resolve_with<C: RemoteConnector>(&self, connector: &C, options: &ResolveOptions) -> PipelineResult<Resolved> {
        match self {
            Self::RemoteTransfer(cfg) => RemoteTransferResolver::new(cfg, connector).resolve(options),
            Self::DirectUrl(cfg) => cfg.resolve(options),
            Self::LocalFile(local) => local.resolve(options),
        }
    }
}
