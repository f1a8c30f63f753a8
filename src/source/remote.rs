//! Remote-transfer source: connect, login, list, pick the newest matching entry, retrieve, quit.
//!
//! The protocol client sits behind [`RemoteConnector`] / [`RemoteSession`]. The default client
//! is [`super::ftp::FtpConnector`] (cargo feature `ftp`); tests plug in scripted doubles.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ByteStream, RemoteEntry};

use super::select::{select_entry_matching, NameCriteria};
use super::{ResolveOptions, Resolved, SourceResolver};

/// Error type produced by protocol clients.
pub type SessionError = Box<dyn StdError + Send + Sync>;

/// Timeouts handed to a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeouts {
    /// Upper bound on establishing the control connection.
    pub connect: Duration,
    /// Upper bound on each blocking read/write once connected (`None` = unbounded).
    pub io: Option<Duration>,
}

/// Opens remote sessions.
pub trait RemoteConnector {
    /// Session type produced by this connector.
    type Session: RemoteSession;

    /// Open a control connection to `endpoint`.
    fn connect(&self, endpoint: &str, timeouts: SessionTimeouts) -> Result<Self::Session, SessionError>;
}

/// An open control connection to a remote file store.
pub trait RemoteSession {
    /// Authenticate with the given credentials.
    fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError>;

    /// List the root directory.
    fn list(&mut self) -> Result<Vec<RemoteEntry>, SessionError>;

    /// Download one entry by name.
    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, SessionError>;

    /// Release the session.
    fn quit(&mut self) -> Result<(), SessionError>;
}

/// Connection parameters for the remote-transfer source kind.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RemoteTransferConfig {
    /// `host` or `host:port`.
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Which listing entry to pick.
    pub criteria: NameCriteria,
}

impl fmt::Debug for RemoteTransferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTransferConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("criteria", &self.criteria)
            .finish()
    }
}

impl RemoteTransferConfig {
    /// Check that endpoint and credentials are present.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.endpoint.is_empty() {
            return Err(PipelineError::Validation { field: "url" });
        }
        if self.username.is_empty() {
            return Err(PipelineError::Validation { field: "username" });
        }
        if self.password.is_empty() {
            return Err(PipelineError::Validation { field: "password" });
        }
        Ok(())
    }
}

/// Resolves a [`RemoteTransferConfig`] through a given connector.
#[derive(Debug)]
pub struct RemoteTransferResolver<'a, C> {
    config: &'a RemoteTransferConfig,
    connector: &'a C,
}

impl<'a, C: RemoteConnector> RemoteTransferResolver<'a, C> {
    pub fn new(config: &'a RemoteTransferConfig, connector: &'a C) -> Self {
        Self { config, connector }
    }
}

impl<C: RemoteConnector> SourceResolver for RemoteTransferResolver<'_, C> {
    fn resolve(&self, options: &ResolveOptions) -> PipelineResult<Resolved> {
        fetch_remote(self.connector, self.config, options)
    }
}

/// Run one remote retrieval.
///
/// Validation happens before any connection attempt. Once connected, the session is released
/// exactly once whatever the outcome. A release failure only surfaces when retrieval succeeded:
/// as [`Resolved::release_error`], or as the returned error when
/// [`ResolveOptions::fail_on_disconnect_error`] is set.
pub fn fetch_remote<C: RemoteConnector>(
    connector: &C,
    config: &RemoteTransferConfig,
    options: &ResolveOptions,
) -> PipelineResult<Resolved> {
    config.validate()?;

    let mut session = connector
        .connect(&config.endpoint, options.session_timeouts())
        .map_err(|e| PipelineError::Connection {
            endpoint: config.endpoint.clone(),
            message: e.to_string(),
        })?;

    let outcome = retrieve_newest(&mut session, config);
    let released = session.quit();

    let stream = outcome?;
    match released {
        Ok(()) => Ok(Resolved::new(stream)),
        Err(e) => {
            let err = PipelineError::Disconnect {
                endpoint: config.endpoint.clone(),
                message: e.to_string(),
            };
            if options.fail_on_disconnect_error {
                Err(err)
            } else {
                Ok(Resolved {
                    stream,
                    release_error: Some(err),
                })
            }
        }
    }
}

fn retrieve_newest<S: RemoteSession>(session: &mut S, config: &RemoteTransferConfig) -> PipelineResult<ByteStream> {
    session
        .login(&config.username, &config.password)
        .map_err(|e| PipelineError::Auth {
            username: config.username.clone(),
            message: e.to_string(),
        })?;

    let entries = session.list().map_err(|e| PipelineError::List {
        message: e.to_string(),
    })?;
    if entries.is_empty() {
        return Err(PipelineError::EmptyListing);
    }

    let selected = select_entry_matching(&entries, &config.criteria)?;
    let bytes = session
        .retrieve(&selected.name)
        .map_err(|e| PipelineError::Retrieval {
            name: selected.name.clone(),
            message: e.to_string(),
        })?;

    Ok(ByteStream::new(selected.name.clone(), bytes))
}
