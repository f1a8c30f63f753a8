//! Direct-url source: a plain HTTP GET whose body is the document.

use crate::error::{PipelineError, PipelineResult};

use super::{ResolveOptions, Resolved, SourceResolver};

/// Parameters for the direct-url source kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectUrlConfig {
    /// Absolute `http(s)://` URL of the document.
    pub url: String,
}

impl DirectUrlConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl SourceResolver for DirectUrlConfig {
    fn resolve(&self, options: &ResolveOptions) -> PipelineResult<Resolved> {
        if self.url.is_empty() {
            return Err(PipelineError::Validation { field: "url" });
        }
        fetch_url(&self.url, options).map(Resolved::new)
    }
}

#[cfg(feature = "http")]
fn fetch_url(url: &str, options: &ResolveOptions) -> PipelineResult<crate::types::ByteStream> {
    use reqwest::blocking::Client;

    use crate::types::ByteStream;

    let mut builder = Client::builder().connect_timeout(options.connect_timeout);
    if let Some(io) = options.io_timeout {
        builder = builder.timeout(io);
    }
    let client = builder.build().map_err(|e| PipelineError::Connection {
        endpoint: url.to_string(),
        message: e.to_string(),
    })?;

    let response = client.get(url).send().map_err(|e| PipelineError::Connection {
        endpoint: url.to_string(),
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::Retrieval {
            name: url.to_string(),
            message: format!("server answered {status}"),
        });
    }

    let bytes = response.bytes().map_err(|e| PipelineError::Retrieval {
        name: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(ByteStream::new(url, bytes.to_vec()))
}

#[cfg(not(feature = "http"))]
fn fetch_url(url: &str, options: &ResolveOptions) -> PipelineResult<crate::types::ByteStream> {
    let _ = (url, options);
    Err(PipelineError::Unsupported {
        message: "direct-url source not enabled (enable cargo feature 'http')".to_string(),
    })
}
