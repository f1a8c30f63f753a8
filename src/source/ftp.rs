#![cfg(feature = "ftp")]

//! FTP client for the remote-transfer source kind, backed by `suppaftp`.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::str::FromStr;

use suppaftp::list::File;
use suppaftp::{FtpError, FtpStream};

use crate::types::RemoteEntry;

use super::remote::{RemoteConnector, RemoteSession, SessionError, SessionTimeouts};

/// Default FTP control port, used when the endpoint has none.
pub const DEFAULT_FTP_PORT: u16 = 21;

/// Connects to FTP servers in passive mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct FtpConnector;

/// An open FTP control connection.
pub struct FtpSession {
    stream: FtpStream,
}

impl std::fmt::Debug for FtpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtpSession").finish_non_exhaustive()
    }
}

impl RemoteConnector for FtpConnector {
    type Session = FtpSession;

    fn connect(&self, endpoint: &str, timeouts: SessionTimeouts) -> Result<FtpSession, SessionError> {
        let target = with_default_port(endpoint);

        let mut last_err: Option<SessionError> = None;
        for addr in target.to_socket_addrs()? {
            match open_control(addr, timeouts) {
                Ok(stream) => return Ok(FtpSession { stream }),
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no address found for '{target}'"),
            )
            .into()
        }))
    }
}

impl RemoteSession for FtpSession {
    fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        self.stream.login(username, password)?;
        Ok(())
    }

    fn list(&mut self) -> Result<Vec<RemoteEntry>, SessionError> {
        let lines = self.stream.list(Some("/"))?;
        parse_listing(&lines)
    }

    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, SessionError> {
        Ok(self.stream.retr_as_buffer(name)?.into_inner())
    }

    fn quit(&mut self) -> Result<(), SessionError> {
        self.stream.quit()?;
        Ok(())
    }
}

/// Connect the control channel and read the greeting under the session timeouts.
///
/// Passive data connections get the same bounds.
fn open_control(addr: SocketAddr, timeouts: SessionTimeouts) -> Result<FtpStream, SessionError> {
    let tcp = open_socket(addr, timeouts)?;
    let stream = FtpStream::connect_with_stream(tcp)?.passive_stream_builder(move |data_addr| {
        open_socket(data_addr, timeouts).map_err(FtpError::ConnectionError)
    });
    Ok(stream)
}

fn open_socket(addr: SocketAddr, timeouts: SessionTimeouts) -> io::Result<TcpStream> {
    let tcp = TcpStream::connect_timeout(&addr, timeouts.connect)?;
    tcp.set_read_timeout(timeouts.io)?;
    tcp.set_write_timeout(timeouts.io)?;
    Ok(tcp)
}

fn with_default_port(endpoint: &str) -> String {
    let has_port = endpoint
        .rsplit_once(':')
        .is_some_and(|(host, port)| !host.is_empty() && !host.ends_with(':') && port.parse::<u16>().is_ok());
    if has_port {
        endpoint.to_string()
    } else {
        format!("{endpoint}:{DEFAULT_FTP_PORT}")
    }
}

/// Parse raw `LIST` output lines into entries.
///
/// `total N` summary lines are skipped; any other unparseable line fails the listing.
fn parse_listing(lines: &[String]) -> Result<Vec<RemoteEntry>, SessionError> {
    let mut entries = Vec::with_capacity(lines.len());
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("total ") {
            continue;
        }
        let file = File::from_str(trimmed)
            .map_err(|e| format!("unsupported LIST line '{trimmed}': {e}"))?;
        entries.push(RemoteEntry::new(file.name(), file.modified(), file.size() as u64));
    }
    Ok(entries)
}
