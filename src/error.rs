//! Error types for the echo client.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Which stage of the exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connect,
    Send,
    Receive,
}

/// Failure of a single request/response exchange.
///
/// Every variant is terminal for the request; the client never retries.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The peer is unreachable, refused the connection, or the connect timed out.
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The write transmitted zero bytes.
    #[error("send failed: no bytes were sent")]
    SendZero,

    /// The write or the end-of-message shutdown failed.
    #[error("send failed: {0}")]
    Send(#[source] io::Error),

    /// The peer closed the connection before any bytes arrived.
    #[error("receive failed: connection closed before any data arrived")]
    ReceiveClosed,

    /// No reply arrived within the read timeout.
    #[error("receive failed: no reply within {0:?}")]
    ReceiveTimeout(Duration),

    #[error("receive failed: {0}")]
    Receive(#[source] io::Error),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Connect { .. } => ErrorKind::Connect,
            ClientError::SendZero | ClientError::Send(_) => ErrorKind::Send,
            ClientError::ReceiveClosed
            | ClientError::ReceiveTimeout(_)
            | ClientError::Receive(_) => ErrorKind::Receive,
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
