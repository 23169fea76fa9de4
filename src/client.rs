//! One-shot echo client.
//!
//! Connects to the peer, writes one payload, performs a single bounded read
//! and closes the connection:
//!
//! ```text
//! connect -> write payload -> shutdown(write) -> read <= 1024 bytes -> close
//! ```
//!
//! There is no framing, no retry and no loop to collect a complete reply;
//! whatever the first read returns is the reply.

use crate::connection::{Connection, Timeouts};
use crate::error::ClientError;
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Instant;
use tracing::{debug, info};

/// Address the command-line client always talks to.
pub const PEER_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 9501));

/// Upper bound of a single reply read.
pub const REPLY_BUFFER_SIZE: usize = 1024;

/// Bytes returned by the peer; never empty, at most `REPLY_BUFFER_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    bytes: Bytes,
}

impl Reply {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The reply decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "received: {}", self.text())
    }
}

/// Client bound to a single peer address.
#[derive(Debug, Clone)]
pub struct EchoClient {
    addr: SocketAddr,
    timeouts: Timeouts,
}

impl Default for EchoClient {
    fn default() -> Self {
        Self::new(PEER_ADDR)
    }
}

impl EchoClient {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Perform one request/response exchange.
    ///
    /// The connection is closed before this returns, whether or not the
    /// exchange succeeded.
    pub fn run(&self, payload: &[u8]) -> Result<Reply, ClientError> {
        let started = Instant::now();

        let mut conn = Connection::open(self.addr, &self.timeouts)?;
        let sent = conn.send(payload)?;
        let bytes = conn.receive(REPLY_BUFFER_SIZE)?;
        drop(conn);

        info!(
            peer = %self.addr,
            sent,
            received = bytes.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Exchange complete"
        );

        Ok(Reply { bytes })
    }
}

/// Write the user-visible line for an exchange outcome.
pub fn report<W: Write>(outcome: &Result<Reply, ClientError>, out: &mut W) -> io::Result<()> {
    match outcome {
        Ok(reply) => writeln!(out, "{reply}"),
        Err(e) => {
            debug!(kind = ?e.kind(), error = %e, "Exchange failed");
            writeln!(out, "{e}")
        }
    }
}
