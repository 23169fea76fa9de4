//! A single client connection to the echo peer.
//!
//! The socket is owned by `Connection` for its whole life and released when
//! the value is dropped, so every exit path of an exchange closes it.

use crate::error::ClientError;
use bytes::{Bytes, BytesMut};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;
use tracing::{debug, trace};

/// Per-operation timeouts. `None` blocks for as long as the OS allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub read: Option<Duration>,
    pub write: Option<Duration>,
}

/// An open TCP connection.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    read_timeout: Option<Duration>,
}

impl Connection {
    /// Connect to `addr`, honoring the connect timeout if one is set.
    pub fn open(addr: SocketAddr, timeouts: &Timeouts) -> Result<Self, ClientError> {
        let connect_err = |source| ClientError::Connect { addr, source };

        let stream = create_stream(addr, timeouts.connect).map_err(connect_err)?;
        stream.set_read_timeout(timeouts.read).map_err(connect_err)?;
        stream.set_write_timeout(timeouts.write).map_err(connect_err)?;
        stream.set_nodelay(true).map_err(connect_err)?;

        debug!(peer = %addr, "Connected");

        Ok(Self {
            stream,
            peer: addr,
            read_timeout: timeouts.read,
        })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Write the whole payload, then shut down the write half so the peer
    /// sees end-of-message.
    ///
    /// Returns the number of bytes sent.
    pub fn send(&mut self, payload: &[u8]) -> Result<usize, ClientError> {
        if payload.is_empty() {
            return Err(ClientError::SendZero);
        }

        self.stream.write_all(payload).map_err(|e| {
            if e.kind() == io::ErrorKind::WriteZero {
                ClientError::SendZero
            } else {
                ClientError::Send(e)
            }
        })?;
        self.stream
            .shutdown(Shutdown::Write)
            .map_err(ClientError::Send)?;

        trace!(bytes = payload.len(), "Payload sent");
        Ok(payload.len())
    }

    /// Perform a single read of at most `limit` bytes.
    ///
    /// Does not loop: a reply longer than `limit`, or one split across
    /// segments, is returned as whatever the first read yields.
    pub fn receive(&mut self, limit: usize) -> Result<Bytes, ClientError> {
        let mut buffer = BytesMut::zeroed(limit);

        let n = loop {
            match self.stream.read(&mut buffer) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) => {
                    return Err(ClientError::ReceiveTimeout(
                        self.read_timeout.unwrap_or_default(),
                    ));
                }
                Err(e) => return Err(ClientError::Receive(e)),
            }
        };

        if n == 0 {
            return Err(ClientError::ReceiveClosed);
        }

        buffer.truncate(n);
        trace!(bytes = n, "Reply received");
        Ok(buffer.freeze())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // The peer may already have closed its side.
        let _ = self.stream.shutdown(Shutdown::Both);
        debug!(peer = %self.peer, "Connection closed");
    }
}

/// Build a blocking TCP stream connected to `addr`.
fn create_stream(addr: SocketAddr, connect_timeout: Option<Duration>) -> io::Result<TcpStream> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    match connect_timeout {
        Some(timeout) => socket.connect_timeout(&addr.into(), timeout)?,
        None => socket.connect(&addr.into())?,
    }

    Ok(socket.into())
}

/// Blocking reads report an expired timeout as `WouldBlock` on Unix and
/// `TimedOut` on Windows.
fn is_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
