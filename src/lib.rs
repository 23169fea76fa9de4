//! echo-client: send one buffer to a TCP peer and print its reply.
//!
//! - `client`: the one-shot exchange and its user-visible report
//! - `connection`: socket ownership, bounded send/receive
//! - `config`: CLI arguments merged with an optional TOML file
//! - `error`: connect/send/receive error taxonomy
//! - `car`: plain color value holders

pub mod car;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;

pub use client::{report, EchoClient, Reply, PEER_ADDR, REPLY_BUFFER_SIZE};
pub use connection::Timeouts;
pub use error::{ClientError, ConfigError, ErrorKind};
