//! echo-client: a one-shot TCP client
//!
//! Sends its first argument to the echo peer at 0.0.0.0:9501, reads a
//! single reply of at most 1024 bytes and prints it.
//!
//! Exit status:
//! - 0: a reply was received and printed
//! - 1: connect, send or receive failed
//! - 2: bad arguments or configuration

use echo_client::config::Config;
use echo_client::{report, EchoClient, PEER_ADDR};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    info!(
        peer = %PEER_ADDR,
        bytes = config.payload.len(),
        connect_timeout = ?config.timeouts.connect,
        read_timeout = ?config.timeouts.read,
        "Starting echo-client"
    );

    let client = EchoClient::new(PEER_ADDR).with_timeouts(config.timeouts);
    let outcome = client.run(&config.payload);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = report(&outcome, &mut out).and_then(|()| out.flush()) {
        error!(error = %e, "Failed to write to stdout");
        return ExitCode::FAILURE;
    }

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), error = %e, "Exchange failed");
            ExitCode::FAILURE
        }
    }
}
