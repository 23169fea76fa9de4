//! Echo peers for scenario tests.
//!
//! Each peer listens on an ephemeral loopback port and runs its handler on
//! every accepted connection.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type PeerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Start a peer and return the address it listens on.
pub async fn spawn_peer<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(TcpStream) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PeerResult> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let conn = handler(stream);
            tokio::spawn(async move {
                let _ = conn.await;
            });
        }
    });

    addr
}

/// Read until the client signals end-of-message, then echo everything back.
pub async fn echo(mut stream: TcpStream) -> PeerResult {
    let mut received = Vec::with_capacity(4096);
    stream.read_to_end(&mut received).await?;
    stream.write_all(&received).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Reply with `len` bytes without waiting for the request.
pub async fn flood(mut stream: TcpStream, len: usize) -> PeerResult {
    stream.write_all(&vec![b'x'; len]).await?;
    let mut sink = Vec::new();
    stream.read_to_end(&mut sink).await?;
    Ok(())
}

/// Consume the request and never answer.
pub async fn silent(mut stream: TcpStream) -> PeerResult {
    let mut sink = Vec::new();
    stream.read_to_end(&mut sink).await?;
    tokio::time::sleep(Duration::from_secs(10)).await;
    Ok(())
}

/// Consume the request and close without replying.
pub async fn hang_up(mut stream: TcpStream) -> PeerResult {
    let mut sink = Vec::new();
    stream.read_to_end(&mut sink).await?;
    Ok(())
}
