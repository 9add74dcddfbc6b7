//! Common test utilities for spdk-rpc-client integration tests
//!
//! This module provides a mock SPDK daemon listening on a Unix socket in a
//! temporary directory, so the client can be tested without a real daemon.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;
use tokio::sync::mpsc;

/// What the mock daemon sends back for one request
pub enum Reply {
    /// Write the text in one piece
    Whole(String),
    /// Write the text in pieces, pausing between them
    Split(Vec<String>),
    /// Wait, then write the text in one piece
    Delayed(Duration, String),
    /// Send nothing
    Silent,
    /// Close the connection without answering
    Hangup,
}

/// Mock SPDK daemon for client testing
///
/// Accepts one connection at a time, decodes each request as it arrives
/// (requests are not newline delimited) and answers through the handler.
pub struct MockDaemon {
    _dir: tempfile::TempDir,
    path: PathBuf,
    request_rx: mpsc::Receiver<serde_json::Value>,
}

impl MockDaemon {
    /// Start a daemon that answers every request with `true`
    pub async fn new() -> Self {
        Self::with_handler(|request| Reply::Whole(mock_response(&request["id"], serde_json::json!(true)))).await
    }

    /// Start a daemon with a custom request handler
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(serde_json::Value) -> Reply + Send + Sync + 'static,
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spdk.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let (request_tx, request_rx) = mpsc::channel(100);

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buffer = Vec::new();
                let mut chunk = [0u8; 1024];

                'connection: loop {
                    let read = match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => n,
                    };
                    buffer.extend_from_slice(&chunk[..read]);

                    loop {
                        let (request, consumed) = {
                            let mut values =
                                serde_json::Deserializer::from_slice(&buffer).into_iter::<serde_json::Value>();
                            match values.next() {
                                Some(Ok(value)) => (value, values.byte_offset()),
                                _ => break,
                            }
                        };
                        buffer.drain(..consumed);

                        let _ = request_tx.send(request.clone()).await;
                        match handler(request) {
                            Reply::Whole(text) => {
                                let _ = stream.write_all(text.as_bytes()).await;
                            }
                            Reply::Split(parts) => {
                                for part in parts {
                                    let _ = stream.write_all(part.as_bytes()).await;
                                    let _ = stream.flush().await;
                                    tokio::time::sleep(Duration::from_millis(20)).await;
                                }
                            }
                            Reply::Delayed(delay, text) => {
                                tokio::time::sleep(delay).await;
                                let _ = stream.write_all(text.as_bytes()).await;
                            }
                            Reply::Silent => {}
                            Reply::Hangup => break 'connection,
                        }
                    }
                }
            }
        });

        Self {
            _dir: dir,
            path,
            request_rx,
        }
    }

    /// Path of the daemon's socket
    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    /// Wait for the next request the daemon received
    pub async fn next_request(&mut self) -> Option<serde_json::Value> {
        tokio::time::timeout(Duration::from_secs(5), self.request_rx.recv())
            .await
            .ok()
            .flatten()
    }
}

/// Helper to create a mock JSON-RPC response
pub fn mock_response(id: &serde_json::Value, result: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
    .to_string()
}

/// Helper to create a mock JSON-RPC error response
pub fn mock_error_response(id: &serde_json::Value, code: i32, message: &str) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
    .to_string()
}
