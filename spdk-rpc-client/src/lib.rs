//! JSON-RPC 2.0 client for the SPDK control socket
//!
//! This crate sends typed RPC calls to a running SPDK daemon over its Unix
//! domain socket (or a TCP listener) and returns the daemon's replies.
//!
//! # Core Features
//!
//! - **Typed calls**: any [`RpcMethod`](spdk_rpc_core::RpcMethod), such as the
//!   structs generated by `spdk-rpc-gen`, or any serializable struct
//! - **Socket transport**: sequential request IDs and reassembly of replies
//!   that arrive in pieces
//! - **Pluggable transport**: [`Transport`] is a trait, so tests and other
//!   carriers can stand in for the socket
//! - **Observability**: tracing spans per call and optional OpenTelemetry
//!   metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde::Serialize;
//! use spdk_rpc_client::SpdkClient;
//!
//! #[derive(Serialize)]
//! struct BdevGetBdevs {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = SpdkClient::connect().await?;
//!
//!     let response = client
//!         .call_serialized(&BdevGetBdevs { name: "Malloc0".to_string() })
//!         .await?;
//!     println!("Result: {:?}", response.result);
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod error;
mod metrics;
pub mod transport;

pub use client::SpdkClient;
pub use client_builder::ClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::ClientMetrics;
pub use transport::{Endpoint, SocketTransport, Transport, DEFAULT_SOCKET_PATH};
