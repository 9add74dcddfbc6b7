//! spdk-rpc - typed JSON-RPC calls to the SPDK control socket
//!
//! This is the main convenience crate that re-exports all spdk-rpc sub-crates.
//!
//! # Architecture
//!
//! spdk-rpc is organized into modular crates:
//!
//! - **spdk-rpc-core**: naming conversion, request building, JSON-RPC types,
//!   codec, error handling, observability
//! - **spdk-rpc-client**: client and socket transport
//! - **spdk-rpc-gen**: schema-driven parameter struct generator
//! - **spdk-rpc-methods**: parameter structs generated from the bundled schema
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use spdk_rpc::methods::BdevGetBdevs;
//! use spdk_rpc::SpdkClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = SpdkClient::connect().await?;
//!
//!     let response = client
//!         .call(&BdevGetBdevs {
//!             Name: Some("Malloc0".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Result: {:?}", response.result);
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

pub use spdk_rpc_client as client;
pub use spdk_rpc_core as core;
pub use spdk_rpc_gen as gen;
pub use spdk_rpc_methods as methods;

pub use spdk_rpc_client::{ClientBuilder, ClientError, SpdkClient};
pub use spdk_rpc_core::{RequestBuilder, RpcMethod};
