//! Core types and request construction for spdk-rpc
//!
//! This crate provides the pieces shared by the client and the struct
//! generator:
//!
//! - **Naming**: conversion between snake style (`bdev_get_bdevs`) and title
//!   style (`BdevGetBdevs`) identifiers
//! - **Request building**: turning a typed parameter object into a method name
//!   and a parameter map
//! - **Types**: JSON-RPC 2.0 request, response and error objects
//! - **Codec**: encoding requests and decoding the daemon's reply stream
//! - **Error handling**: build and transport error types
//! - **Observability**: tracing subscriber and OpenTelemetry setup
//!
//! # Example
//!
//! ```rust
//! use serde::Serialize;
//! use spdk_rpc_core::RequestBuilder;
//!
//! #[derive(Serialize)]
//! struct BdevGetBdevs {
//!     name: String,
//!     timeout: i64,
//! }
//!
//! let request = RequestBuilder::build_serialized(&BdevGetBdevs {
//!     name: "Malloc0".to_string(),
//!     timeout: 5,
//! })
//! .unwrap();
//!
//! assert_eq!(request.method, "bdev_get_bdevs");
//! assert_eq!(request.params["timeout"], 5);
//! ```

pub mod codec;
pub mod error;
pub mod naming;
pub mod observability;
pub mod request;
pub mod types;

pub use error::{BuildError, JsonRpcErrorData, TransportError};
pub use naming::{to_snake_style, to_title_style};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use request::{param_value, Params, Request, RequestBuilder, RpcMethod};
pub use types::{Id, JsonRpcRequest, JsonRpcResponse};
