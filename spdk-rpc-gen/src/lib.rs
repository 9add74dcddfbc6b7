//! Typed parameter struct generator for SPDK RPC methods
//!
//! Reads a schema document listing RPC methods and their parameters and
//! emits Rust source with one parameter struct per method. Each struct
//! implements [`spdk_rpc_core::RpcMethod`], so its values can be passed
//! straight to the client.
//!
//! The generator is used two ways:
//!
//! - from a build script, writing into `OUT_DIR` (see `spdk-rpc-methods`)
//! - through the `spdk-rpc-gen` binary, printing to stdout or a file
//!
//! # Example
//!
//! ```rust
//! let source = spdk_rpc_gen::generate_from_str(
//!     r#"{"methods": [{"method": "bdev_malloc_delete", "params": [
//!         {"param": "name", "type": "string", "required": true}
//!     ]}]}"#,
//! )
//! .unwrap();
//!
//! assert!(source.contains("pub struct BdevMallocDelete"));
//! ```

pub mod error;
pub mod generator;
pub mod schema;
pub mod types;

pub use error::{Result, SchemaError};
pub use generator::{generate, generate_from_str, render, HEADER};
pub use schema::{Parameter, RpcCall, RpcCallCollection};
pub use types::TypeNormalizer;
