//! Typed parameter structs for SPDK RPC methods
//!
//! Every struct in this crate is generated at build time by `spdk-rpc-gen`
//! from `schema/rpc_methods.json`. Struct names are the title style form of
//! the method name, fields the title style form of each parameter, and each
//! field serializes under the parameter's original name. Optional parameters
//! are `Option` fields and are left out of the request when `None`.
//!
//! # Example
//!
//! ```rust
//! use spdk_rpc_core::{RequestBuilder, RpcMethod};
//! use spdk_rpc_methods::BdevGetBdevs;
//!
//! let params = BdevGetBdevs {
//!     Name: Some("Malloc0".to_string()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(BdevGetBdevs::METHOD, "bdev_get_bdevs");
//!
//! let request = RequestBuilder::build(&params).unwrap();
//! assert_eq!(request.params["name"], "Malloc0");
//! assert!(!request.params.contains_key("timeout"));
//! ```

include!(concat!(env!("OUT_DIR"), "/methods.rs"));
