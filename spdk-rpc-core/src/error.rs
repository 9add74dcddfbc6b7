//! Error types for request construction and transport
//!
//! Two error families live here:
//!
//! - [`BuildError`]: a typed parameter object could not be turned into a
//!   request. Raised per call, before anything touches the socket.
//! - [`TransportError`]: the request could not be delivered, the reply could
//!   not be read, or the daemon answered with a JSON-RPC error object.
//!
//! Both are returned to the immediate caller. Nothing in this crate retries.
//!
//! # JSON-RPC Error Codes
//!
//! Error replies carry a [`JsonRpcErrorData`] with the standard codes:
//!
//! - `-32700`: Parse error
//! - `-32600`: Invalid Request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! SPDK also uses negated errno values (for example `-19` for `ENODEV`).

use crate::types::Id;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to turn a parameter object into a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The value handed to the builder is not a struct
    ///
    /// Primitives, sequences, maps and enums have no field set that could be
    /// mapped onto named RPC parameters.
    #[error("wrong type of provided argument: {0} is not a struct")]
    WrongArgumentType(String),

    /// A field value has no JSON representation
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Failure in the transport collaborator
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Socket level failure (connect, read, write, shutdown)
    #[error("IO error: {0}")]
    Io(String),

    /// The request could not be encoded or the reply could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The daemon closed the connection before replying
    #[error("Connection closed")]
    ConnectionClosed,

    /// No reply arrived within the configured response timeout
    #[error("Request timeout")]
    Timeout,

    /// A reply arrived for a different request
    #[error("Response ID mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: Id, actual: Id },

    /// The daemon answered with an error object
    #[error("JSON-RPC error: {0}")]
    Rpc(#[from] JsonRpcErrorData),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

/// JSON-RPC 2.0 error object
///
/// Carried in the `error` member of a response. `data` is optional and
/// omitted from the wire form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i32,

    /// Short description of the error
    pub message: String,

    /// Additional information about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create an error object without additional data
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}
