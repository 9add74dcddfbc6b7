//! JSON-RPC 2.0 wire types
//!
//! The SPDK daemon speaks plain JSON-RPC 2.0 over its control socket:
//!
//! ```text
//! --> {"jsonrpc":"2.0","method":"bdev_get_bdevs","params":{"name":"Malloc0"},"id":1}
//! <-- {"jsonrpc":"2.0","id":1,"result":[{"name":"Malloc0", ...}]}
//! ```
//!
//! A reply carries either `result` or `error` and is correlated with its
//! request by `id`.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version string sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// Serialized as the bare inner value (`1`, `"abc"` or `null`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    String(String),
    Number(i64),
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

/// JSON-RPC 2.0 request object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// Method name, e.g. `bdev_get_bdevs`
    pub method: String,
    /// Named parameters; omitted from the wire form when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Correlation ID
    pub id: Id,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response object
///
/// `result` is `None` both when the member is missing and when it is `null`;
/// the presence of `error` is what distinguishes a failed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    pub id: Id,
}

impl JsonRpcResponse {
    pub fn success(result: serde_json::Value, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(error: JsonRpcErrorData, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Split the reply into its result or its error object
    ///
    /// A missing or `null` result becomes [`serde_json::Value::Null`].
    pub fn into_result(self) -> Result<serde_json::Value, JsonRpcErrorData> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result.unwrap_or(serde_json::Value::Null)),
        }
    }
}
