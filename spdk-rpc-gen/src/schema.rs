//! Schema document model
//!
//! A schema lists RPC methods and their named parameters:
//!
//! ```json
//! {
//!   "methods": [
//!     {
//!       "method": "bdev_get_bdevs",
//!       "description": "Get information about block devices",
//!       "params": [
//!         {"param": "name", "type": "string", "description": "Block device name", "required": false}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Unknown members are ignored. `description`, `params` and `required` may be
//! omitted or `null`. Method and parameter order is kept as written.

use crate::error::{Result, SchemaError};
use crate::types::TypeNormalizer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Ordered list of RPC methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcCallCollection {
    #[serde(rename = "methods")]
    pub calls: Vec<RpcCall>,
}

/// One RPC method and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcCall {
    /// Wire method name, snake style
    #[serde(rename = "method")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "params", default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
}

/// One named parameter of an RPC method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Wire key, snake style
    #[serde(rename = "param")]
    pub name: String,

    /// Schema type token, e.g. `number`
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RpcCallCollection {
    /// Parse and check a schema document
    ///
    /// # Errors
    ///
    /// `SchemaError::Malformed` if the document does not match the schema
    /// shape, a method or parameter name is empty, or a method lists the same
    /// parameter twice.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Parse and check a schema document from raw bytes
    ///
    /// Bytes that are not valid UTF-8 are `SchemaError::Malformed` like any
    /// other non-conforming document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let collection: RpcCallCollection = serde_json::from_slice(bytes)?;
        collection.check()?;
        Ok(collection)
    }

    fn check(&self) -> Result<()> {
        for (index, call) in self.calls.iter().enumerate() {
            if call.name.is_empty() {
                return Err(SchemaError::Malformed(format!("method #{} has an empty name", index)));
            }

            let mut seen = BTreeSet::new();
            for parameter in &call.parameters {
                if parameter.name.is_empty() {
                    return Err(SchemaError::Malformed(format!(
                        "method `{}` has a parameter with an empty name",
                        call.name
                    )));
                }
                if !seen.insert(parameter.name.as_str()) {
                    return Err(SchemaError::Malformed(format!(
                        "method `{}` lists parameter `{}` more than once",
                        call.name, parameter.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Copy with every parameter type normalized
    ///
    /// The collection itself is left untouched.
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        for parameter in copy.calls.iter_mut().flat_map(|call| call.parameters.iter_mut()) {
            parameter.type_name = TypeNormalizer::normalize(&parameter.type_name);
        }
        copy
    }
}
