//! Generator error type

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while turning a schema into Rust source
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema file could not be read
    #[error("Failed to read schema {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema does not have the expected shape
    #[error("Malformed schema: {0}")]
    Malformed(String),

    /// The schema parsed but produced code that is not valid Rust
    #[error("Failed to render generated code: {0}")]
    RenderFailure(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Malformed(err.to_string())
    }
}
