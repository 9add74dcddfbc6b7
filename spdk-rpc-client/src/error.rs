//! Client error type

use spdk_rpc_core::{BuildError, TransportError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by [`SpdkClient`](crate::SpdkClient)
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The transport could not be acquired
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: TransportError,
    },

    /// The parameter object could not be turned into a request
    #[error("Failed to build request: {0}")]
    Build(#[from] BuildError),

    /// The transport failed or the daemon answered with an error object
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Observability could not be initialized while building the client
    #[error("Failed to initialize observability: {0}")]
    Observability(String),
}

impl ClientError {
    /// The daemon's error object, if the call reached the daemon and failed there
    pub fn rpc_error(&self) -> Option<&spdk_rpc_core::JsonRpcErrorData> {
        match self {
            ClientError::Transport(TransportError::Rpc(data)) => Some(data),
            _ => None,
        }
    }
}
