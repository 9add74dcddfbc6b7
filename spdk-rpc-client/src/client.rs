//! JSON-RPC client for the SPDK daemon
//!
//! [`SpdkClient`] owns one [`Transport`] and turns typed parameter objects
//! into calls on it.
//!
//! # Client Lifecycle
//!
//! 1. **Connect**: [`SpdkClient::connect`] for the default socket, or
//!    [`ClientBuilder`](crate::ClientBuilder) for anything else
//! 2. **Call**: one call at a time through `&mut self`
//! 3. **Close**: [`SpdkClient::close`] consumes the client, so the transport
//!    is released exactly once
//!
//! A successful call never carries an `error` member: daemon error replies
//! come back as `ClientError::Transport(TransportError::Rpc(..))`.

use crate::error::{ClientError, Result};
use crate::metrics::ClientMetrics;
use crate::transport::{Endpoint, SocketTransport, Transport};
use serde::Serialize;
use spdk_rpc_core::{JsonRpcResponse, Request, RequestBuilder, RpcMethod, TransportError};
use std::sync::Arc;

/// Client for the SPDK JSON-RPC control socket
pub struct SpdkClient<T: Transport = SocketTransport> {
    transport: T,
    metrics: Option<Arc<ClientMetrics>>,
}

impl SpdkClient<SocketTransport> {
    /// Connect to the daemon at `/var/tmp/spdk.sock`
    pub async fn connect() -> Result<Self> {
        Self::connect_to(&Endpoint::default()).await
    }

    /// Connect to the daemon at `endpoint`
    pub async fn connect_to(endpoint: &Endpoint) -> Result<Self> {
        let transport = SocketTransport::connect(endpoint)
            .await
            .map_err(|source| ClientError::Connect {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(Self::with_transport(transport))
    }

    /// Start configuring a client
    pub fn builder() -> crate::ClientBuilder {
        crate::ClientBuilder::new()
    }
}

impl<T: Transport> SpdkClient<T> {
    /// Use an already acquired transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            metrics: None,
        }
    }

    pub(crate) fn with_metrics(mut self, metrics: Option<Arc<ClientMetrics>>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Call the method described by a typed parameter object
    ///
    /// # Errors
    ///
    /// - `ClientError::Build` if the parameters cannot be serialized
    /// - `ClientError::Transport` if delivery fails or the daemon replies
    ///   with an error object
    pub async fn call<M: RpcMethod + ?Sized>(&mut self, method: &M) -> Result<JsonRpcResponse> {
        let request = RequestBuilder::build(method)?;
        self.dispatch(request).await
    }

    /// Call a method described by any serializable struct
    ///
    /// The method name is the snake style form of the struct's type name.
    pub async fn call_serialized<P: Serialize + ?Sized>(&mut self, params: &P) -> Result<JsonRpcResponse> {
        let request = RequestBuilder::build_serialized(params)?;
        self.dispatch(request).await
    }

    #[tracing::instrument(skip_all, fields(method = %request.method))]
    async fn dispatch(&mut self, request: Request) -> Result<JsonRpcResponse> {
        let start = std::time::Instant::now();
        let Request { method, params } = request;

        let result = self.transport.call(&method, params).await;
        let duration = start.elapsed().as_secs_f64();

        match result {
            Ok(response) => {
                if let Some(ref m) = self.metrics {
                    m.record_call(&method, "success", duration);
                }
                tracing::debug!(duration_secs = duration, "Call completed successfully");
                Ok(response)
            }
            Err(error) => {
                if let Some(ref m) = self.metrics {
                    m.record_call(&method, "error", duration);
                    m.record_error(&method, error_kind(&error));
                }
                tracing::error!(error = %error, "Call failed");
                Err(ClientError::Transport(error))
            }
        }
    }

    /// Release the transport
    pub async fn close(mut self) -> Result<()> {
        tracing::debug!("Closing client");
        self.transport.close().await?;
        Ok(())
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn error_kind(error: &TransportError) -> &'static str {
    match error {
        TransportError::Io(_) => "io",
        TransportError::Serialization(_) => "serialization",
        TransportError::ConnectionClosed => "connection_closed",
        TransportError::Timeout => "timeout",
        TransportError::IdMismatch { .. } => "id_mismatch",
        TransportError::Rpc(_) => "rpc",
    }
}
