//! Client builder for configuring the endpoint and other options
//!
//! The `ClientBuilder` provides a fluent API for configuring client behavior
//! before connecting. It allows you to:
//! - Choose the control socket (default `/var/tmp/spdk.sock`)
//! - Set a response timeout on the socket transport
//! - Record call metrics
//! - Configure observability (OpenTelemetry)
//!
//! # Examples
//!
//! ```rust,no_run
//! use spdk_rpc_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> spdk_rpc_client::Result<()> {
//! let client = ClientBuilder::new()
//!     .endpoint("/run/spdk/spdk.sock")
//!     .response_timeout(Duration::from_secs(30))
//!     .connect()
//!     .await?;
//!
//! let client2 = ClientBuilder::new()
//!     .with_default_observability()
//!     .service_name("my-controller")
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ClientError, Result};
use crate::metrics::ClientMetrics;
use crate::transport::{Endpoint, SocketTransport};
use crate::SpdkClient;
use spdk_rpc_core::ObservabilityConfig;
use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and creating an SpdkClient
#[derive(Debug, Default)]
pub struct ClientBuilder {
    endpoint: Endpoint,
    response_timeout: Option<Duration>,
    enable_metrics: bool,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to `endpoint` instead of the default socket
    ///
    /// Accepts a socket path, `unix:///path` or `tcp://host:port`.
    pub fn endpoint(mut self, endpoint: impl Into<Endpoint>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fail calls whose reply takes longer than `timeout`
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// Record call metrics on the global meter provider
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Initialize observability with custom configuration; implies metrics
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self.enable_metrics = true;
        self
    }

    /// Initialize observability with default configuration; implies metrics
    pub fn with_default_observability(self) -> Self {
        self.with_observability(ObservabilityConfig::default())
    }

    /// Set service name for observability and metrics
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build and connect the client
    pub async fn connect(self) -> Result<SpdkClient> {
        let mut observability_config = self.observability_config;
        if let (Some(config), Some(name)) = (observability_config.as_mut(), self.service_name.as_ref()) {
            config.service_name = name.clone();
        }

        let service_name = self
            .service_name
            .or_else(|| observability_config.as_ref().map(|config| config.service_name.clone()))
            .unwrap_or_else(|| "spdk-rpc-client".to_string());

        if let Some(config) = observability_config {
            spdk_rpc_core::init_observability(config).map_err(|e| ClientError::Observability(e.to_string()))?;
        }

        let metrics = self
            .enable_metrics
            .then(|| Arc::new(ClientMetrics::new(service_name)));

        tracing::info!(endpoint = %self.endpoint, "Connecting to control socket");
        let transport = SocketTransport::connect(&self.endpoint)
            .await
            .map_err(|source| ClientError::Connect {
                endpoint: self.endpoint.to_string(),
                source,
            })?
            .with_response_timeout(self.response_timeout);

        tracing::info!("Connected successfully");
        Ok(SpdkClient::with_transport(transport).with_metrics(metrics))
    }
}
