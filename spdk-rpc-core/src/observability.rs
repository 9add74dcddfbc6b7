//! Logging and OpenTelemetry setup
//!
//! Library code in this workspace only emits `tracing` events and spans; it
//! never installs a subscriber. Binaries and tests call
//! [`init_observability`] once at startup to decide where those events go:
//!
//! - a `tracing-subscriber` formatter on stderr (compact text or JSON),
//!   filtered by `RUST_LOG` or the configured level
//! - optionally, OTLP export of spans and metrics to a collector
//!
//! Logs go to stderr so that tools printing generated source on stdout stay
//! usable in pipelines.
//!
//! ```rust,no_run
//! use spdk_rpc_core::ObservabilityConfig;
//!
//! let config = ObservabilityConfig::new("spdk-rpc-gen")
//!     .with_log_level("debug")
//!     .with_traces(false)
//!     .with_metrics(false);
//!
//! spdk_rpc_core::init_observability(config).expect("Failed to init observability");
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: Collector endpoint
//! - `RUST_LOG`: Log level filter, takes precedence over the configured level

use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::sync::OnceLock;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Providers installed by [`init_observability`], kept for shutdown
static PROVIDERS: OnceLock<(Option<SdkTracerProvider>, Option<SdkMeterProvider>)> = OnceLock::new();

/// Observability configuration
///
/// Defaults: service name `spdk-rpc`, crate version, endpoint from
/// `OTEL_EXPORTER_OTLP_ENDPOINT` (or `http://localhost:4317`), traces and
/// metrics off, text logs at `RUST_LOG` (or `info`).
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans and metrics
    pub service_name: String,

    /// Service version attached to exported spans and metrics
    pub service_version: String,

    /// OTLP gRPC collector endpoint
    pub otlp_endpoint: String,

    /// Export spans over OTLP
    pub enable_traces: bool,

    /// Export metrics over OTLP
    pub enable_metrics: bool,

    /// Emit log lines as JSON objects instead of text
    pub json_logs: bool,

    /// Log level filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "spdk-rpc".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
            enable_traces: false,
            enable_metrics: false,
            json_logs: false,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl ObservabilityConfig {
    /// Default configuration with a custom service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_traces(mut self, enable: bool) -> Self {
        self.enable_traces = enable;
        self
    }

    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    pub fn with_json_logs(mut self, enable: bool) -> Self {
        self.json_logs = enable;
        self
    }

    fn resource(&self) -> Resource {
        Resource::builder_empty()
            .with_attributes(vec![
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                    self.service_name.clone(),
                ),
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                    self.service_version.clone(),
                ),
            ])
            .build()
    }
}

/// Install the global subscriber and, if enabled, the OTLP pipelines
///
/// OTLP export uses the batch processor and therefore needs a Tokio runtime
/// when traces or metrics are enabled. Providers become global only once the
/// subscriber is in place, so a failed call leaves nothing installed.
///
/// # Errors
///
/// Fails if observability was already initialized, the log filter does not
/// parse, an exporter cannot be built, or a global subscriber is already
/// installed.
pub fn init_observability(config: ObservabilityConfig) -> Result<(), BoxError> {
    if PROVIDERS.get().is_some() {
        return Err("Observability is already initialized".into());
    }

    let tracer_provider = if config.enable_traces {
        Some(build_tracer_provider(&config)?)
    } else {
        None
    };

    let meter_provider = match config.enable_metrics.then(|| build_meter_provider(&config)).transpose() {
        Ok(provider) => provider,
        Err(e) => {
            shutdown_providers(tracer_provider.as_ref(), None);
            return Err(e);
        }
    };

    let tracer = tracer_provider.as_ref().map(|provider| {
        use opentelemetry::trace::TracerProvider as _;
        provider.tracer(config.service_name.clone())
    });

    if let Err(e) = init_tracing_subscriber(&config, tracer) {
        shutdown_providers(tracer_provider.as_ref(), meter_provider.as_ref());
        return Err(e);
    }

    if PROVIDERS
        .set((tracer_provider.clone(), meter_provider.clone()))
        .is_err()
    {
        shutdown_providers(tracer_provider.as_ref(), meter_provider.as_ref());
        return Err("Observability is already initialized".into());
    }

    if let Some(provider) = tracer_provider {
        global::set_tracer_provider(provider);
    }
    if let Some(provider) = meter_provider {
        global::set_meter_provider(provider);
    }

    tracing::info!(
        service_name = %config.service_name,
        otlp_endpoint = %config.otlp_endpoint,
        traces = config.enable_traces,
        metrics = config.enable_metrics,
        "Observability initialized"
    );

    Ok(())
}

fn build_tracer_provider(config: &ObservabilityConfig) -> Result<SdkTracerProvider, BoxError> {
    use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler};

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(config.resource())
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .build();

    Ok(provider)
}

fn build_meter_provider(config: &ObservabilityConfig) -> Result<SdkMeterProvider, BoxError> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()?;

    let reader = opentelemetry_sdk::metrics::PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(30))
        .build();

    let provider = SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(config.resource())
        .build();

    Ok(provider)
}

fn init_tracing_subscriber(
    config: &ObservabilityConfig,
    tracer: Option<opentelemetry_sdk::trace::Tracer>,
) -> Result<(), BoxError> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let telemetry_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    let json_layer = config.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json()
    });

    let text_layer = (!config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
    });

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

/// Flush and shut down the OTLP pipelines installed by [`init_observability`]
///
/// Does nothing when no pipeline was installed. Safe to call more than once;
/// repeated shutdowns are logged and otherwise ignored.
pub fn shutdown_observability() {
    if let Some((tracer_provider, meter_provider)) = PROVIDERS.get() {
        shutdown_providers(tracer_provider.as_ref(), meter_provider.as_ref());
    }
}

fn shutdown_providers(tracer_provider: Option<&SdkTracerProvider>, meter_provider: Option<&SdkMeterProvider>) {
    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }

    if let Some(provider) = meter_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Meter provider shutdown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "spdk-rpc");
        assert!(!config.enable_traces);
        assert!(!config.enable_metrics);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_config_builder_chaining() {
        let config = ObservabilityConfig::new("spdk-rpc-gen")
            .with_endpoint("http://collector:4317")
            .with_log_level("debug")
            .with_version("2.0.0")
            .with_traces(true)
            .with_metrics(true)
            .with_json_logs(true);

        assert_eq!(config.service_name, "spdk-rpc-gen");
        assert_eq!(config.otlp_endpoint, "http://collector:4317");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.service_version, "2.0.0");
        assert!(config.enable_traces);
        assert!(config.enable_metrics);
        assert!(config.json_logs);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let config = ObservabilityConfig::new("test-logs-only").with_log_level("warn");

        // A subscriber may already be installed by another test in this binary.
        let _ = init_observability(config.clone());

        let second = init_observability(config);
        assert!(second.is_err());
        shutdown_observability();
    }

    #[test]
    fn test_shutdown_without_init() {
        shutdown_observability();
        shutdown_observability();
    }
}
