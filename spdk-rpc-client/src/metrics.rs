//! Client metrics
//!
//! OpenTelemetry instruments recorded by [`SpdkClient`](crate::SpdkClient)
//! when metrics are enabled on the builder. Without a meter provider
//! installed (see `spdk_rpc_core::init_observability`) recording is a no-op.
//!
//! - **spdk_rpc.client.calls.total**: calls made, by method and status
//! - **spdk_rpc.client.call.duration**: call latency in seconds
//! - **spdk_rpc.client.errors.total**: failed calls, by error kind

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

pub struct ClientMetrics {
    pub calls_total: Counter<u64>,
    pub call_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create instruments on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into()).build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            calls_total: meter
                .u64_counter("spdk_rpc.client.calls.total")
                .with_description("Total number of RPC calls made")
                .build(),
            call_duration: meter
                .f64_histogram("spdk_rpc.client.call.duration")
                .with_description("RPC call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("spdk_rpc.client.errors.total")
                .with_description("Total number of failed RPC calls")
                .build(),
        }
    }

    pub fn record_call(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.calls_total.add(1, attributes);
        self.call_duration.record(duration_secs, attributes);
    }

    pub fn record_error(&self, method: &str, kind: &str) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("kind", kind.to_string()),
        ];
        self.errors_total.add(1, attributes);
    }
}
