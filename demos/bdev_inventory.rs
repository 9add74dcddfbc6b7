//! Block device inventory
//!
//! Connects to a running SPDK daemon, prints its version and lists its block
//! devices, with call metrics and tracing exported over OTLP.
//!
//! Run with: cargo run --example bdev_inventory -- [SOCKET]

use spdk_rpc::core::ObservabilityConfig;
use spdk_rpc::methods::{BdevGetBdevs, SpdkGetVersion};
use spdk_rpc::ClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| spdk_rpc::client::DEFAULT_SOCKET_PATH.to_string());

    let otel_config = ObservabilityConfig::new("spdk-bdev-inventory")
        .with_log_level("info")
        .with_traces(true)
        .with_metrics(true);

    let mut client = ClientBuilder::new()
        .endpoint(endpoint.as_str())
        .with_observability(otel_config)
        .connect()
        .await?;

    let version = client.call(&SpdkGetVersion::default()).await?;
    if let Some(result) = version.result {
        println!("SPDK version: {}", result["version"]);
    }

    let bdevs = client.call(&BdevGetBdevs::default()).await?;
    let bdevs: Vec<serde_json::Value> = serde_json::from_value(bdevs.result.unwrap_or_else(|| serde_json::Value::Array(Vec::new())))?;
    tracing::info!(count = bdevs.len(), "Listed block devices");

    for bdev in &bdevs {
        println!(
            "{:<24} {:>12} blocks x {:>5} bytes",
            bdev["name"].as_str().unwrap_or("?"),
            bdev["num_blocks"],
            bdev["block_size"]
        );
    }

    client.close().await?;
    spdk_rpc::core::shutdown_observability();
    Ok(())
}
