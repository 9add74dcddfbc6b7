//! spdk-rpc-gen: generate typed SPDK RPC parameter structs
//!
//! # Usage
//!
//! ```bash
//! # Print generated source
//! spdk-rpc-gen schema/rpc_methods.json
//!
//! # Write to a file
//! spdk-rpc-gen schema/rpc_methods.json --output src/methods.rs
//! ```
//!
//! Logs go to stderr. The output file is only written once generation has
//! succeeded.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use spdk_rpc_core::ObservabilityConfig;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate typed SPDK RPC parameter structs from a method schema", long_about = None)]
struct Args {
    /// Path to the RPC method schema (JSON)
    schema: PathBuf,

    /// Write generated source here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    spdk_rpc_core::init_observability(ObservabilityConfig::new("spdk-rpc-gen").with_log_level(args.log_level.as_str()))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let source = spdk_rpc_gen::generate(&args.schema)
        .with_context(|| format!("Failed to generate structs from {}", args.schema.display()))?;

    match args.output {
        Some(path) => {
            fs::write(&path, source).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Generated source written");
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(source.as_bytes())
                .context("Failed to write generated source to stdout")?;
        }
    }

    Ok(())
}
