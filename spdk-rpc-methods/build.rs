use anyhow::{Context, Result};
use std::env::var;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    let manifest_dir = PathBuf::from(var("CARGO_MANIFEST_DIR").context("Missing CARGO_MANIFEST_DIR environment variable")?);
    let schema = manifest_dir.join("schema").join("rpc_methods.json");
    println!("cargo:rerun-if-changed={}", schema.display());

    let source = spdk_rpc_gen::generate(&schema)
        .with_context(|| format!("Failed to generate RPC method structs from {}", schema.display()))?;

    let out_dir = PathBuf::from(var("OUT_DIR").context("Missing OUT_DIR environment variable")?);
    let out_file = out_dir.join("methods.rs");
    fs::write(&out_file, source).with_context(|| format!("Failed to write {}", out_file.display()))?;

    Ok(())
}
