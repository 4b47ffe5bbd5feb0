use anyhow::{Context, Result};

/// Compile `paths` (later layers override earlier ones) and print the
/// resulting version hash followed by the canonical, fully-typed JSON —
/// a dry run an operator can use before pointing a live engine at a new
/// threshold document.
pub fn run(paths: &[String]) -> Result<()> {
    let thresholds = lta_config::compile_layered(paths).context("compiling layered threshold document")?;
    println!("config_hash={}", thresholds.version);
    println!("{}", serde_json::to_string_pretty(&thresholds)?);
    Ok(())
}
