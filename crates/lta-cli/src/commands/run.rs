use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use anyhow::{Context, Result};

use lta_engine::Engine;
use lta_state::InMemoryStateStore;
use lta_types::RawTick;

/// Feed every tick in `ticks_path`, in file order, through a fresh `Engine`
/// compiled from `config_path`, printing one `DualTimeframeResult` JSON
/// line per tick to stdout.
pub fn replay(config_path: &str, ticks_path: &str) -> Result<()> {
    let thresholds = lta_config::compile_file(config_path).context("compiling threshold document")?;
    let engine = Engine::new(thresholds, Arc::new(InMemoryStateStore::new()));

    let file = File::open(ticks_path).with_context(|| format!("opening tick file {ticks_path}"))?;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {ticks_path} line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawTick = serde_json::from_str(&line)
            .with_context(|| format!("parsing tick at {ticks_path} line {}", line_no + 1))?;
        let symbol = raw.symbol.clone();
        let result = engine.on_new_tick_dual(&symbol, raw);
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}
