//! `validate` subcommand

use std::path::Path;

use anyhow::{Context, Result};
use testflow_model::Flow;

pub fn run(path: &Path) -> Result<()> {
    let flow = load_flow(path)?;
    flow.validate()
        .with_context(|| format!("flow '{}' is invalid", flow.title))?;
    println!("{}: {} steps, ok", flow.title, flow.steps.len());
    Ok(())
}

/// Read and parse a flow document from disk.
pub fn load_flow(path: &Path) -> Result<Flow> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let flow =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(flow)
}
