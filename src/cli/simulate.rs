//! `simulate` subcommand - dry-run a flow against the simulated backend

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use testflow_executor::{ExecError, SimulatedExecutor};
use testflow_runner::{FlowRunner, RunOptions, StepStatus};
use tracing::info;

use crate::cli::validate::load_flow;

pub async fn run(
    path: &Path,
    fail_on: &[String],
    step_delay: Duration,
    timeout: Duration,
) -> Result<()> {
    let flow = load_flow(path)?;

    let mut executor = SimulatedExecutor::new().with_latency(step_delay);
    for locator in fail_on {
        executor = executor.fail_on(locator.clone(), ExecError::NotFound(locator.clone()));
    }

    let runner = FlowRunner::new(Arc::new(executor));
    let report = runner
        .run(
            &flow,
            RunOptions {
                action_timeout: timeout,
            },
        )
        .await?;

    for step in &report.steps {
        let marker = match step.status {
            StepStatus::Success => "ok",
            StepStatus::Error => "FAILED",
            StepStatus::Idle | StepStatus::Running => "-",
        };
        println!("{:>6}  {}  ({} ms)", marker, step.title, step.latency_ms);
        if let Some(error) = &step.error {
            println!("        {error}");
        }
    }

    if !report.success {
        match report.failure() {
            Some(failed) => bail!("flow failed at step '{}'", failed.title),
            None => bail!("run did not complete"),
        }
    }

    info!(steps = report.steps.len(), "Simulation completed");
    Ok(())
}
