use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use testflow_cli::cli::{simulate, validate, Cli, Command};
use testflow_cli::config::Settings;
use testflow_cli::server::{self, ServeState};
use testflow_executor::SimulatedExecutor;
use testflow_runner::FlowRunner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command {
        Command::Validate { flow } => validate::run(&flow),

        Command::Simulate {
            flow,
            fail_on,
            step_delay,
            timeout,
        } => {
            simulate::run(
                &flow,
                &fail_on,
                step_delay.unwrap_or_else(|| settings.step_delay()),
                timeout.unwrap_or_else(|| settings.action_timeout()),
            )
            .await
        }

        Command::Serve { listen } => {
            // The real browser backend is an external collaborator; the
            // in-repo server executes through the simulated one.
            let executor = SimulatedExecutor::new().with_latency(settings.step_delay());
            let runner = Arc::new(FlowRunner::new(Arc::new(executor)));
            let state = ServeState::new(runner, settings.action_timeout());
            server::serve(state, listen.unwrap_or(settings.listen)).await
        }
    }
}
