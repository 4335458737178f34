//! Command-line interface

pub mod simulate;
pub mod validate;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "testflow",
    about = "Test-flow execution engine",
    version,
    long_version = LONG_VERSION
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a flow document's structural invariants
    Validate {
        /// Path to the flow JSON document
        flow: PathBuf,
    },

    /// Dry-run a flow through the simulated backend
    Simulate {
        /// Path to the flow JSON document
        flow: PathBuf,

        /// Locators that should fail to resolve
        #[arg(long = "fail-on", value_name = "LOCATOR")]
        fail_on: Vec<String>,

        /// Simulated latency per action (e.g. 500ms)
        #[arg(long, value_parser = humantime::parse_duration)]
        step_delay: Option<Duration>,

        /// Bounded wait per action (e.g. 30s)
        #[arg(long, value_parser = humantime::parse_duration)]
        timeout: Option<Duration>,
    },

    /// Serve the run API over HTTP
    Serve {
        /// Listen address, e.g. 127.0.0.1:8787
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
}
