//! Application settings
//!
//! Layered from built-in defaults, an optional `testflow.toml` next to the
//! working directory, and `TESTFLOW_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Address the run API listens on
    pub listen: SocketAddr,

    /// Bounded wait per action, in milliseconds
    pub action_timeout_ms: u64,

    /// Simulated latency per action, in milliseconds
    pub step_delay_ms: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("listen", "127.0.0.1:8787")?
            .set_default("action_timeout_ms", 30_000i64)?
            .set_default("step_delay_ms", 0i64)?
            .add_source(File::with_name("testflow").required(false))
            .add_source(Environment::with_prefix("TESTFLOW"))
            .build()?
            .try_deserialize()
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}
