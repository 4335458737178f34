//! Shared state for the run API

use std::sync::Arc;
use std::time::Duration;

use testflow_runner::FlowRunner;

/// Handler state: the shared runner plus run defaults.
///
/// The runner enforces at most one active run, so concurrent run
/// requests against the same server serialize into one 200 and 409s.
#[derive(Clone)]
pub struct ServeState {
    pub runner: Arc<FlowRunner>,
    pub action_timeout: Duration,
}

impl ServeState {
    pub fn new(runner: Arc<FlowRunner>, action_timeout: Duration) -> Self {
        Self {
            runner,
            action_timeout,
        }
    }
}
