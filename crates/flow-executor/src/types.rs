//! Execution context threaded into every action call

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

/// Per-call execution context.
///
/// Carries the bounded-wait deadline, the cooperative cancellation token
/// owned by the controller, and a unique id for tracing correlation.
#[derive(Clone)]
pub struct ExecCtx {
    /// Deadline for this call
    pub deadline: Instant,

    /// Cancellation token for cooperative cancellation
    pub cancel: CancellationToken,

    /// Unique identifier for this call
    pub call_id: String,
}

impl ExecCtx {
    pub fn new(deadline: Instant, cancel: CancellationToken) -> Self {
        Self {
            deadline,
            cancel,
            call_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Check if this context has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Check if this context has exceeded its deadline
    pub fn is_timeout(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Remaining time until the deadline
    pub fn remaining_time(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
