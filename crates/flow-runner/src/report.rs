//! Run status and report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use testflow_model::StepId;

/// Per-step status during a run.
///
/// Run-scoped and transient: every run starts by resetting all steps to
/// `Idle`, and a stop reverts any `Running` step back to `Idle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Idle,
    Running,
    Success,
    Error,
}

/// Status transition published to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEvent {
    pub step_id: StepId,
    pub status: StepStatus,
}

/// Report describing an individual attempted step.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub step_id: StepId,
    pub title: String,
    pub status: StepStatus,

    /// Error message when the step failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub latency_ms: u64,
}

impl StepReport {
    /// Create a report for a step that just started
    pub fn started(step_id: StepId, title: String) -> Self {
        let now = Utc::now();
        Self {
            step_id,
            title,
            status: StepStatus::Running,
            error: None,
            started_at: now,
            finished_at: now,
            latency_ms: 0,
        }
    }

    /// Mark as success
    pub fn with_success(mut self) -> Self {
        self.status = StepStatus::Success;
        self
    }

    /// Mark as failure
    pub fn with_error(mut self, error: String) -> Self {
        self.status = StepStatus::Error;
        self.error = Some(error);
        self
    }

    /// Set finish time and calculate latency
    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self.latency_ms = (self.finished_at - self.started_at).num_milliseconds() as u64;
        self
    }
}

/// Aggregate report for one run.
///
/// Contains the attempted steps in order; the list stops at the first
/// failed step - steps never reached are absent, not placeholders.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub success: bool,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Report for the failing step, if the run failed on one
    pub fn failure(&self) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.status == StepStatus::Error)
    }
}
