//! Sequential run state machine

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use testflow_executor::{ActionExecutor, ExecCtx};
use testflow_model::{Flow, StepId};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::RunnerError;
use crate::report::{RunReport, StatusEvent, StepReport, StepStatus};
use crate::status::StatusBoard;

const EVENT_CAPACITY: usize = 256;
const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for one run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Bounded wait applied to each action invocation
    pub action_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            action_timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }
}

struct ActiveRun {
    run_id: u64,
    token: CancellationToken,
}

/// Drives a flow through the action executor one step at a time.
///
/// The runner is the sole writer of step statuses during a run. Steps
/// execute strictly in recorded order with one action in flight at a
/// time; the first failed action marks its step `Error` and halts the
/// run, leaving later steps `Idle`.
pub struct FlowRunner {
    executor: Arc<dyn ActionExecutor>,
    board: StatusBoard,
    events: broadcast::Sender<StatusEvent>,
    active: Mutex<Option<ActiveRun>>,
    run_seq: AtomicU64,
}

impl FlowRunner {
    pub fn new(executor: Arc<dyn ActionExecutor>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            executor,
            board: StatusBoard::new(),
            events,
            active: Mutex::new(None),
            run_seq: AtomicU64::new(0),
        }
    }

    /// Whether a run is currently active.
    pub fn is_running(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Observe status transitions as they happen.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.events.subscribe()
    }

    /// Transient status for one step; `Idle` between runs.
    pub fn status(&self, id: &StepId) -> StepStatus {
        self.board.get(id)
    }

    /// Statuses merged over the flow in execution order.
    pub fn statuses(&self, flow: &Flow) -> Vec<(StepId, StepStatus)> {
        self.board.snapshot(flow)
    }

    /// Execute the flow start to finish, halting on the first failure.
    ///
    /// Rejected synchronously when a run is already active or the flow is
    /// empty or structurally invalid; rejection changes no state. The
    /// returned report lists the attempted steps in order and stops at
    /// the first error.
    pub async fn run(&self, flow: &Flow, options: RunOptions) -> Result<RunReport, RunnerError> {
        if flow.steps.is_empty() {
            return Err(RunnerError::EmptyFlow);
        }
        flow.validate()?;

        let (run_id, token) = {
            let mut active = self.active.lock();
            if active.is_some() {
                return Err(RunnerError::AlreadyRunning);
            }
            let run_id = self.run_seq.fetch_add(1, Ordering::Relaxed);
            let token = CancellationToken::new();
            *active = Some(ActiveRun {
                run_id,
                token: token.clone(),
            });
            (run_id, token)
        };

        info!(flow = %flow.title, steps = flow.steps.len(), "Run started");
        self.reset_board(flow);

        let report = self.drive(flow, &options, &token).await;
        self.finish(run_id);

        if report.success {
            info!(flow = %flow.title, steps = report.steps.len(), "Run completed");
        } else if let Some(failed) = report.failure() {
            warn!(flow = %flow.title, step = %failed.step_id, error = ?failed.error, "Run failed");
        } else {
            info!(flow = %flow.title, "Run stopped");
        }

        Ok(report)
    }

    /// Request a cooperative stop.
    ///
    /// The run state returns to not-running immediately: any step still
    /// `Running` reverts to `Idle`, terminal statuses are kept, and the
    /// result of the in-flight action call is discarded by the run loop.
    pub fn stop(&self) {
        let Some(run) = self.active.lock().take() else {
            return;
        };
        info!("Stop requested");
        run.token.cancel();
        for id in self.board.running() {
            self.transition(&id, StepStatus::Idle);
        }
    }

    async fn drive(
        &self,
        flow: &Flow,
        options: &RunOptions,
        token: &CancellationToken,
    ) -> RunReport {
        let mut steps = Vec::new();

        for step in &flow.steps {
            if token.is_cancelled() {
                return RunReport {
                    success: false,
                    steps,
                };
            }

            self.transition(&step.id, StepStatus::Running);
            let report = StepReport::started(step.id.clone(), step.title.clone());
            let mut failure: Option<String> = None;

            for action in &step.actions {
                let ctx = ExecCtx::new(
                    Instant::now() + options.action_timeout,
                    token.child_token(),
                );
                debug!(step = %step.id, action = %action.id, kind = %action.kind, "Executing action");
                let result = self.executor.execute(&ctx, action).await;

                if token.is_cancelled() {
                    // Stop already acknowledged: the step was reverted to
                    // idle and the in-flight result is discarded.
                    return RunReport {
                        success: false,
                        steps,
                    };
                }

                if let Err(err) = result {
                    failure = Some(err.to_string());
                    break;
                }
            }

            match failure {
                Some(message) => {
                    self.transition(&step.id, StepStatus::Error);
                    warn!(step = %step.id, error = %message, "Step failed, halting run");
                    steps.push(report.with_error(message).finish());
                    return RunReport {
                        success: false,
                        steps,
                    };
                }
                None => {
                    self.transition(&step.id, StepStatus::Success);
                    steps.push(report.with_success().finish());
                }
            }
        }

        RunReport {
            success: true,
            steps,
        }
    }

    fn reset_board(&self, flow: &Flow) {
        self.board.retain_flow(flow);
        for step in &flow.steps {
            self.transition(&step.id, StepStatus::Idle);
        }
    }

    fn transition(&self, id: &StepId, status: StepStatus) {
        self.board.set(id.clone(), status);
        let _ = self.events.send(StatusEvent {
            step_id: id.clone(),
            status,
        });
    }

    fn finish(&self, run_id: u64) {
        let mut active = self.active.lock();
        if active.as_ref().map(|run| run.run_id) == Some(run_id) {
            *active = None;
        }
    }
}
