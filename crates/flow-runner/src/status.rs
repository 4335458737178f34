//! Per-step status board
//!
//! A parallel map from step id to transient run status, owned by the
//! runner and merged into presentation on demand. The persisted flow
//! document never carries status.

use dashmap::DashMap;
use testflow_model::{Flow, StepId};

use crate::report::StepStatus;

#[derive(Default)]
pub struct StatusBoard {
    statuses: DashMap<StepId, StepStatus>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, id: StepId, status: StepStatus) {
        self.statuses.insert(id, status);
    }

    /// Status for a step; steps the board has never seen are `Idle`.
    pub fn get(&self, id: &StepId) -> StepStatus {
        self.statuses
            .get(id)
            .map(|entry| *entry.value())
            .unwrap_or(StepStatus::Idle)
    }

    /// Drop entries for steps no longer in the flow.
    pub fn retain_flow(&self, flow: &Flow) {
        self.statuses.retain(|id, _| flow.step(id).is_some());
    }

    /// Ids currently marked `Running`.
    pub fn running(&self) -> Vec<StepId> {
        self.statuses
            .iter()
            .filter(|entry| *entry.value() == StepStatus::Running)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Statuses merged over the flow in execution order.
    pub fn snapshot(&self, flow: &Flow) -> Vec<(StepId, StepStatus)> {
        flow.steps
            .iter()
            .map(|step| (step.id.clone(), self.get(&step.id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testflow_model::{Action, ActionKind, Step};

    #[test]
    fn unknown_steps_read_idle() {
        let board = StatusBoard::new();

        assert_eq!(board.get(&StepId::new()), StepStatus::Idle);
    }

    #[test]
    fn snapshot_follows_execution_order() {
        let mut flow = Flow::new();
        for i in 0..3 {
            flow.steps.push(Step::new(
                format!("Step {i}"),
                Action::new(ActionKind::Click, "#b"),
            ));
        }
        let board = StatusBoard::new();
        board.set(flow.steps[1].id.clone(), StepStatus::Running);

        let snapshot = board.snapshot(&flow);

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].1, StepStatus::Idle);
        assert_eq!(snapshot[1].1, StepStatus::Running);
        assert_eq!(snapshot[2].1, StepStatus::Idle);
    }

    #[test]
    fn running_lists_only_running_steps() {
        let board = StatusBoard::new();
        let running = StepId::new();
        board.set(running.clone(), StepStatus::Running);
        board.set(StepId::new(), StepStatus::Success);

        assert_eq!(board.running(), vec![running]);
    }
}
