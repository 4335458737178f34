//! Editing session around a flow document and its runner
//!
//! The session is the single owner of the document: every mutation goes
//! through it, is rejected while a run is active (the controller must
//! never iterate a sequence the editor is reshaping), and is mirrored to
//! the store fire-and-forget afterwards.

use std::sync::Arc;

use parking_lot::RwLock;
use testflow_model::{ActionKind, Flow, FlowDocument, MoveTarget, Step, StepId};
use testflow_store::FlowStore;
use tracing::warn;

use crate::errors::RunnerError;
use crate::report::RunReport;
use crate::runner::{FlowRunner, RunOptions};

pub struct FlowSession {
    document: RwLock<FlowDocument>,
    runner: Arc<FlowRunner>,
    store: Option<Arc<dyn FlowStore>>,
}

impl FlowSession {
    pub fn new(runner: Arc<FlowRunner>) -> Self {
        Self {
            document: RwLock::new(FlowDocument::default()),
            runner,
            store: None,
        }
    }

    pub fn with_document(self, document: FlowDocument) -> Self {
        *self.document.write() = document;
        self
    }

    /// Mirror the document to this store after every mutation.
    pub fn with_store(mut self, store: Arc<dyn FlowStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn runner(&self) -> &Arc<FlowRunner> {
        &self.runner
    }

    /// Snapshot of the flow under edit.
    pub fn flow(&self) -> Flow {
        self.document.read().flow().clone()
    }

    /// Replace the document with the stored flow, if one exists.
    pub async fn restore(&self) -> Result<bool, RunnerError> {
        self.guard_edit()?;
        let Some(store) = &self.store else {
            return Ok(false);
        };
        match store.load().await? {
            Some(flow) => {
                *self.document.write() = FlowDocument::new(flow);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_title(&self, title: &str) -> Result<(), RunnerError> {
        self.guard_edit()?;
        self.document.write().set_title(title);
        self.mirror();
        Ok(())
    }

    pub fn add_step(&self, kind: ActionKind, target: Option<&str>) -> Result<Step, RunnerError> {
        self.guard_edit()?;
        let step = self.document.write().add_step(kind, target).clone();
        self.mirror();
        Ok(step)
    }

    pub fn add_step_for_selector(&self, selector: &str) -> Result<Option<Step>, RunnerError> {
        self.guard_edit()?;
        let step = self
            .document
            .write()
            .add_step_for_selector(selector)
            .cloned();
        if step.is_some() {
            self.mirror();
        }
        Ok(step)
    }

    pub fn update_step(&self, step: Step) -> Result<(), RunnerError> {
        self.guard_edit()?;
        self.document.write().update_step(step);
        self.mirror();
        Ok(())
    }

    pub fn delete_step(&self, id: &StepId) -> Result<(), RunnerError> {
        self.guard_edit()?;
        self.document.write().delete_step(id);
        self.mirror();
        Ok(())
    }

    pub fn move_step(&self, dragged: &StepId, target: MoveTarget) -> Result<(), RunnerError> {
        self.guard_edit()?;
        self.document.write().move_step(dragged, target);
        self.mirror();
        Ok(())
    }

    /// Selection does not affect the executed sequence, so it stays
    /// available during a run.
    pub fn select(&self, id: &StepId) {
        self.document.write().select(id);
    }

    pub fn selected(&self) -> Option<Step> {
        self.document.read().selected().cloned()
    }

    /// Run the current flow. Delegates mutual exclusion to the runner.
    pub async fn run(&self, options: RunOptions) -> Result<RunReport, RunnerError> {
        let flow = self.flow();
        self.runner.run(&flow, options).await
    }

    pub fn stop(&self) {
        self.runner.stop();
    }

    fn guard_edit(&self) -> Result<(), RunnerError> {
        if self.runner.is_running() {
            return Err(RunnerError::RunInProgress);
        }
        Ok(())
    }

    fn mirror(&self) {
        let Some(store) = &self.store else { return };
        let store = Arc::clone(store);
        let flow = self.flow();
        tokio::spawn(async move {
            if let Err(err) = store.save(&flow).await {
                warn!(error = %err, "Best-effort flow save failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use testflow_executor::SimulatedExecutor;
    use testflow_store::InMemoryFlowStore;

    fn session_with(executor: SimulatedExecutor) -> FlowSession {
        FlowSession::new(Arc::new(FlowRunner::new(Arc::new(executor))))
    }

    #[tokio::test]
    async fn edits_are_rejected_while_running() {
        let executor = SimulatedExecutor::new().with_latency(Duration::from_millis(100));
        let session = Arc::new(session_with(executor));
        session
            .add_step(ActionKind::Navigate, Some("/login"))
            .unwrap();

        let background = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.run(RunOptions::default()).await })
        };
        tokio::task::yield_now().await;
        while !session.runner().is_running() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert!(matches!(
            session.add_step(ActionKind::Click, None),
            Err(RunnerError::RunInProgress)
        ));
        let stray = session.flow().steps[0].id.clone();
        assert!(matches!(
            session.delete_step(&stray),
            Err(RunnerError::RunInProgress)
        ));
        assert!(matches!(
            session.move_step(&stray, MoveTarget::Start),
            Err(RunnerError::RunInProgress)
        ));

        let report = background.await.unwrap().unwrap();
        assert!(report.success);

        // The document was untouched and edits work again.
        assert_eq!(session.flow().steps.len(), 1);
        session.add_step(ActionKind::Click, None).unwrap();
        assert_eq!(session.flow().steps.len(), 2);
    }

    #[tokio::test]
    async fn mutations_mirror_to_the_store() {
        let store = Arc::new(InMemoryFlowStore::new());
        let session = session_with(SimulatedExecutor::new())
            .with_store(Arc::clone(&store) as Arc<dyn FlowStore>);

        session.set_title("Login").unwrap();
        session
            .add_step(ActionKind::Navigate, Some("/login"))
            .unwrap();

        // Saves are spawned; give them a tick to land.
        tokio::task::yield_now().await;
        for _ in 0..50 {
            if store.load().await.unwrap().map_or(false, |f| !f.steps.is_empty()) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved.title, "Login");
        assert_eq!(saved.steps.len(), 1);
    }

    #[tokio::test]
    async fn restore_replaces_the_document() {
        let store = Arc::new(InMemoryFlowStore::new());
        let mut stored = Flow::new().with_title("Stored");
        stored.steps.push(Step::new(
            "Nav",
            testflow_model::Action::new(ActionKind::Navigate, "/home"),
        ));
        store.save(&stored).await.unwrap();

        let session = session_with(SimulatedExecutor::new())
            .with_store(Arc::clone(&store) as Arc<dyn FlowStore>);

        assert!(session.restore().await.unwrap());
        assert_eq!(session.flow().title, "Stored");
        assert_eq!(session.flow().steps.len(), 1);
    }

    #[tokio::test]
    async fn restore_without_a_store_is_a_noop() {
        let session = session_with(SimulatedExecutor::new());

        assert!(!session.restore().await.unwrap());
    }
}
