//! Store contract and the in-memory implementation

use async_trait::async_trait;
use parking_lot::Mutex;
use testflow_model::Flow;

use crate::errors::StoreError;

/// Best-effort persistence for the flow document.
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Load the stored flow, if any.
    async fn load(&self) -> Result<Option<Flow>, StoreError>;

    /// Persist the flow, replacing any previous version.
    async fn save(&self, flow: &Flow) -> Result<(), StoreError>;
}

/// Simple in-memory store suitable for unit tests and early integration.
#[derive(Default)]
pub struct InMemoryFlowStore {
    slot: Mutex<Option<Flow>>,
}

impl InMemoryFlowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlowStore for InMemoryFlowStore {
    async fn load(&self) -> Result<Option<Flow>, StoreError> {
        Ok(self.slot.lock().clone())
    }

    async fn save(&self, flow: &Flow) -> Result<(), StoreError> {
        *self.slot.lock() = Some(flow.clone());
        Ok(())
    }
}
