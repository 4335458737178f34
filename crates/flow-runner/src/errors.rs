//! Error types for the execution controller

use testflow_model::ModelError;
use testflow_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    /// At most one concurrent run per flow; rejected synchronously with
    /// no state change.
    #[error("A run is already in progress")]
    AlreadyRunning,

    /// Running an empty flow is rejected rather than vacuously succeeding
    #[error("Flow has no steps")]
    EmptyFlow,

    /// The flow violates a structural invariant
    #[error("Flow failed validation: {0}")]
    InvalidFlow(#[from] ModelError),

    /// Document mutations are rejected while the controller is iterating
    /// the step sequence.
    #[error("Document is locked while a run is in progress")]
    RunInProgress,

    /// The persistence collaborator failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
