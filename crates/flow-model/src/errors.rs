//! Error types for the flow document model

use thiserror::Error;

/// Structural violations detected by flow validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Two steps share the same id
    #[error("Duplicate step id: {0}")]
    DuplicateStepId(String),

    /// A step carries no actions
    #[error("Step {0} has no actions")]
    EmptyStep(String),

    /// An action has an empty target locator
    #[error("Action {action_id} in step {step_id} has an empty target")]
    EmptyTarget { step_id: String, action_id: String },
}
