//! Error types for action execution

use thiserror::Error;

/// Failure taxonomy shared by every action kind.
///
/// The controller only consumes success/failure plus the display message;
/// it never branches on the specific kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Locator resolved to nothing
    #[error("Element not found: {0}")]
    NotFound(String),

    /// Locator resolved to multiple elements
    #[error("Multiple elements match: {0}")]
    Ambiguous(String),

    /// Condition never became true within the bounded wait
    #[error("Timed out: {0}")]
    Timeout(String),

    /// The executing backend itself is unreachable
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// The call was cancelled before completing.
    ///
    /// Never surfaced in run reports: the controller discards the result
    /// of an in-flight call once a stop has been acknowledged.
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl ExecError {
    /// Whether the backend itself failed, as opposed to the action
    pub fn is_transport(&self) -> bool {
        matches!(self, ExecError::Transport(_))
    }
}
