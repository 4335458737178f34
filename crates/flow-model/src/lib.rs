//! Flow Document Model
//!
//! The data model for an ordered test flow: steps, the actions inside them,
//! the document operations the editor performs (add/update/delete/select)
//! and the drag-and-drop reorder algorithm. Pure data and invariants - no
//! execution behavior lives here.

pub mod document;
pub mod errors;
pub mod reorder;
pub mod types;

pub use document::{FlowDocument, PLACEHOLDER_TARGET};
pub use errors::ModelError;
pub use reorder::MoveTarget;
pub use types::{Action, ActionId, ActionKind, Flow, Step, StepId};
