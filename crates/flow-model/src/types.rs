//! Core types for flow documents

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Default title for a freshly created flow.
pub const DEFAULT_FLOW_TITLE: &str = "Untitled Flow";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

impl StepId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of executable action kinds.
///
/// Extension means adding a variant here; every dispatch site is an
/// exhaustive match and fails to compile until updated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Load a URL/path in the target page
    Navigate,

    /// Click a located element
    Click,

    /// Set the content of an input-capable element
    Type,

    /// Verify a condition against a located element
    Assert,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Navigate => "Navigate",
            ActionKind::Click => "Click",
            ActionKind::Type => "Type",
            ActionKind::Assert => "Assert",
        };
        f.write_str(name)
    }
}

/// One executable instruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier, assigned at creation, never reused
    pub id: ActionId,

    /// Action kind
    #[serde(rename = "type")]
    pub kind: ActionKind,

    /// Where the action applies: a URL/path for Navigate, an element
    /// locator for Click/Type/Assert. Must be non-empty.
    pub target: String,

    /// Payload: text to type for Type, expected condition for Assert.
    /// Stored but semantically ignored for Navigate and Click.
    #[serde(default)]
    pub value: String,
}

impl Action {
    /// Create a new action with an empty value
    pub fn new(kind: ActionKind, target: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(),
            kind,
            target: target.into(),
            value: String::new(),
        }
    }

    /// Set the value payload
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// A named, ordered group of one or more actions.
///
/// The unit of status tracking during a run. Run status is transient and
/// lives with the runner, not on this record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Unique identifier, stable across reorders
    pub id: StepId,

    /// Human label, editable independently of the flow title
    pub title: String,

    /// Insertion order is execution order; non-empty by construction
    pub actions: Vec<Action>,
}

impl Step {
    /// Create a step around its first action
    pub fn new(title: impl Into<String>, first_action: Action) -> Self {
        Self {
            id: StepId::new(),
            title: title.into(),
            actions: vec![first_action],
        }
    }

    /// Append an action, preserving execution order
    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }
}

/// The document under edit: a title plus the ordered steps.
///
/// Step order is execution order. The flow exclusively owns its steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub title: String,
    pub steps: Vec<Step>,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow {
    /// Create an empty flow with the placeholder title
    pub fn new() -> Self {
        Self {
            title: DEFAULT_FLOW_TITLE.to_string(),
            steps: Vec::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Look up a step by id
    pub fn step(&self, id: &StepId) -> Option<&Step> {
        self.steps.iter().find(|s| &s.id == id)
    }

    /// Position of a step in execution order
    pub fn position(&self, id: &StepId) -> Option<usize> {
        self.steps.iter().position(|s| &s.id == id)
    }

    /// Check structural invariants: unique step ids, no empty steps,
    /// no empty action targets.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = std::collections::HashSet::new();
        for step in &self.steps {
            if !seen.insert(&step.id) {
                return Err(ModelError::DuplicateStepId(step.id.0.clone()));
            }
            if step.actions.is_empty() {
                return Err(ModelError::EmptyStep(step.id.0.clone()));
            }
            for action in &step.actions {
                if action.target.is_empty() {
                    return Err(ModelError::EmptyTarget {
                        step_id: step.id.0.clone(),
                        action_id: action.id.0.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
