//! Document operations for the flow editor
//!
//! [`FlowDocument`] owns the flow under edit plus the current step
//! selection, and exposes the mutations the editor performs: append a
//! step for a palette action or a captured selector, replace a step in
//! place, delete a step, reorder via drag-and-drop. Mutations against
//! stale ids are no-ops - the gesture source may outlive the step.

use tracing::debug;

use crate::reorder::MoveTarget;
use crate::types::{Action, ActionKind, Flow, Step, StepId};

/// Placeholder locator used when a palette drop carries no target yet.
pub const PLACEHOLDER_TARGET: &str = "your-selector";

/// The flow under edit plus the current selection.
#[derive(Clone, Debug, Default)]
pub struct FlowDocument {
    flow: Flow,
    selected: Option<StepId>,
}

impl FlowDocument {
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            selected: None,
        }
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn into_flow(self) -> Flow {
        self.flow
    }

    pub fn title(&self) -> &str {
        &self.flow.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.flow.title = title.into();
    }

    /// The step currently selected in the editor, if any.
    pub fn selected(&self) -> Option<&Step> {
        self.selected.as_ref().and_then(|id| self.flow.step(id))
    }

    /// Select a step; an unknown id clears the selection.
    pub fn select(&mut self, id: &StepId) {
        self.selected = self.flow.step(id).map(|s| s.id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Append a new step containing one action of `kind` and make it the
    /// current selection. The target defaults to the placeholder locator.
    pub fn add_step(&mut self, kind: ActionKind, target: Option<&str>) -> &Step {
        let target = target.unwrap_or(PLACEHOLDER_TARGET);
        let step = Step::new(format!("{kind} Step"), Action::new(kind, target));
        debug!(step = %step.id, %kind, "Appending step");

        self.selected = Some(step.id.clone());
        self.flow.steps.push(step);
        self.flow.steps.last().expect("step was just appended")
    }

    /// Append a step for a selector captured by the inspector, guessing
    /// Click vs Type from the selector text. An empty selector is a no-op.
    pub fn add_step_for_selector(&mut self, selector: &str) -> Option<&Step> {
        if selector.is_empty() {
            return None;
        }

        let lower = selector.to_lowercase();
        let is_input = lower.contains("input")
            || lower.contains("textarea")
            || lower.contains("contenteditable");
        let kind = if is_input {
            ActionKind::Type
        } else {
            ActionKind::Click
        };

        let step = Step::new(format!("{kind} on element"), Action::new(kind, selector));
        debug!(step = %step.id, %kind, selector, "Appending step from captured selector");

        self.selected = Some(step.id.clone());
        self.flow.steps.push(step);
        self.flow.steps.last()
    }

    /// Replace the step with matching id in place, preserving position.
    /// Unknown ids are a no-op.
    pub fn update_step(&mut self, step: Step) {
        if let Some(slot) = self.flow.steps.iter_mut().find(|s| s.id == step.id) {
            *slot = step;
        }
    }

    /// Remove the step with this id; clears the selection when it pointed
    /// at the deleted step. Deleting a nonexistent id is a no-op.
    pub fn delete_step(&mut self, id: &StepId) {
        self.flow.steps.retain(|s| &s.id != id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    /// Move a step to a new drop position. See [`Flow::move_step`].
    pub fn move_step(&mut self, dragged: &StepId, target: MoveTarget) {
        self.flow.move_step(dragged, target);
    }
}
