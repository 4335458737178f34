//! Drag-and-drop step reordering
//!
//! Single-pass cut-and-reinsert: the dragged step is removed and placed
//! back at its drop position. The result is always a permutation of the
//! input - no step is duplicated or lost. Stale ids (the drag source may
//! outlive the step it refers to) degrade to no-ops rather than errors.

use serde::{Deserialize, Serialize};

use crate::types::{Flow, StepId};

/// Drop position for a dragged step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    /// The very start of the flow
    Start,

    /// Immediately after the given step
    After(StepId),
}

impl Flow {
    /// Move the step `dragged` to `target`.
    ///
    /// No-ops: `dragged` is unknown, `target` names the dragged step
    /// itself, or the after-step is unknown (stale drop target).
    pub fn move_step(&mut self, dragged: &StepId, target: MoveTarget) {
        if matches!(&target, MoveTarget::After(after) if after == dragged) {
            return;
        }

        let Some(from) = self.position(dragged) else {
            return;
        };

        let step = self.steps.remove(from);
        match target {
            MoveTarget::Start => self.steps.insert(0, step),
            MoveTarget::After(after) => match self.position(&after) {
                Some(i) => self.steps.insert(i + 1, step),
                // Stale target: restore the original order
                None => self.steps.insert(from, step),
            },
        }
    }
}
