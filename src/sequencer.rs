//! Step sequencing: the cursor state machine and activation recomputation.

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod sequencer_test;

use crate::doc::{Diagram, Step, StepRole};

/// Owns the diagram's ordered step list and the current-step cursor.
///
/// The cursor is the only mutable session state; it is clamped to
/// `[0, len-1]` and every mutation is followed by a full activation
/// recompute over all steps, so the diagram is consistent no matter how far
/// the cursor jumped. A sequencer over an empty step list is a valid
/// degenerate state: navigation is a permanent no-op and `seek` pins to 0.
#[derive(Debug, Clone)]
pub struct Sequencer {
    diagram: Diagram,
    cursor: usize,
}

impl Sequencer {
    /// Sequencer starting at the last step — the fully-unwound view.
    #[must_use]
    pub fn new(diagram: Diagram) -> Self {
        let cursor = diagram.len().saturating_sub(1);
        let mut sequencer = Self { diagram, cursor };
        sequencer.recompute();
        sequencer
    }

    /// Sequencer starting at `start`, clamped into range. `None` starts at
    /// the last step.
    #[must_use]
    pub fn with_start(diagram: Diagram, start: Option<i64>) -> Self {
        let mut sequencer = Self::new(diagram);
        if let Some(step) = start {
            sequencer.seek(step);
        }
        sequencer
    }

    /// The diagram this sequencer drives.
    #[must_use]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagram.len()
    }

    /// Returns `true` if there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagram.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor sits on the first step (always true when empty).
    #[must_use]
    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    /// Whether the cursor sits on the last step (always true when empty).
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.diagram.len() <= self.cursor + 1
    }

    /// Advance one step. No-op at the end; returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor += 1;
        self.recompute();
        true
    }

    /// Retreat one step. No-op at the start; returns whether the cursor
    /// moved.
    pub fn prev(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.cursor -= 1;
        self.recompute();
        true
    }

    /// Jump to `step`, clamped into `[0, len-1]`. Total: out-of-range input
    /// is never an error. Returns the cursor after clamping.
    pub fn seek(&mut self, step: i64) -> usize {
        let last = self.diagram.len().saturating_sub(1);
        let upper = i64::try_from(last).unwrap_or(i64::MAX);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clamped = step.clamp(0, upper) as usize;
        self.cursor = clamped;
        self.recompute();
        self.cursor
    }

    /// Whether the step at `index` currently renders its child frame or its
    /// edge as activated. Out-of-range indices are never activated.
    #[must_use]
    pub fn is_activated(&self, index: usize, role: StepRole) -> bool {
        let Some(step) = self.diagram.steps().get(index) else {
            return false;
        };
        match role {
            StepRole::Frame => self
                .diagram
                .frame(step.child)
                .is_some_and(|frame| frame.activated),
            StepRole::Edge => step
                .edge
                .and_then(|id| self.diagram.edge(id))
                .is_some_and(|edge| edge.activated),
        }
    }

    /// Full recomputation of activation state for every step.
    ///
    /// Steps up to the cursor activate their edge and child frame; steps
    /// beyond it deactivate their edge, and deactivate their child frame
    /// only when the step is not a return. A frame entered by a call and
    /// completed by a return therefore keeps its activation when the cursor
    /// retreats below the return step — only the instantaneous edge
    /// highlight is retracted.
    fn recompute(&mut self) {
        let steps: Vec<Step> = self.diagram.steps().to_vec();

        // The root frame stays activated once the sequence extends past its
        // first step.
        if steps.len() > 1 {
            if let Some(root) = steps[0].parent {
                self.diagram.set_frame_activated(root, true);
            }
        }

        for (index, step) in steps.iter().enumerate() {
            let reached = index <= self.cursor;
            if let Some(edge) = step.edge {
                self.diagram.set_edge_activated(edge, reached);
            }
            if reached {
                self.diagram.set_frame_activated(step.child, true);
            } else if !step.is_return {
                self.diagram.set_frame_activated(step.child, false);
            }
        }

        tracing::trace!(cursor = self.cursor, steps = steps.len(), "activation recomputed");
    }
}
