//! Diagram document: frames, edges, the ordered step list, and activation
//! state.
//!
//! `Frame` and `Edge` track the rendered elements the host created; their
//! handles are minted by the host renderer (layout path) or carried in the
//! ingested markup (graph path). `Diagram` owns all of them plus the dense
//! step sequence. Activation flags live here and persist across
//! recomputations — that persistence is what lets a return step's frame keep
//! its activated styling when the cursor retreats (see
//! [`crate::sequencer::Sequencer`]).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle to a rendered call frame. Minted by the host renderer.
pub type FrameId = Uuid;

/// Handle to a rendered connector between two frames.
pub type EdgeId = Uuid;

/// Which rendered part of a step an activation query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRole {
    /// The step's child frame (the callee's box).
    Frame,
    /// The step's connector.
    Edge,
}

/// One atomic event in the execution-order sequence: a call being entered,
/// or — on the graph path — a call returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Caller frame. `None` only for the layout path's root step.
    pub parent: Option<FrameId>,
    /// Callee frame this step activates.
    pub child: FrameId,
    /// Connector for this step. `None` only for the layout path's root step,
    /// which has no incoming edge.
    pub edge: Option<EdgeId>,
    /// True when this step represents the call returning rather than being
    /// entered. Only the graph path produces return steps.
    pub is_return: bool,
}

/// A rendered call frame as tracked by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Host renderer's handle for this frame.
    pub id: FrameId,
    /// Stable identifying label.
    pub label: String,
    /// Whether the frame currently renders as activated.
    pub activated: bool,
}

/// A rendered connector as tracked by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Host renderer's handle for this connector.
    pub id: EdgeId,
    /// Caller-side frame.
    pub parent: FrameId,
    /// Callee-side frame.
    pub child: FrameId,
    /// Text shown on the connector after ingestion stripped the step
    /// ordinal. Empty for call edges and for layout-path connectors.
    pub label: String,
    /// Whether the connector currently renders as activated.
    pub activated: bool,
}

/// In-memory store of one diagram's frames, edges, and steps.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    frames: HashMap<FrameId, Frame>,
    edges: HashMap<EdgeId, Edge>,
    steps: Vec<Step>,
}

impl Diagram {
    /// Create an empty diagram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a rendered frame. Replaces any frame with the same handle.
    pub(crate) fn insert_frame(&mut self, id: FrameId, label: String) {
        self.frames.insert(id, Frame { id, label, activated: false });
    }

    /// Track a rendered connector. Replaces any edge with the same handle.
    pub(crate) fn insert_edge(&mut self, id: EdgeId, parent: FrameId, child: FrameId, label: String) {
        self.edges.insert(id, Edge { id, parent, child, label, activated: false });
    }

    /// Append a step to the sequence.
    pub(crate) fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Set a frame's activation flag. Unknown handles are ignored.
    pub(crate) fn set_frame_activated(&mut self, id: FrameId, activated: bool) {
        if let Some(frame) = self.frames.get_mut(&id) {
            frame.activated = activated;
        }
    }

    /// Set an edge's activation flag. Unknown handles are ignored.
    pub(crate) fn set_edge_activated(&mut self, id: EdgeId, activated: bool) {
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.activated = activated;
        }
    }

    /// The dense, zero-indexed step sequence.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the diagram has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Look up a frame by handle.
    #[must_use]
    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(&id)
    }

    /// Look up an edge by handle.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// All tracked frames, in no particular order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }

    /// All tracked edges, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of tracked frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of tracked edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
