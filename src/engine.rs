//! Top-level engine: builds a diagram from either input path, owns its
//! sequencer, and turns control events into navigation plus exactly one
//! render pass each.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::doc::{Diagram, Step};
use crate::ingest::{GraphMarkup, IngestError, ingest};
use crate::input::{ControlEvent, ControlState};
use crate::layout::{LayoutError, layout};
use crate::render::{self, Surface};
use crate::sequencer::Sequencer;
use crate::tree::TreeNode;

/// Drives one diagram for its lifetime: one engine, one sequencer, one
/// cursor. Dropped when the host tears the view down.
pub struct Engine {
    sequencer: Sequencer,
}

impl Engine {
    /// Lay out a call tree, create its visuals on `surface`, and start
    /// stepping. The cursor starts at `start` (clamped) or, when `None`, at
    /// the last step — the fully-drawn view.
    ///
    /// One frame is created per call and one connector per parent/child
    /// pair; the steps follow DFS pre-order, so every step on this path is
    /// a call being entered.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidWidth`] for a non-positive or
    /// non-finite width; nothing is created on the surface in that case.
    pub fn from_tree(
        root: &TreeNode,
        width: f64,
        start: Option<i64>,
        surface: &mut dyn Surface,
    ) -> Result<Self, LayoutError> {
        let placed = layout(root, width)?;

        let mut diagram = Diagram::new();
        let mut frames = Vec::with_capacity(placed.len());
        for node in &placed {
            let id = surface.create_frame(node.label, node.x, node.y);
            diagram.insert_frame(id, node.label.to_owned());
            frames.push(id);

            let (parent, edge) = match node.parent {
                Some(parent_index) => {
                    let parent_id = frames[parent_index];
                    let edge_id = surface.connect(parent_id, id);
                    diagram.insert_edge(edge_id, parent_id, id, String::new());
                    (Some(parent_id), Some(edge_id))
                }
                None => (None, None),
            };
            diagram.push_step(Step { parent, child: id, edge, is_return: false });
        }

        tracing::debug!(frames = diagram.frame_count(), steps = diagram.len(), "tree mounted");
        Ok(Self::start(diagram, start, surface))
    }

    /// Adopt a pre-rendered execution graph and start stepping. Post-parse
    /// connector labels are pushed to `surface` before the first render
    /// pass.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the markup is structurally malformed;
    /// the surface is left untouched in that case.
    pub fn from_markup(
        markup: &GraphMarkup,
        start: Option<i64>,
        surface: &mut dyn Surface,
    ) -> Result<Self, IngestError> {
        let diagram = ingest(markup)?;
        render::apply_edge_labels(&diagram, surface);
        Ok(Self::start(diagram, start, surface))
    }

    fn start(diagram: Diagram, start: Option<i64>, surface: &mut dyn Surface) -> Self {
        let sequencer = Sequencer::with_start(diagram, start);
        render::sync(sequencer.diagram(), surface);
        Self { sequencer }
    }

    /// Apply one control event, re-render, and report the new widget state.
    ///
    /// Events apply strictly in dispatch order; each gets its own full
    /// render pass, so intermediate states are all visible. Navigation never
    /// fails — boundary events and out-of-range slider values degrade to
    /// clamped no-ops.
    pub fn handle(&mut self, event: &ControlEvent, surface: &mut dyn Surface) -> ControlState {
        let moved = match event {
            ControlEvent::Prev => self.sequencer.prev(),
            ControlEvent::Next => self.sequencer.next(),
            ControlEvent::Seek(value) => self.seek_raw(*value),
            ControlEvent::Key(key) => match ControlEvent::from_key(key) {
                Some(ControlEvent::Prev) => self.sequencer.prev(),
                Some(ControlEvent::Next) => self.sequencer.next(),
                _ => false,
            },
        };
        if moved {
            tracing::trace!(cursor = self.sequencer.cursor(), "cursor moved");
        }
        render::sync(self.sequencer.diagram(), surface);
        ControlState::of(&self.sequencer)
    }

    /// Truncate a raw slider value toward zero and seek, discarding
    /// non-finite input. Returns whether the cursor moved.
    fn seek_raw(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let before = self.sequencer.cursor();
        #[allow(clippy::cast_possible_truncation)]
        let target = value as i64;
        self.sequencer.seek(target) != before
    }

    /// Current widget state.
    #[must_use]
    pub fn controls(&self) -> ControlState {
        ControlState::of(&self.sequencer)
    }

    /// The sequencer driving this engine's diagram.
    #[must_use]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }
}
