//! Pre-rendered graph ingestion.
//!
//! The alternative input path: the host has already rendered an execution
//! graph (nodes titled with stable frame identifiers, edges titled
//! `parent->child` with an optional `:c` return suffix and a text label
//! embedding a step ordinal as `<text>(#<ordinal>)`). Ingestion adapts that
//! markup into the same [`Diagram`] the layout path produces, with one step
//! per edge placed at its embedded ordinal.
//!
//! Ordinals must densely cover `0..N-1`. The step list is load-bearing for
//! the sequencer's correctness, so every structural defect — unparseable
//! ordinal, unknown frame title, duplicate or missing ordinal — fails the
//! whole ingestion rather than leaving a hole.

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::doc::{Diagram, EdgeId, FrameId, Step};

/// Suffix marking an edge title as a return (unwind) edge.
const RETURN_SUFFIX: &str = ":c";

/// Token separating the parent and child titles in an edge title.
const CONNECTOR: &str = "->";

/// Marker introducing the embedded step ordinal in an edge's text.
const ORDINAL_MARKER: &str = "(#";

/// Error returned by [`ingest`] for structurally malformed graphs.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Two node elements share the same title.
    #[error("duplicate node title {0:?}")]
    DuplicateNode(String),
    /// An edge's text carries no parseable `(#<ordinal>)`.
    #[error("edge text {0:?} has no parseable step ordinal")]
    BadOrdinal(String),
    /// An edge's title does not split into `parent->child`.
    #[error("edge title {0:?} is not of the form parent->child")]
    BadEdgeTitle(String),
    /// An edge references a frame title no node element carries.
    #[error("edge references unknown frame {0:?}")]
    UnknownFrame(String),
    /// Two edges claim the same step ordinal.
    #[error("duplicate step ordinal {0}")]
    DuplicateOrdinal(usize),
    /// The ordinals do not densely cover the sequence.
    #[error("step sequence has a gap at ordinal {0}")]
    MissingOrdinal(usize),
}

/// A rendered node element: the host's frame handle plus its stable title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeElement {
    /// Handle of the rendered frame.
    pub frame: FrameId,
    /// Stable identifying title, unique within the graph.
    pub title: String,
}

/// A rendered edge element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeElement {
    /// Handle of the rendered connector.
    pub edge: EdgeId,
    /// `parent->child`, suffixed `:c` for a return edge.
    pub title: String,
    /// Label text embedding the step ordinal, `<text>(#<ordinal>)`.
    pub text: String,
}

/// A pre-rendered execution graph as handed over by the host renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMarkup {
    /// All rendered frames.
    pub nodes: Vec<NodeElement>,
    /// All rendered connectors, in any order.
    pub edges: Vec<EdgeElement>,
}

impl GraphMarkup {
    /// Deserialize markup from a host-provided JSON value.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when the value does not
    /// match the markup shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Adapt a rendered graph into a diagram with a dense step sequence.
///
/// Each edge becomes the step at its embedded ordinal. After parsing, a
/// return edge keeps its descriptive text as the connector label while a
/// call edge's label is cleared; the host applies these via
/// [`crate::render::apply_edge_labels`].
///
/// # Errors
///
/// Returns an [`IngestError`] when any edge is unparseable, references an
/// unknown frame, or the ordinals are not exactly `0..N-1`. A partial step
/// sequence is never produced.
pub fn ingest(markup: &GraphMarkup) -> Result<Diagram, IngestError> {
    let mut diagram = Diagram::new();
    let mut by_title: HashMap<&str, FrameId> = HashMap::new();
    for node in &markup.nodes {
        if by_title.insert(node.title.as_str(), node.frame).is_some() {
            return Err(IngestError::DuplicateNode(node.title.clone()));
        }
        diagram.insert_frame(node.frame, node.title.clone());
    }

    let mut slots: Vec<Option<Step>> = Vec::with_capacity(markup.edges.len());
    for element in &markup.edges {
        let ordinal = parse_ordinal(&element.text)?;
        let is_return = element.title.ends_with(RETURN_SUFFIX);
        let pair = element
            .title
            .strip_suffix(RETURN_SUFFIX)
            .unwrap_or(&element.title);
        let (parent_title, child_title) = pair
            .split_once(CONNECTOR)
            .ok_or_else(|| IngestError::BadEdgeTitle(element.title.clone()))?;
        let parent = resolve(&by_title, parent_title)?;
        let child = resolve(&by_title, child_title)?;

        // Return edges keep their descriptive text once the ordinal is
        // stripped; call edges show nothing.
        let label = if is_return {
            text_before_ordinal(&element.text)
        } else {
            String::new()
        };
        diagram.insert_edge(element.edge, parent, child, label);

        if slots.len() <= ordinal {
            slots.resize(ordinal + 1, None);
        }
        if slots[ordinal].is_some() {
            return Err(IngestError::DuplicateOrdinal(ordinal));
        }
        slots[ordinal] = Some(Step {
            parent: Some(parent),
            child,
            edge: Some(element.edge),
            is_return,
        });
    }

    for (ordinal, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(step) => diagram.push_step(step),
            None => return Err(IngestError::MissingOrdinal(ordinal)),
        }
    }

    tracing::debug!(frames = diagram.frame_count(), steps = diagram.len(), "graph ingested");
    Ok(diagram)
}

/// Extract the step ordinal embedded as `(#<ordinal>)` in an edge's text.
fn parse_ordinal(text: &str) -> Result<usize, IngestError> {
    let after = text
        .split_once(ORDINAL_MARKER)
        .map(|(_, rest)| rest)
        .ok_or_else(|| IngestError::BadOrdinal(text.to_owned()))?;
    after
        .trim_end()
        .trim_end_matches(')')
        .trim()
        .parse()
        .map_err(|_| IngestError::BadOrdinal(text.to_owned()))
}

/// The descriptive part of an edge's text, before the ordinal marker.
fn text_before_ordinal(text: &str) -> String {
    text.split_once(ORDINAL_MARKER)
        .map_or(text, |(before, _)| before)
        .trim()
        .to_owned()
}

fn resolve(by_title: &HashMap<&str, FrameId>, title: &str) -> Result<FrameId, IngestError> {
    by_title
        .get(title)
        .copied()
        .ok_or_else(|| IngestError::UnknownFrame(title.to_owned()))
}
