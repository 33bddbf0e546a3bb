//! Stepping core for interactive recursion call-tree diagrams.
//!
//! This crate owns the logic behind a "watch the recursion run" view: it
//! turns a rooted call tree (or a pre-rendered execution graph) into an
//! ordered sequence of discrete execution steps, computes overlap-free 2-D
//! placement for the tree's frames, and maintains a current-step cursor
//! whose movements deterministically recompute which frames and connectors
//! render as activated. The host application wires real widgets and a real
//! drawing layer to the [`render::Surface`] seam and the
//! [`input::ControlState`] mirror; this crate never touches presentation.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] facade: build, dispatch, re-render |
//! | [`tree`] | Input call-tree model |
//! | [`layout`] | Depth-first frame placement |
//! | [`ingest`] | Pre-rendered graph markup parsing |
//! | [`doc`] | Diagram document: frames, edges, steps, activation state |
//! | [`sequencer`] | Cursor state machine and activation recomputation |
//! | [`input`] | Control events and the derived widget state |
//! | [`render`] | Rendering-collaborator seam and the sync pass |
//! | [`trace`] | Execution recorder that emits ingestable markup |
//! | [`consts`] | Shared numeric constants (frame width, row height, budgets) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod ingest;
pub mod input;
pub mod layout;
pub mod render;
pub mod sequencer;
pub mod trace;
pub mod tree;

pub use doc::{Diagram, Edge, EdgeId, Frame, FrameId, Step, StepRole};
pub use engine::Engine;
pub use ingest::{EdgeElement, GraphMarkup, IngestError, NodeElement, ingest};
pub use input::{ControlEvent, ControlState, Key};
pub use layout::{LayoutError, PlacedNode, layout};
pub use render::Surface;
pub use sequencer::Sequencer;
pub use trace::{Recorder, TraceError};
pub use tree::TreeNode;
