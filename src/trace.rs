//! Execution recording: turns a live recursive run into rendered-graph
//! markup.
//!
//! An instrumented function reports `enter` at each call and `leave` at each
//! return. The recorder maintains the call stack, numbers every recorded
//! call edge and return edge with one shared dense ordinal sequence (calls
//! and returns interleave in true execution order), and emits the same
//! [`GraphMarkup`] the ingest path consumes. When the root call returns, a
//! synthetic `result` frame with a final return edge carries the run's
//! return value.
//!
//! A call budget bounds runaway recursion; an exhausted budget aborts the
//! run with an error instead of growing without limit.

#[cfg(test)]
#[path = "trace_test.rs"]
mod trace_test;

use uuid::Uuid;

use crate::consts::DEFAULT_CALL_BUDGET;
use crate::doc::FrameId;
use crate::ingest::{EdgeElement, GraphMarkup, NodeElement};
use crate::tree::TreeNode;

/// Title of the synthetic frame carrying the root call's return value.
const RESULT_TITLE: &str = "result";

/// Error returned by the recorder.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The run recorded more calls than the configured budget allows.
    #[error("call budget of {0} exceeded")]
    CallBudgetExceeded(usize),
    /// `leave` was reported with no call in progress.
    #[error("no call in progress")]
    NoOpenCall,
}

struct CallRecord {
    frame: FrameId,
    title: String,
    label: String,
    ret: Option<String>,
}

struct RecordedEdge {
    parent: usize,
    child: usize,
    ordinal: usize,
    is_return: bool,
    ret: Option<String>,
}

/// Records enter/leave events of one recursive run.
pub struct Recorder {
    budget: usize,
    calls: Vec<CallRecord>,
    stack: Vec<usize>,
    edges: Vec<RecordedEdge>,
    next_ordinal: usize,
    root_return: Option<usize>,
}

impl Recorder {
    /// Recorder with the default call budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_CALL_BUDGET)
    }

    /// Recorder accepting at most `budget` calls.
    #[must_use]
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            calls: Vec::new(),
            stack: Vec::new(),
            edges: Vec::new(),
            next_ordinal: 0,
            root_return: None,
        }
    }

    /// Record a call being entered. The first call is the root and records
    /// no step; every later call records a call edge from its caller with
    /// the next ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::CallBudgetExceeded`] once the budget is
    /// reached; the run should be abandoned at that point.
    pub fn enter(&mut self, label: impl Into<String>) -> Result<(), TraceError> {
        if self.calls.len() >= self.budget {
            return Err(TraceError::CallBudgetExceeded(self.budget));
        }
        let index = self.calls.len();
        if let Some(&parent) = self.stack.last() {
            self.edges.push(RecordedEdge {
                parent,
                child: index,
                ordinal: self.next_ordinal,
                is_return: false,
                ret: None,
            });
            self.next_ordinal += 1;
        }
        self.calls.push(CallRecord {
            frame: Uuid::new_v4(),
            title: format!("f{index}"),
            label: label.into(),
            ret: None,
        });
        self.stack.push(index);
        Ok(())
    }

    /// Record the deepest open call returning `ret`. A non-root return
    /// records a return edge with the next ordinal; the root's return is
    /// held back and emitted by [`Recorder::finish`] on the synthetic
    /// `result` frame.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::NoOpenCall`] when every recorded call has
    /// already returned.
    pub fn leave(&mut self, ret: impl Into<String>) -> Result<(), TraceError> {
        let index = self.stack.pop().ok_or(TraceError::NoOpenCall)?;
        let ret = ret.into();
        self.calls[index].ret = Some(ret.clone());
        if let Some(&parent) = self.stack.last() {
            self.edges.push(RecordedEdge {
                parent,
                child: index,
                ordinal: self.next_ordinal,
                is_return: true,
                ret: Some(ret),
            });
            self.next_ordinal += 1;
        } else if index == 0 {
            self.root_return = Some(self.next_ordinal);
            self.next_ordinal += 1;
        }
        Ok(())
    }

    /// Number of calls recorded so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// The recorded call tree with the labels given to `enter`, suitable for
    /// the layout path. `None` before the first call.
    #[must_use]
    pub fn tree(&self) -> Option<TreeNode> {
        if self.calls.is_empty() {
            return None;
        }
        Some(self.subtree(0))
    }

    fn subtree(&self, index: usize) -> TreeNode {
        let children = self
            .edges
            .iter()
            .filter(|edge| !edge.is_return && edge.parent == index)
            .map(|edge| self.subtree(edge.child))
            .collect();
        TreeNode { label: self.calls[index].label.clone(), children }
    }

    /// Emit the run as rendered-graph markup.
    ///
    /// Node titles are the recorder's stable frame identifiers (`f0`,
    /// `f1`, …); call edges are titled `parent->child` with text
    /// `(#<ordinal>)`; return edges are titled `parent->child:c` with text
    /// `<ret> (#<ordinal>)`. Ordinals densely cover the recorded sequence,
    /// so the output ingests cleanly by construction.
    #[must_use]
    pub fn finish(self) -> GraphMarkup {
        let mut nodes: Vec<NodeElement> = self
            .calls
            .iter()
            .map(|call| NodeElement { frame: call.frame, title: call.title.clone() })
            .collect();

        let mut edges: Vec<EdgeElement> = self
            .edges
            .iter()
            .map(|edge| {
                let parent = &self.calls[edge.parent].title;
                let child = &self.calls[edge.child].title;
                if edge.is_return {
                    EdgeElement {
                        edge: Uuid::new_v4(),
                        title: format!("{parent}->{child}:c"),
                        text: format!(
                            "{} (#{})",
                            edge.ret.clone().unwrap_or_default(),
                            edge.ordinal
                        ),
                    }
                } else {
                    EdgeElement {
                        edge: Uuid::new_v4(),
                        title: format!("{parent}->{child}"),
                        text: format!("(#{})", edge.ordinal),
                    }
                }
            })
            .collect();

        if let Some(ordinal) = self.root_return {
            let root = &self.calls[0];
            nodes.push(NodeElement { frame: Uuid::new_v4(), title: RESULT_TITLE.to_owned() });
            edges.push(EdgeElement {
                edge: Uuid::new_v4(),
                title: format!("{RESULT_TITLE}->{}:c", root.title),
                text: format!("{} (#{ordinal})", root.ret.clone().unwrap_or_default()),
            });
        }

        tracing::debug!(calls = nodes.len(), steps = edges.len(), "run recorded");
        GraphMarkup { nodes, edges }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}
