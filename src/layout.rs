//! Depth-first frame placement for the call tree.
//!
//! Positions every call of a [`TreeNode`] tree on a fixed row grid so that
//! sibling subtrees get disjoint horizontal slots. The slot math is the
//! long-standing heuristic this tool has always drawn with: the root sits at
//! the horizontal center, and each level divides the drawing width by
//! `fan^depth` so deeper rows compress proportionally. Three-way fan-out is
//! special-cased to pin the middle child directly beneath its parent.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::Serialize;

use crate::consts::{FRAME_WIDTH, ROW_HEIGHT};
use crate::tree::TreeNode;

/// Error returned by [`layout`].
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The drawing width must be a positive, finite number.
    #[error("invalid drawing width: {0}")]
    InvalidWidth(f64),
}

/// A call with its computed position. Produced in DFS pre-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode<'a> {
    /// The call's display label.
    pub label: &'a str,
    /// Tree depth; the root is 0.
    pub depth: usize,
    /// Horizontal center of the frame.
    pub x: f64,
    /// Vertical position, `depth` rows down.
    pub y: f64,
    /// Index of the caller in the pre-order output; `None` for the root.
    pub parent: Option<usize>,
}

/// Place every call of the tree within `width`, root centered on top.
///
/// The output is in DFS pre-order, which is also the execution order the
/// step sequence follows on this path.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidWidth`] when `width` is zero, negative, or
/// not finite.
pub fn layout<'a>(root: &'a TreeNode, width: f64) -> Result<Vec<PlacedNode<'a>>, LayoutError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(LayoutError::InvalidWidth(width));
    }
    let mut placed = Vec::with_capacity(root.count());
    place(root, 0, width / 2.0, None, width, &mut placed);
    tracing::debug!(frames = placed.len(), width, "tree laid out");
    Ok(placed)
}

fn place<'a>(
    node: &'a TreeNode,
    depth: usize,
    x: f64,
    parent: Option<usize>,
    width: f64,
    placed: &mut Vec<PlacedNode<'a>>,
) {
    let index = placed.len();
    #[allow(clippy::cast_precision_loss)]
    let y = depth as f64 * ROW_HEIGHT;
    placed.push(PlacedNode { label: &node.label, depth, x, y, parent });

    let fan = node.children.len();
    if fan == 0 {
        return;
    }

    let child_depth = depth + 1;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let slots_at_depth = (fan as f64).powi(child_depth as i32);
    let gap = (width - FRAME_WIDTH * slots_at_depth) / (slots_at_depth + 1.0);
    // Odd-fan-out tie-break: three children pin the middle one under the
    // parent and offset the outer two symmetrically.
    let start = if fan == 3 {
        x - (gap + FRAME_WIDTH)
    } else {
        x - (gap / 2.0 + FRAME_WIDTH / 2.0)
    };

    for (i, child) in node.children.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let child_x = start + i as f64 * (gap + FRAME_WIDTH);
        place(child, child_depth, child_x, Some(index), width, placed);
    }
}
