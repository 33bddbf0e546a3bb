//! Input call-tree model.
//!
//! Hosts hand the layout path a rooted tree of labelled calls. The historical
//! input shape was duck-typed (`children` sometimes absent, sometimes null,
//! sometimes empty); deserialization normalizes all three to the same thing,
//! an empty child list, so a leaf has exactly one representation.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use serde::{Deserialize, Deserializer, Serialize};

/// One call in the input tree: a display label plus ordered child calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display label, e.g. `"fib(3)"`.
    pub label: String,
    /// Ordered child calls; empty for a leaf. Absent or `null` in the source
    /// document deserializes to empty.
    #[serde(default, deserialize_with = "children_or_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// A leaf call with the given label.
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self { label: label.into(), children: Vec::new() }
    }

    /// A call with child calls.
    #[must_use]
    pub fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self { label: label.into(), children }
    }

    /// Number of calls in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// Accept `null` wherever a child list is expected.
fn children_or_empty<'de, D>(deserializer: D) -> Result<Vec<TreeNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let children = Option::<Vec<TreeNode>>::deserialize(deserializer)?;
    Ok(children.unwrap_or_default())
}
