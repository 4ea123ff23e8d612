//! Expansion state: which nodes currently show their children.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::arena::CareerTree;
use crate::domain::entities::NodeId;

/// Result of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Node was closed and is now expanded
    Expanded,
    /// Node was expanded; `removed` counts ids dropped, the node included
    Collapsed { removed: usize },
    /// Id is not part of the tree, nothing changed
    Unknown,
}

/// Set of expanded node ids.
///
/// Starts with only the synthetic root expanded, so the streams are visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpansionState {
    expanded: BTreeSet<NodeId>,
}

impl Default for ExpansionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionState {
    pub fn new() -> Self {
        Self {
            expanded: BTreeSet::from([NodeId::root()]),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.expanded.iter()
    }

    /// Flip the expanded state of `id`.
    ///
    /// Collapsing also removes every descendant found in the static tree,
    /// so re-expanding later shows only the direct children again.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn toggle(&mut self, tree: &CareerTree, id: &str) -> ToggleOutcome {
        if !tree.contains(id) {
            debug!("toggle ignored, unknown id {}", id);
            return ToggleOutcome::Unknown;
        }
        if self.expanded.remove(id) {
            let removed = 1 + tree
                .descendants(id)
                .iter()
                .filter(|descendant| self.expanded.remove(descendant.as_str()))
                .count();
            debug!("collapsed {}, removed {} ids", id, removed);
            ToggleOutcome::Collapsed { removed }
        } else {
            self.expanded.insert(NodeId::new(id));
            ToggleOutcome::Expanded
        }
    }

    /// Expand every ancestor of `id` so the node is visible, and `id` itself
    /// when it has children to show.
    ///
    /// Returns false for unknown ids.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn reveal(&mut self, tree: &CareerTree, id: &str) -> bool {
        let Some(target) = tree.get_by_id(id) else {
            return false;
        };
        let mut path = tree.path_to(id);
        if !target.has_children() {
            path.pop();
        }
        self.expanded.extend(path);
        true
    }

    /// Back to the initial state: only the root expanded.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
