use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{Details, NodeId};

/// Data payload for tree nodes representing taxonomy entries.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: NodeId,
    /// Key within the parent, `root` for the synthetic root
    pub key: String,
    pub label: String,
    pub color: String,
    /// Root is 0, streams are 1
    pub depth: usize,
    pub details: Option<Details>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in authored order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Arena-based career tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups,
/// plus an id index so callers can address nodes by their stable id.
#[derive(Debug)]
pub struct CareerTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
    ids: HashMap<NodeId, Index>,
}

impl Default for CareerTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CareerTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            ids: HashMap::new(),
        }
    }

    /// Insert a node under `parent`, or as the root when `parent` is None.
    ///
    /// Id uniqueness is the caller's concern; see `TreeBuilder`.
    #[instrument(level = "trace", skip(self, data), fields(id = %data.id))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let id = data.id.clone();
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }
        self.ids.insert(id, node_idx);

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&TreeNode> {
        self.index_of(id).and_then(|idx| self.get_node(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Top-level stream nodes in authored order.
    pub fn streams(&self) -> Vec<&TreeNode> {
        self.root_node()
            .map(|root| self.children_of(root))
            .unwrap_or_default()
    }

    pub fn children_of(&self, node: &TreeNode) -> Vec<&TreeNode> {
        node.children
            .iter()
            .filter_map(|&child| self.get_node(child))
            .collect()
    }

    /// Preorder traversal starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Ids of every node below `id` in preorder, excluding `id` itself.
    ///
    /// Walks the static tree, independent of any expansion state.
    #[instrument(level = "trace", skip(self))]
    pub fn descendants(&self, id: &str) -> Vec<NodeId> {
        let Some(start) = self.index_of(id) else {
            return Vec::new();
        };
        TreeIterator::new(self, Some(start))
            .skip(1)
            .map(|(_, node)| node.data.id.clone())
            .collect()
    }

    /// Ids from the root down to `id`, both included.
    pub fn path_to(&self, id: &str) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.index_of(id);
        while let Some(idx) = current {
            match self.get_node(idx) {
                Some(node) => {
                    path.push(node.data.id.clone());
                    current = node.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Number of levels, counting the root as one.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<&TreeNode> {
        self.iter()
            .filter(|(_, node)| !node.has_children() && node.parent.is_some())
            .map(|(_, node)| node)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a CareerTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a CareerTree, start: Option<Index>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
