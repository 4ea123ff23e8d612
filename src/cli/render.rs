/*
Terminal tree rendering for the career tree.
 */
use generational_arena::Index;
use termtree::Tree;

use crate::cli::output::paint;
use crate::domain::{CareerTree, ExpansionState, TreeNode};

pub trait TreeRender {
    /// Whole taxonomy, optionally with ids.
    fn to_full_tree(&self, show_ids: bool) -> Tree<String>;

    /// Only what the diagram would show under `state`, with expand markers.
    fn to_visible_tree(&self, state: &ExpansionState) -> Tree<String>;
}

fn marker(node: &TreeNode, state: &ExpansionState) -> &'static str {
    match (node.has_children(), state.is_expanded(node.data.id.as_str())) {
        (true, true) => "▾",
        (true, false) => "▸",
        (false, _) if node.data.details.is_some() => "•",
        (false, _) => "·",
    }
}

impl TreeRender for CareerTree {
    fn to_full_tree(&self, show_ids: bool) -> Tree<String> {
        fn build(tree: &CareerTree, idx: Index, show_ids: bool) -> Option<Tree<String>> {
            let node = tree.get_node(idx)?;
            let label = paint(&node.data.label, &node.data.color).to_string();
            let text = if show_ids {
                format!("{} ({})", label, node.data.id)
            } else {
                label
            };
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|&child| build(tree, child, show_ids))
                .collect();
            Some(Tree::new(text).with_leaves(leaves))
        }

        self.root()
            .and_then(|root| build(self, root, show_ids))
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }

    fn to_visible_tree(&self, state: &ExpansionState) -> Tree<String> {
        fn build(tree: &CareerTree, idx: Index, state: &ExpansionState) -> Option<Tree<String>> {
            let node = tree.get_node(idx)?;
            let text = format!(
                "{} {}",
                marker(node, state),
                paint(&node.data.label, &node.data.color)
            );
            let leaves: Vec<_> = if state.is_expanded(node.data.id.as_str()) {
                node.children
                    .iter()
                    .filter_map(|&child| build(tree, child, state))
                    .collect()
            } else {
                Vec::new()
            };
            Some(Tree::new(text).with_leaves(leaves))
        }

        self.root()
            .and_then(|root| build(self, root, state))
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}
