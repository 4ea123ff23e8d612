//! Tree builder for flattening an authored taxonomy into a career tree.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::{CareerTree, NodeData};
use crate::domain::entities::{CareerNode, NodeId, Taxonomy, ROOT_ID};
use crate::domain::error::{DomainError, DomainResult};

/// Deepest level a node may sit at (root is 0, streams are 1).
pub const DEFAULT_MAX_DEPTH: usize = 7;

/// Constructs a `CareerTree` from an authored `Taxonomy`.
pub struct TreeBuilder {
    max_depth: usize,
    seen_ids: HashSet<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl TreeBuilder {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            seen_ids: HashSet::new(),
        }
    }

    /// Build the arena tree, validating ids and depth.
    #[instrument(level = "debug", skip(self, taxonomy))]
    pub fn build(&mut self, taxonomy: &Taxonomy) -> DomainResult<CareerTree> {
        if taxonomy.streams.is_empty() {
            return Err(DomainError::EmptyTaxonomy);
        }
        self.seen_ids.clear();

        let mut tree = CareerTree::new();
        let root_id = NodeId::root();
        self.seen_ids.insert(root_id.clone());
        let root_idx = tree.insert_node(
            NodeData {
                id: root_id.clone(),
                key: ROOT_ID.to_string(),
                label: taxonomy.label.clone(),
                color: taxonomy.color.clone(),
                depth: 0,
                details: None,
            },
            None,
        );

        // Reverse push so siblings are inserted in authored order
        let mut stack: Vec<(&CareerNode, Index, NodeId, usize)> = taxonomy
            .streams
            .iter()
            .rev()
            .map(|stream| (stream, root_idx, root_id.clone(), 1))
            .collect();

        while let Some((node, parent_idx, parent_id, depth)) = stack.pop() {
            let id = self.assign_id(node, &parent_id)?;
            if depth > self.max_depth {
                return Err(DomainError::TooDeep {
                    id,
                    depth,
                    max: self.max_depth,
                });
            }
            if node.has_children() && node.details.is_some() {
                warn!("node {} has children and details, children take priority", id);
            }

            let current_idx = tree.insert_node(
                NodeData {
                    id: id.clone(),
                    key: node.key.clone(),
                    label: node.label.clone(),
                    color: node.color.clone(),
                    depth,
                    details: node.details.clone(),
                },
                Some(parent_idx),
            );

            for child in node.children.iter().rev() {
                stack.push((child, current_idx, id.clone(), depth + 1));
            }
        }

        debug!("built career tree with {} nodes", tree.len());
        Ok(tree)
    }

    fn assign_id(&mut self, node: &CareerNode, parent_id: &NodeId) -> DomainResult<NodeId> {
        if node.key.trim().is_empty() {
            return Err(DomainError::InvalidNode {
                key: node.key.clone(),
                message: "key must not be empty".to_string(),
            });
        }
        let id = match &node.id {
            Some(explicit) if explicit.trim().is_empty() => {
                return Err(DomainError::InvalidNode {
                    key: node.key.clone(),
                    message: "explicit id must not be empty".to_string(),
                })
            }
            Some(explicit) => NodeId::new(explicit.clone()),
            None => parent_id.child(&node.key),
        };
        if !self.seen_ids.insert(id.clone()) {
            return Err(DomainError::DuplicateId(id));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: &str, children: Vec<CareerNode>) -> CareerNode {
        CareerNode {
            key: key.to_string(),
            id: None,
            label: key.to_uppercase(),
            color: "teal".to_string(),
            children,
            details: None,
        }
    }

    fn taxonomy(streams: Vec<CareerNode>) -> Taxonomy {
        Taxonomy {
            label: "Careers".to_string(),
            color: "slate".to_string(),
            streams,
        }
    }

    #[test]
    fn given_nested_taxonomy_when_building_then_derives_ids_and_depths() {
        let tax = taxonomy(vec![node("a", vec![node("x", vec![node("deep", vec![])])])]);
        let tree = TreeBuilder::default().build(&tax).unwrap();

        assert_eq!(tree.len(), 4);
        let deep = tree.get_by_id("a.x.deep").unwrap();
        assert_eq!(deep.data.depth, 3);
        assert_eq!(tree.root_node().unwrap().data.label, "Careers");
    }

    #[test]
    fn given_sibling_order_when_building_then_preserves_authored_order() {
        let tax = taxonomy(vec![node("a", vec![node("z", vec![]), node("m", vec![])]), node("b", vec![])]);
        let tree = TreeBuilder::default().build(&tax).unwrap();
        let ids: Vec<_> = tree.iter().map(|(_, n)| n.data.id.to_string()).collect();
        assert_eq!(ids, vec!["root", "a", "a.z", "a.m", "b"]);
    }

    #[test]
    fn given_explicit_duplicate_id_when_building_then_errors() {
        let mut dup = node("y", vec![]);
        dup.id = Some("a.x".to_string());
        let tax = taxonomy(vec![node("a", vec![node("x", vec![]), dup])]);
        let result = TreeBuilder::default().build(&tax);
        assert!(matches!(result, Err(DomainError::DuplicateId(id)) if id.as_str() == "a.x"));
    }

    #[test]
    fn given_stream_named_root_when_building_then_errors() {
        let tax = taxonomy(vec![node("root", vec![])]);
        assert!(matches!(
            TreeBuilder::default().build(&tax),
            Err(DomainError::DuplicateId(_))
        ));
    }

    #[test]
    fn given_node_beyond_max_depth_when_building_then_errors() {
        let tax = taxonomy(vec![node("a", vec![node("b", vec![node("c", vec![])])])]);
        let result = TreeBuilder::new(2).build(&tax);
        assert!(matches!(result, Err(DomainError::TooDeep { depth: 3, max: 2, .. })));
    }

    #[test]
    fn given_empty_key_when_building_then_errors() {
        let tax = taxonomy(vec![node(" ", vec![])]);
        assert!(matches!(
            TreeBuilder::default().build(&tax),
            Err(DomainError::InvalidNode { .. })
        ));
    }

    #[test]
    fn given_no_streams_when_building_then_errors() {
        assert!(matches!(
            TreeBuilder::default().build(&taxonomy(vec![])),
            Err(DomainError::EmptyTaxonomy)
        ));
    }
}
