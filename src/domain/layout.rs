//! Deterministic diagram layout for the visible part of the career tree.
//!
//! The root sits centered above the stream slots, streams are spaced by a
//! constant, and the children of every expanded node form a row centered
//! under their parent. Horizontal spacing shrinks with depth; vertical
//! spacing is constant per level. The layout is recomputed from scratch on
//! every call.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::{CareerTree, TreeNode};
use crate::domain::entities::NodeId;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::expansion::ExpansionState;

/// Layout constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// X of the first stream slot
    pub origin_x: f64,
    /// Y of the root
    pub root_y: f64,
    /// Horizontal distance between stream slots
    pub stream_spacing: f64,
    /// Vertical distance between depth levels
    pub level_height: f64,
    /// Sibling spacing for children of a parent at depth 1, 2, ...;
    /// deeper parents reuse the last entry
    pub level_spacing: Vec<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            root_y: 0.0,
            stream_spacing: 300.0,
            level_height: 180.0,
            level_spacing: vec![250.0, 180.0, 160.0, 140.0, 120.0, 100.0],
        }
    }
}

impl LayoutConfig {
    /// Sibling spacing for the children of a parent at `parent_depth`.
    pub fn spacing_for(&self, parent_depth: usize) -> f64 {
        let idx = parent_depth
            .saturating_sub(1)
            .min(self.level_spacing.len().saturating_sub(1));
        self.level_spacing
            .get(idx)
            .copied()
            .unwrap_or(self.stream_spacing)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.origin_x.is_finite() || !self.root_y.is_finite() {
            return Err(DomainError::InvalidLayout(
                "origin_x and root_y must be finite".to_string(),
            ));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.stream_spacing) {
            return Err(DomainError::InvalidLayout(format!(
                "stream_spacing must be positive, got {}",
                self.stream_spacing
            )));
        }
        if !positive(self.level_height) {
            return Err(DomainError::InvalidLayout(format!(
                "level_height must be positive, got {}",
                self.level_height
            )));
        }
        if self.level_spacing.is_empty() {
            return Err(DomainError::InvalidLayout(
                "level_spacing must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self.level_spacing.iter().find(|&&s| !positive(s)) {
            return Err(DomainError::InvalidLayout(format!(
                "level_spacing entries must be positive, got {}",
                bad
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A visible node with its diagram coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub label: String,
    pub color: String,
    pub position: Point,
    pub depth: usize,
    pub has_children: bool,
    pub has_details: bool,
    pub expanded: bool,
}

/// Connector from a parent to one of its visible children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// The child's color
    pub color: String,
}

/// Axis-aligned box around all node positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

impl LayoutResult {
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Visible children of `id`, in layout order.
    pub fn children_of(&self, id: &str) -> Vec<&PositionedNode> {
        self.edges
            .iter()
            .filter(|e| e.source.as_str() == id)
            .filter_map(|e| self.node(e.target.as_str()))
            .collect()
    }

    /// None for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?.position;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.nodes.iter().fold(init, |b, n| Bounds {
            min_x: b.min_x.min(n.position.x),
            min_y: b.min_y.min(n.position.y),
            max_x: b.max_x.max(n.position.x),
            max_y: b.max_y.max(n.position.y),
        }))
    }
}

/// Compute positions and edges for every node visible under `state`.
///
/// Pure and total: an empty tree yields an empty layout.
#[instrument(level = "debug", skip_all, fields(expanded = state.len()))]
pub fn generate_layout(
    tree: &CareerTree,
    state: &ExpansionState,
    config: &LayoutConfig,
) -> LayoutResult {
    let mut placer = Placer {
        tree,
        state,
        config,
        result: LayoutResult::default(),
    };
    placer.place_root();
    placer.result
}

struct Placer<'a> {
    tree: &'a CareerTree,
    state: &'a ExpansionState,
    config: &'a LayoutConfig,
    result: LayoutResult,
}

impl Placer<'_> {
    fn place_root(&mut self) {
        let Some(root) = self.tree.root_node() else {
            return;
        };
        let streams = self.tree.children_of(root);
        let slots = streams.len().saturating_sub(1) as f64;
        let root_pos = Point {
            x: self.config.origin_x + slots * self.config.stream_spacing / 2.0,
            y: self.config.root_y,
        };
        let root_expanded = self.push_node(root, root_pos);
        if !root_expanded {
            return;
        }

        let stream_y = root_pos.y + self.config.level_height;
        for (i, stream) in streams.into_iter().enumerate() {
            let pos = Point {
                x: self.config.origin_x + i as f64 * self.config.stream_spacing,
                y: stream_y,
            };
            self.place(root, stream, pos);
        }
    }

    /// Emit `node` with its incoming edge, then its row of children if expanded.
    fn place(&mut self, parent: &TreeNode, node: &TreeNode, pos: Point) {
        self.result.edges.push(Edge {
            source: parent.data.id.clone(),
            target: node.data.id.clone(),
            color: node.data.color.clone(),
        });
        if !self.push_node(node, pos) {
            return;
        }

        let children = self.tree.children_of(node);
        let count = children.len() as f64;
        let spacing = self.config.spacing_for(node.data.depth);
        let child_y = pos.y + self.config.level_height;
        for (i, child) in children.into_iter().enumerate() {
            let child_pos = Point {
                x: pos.x + (i as f64 - count / 2.0 + 0.5) * spacing,
                y: child_y,
            };
            self.place(node, child, child_pos);
        }
    }

    /// Returns whether the node's children should be laid out.
    fn push_node(&mut self, node: &TreeNode, position: Point) -> bool {
        // A leaf id can sit in the set after a toggle; it still has nothing to show
        let expanded = node.has_children() && self.state.is_expanded(node.data.id.as_str());
        self.result.nodes.push(PositionedNode {
            id: node.data.id.clone(),
            label: node.data.label.clone(),
            color: node.data.color.clone(),
            position,
            depth: node.data.depth,
            has_children: node.has_children(),
            has_details: node.data.details.is_some(),
            expanded,
        });
        expanded
    }
}
