//! Renderer handoff: layout combined with theme styling.

use serde::Serialize;

use crate::domain::{Bounds, Edge, LayoutResult, NodeRole, NodeStyle, PositionedNode, Theme};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    #[serde(flatten)]
    pub node: PositionedNode,
    pub role: NodeRole,
    pub style: NodeStyle,
}

/// Everything a diagram renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<Edge>,
    pub bounds: Option<Bounds>,
}

impl Scene {
    pub fn from_layout(layout: LayoutResult, theme: &Theme) -> Self {
        let bounds = layout.bounds();
        let nodes = layout
            .nodes
            .into_iter()
            .map(|node| {
                let role = NodeRole::classify(node.depth, node.has_children);
                let style = theme.style(node.depth, role, &node.color, node.expanded);
                SceneNode { node, role, style }
            })
            .collect();
        Self {
            nodes,
            edges: layout.edges,
            bounds,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
