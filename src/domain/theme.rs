//! Node styling lookup, kept apart from the layout algorithm.
//!
//! Styles come from two explicit tables: box metrics indexed by depth, and
//! fill/border rules indexed by the node's role.

use serde::Serialize;

/// Semantic role of a node in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Root,
    Stream,
    Branch,
    Leaf,
}

impl NodeRole {
    pub fn classify(depth: usize, has_children: bool) -> Self {
        match (depth, has_children) {
            (0, _) => NodeRole::Root,
            (1, _) => NodeRole::Stream,
            (_, true) => NodeRole::Branch,
            (_, false) => NodeRole::Leaf,
        }
    }
}

/// Box size and font size for one depth level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthMetrics {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
}

/// Resolved style for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub border_width: f64,
    pub fill: String,
    pub border: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    depth_metrics: Vec<DepthMetrics>,
    root_fill: String,
    text_light: String,
    text_dark: String,
    leaf_fill: String,
}

impl Default for Theme {
    fn default() -> Self {
        let metrics = |width, height, font_size| DepthMetrics {
            width,
            height,
            font_size,
        };
        Self {
            depth_metrics: vec![
                metrics(220.0, 64.0, 18.0),
                metrics(200.0, 56.0, 16.0),
                metrics(180.0, 52.0, 15.0),
                metrics(160.0, 48.0, 14.0),
                metrics(140.0, 44.0, 13.0),
                metrics(124.0, 40.0, 12.0),
                metrics(110.0, 38.0, 11.0),
                metrics(96.0, 36.0, 10.0),
            ],
            root_fill: "#1f2937".to_string(),
            text_light: "#ffffff".to_string(),
            text_dark: "#111827".to_string(),
            leaf_fill: "#ffffff".to_string(),
        }
    }
}

impl Theme {
    /// Metrics for `depth`; deeper levels reuse the last row.
    pub fn metrics(&self, depth: usize) -> DepthMetrics {
        let idx = depth.min(self.depth_metrics.len().saturating_sub(1));
        self.depth_metrics.get(idx).copied().unwrap_or(DepthMetrics {
            width: 120.0,
            height: 40.0,
            font_size: 12.0,
        })
    }

    pub fn style(&self, depth: usize, role: NodeRole, color: &str, expanded: bool) -> NodeStyle {
        let m = self.metrics(depth);
        let (fill, border, text) = match role {
            NodeRole::Root => (
                self.root_fill.clone(),
                self.root_fill.clone(),
                self.text_light.clone(),
            ),
            NodeRole::Stream | NodeRole::Branch => {
                (color.to_string(), color.to_string(), self.text_light.clone())
            }
            NodeRole::Leaf => (
                self.leaf_fill.clone(),
                color.to_string(),
                self.text_dark.clone(),
            ),
        };
        NodeStyle {
            width: m.width,
            height: m.height,
            font_size: m.font_size,
            border_width: if expanded { 3.0 } else { 1.0 },
            fill,
            border,
            text,
        }
    }
}
