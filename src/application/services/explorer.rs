//! Career tree explorer service
//!
//! Owns the single mutable piece of state (the expansion set) together with
//! the leaf detail view, and hands out freshly computed layouts.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::scene::Scene;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    generate_layout, CareerTree, Details, DomainError, ExpansionState, LayoutConfig,
    LayoutResult, NodeId, Theme, ToggleOutcome, TreeNode,
};
use crate::infrastructure::traits::BadgeNotifier;

/// Badge awarded on the first click in the explorer.
pub const EXPLORER_BADGE: &str = "career_tree_explorer";

/// What a click on a node did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Expanded(NodeId),
    Collapsed { id: NodeId, removed: usize },
    DetailsOpened(NodeId),
    /// Leaf without details
    Ignored(NodeId),
}

/// Leaf detail dialog: closed, or open on one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    selected: Option<NodeId>,
}

impl DetailView {
    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }
}

/// Service tying the career tree, its expansion state and the detail view together.
pub struct CareerExplorer {
    tree: CareerTree,
    state: ExpansionState,
    layout_config: LayoutConfig,
    theme: Theme,
    detail: DetailView,
    notifier: Arc<dyn BadgeNotifier>,
    interacted: bool,
}

impl CareerExplorer {
    /// Create an explorer in the initial state (root expanded, detail view closed).
    pub fn new(
        tree: CareerTree,
        layout_config: LayoutConfig,
        notifier: Arc<dyn BadgeNotifier>,
    ) -> ApplicationResult<Self> {
        layout_config.validate()?;
        Ok(Self {
            tree,
            state: ExpansionState::new(),
            layout_config,
            theme: Theme::default(),
            detail: DetailView::default(),
            notifier,
            interacted: false,
        })
    }

    pub fn tree(&self) -> &CareerTree {
        &self.tree
    }

    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    pub fn detail_view(&self) -> &DetailView {
        &self.detail
    }

    /// Flip a node's expansion; unknown ids are a no-op.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        self.state.toggle(&self.tree, id)
    }

    /// Positions and edges for the current expansion state.
    pub fn layout(&self) -> LayoutResult {
        generate_layout(&self.tree, &self.state, &self.layout_config)
    }

    /// Layout plus per-node styling, ready for a renderer.
    pub fn scene(&self) -> Scene {
        Scene::from_layout(self.layout(), &self.theme)
    }

    /// Handle a click the way the diagram does: nodes with children toggle,
    /// leaves with details open the detail view, anything else is inert.
    #[instrument(level = "debug", skip(self))]
    pub fn click(&mut self, id: &str) -> ApplicationResult<ClickOutcome> {
        let node = self.node(id)?;
        let node_id = node.data.id.clone();
        let has_children = node.has_children();
        let has_details = node.data.details.is_some();
        self.record_interaction();

        let outcome = if has_children {
            match self.state.toggle(&self.tree, id) {
                ToggleOutcome::Expanded => ClickOutcome::Expanded(node_id),
                ToggleOutcome::Collapsed { removed } => ClickOutcome::Collapsed {
                    id: node_id,
                    removed,
                },
                ToggleOutcome::Unknown => ClickOutcome::Ignored(node_id),
            }
        } else if has_details {
            self.detail.selected = Some(node_id.clone());
            ClickOutcome::DetailsOpened(node_id)
        } else {
            ClickOutcome::Ignored(node_id)
        };
        debug!("click outcome: {:?}", outcome);
        Ok(outcome)
    }

    /// Details of the node shown in the detail view, if open.
    pub fn details(&self) -> Option<(&TreeNode, &Details)> {
        let id = self.detail.selected()?;
        let node = self.tree.get_by_id(id.as_str())?;
        node.data.details.as_ref().map(|d| (node, d))
    }

    pub fn close_details(&mut self) {
        self.detail = DetailView::default();
    }

    /// Expand the path down to `id` so it and its children are visible.
    pub fn reveal(&mut self, id: &str) -> ApplicationResult<()> {
        if self.state.reveal(&self.tree, id) {
            Ok(())
        } else {
            Err(DomainError::NodeNotFound(id.to_string()).into())
        }
    }

    /// Return to the initial state and close the detail view.
    pub fn reset(&mut self) {
        self.state.reset();
        self.close_details();
    }

    /// Case-insensitive match on label or id, in preorder.
    pub fn search(&self, query: &str) -> Vec<&TreeNode> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.tree
            .iter()
            .map(|(_, node)| node)
            .filter(|node| node.parent.is_some())
            .filter(|node| {
                node.data.label.to_lowercase().contains(&needle)
                    || node.data.id.as_str().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn node(&self, id: &str) -> ApplicationResult<&TreeNode> {
        self.tree
            .get_by_id(id)
            .ok_or_else(|| ApplicationError::from(DomainError::NodeNotFound(id.to_string())))
    }

    fn record_interaction(&mut self) {
        if !self.interacted {
            self.interacted = true;
            info!("first interaction, awarding badge {}", EXPLORER_BADGE);
            self.notifier.award(EXPLORER_BADGE);
        }
    }
}
