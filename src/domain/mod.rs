//! Domain layer: career taxonomy, expansion state and layout
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod expansion;
pub mod layout;
pub mod theme;

pub use arena::{CareerTree, NodeData, TreeNode};
pub use builder::{TreeBuilder, DEFAULT_MAX_DEPTH};
pub use catalog::builtin_taxonomy;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use expansion::{ExpansionState, ToggleOutcome};
pub use layout::{generate_layout, Bounds, Edge, LayoutConfig, LayoutResult, Point, PositionedNode};
pub use theme::{NodeRole, NodeStyle, Theme};
