//! Domain entities: the authored career taxonomy

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Identifier of the synthetic root node.
pub const ROOT_ID: &str = "root";

/// Stable unique identifier of a node in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// Id of a child node derived from its key.
    ///
    /// Streams (children of the root) use the bare key.
    pub fn child(&self, key: &str) -> Self {
        if self.is_root() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Leaf payload shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, alias = "avgSalary")]
    pub avg_salary: String,
}

/// One entry of the authored taxonomy.
///
/// `children` keeps the authored order, which is the layout order.
/// An empty list means the node is a potential leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerNode {
    /// Key of this node within its parent
    pub key: String,
    /// Explicit id; derived from the key path when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CareerNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl CareerNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

fn default_root_label() -> String {
    "Career Paths".to_string()
}

fn default_root_color() -> String {
    "slate".to_string()
}

/// The authored document: a synthetic root over the top-level streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default = "default_root_label")]
    pub label: String,
    #[serde(default = "default_root_color")]
    pub color: String,
    #[serde(default, rename = "stream")]
    pub streams: Vec<CareerNode>,
}

impl Taxonomy {
    pub fn from_toml_str(content: &str) -> DomainResult<Self> {
        toml::from_str(content).map_err(|e| DomainError::InvalidTaxonomy(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> DomainResult<Self> {
        serde_json::from_str(content).map_err(|e| DomainError::InvalidTaxonomy(e.to_string()))
    }
}
