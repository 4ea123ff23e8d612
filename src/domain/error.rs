//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent taxonomy and layout rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("taxonomy has no streams")]
    EmptyTaxonomy,

    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("invalid node {key:?}: {message}")]
    InvalidNode { key: String, message: String },

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("node {id} is at depth {depth}, max is {max}")]
    TooDeep {
        id: NodeId,
        depth: usize,
        max: usize,
    },

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("invalid layout config: {0}")]
    InvalidLayout(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
