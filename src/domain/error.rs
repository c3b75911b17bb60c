//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent tree invariant violations and stale row indices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("row index {index} out of range (visible rows: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("node already attached to a parent: {0}")]
    AlreadyAttached(String),

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("node has an empty title: {0}")]
    EmptyTitle(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
