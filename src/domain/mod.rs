//! Domain layer: forest, builder and projector
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod projector;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::{ForestBuilder, NodeSpec};
pub use error::{DomainError, DomainResult};
pub use projector::{ReprojectStrategy, Row, TreeProjector};
