//! Expandable hierarchical list projector.
//!
//! A [`domain::TreeProjector`] owns a forest of labeled nodes and flattens it
//! into the ordered rows a linear list renderer draws: a node is listed only
//! when every ancestor is expanded, and each visible subtree sits directly
//! below its parent row.
//!
//! ```
//! use treeflat::domain::{ForestBuilder, NodeSpec, TreeProjector};
//!
//! let forest = ForestBuilder::new()
//!     .build(vec![NodeSpec::new("a", "A").children([
//!         NodeSpec::new("b", "B"),
//!         NodeSpec::new("c", "C").child(NodeSpec::new("d", "D")),
//!     ])])
//!     .unwrap();
//! let mut projector = TreeProjector::new(forest);
//! assert_eq!(projector.count(), 1);
//!
//! projector.toggle(0).unwrap();
//! let titles: Vec<_> = projector.rows().map(|r| r.node.data.title.as_str()).collect();
//! assert_eq!(titles, ["A", "B", "C"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
