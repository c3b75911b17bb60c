//! Forest builder: turns owned node literals into an arena-backed forest.

use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::error::DomainResult;

/// Owned, declarative description of a node and its subtree.
///
/// Children are held by value, so a spec can never be shared between two
/// parents or contain itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub data: NodeData,
    /// Per-node override of the builder's initial expansion state
    pub expanded: Option<bool>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            data: NodeData::new(id, title),
            expanded: None,
            children: Vec::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.data.subtitle = Some(subtitle.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.data.icon = icon.into();
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Constructs a [`TreeArena`] from node specs.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    initially_expanded: bool,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expansion state for nodes whose spec does not set one.
    pub fn initially_expanded(mut self, expanded: bool) -> Self {
        self.initially_expanded = expanded;
        self
    }

    /// Build one forest from `roots`, preserving root and sibling order.
    #[instrument(level = "debug", skip(self, roots), fields(roots = roots.len()))]
    pub fn build(&self, roots: Vec<NodeSpec>) -> DomainResult<TreeArena> {
        let mut tree = TreeArena::new();

        for root in roots {
            let mut stack = vec![(root, None)];

            while let Some((spec, parent_idx)) = stack.pop() {
                let NodeSpec {
                    data,
                    expanded,
                    children,
                } = spec;
                let expanded = expanded.unwrap_or(self.initially_expanded);

                let current_idx = match parent_idx {
                    Some(parent) => tree.attach(parent, data, expanded)?,
                    None => tree.insert_root(data, expanded)?,
                };

                // Reverse so the first child is popped (and attached) first
                for child in children.into_iter().rev() {
                    stack.push((child, Some(current_idx)));
                }
            }
        }

        debug!("built forest with {} nodes", tree.len());
        Ok(tree)
    }
}
