//! Projection of a forest into the ordered list of currently visible rows.
//!
//! Rows follow a pre-order depth-first walk that only descends into expanded
//! nodes, so every visible subtree sits as one contiguous block directly
//! below its parent row.

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::arena::{TreeArena, TreeNode};
use crate::domain::error::{DomainError, DomainResult};

/// How the cached rows are refreshed after a single toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReprojectStrategy {
    /// Rebuild all rows from the roots
    #[default]
    Full,
    /// Insert or remove only the toggled node's visible descendants
    Splice,
}

/// One visible row of the projection.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub index: Index,
    pub node: &'a TreeNode,
    pub level: usize,
    pub has_children: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FlatEntry {
    index: Index,
    level: usize,
}

/// Owns a forest and the cached flat projection of its visible nodes.
#[derive(Debug)]
pub struct TreeProjector {
    forest: TreeArena,
    flat: Vec<FlatEntry>,
    strategy: ReprojectStrategy,
}

impl TreeProjector {
    pub fn new(forest: TreeArena) -> Self {
        Self::with_strategy(forest, ReprojectStrategy::default())
    }

    pub fn with_strategy(forest: TreeArena, strategy: ReprojectStrategy) -> Self {
        let mut projector = Self {
            forest,
            flat: Vec::new(),
            strategy,
        };
        projector.reproject();
        projector
    }

    pub fn forest(&self) -> &TreeArena {
        &self.forest
    }

    pub fn into_forest(self) -> TreeArena {
        self.forest
    }

    pub fn strategy(&self) -> ReprojectStrategy {
        self.strategy
    }

    /// Recomputes the visible rows from the roots and returns them.
    ///
    /// Calling it repeatedly without mutations yields the same rows.
    #[instrument(level = "debug", skip(self))]
    pub fn project(&mut self) -> Vec<Row<'_>> {
        self.reproject();
        self.rows().collect()
    }

    /// Current rows without recomputation.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.flat.iter().filter_map(|entry| self.row(*entry))
    }

    pub fn count(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    pub fn node_at(&self, flat_index: usize) -> DomainResult<&TreeNode> {
        self.row_at(flat_index).map(|row| row.node)
    }

    pub fn level_at(&self, flat_index: usize) -> DomainResult<usize> {
        self.entry_at(flat_index).map(|entry| entry.level)
    }

    pub fn row_at(&self, flat_index: usize) -> DomainResult<Row<'_>> {
        let entry = self.entry_at(flat_index)?;
        self.row(entry)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{:?}", entry.index)))
    }

    /// Position of the node `id` among the visible rows.
    pub fn flat_index_of(&self, id: &str) -> Option<usize> {
        let idx = self.forest.find_by_id(id)?;
        self.flat.iter().position(|entry| entry.index == idx)
    }

    /// Flips the expansion state of the node shown at `flat_index` and
    /// refreshes the rows. Returns the node's new expansion state.
    ///
    /// A stale index fails with [`DomainError::IndexOutOfRange`] and leaves
    /// the rows untouched. Toggling a leaf is allowed and changes no rows.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle(&mut self, flat_index: usize) -> DomainResult<bool> {
        let entry = self.entry_at(flat_index)?;
        let node = self
            .forest
            .get_node_mut(entry.index)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{:?}", entry.index)))?;
        node.is_expanded = !node.is_expanded;
        let expanded = node.is_expanded;
        let has_children = node.has_children();
        debug!("toggled {} -> expanded={}", node.data.id, expanded);

        match self.strategy {
            ReprojectStrategy::Full => self.reproject(),
            ReprojectStrategy::Splice if has_children => self.splice(flat_index, entry, expanded),
            ReprojectStrategy::Splice => {}
        }
        Ok(expanded)
    }

    /// Toggles the node `id`, whether or not it is currently visible.
    pub fn toggle_id(&mut self, id: &str) -> DomainResult<bool> {
        let idx = self.index_of(id)?;
        let expanded = self.forest.get_node(idx).is_some_and(TreeNode::is_expanded);
        self.set_expanded(id, !expanded)?;
        Ok(!expanded)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> DomainResult<()> {
        let idx = self.index_of(id)?;
        let current = self.forest.get_node(idx).is_some_and(TreeNode::is_expanded);
        if current == expanded {
            return Ok(());
        }
        match self.flat_index_of(id) {
            Some(flat_index) => {
                self.toggle(flat_index)?;
            }
            None => {
                // Hidden node: rows do not depend on its flag until an ancestor opens
                if let Some(node) = self.forest.get_node_mut(idx) {
                    node.is_expanded = expanded;
                }
            }
        }
        Ok(())
    }

    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    /// Expands every ancestor of `id` so it becomes visible; returns its row.
    #[instrument(level = "debug", skip(self))]
    pub fn reveal(&mut self, id: &str) -> DomainResult<usize> {
        let idx = self.index_of(id)?;
        let ancestors: Vec<Index> = self.forest.ancestors(idx).map(|(i, _)| i).collect();
        for ancestor in ancestors {
            if let Some(node) = self.forest.get_node_mut(ancestor) {
                node.is_expanded = true;
            }
        }
        self.reproject();
        self.flat_index_of(id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))
    }

    fn set_all(&mut self, expanded: bool) {
        let indices: Vec<Index> = self.forest.iter().map(|(idx, _)| idx).collect();
        for idx in indices {
            if let Some(node) = self.forest.get_node_mut(idx) {
                node.is_expanded = expanded;
            }
        }
        self.reproject();
    }

    fn index_of(&self, id: &str) -> DomainResult<Index> {
        self.forest
            .find_by_id(id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))
    }

    fn entry_at(&self, flat_index: usize) -> DomainResult<FlatEntry> {
        self.flat
            .get(flat_index)
            .copied()
            .ok_or(DomainError::IndexOutOfRange {
                index: flat_index,
                len: self.flat.len(),
            })
    }

    fn row(&self, entry: FlatEntry) -> Option<Row<'_>> {
        self.forest.get_node(entry.index).map(|node| Row {
            index: entry.index,
            node,
            level: entry.level,
            has_children: node.has_children(),
        })
    }

    fn reproject(&mut self) {
        let flat = self.visible_from(self.forest.roots(), 0);
        trace!("projected {} of {} nodes", flat.len(), self.forest.len());
        self.flat = flat;
    }

    /// Pre-order walk over `start` and the expanded parts of their subtrees.
    fn visible_from(&self, start: &[Index], level: usize) -> Vec<FlatEntry> {
        let mut flat = Vec::new();
        let mut stack: Vec<FlatEntry> = start
            .iter()
            .rev()
            .map(|&index| FlatEntry { index, level })
            .collect();

        while let Some(entry) = stack.pop() {
            if let Some(node) = self.forest.get_node(entry.index) {
                flat.push(entry);
                if node.is_expanded {
                    for &child in node.children.iter().rev() {
                        stack.push(FlatEntry {
                            index: child,
                            level: entry.level + 1,
                        });
                    }
                }
            }
        }
        flat
    }

    fn splice(&mut self, flat_index: usize, entry: FlatEntry, expanded: bool) {
        let start = flat_index + 1;
        if expanded {
            let children = self
                .forest
                .get_node(entry.index)
                .map(|node| node.children.clone())
                .unwrap_or_default();
            let block = self.visible_from(&children, entry.level + 1);
            trace!("splice in {} rows at {}", block.len(), start);
            self.flat.splice(start..start, block);
        } else {
            let end = self.flat[start..]
                .iter()
                .position(|e| e.level <= entry.level)
                .map_or(self.flat.len(), |offset| start + offset);
            trace!("splice out rows {}..{}", start, end);
            self.flat.drain(start..end);
        }
    }
}
