use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Display payload carried by every tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Identifier, unique across the whole forest
    pub id: String,
    /// Row title, never empty
    pub title: String,
    /// Secondary line, hidden by renderers when absent
    pub subtitle: Option<String>,
    /// Opaque glyph or resource key, not interpreted here
    pub icon: String,
}

impl NodeData {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            icon: String::new(),
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Display data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for root nodes
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in the arena, in display order
    pub(crate) children: Vec<Index>,
    pub(crate) is_expanded: bool,
}

impl TreeNode {
    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }
}

/// Arena-based forest: an ordered list of root nodes plus all their descendants.
///
/// Parent links are plain arena indices, so they never keep a node alive.
/// Dropping the arena drops every node.
#[derive(Debug, Default)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Root nodes in display order
    roots: Vec<Index>,
    /// Lookup from node id to arena index
    ids: HashMap<String, Index>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            roots: Vec::new(),
            ids: HashMap::with_capacity(capacity),
        }
    }

    fn validate(&self, data: &NodeData) -> DomainResult<()> {
        if data.title.trim().is_empty() {
            return Err(DomainError::EmptyTitle(data.id.clone()));
        }
        if self.ids.contains_key(&data.id) {
            return Err(DomainError::DuplicateId(data.id.clone()));
        }
        Ok(())
    }

    fn insert(&mut self, data: NodeData, parent: Option<Index>, expanded: bool) -> Index {
        let id = data.id.clone();
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent,
            children: Vec::new(),
            is_expanded: expanded,
        });
        self.ids.insert(id, node_idx);
        node_idx
    }

    /// Appends a new root to the end of the forest.
    #[instrument(level = "trace", skip(self, data), fields(id = %data.id))]
    pub fn insert_root(&mut self, data: NodeData, expanded: bool) -> DomainResult<Index> {
        self.validate(&data)?;
        let node_idx = self.insert(data, None, expanded);
        self.roots.push(node_idx);
        Ok(node_idx)
    }

    /// Appends a new node as the last child of `parent`.
    #[instrument(level = "trace", skip(self, data), fields(id = %data.id))]
    pub fn attach(&mut self, parent: Index, data: NodeData, expanded: bool) -> DomainResult<Index> {
        if !self.arena.contains(parent) {
            return Err(DomainError::NodeNotFound(format!("{:?}", parent)));
        }
        self.validate(&data)?;
        let node_idx = self.insert(data, Some(parent), expanded);
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(node_idx);
        }
        Ok(node_idx)
    }

    /// Moves an existing root (with its subtree) under `new_parent`.
    ///
    /// Fails if `child` already has a parent, or if `new_parent` lies inside
    /// the subtree of `child`.
    #[instrument(level = "debug", skip(self))]
    pub fn reparent(&mut self, child: Index, new_parent: Index) -> DomainResult<()> {
        let child_id = self.id_of(child)?.to_string();
        self.id_of(new_parent)?;

        if self.arena[child].parent.is_some() {
            return Err(DomainError::AlreadyAttached(child_id));
        }
        if new_parent == child || self.ancestors(new_parent).any(|(idx, _)| idx == child) {
            return Err(DomainError::CycleDetected(child_id));
        }

        self.roots.retain(|&root| root != child);
        self.arena[child].parent = Some(new_parent);
        self.arena[new_parent].children.push(child);
        debug!("attached {} under {}", child_id, self.arena[new_parent].data.id);
        Ok(())
    }

    fn id_of(&self, idx: Index) -> DomainResult<&str> {
        self.arena
            .get(idx)
            .map(|node| node.data.id.as_str())
            .ok_or_else(|| DomainError::NodeNotFound(format!("{:?}", idx)))
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Index> {
        self.ids.get(id).copied()
    }

    /// Number of parent links between `idx` and its root (roots are level 0).
    #[instrument(level = "trace", skip(self))]
    pub fn level(&self, idx: Index) -> DomainResult<usize> {
        self.id_of(idx)?;
        Ok(self.ancestors(idx).count())
    }

    pub fn has_children(&self, idx: Index) -> bool {
        self.get_node(idx).is_some_and(TreeNode::has_children)
    }

    /// Walks the parent chain of `idx`, nearest ancestor first.
    pub fn ancestors(&self, idx: Index) -> AncestorIterator<'_> {
        AncestorIterator {
            arena: self,
            current: self.get_node(idx).and_then(|node| node.parent),
        }
    }

    /// Pre-order traversal of every node, ignoring expansion state.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Height of the forest: number of levels of its deepest path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the ids of all leaf nodes in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| !node.has_children())
            .map(|(_, node)| node.data.id.clone())
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct AncestorIterator<'a> {
    arena: &'a TreeArena,
    current: Option<Index>,
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = self.arena.get_node(idx)?;
        self.current = node.parent;
        Some((idx, node))
    }
}
