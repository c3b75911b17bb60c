//! Conversion of arena forests into `termtree` display trees.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::TreeArena;

pub trait TreeNodeConvert {
    /// One display tree per root, in forest order.
    fn to_tree_strings(&self) -> Vec<Tree<String>>;
}

fn label(arena: &TreeArena, idx: Index) -> String {
    match arena.get_node(idx) {
        Some(node) if node.has_children() && node.is_expanded() => {
            format!("{} ({}) [open]", node.data.title, node.data.id)
        }
        Some(node) => format!("{} ({})", node.data.title, node.data.id),
        None => String::new(),
    }
}

impl TreeNodeConvert for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_strings(&self) -> Vec<Tree<String>> {
        fn build_tree(arena: &TreeArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in node.children() {
                    let mut child_tree = Tree::new(label(arena, child_idx));
                    build_tree(arena, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        self.roots()
            .iter()
            .map(|&root_idx| {
                let mut tree = Tree::new(label(self, root_idx));
                build_tree(self, root_idx, &mut tree);
                tree
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ForestBuilder, NodeSpec};

    #[test]
    fn test_to_tree_strings_renders_every_node() {
        let forest = ForestBuilder::new()
            .build(vec![
                NodeSpec::new("a", "A")
                    .expanded(true)
                    .child(NodeSpec::new("b", "B")),
                NodeSpec::new("e", "E"),
            ])
            .unwrap();

        let trees = forest.to_tree_strings();

        assert_eq!(trees.len(), 2);
        let rendered = trees[0].to_string();
        assert!(rendered.contains("A (a) [open]"));
        assert!(rendered.contains("B (b)"));
        assert_eq!(trees[1].to_string().trim(), "E (e)");
    }
}
