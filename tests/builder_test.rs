//! Tests for ForestBuilder and TreeArena structure queries

use rstest::rstest;

use treeflat::domain::{DomainError, ForestBuilder, NodeData, NodeSpec, TreeArena};

fn chain(depth: usize) -> NodeSpec {
    let mut spec = NodeSpec::new(format!("n{depth}"), format!("Node {depth}"));
    for level in (0..depth).rev() {
        spec = NodeSpec::new(format!("n{level}"), format!("Node {level}")).child(spec);
    }
    spec
}

// ============================================================
// Structure
// ============================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
#[case(64)]
fn given_chain_when_building_then_levels_count_parent_links(#[case] depth: usize) {
    let tree = ForestBuilder::new().build(vec![chain(depth)]).unwrap();

    assert_eq!(tree.len(), depth + 1);
    assert_eq!(tree.depth(), depth + 1);
    for level in 0..=depth {
        let idx = tree.find_by_id(&format!("n{level}")).unwrap();
        assert_eq!(tree.level(idx).unwrap(), level);
    }
    assert_eq!(tree.leaf_nodes(), vec![format!("n{depth}")]);
}

#[rstest]
fn given_many_roots_when_building_then_root_order_preserved() {
    let roots: Vec<_> = (0..10)
        .map(|i| NodeSpec::new(format!("r{i}"), format!("Root {i}")))
        .collect();

    let tree = ForestBuilder::new().build(roots).unwrap();

    let order: Vec<_> = tree
        .roots()
        .iter()
        .map(|&idx| tree.get_node(idx).unwrap().data.id.clone())
        .collect();
    assert_eq!(order, (0..10).map(|i| format!("r{i}")).collect::<Vec<_>>());
    assert!(tree.roots().iter().all(|&idx| !tree.has_children(idx)));
}

#[rstest]
fn given_every_node_when_checking_parent_links_then_exactly_one_of_root_or_child() {
    let tree = ForestBuilder::new()
        .build(vec![
            NodeSpec::new("a", "A").children([
                NodeSpec::new("b", "B"),
                NodeSpec::new("c", "C").child(NodeSpec::new("d", "D")),
            ]),
            NodeSpec::new("e", "E"),
        ])
        .unwrap();

    for (idx, node) in tree.iter() {
        let is_declared_root = tree.roots().contains(&idx);
        match node.parent() {
            None => assert!(is_declared_root),
            Some(parent) => {
                assert!(!is_declared_root);
                let owners = tree
                    .iter()
                    .filter(|(_, n)| n.children().contains(&idx))
                    .count();
                assert_eq!(owners, 1);
                assert!(tree.get_node(parent).unwrap().children().contains(&idx));
            }
        }
    }
}

// ============================================================
// Invariant violations
// ============================================================

#[rstest]
fn given_empty_title_when_building_then_fails() {
    let result = ForestBuilder::new().build(vec![NodeSpec::new("a", "A").child(NodeSpec::new("b", ""))]);

    assert_eq!(result.unwrap_err(), DomainError::EmptyTitle("b".into()));
}

#[rstest]
fn given_descendant_as_new_parent_when_reparenting_then_cycle_detected() {
    let mut tree = ForestBuilder::new().build(vec![chain(3)]).unwrap();
    let top = tree.find_by_id("n0").unwrap();
    let bottom = tree.find_by_id("n3").unwrap();

    assert_eq!(
        tree.reparent(top, bottom),
        Err(DomainError::CycleDetected("n0".into()))
    );
    assert_eq!(tree.level(bottom).unwrap(), 3, "failed reparent leaves tree intact");
}

#[rstest]
fn given_attached_node_when_reparenting_then_already_attached() {
    let mut tree = TreeArena::new();
    let a = tree.insert_root(NodeData::new("a", "A"), false).unwrap();
    let b = tree.attach(a, NodeData::new("b", "B"), false).unwrap();
    let c = tree.insert_root(NodeData::new("c", "C"), false).unwrap();

    assert_eq!(
        tree.reparent(b, c),
        Err(DomainError::AlreadyAttached("b".into()))
    );
    assert_eq!(tree.get_node(b).unwrap().parent(), Some(a));
}

#[rstest]
fn given_removed_arena_index_when_querying_level_then_node_not_found() {
    let other = {
        let mut scratch = TreeArena::new();
        scratch.insert_root(NodeData::new("x", "X"), false).unwrap();
        scratch.insert_root(NodeData::new("y", "Y"), false).unwrap()
    };
    let tree = TreeArena::new();

    assert!(matches!(tree.level(other), Err(DomainError::NodeNotFound(_))));
}
