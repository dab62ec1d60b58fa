//! Tests for forest traversal and removal

use rstest::{fixture, rstest};

use hiertable::domain::{build, DisplayOptions, Forest, RawRecord, TreeNode, Uid};

#[fixture]
fn forest() -> Forest {
    let content = std::fs::read_to_string("tests/resources/characters.json").expect("fixture");
    let records: Vec<RawRecord> = serde_json::from_str(&content).expect("fixture parses");
    build(&records)
}

fn descendants(node: &TreeNode) -> Vec<Uid> {
    let mut uids = vec![node.uid];
    for child in &node.children {
        uids.extend(descendants(child));
    }
    uids
}

#[rstest]
fn given_fixture_when_iterating_then_visits_preorder(forest: Forest) {
    let visited: Vec<(usize, u64)> = forest.iter().map(|(d, n)| (d, n.uid.0)).collect();
    assert_eq!(
        visited,
        vec![(0, 1), (1, 2), (2, 3), (2, 4), (1, 5), (0, 6), (0, 7)]
    );
    assert_eq!(forest.node_count(), 7);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(7)]
fn given_present_uid_when_removing_then_drops_node_and_descendants(forest: Forest, #[case] target: u64) {
    // Arrange
    let target = Uid(target);
    let doomed = descendants(forest.find(target).expect("target exists"));

    // Act
    let pruned = forest.without(target);

    // Assert: removed subtree is gone
    for uid in &doomed {
        assert!(!pruned.contains(*uid), "{} should be gone", uid);
    }
    // Assert: survivors keep uid, attributes, relation and relative order
    let survivors: Vec<(usize, &TreeNode)> = forest
        .iter()
        .filter(|(_, n)| !doomed.contains(&n.uid))
        .collect();
    let remaining: Vec<(usize, &TreeNode)> = pruned.iter().collect();
    assert_eq!(survivors.len(), remaining.len());
    for ((d_old, old), (d_new, new)) in survivors.iter().zip(&remaining) {
        assert_eq!(d_old, d_new);
        assert_eq!(old.uid, new.uid);
        assert_eq!(old.attributes, new.attributes);
        assert_eq!(old.relation, new.relation);
    }
}

#[rstest]
fn given_absent_uid_when_removing_then_forest_is_equal(forest: Forest) {
    let pruned = forest.without(Uid(999));
    assert_eq!(pruned, forest);
}

#[rstest]
fn given_removed_uid_when_removing_again_then_nothing_changes(forest: Forest) {
    let once = forest.without(Uid(2));
    let twice = once.without(Uid(2));
    assert_eq!(once, twice);
}

#[test]
fn given_root_with_child_when_removing_root_then_forest_is_empty() {
    let records: Vec<RawRecord> = serde_json::from_value(serde_json::json!([
        {"data": {"Name": "A"}, "children": {"child": {"records": [{"data": {"Name": "B"}}]}}}
    ]))
    .unwrap();
    let forest = build(&records);

    assert!(forest.without(Uid(1)).is_empty());

    let without_child = forest.without(Uid(2));
    assert_eq!(without_child.len(), 1);
    assert_eq!(without_child.roots()[0].uid, Uid(1));
    assert!(without_child.roots()[0].children.is_empty());
}

#[rstest]
fn given_fixture_when_outlining_then_one_outline_per_root(forest: Forest) {
    let outlines = forest.outlines(&DisplayOptions::default());

    assert_eq!(outlines.len(), 3);
    let first = outlines[0].to_string();
    assert!(first.starts_with("Ada [1]"));
    assert!(first.contains("201 [2] (has_nemesis)"));
    assert!(first.contains("Byron [5] (has_sibling)"));
    assert!(outlines[2].to_string().starts_with("103 [7]"));
}
