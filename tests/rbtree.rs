use garnet_tree::RBTree;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates values in a range narrow enough to force duplicates and
/// removal hits.
fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

/// Sorted-`Vec` reference model. Duplicates are kept; an equal key is
/// inserted after its twins, matching the tree's ties-go-right rule.
struct Model {
    keys: Vec<i64>,
}

impl Model {
    fn new() -> Self {
        Self { keys: Vec::new() }
    }

    fn insert(&mut self, key: i64) {
        let at = self.keys.partition_point(|&k| k <= key);
        self.keys.insert(at, key);
    }

    fn remove(&mut self, key: i64) -> bool {
        match self.keys.binary_search(&key) {
            Ok(at) => {
                self.keys.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    fn contains(&self, key: i64) -> bool {
        self.keys.binary_search(&key).is_ok()
    }
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::Remove),
        2 => value_strategy().prop_map(TreeOp::Contains),
        1 => Just(TreeOp::First),
        1 => Just(TreeOp::Last),
    ]
}

// ─── Core collection contract ────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays a random sequence of operations on both RBTree and a sorted
    /// Vec model and asserts identical results at every step.
    #[test]
    fn tree_ops_match_model(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: RBTree<i64> = RBTree::new();
        let mut model = Model::new();

        for op in &ops {
            match op {
                TreeOp::Insert(v) => {
                    prop_assert!(tree.insert(*v), "insert({}) must always succeed", v);
                    model.insert(*v);
                }
                TreeOp::Remove(v) => {
                    prop_assert_eq!(tree.remove(v), model.remove(*v), "remove({})", v);
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(v), model.contains(*v), "contains({})", v);
                }
                TreeOp::First => {
                    prop_assert_eq!(tree.first(), model.keys.first(), "first()");
                }
                TreeOp::Last => {
                    prop_assert_eq!(tree.last(), model.keys.last(), "last()");
                }
            }
            prop_assert_eq!(tree.len(), model.keys.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.is_empty(), model.keys.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let keys: Vec<i64> = tree.iter().copied().collect();
        prop_assert_eq!(&keys, &model.keys, "final iteration mismatch");
        prop_assert_eq!(tree.to_vec(), model.keys, "final to_vec mismatch");
    }

    /// Iteration yields the sorted multiset of everything inserted, forward
    /// and backward, through every export surface.
    #[test]
    fn iteration_matches_sorted_input(mut values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let tree: RBTree<i64> = values.iter().copied().collect();
        values.sort_unstable();

        let forward: Vec<i64> = tree.iter().copied().collect();
        prop_assert_eq!(&forward, &values, "iter() mismatch");

        let mut backward: Vec<i64> = tree.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(&backward, &values, "iter().rev() mismatch");

        prop_assert_eq!(tree.iter().len(), values.len(), "ExactSizeIterator mismatch");
        prop_assert_eq!(tree.to_vec(), values.clone(), "to_vec() mismatch");

        let owned: Vec<i64> = tree.into_iter().collect();
        prop_assert_eq!(owned, values, "into_iter() mismatch");
    }

    /// extract_if removes exactly the matching keys and keeps the rest.
    #[test]
    fn extract_if_partitions_the_tree(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut tree: RBTree<i64> = values.iter().copied().collect();

        let extracted: Vec<i64> = tree.extract_if(|k| k % 3 == 0).collect();
        let mut expected_extracted: Vec<i64> = values.iter().copied().filter(|k| k % 3 == 0).collect();
        expected_extracted.sort_unstable();
        prop_assert_eq!(extracted, expected_extracted);

        let mut expected_kept: Vec<i64> = values.iter().copied().filter(|k| k % 3 != 0).collect();
        expected_kept.sort_unstable();
        prop_assert_eq!(tree.to_vec(), expected_kept);
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn scenario_eleven_inserts() {
    let tree = RBTree::from([34, 51, 60, 38, 40, 56, 23, 78, 53, 52, 54]);

    assert_eq!(tree.len(), 11);
    assert_eq!(tree.to_vec(), [23, 34, 38, 40, 51, 52, 53, 54, 56, 60, 78]);
}

#[test]
fn scenario_three_removals() {
    let mut tree = RBTree::from([34, 51, 60, 38, 40, 56, 23, 78, 53, 52, 54]);

    for key in [38, 23, 34] {
        assert!(tree.remove(&key));
        assert!(!tree.contains(&key));
    }

    assert_eq!(tree.len(), 8);
    assert_eq!(tree.to_vec(), [40, 51, 52, 53, 54, 56, 60, 78]);
}

#[test]
fn scenario_single_key() {
    let mut tree = RBTree::new();
    tree.insert(5);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.first(), Some(&5));
    assert_eq!(tree.last(), Some(&5));
    // The sideways diagram marks the lone (Black) root.
    assert!(format!("{tree}").contains("B|5"));
}

// ─── Boundaries and edge cases ───────────────────────────────────────────────

#[test]
fn empty_tree_boundaries() {
    let mut tree: RBTree<i64> = RBTree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(!tree.remove(&1));
    assert!(!tree.contains(&1));
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.to_vec(), Vec::<i64>::new());
    assert_eq!(format!("{tree}"), "");
}

#[test]
fn removing_absent_key_changes_nothing() {
    let mut tree = RBTree::from([1, 2, 3]);

    assert!(!tree.remove(&9));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.to_vec(), [1, 2, 3]);
}

#[test]
fn removing_sole_element_empties_the_tree() {
    let mut tree = RBTree::new();
    tree.insert(42);

    assert!(tree.remove(&42));
    assert!(tree.is_empty());
    assert_eq!(tree.iter().next(), None);

    // The tree stays usable afterwards.
    tree.insert(7);
    assert_eq!(tree.to_vec(), [7]);
}

#[test]
fn duplicates_are_kept_and_removed_one_at_a_time() {
    let mut tree = RBTree::new();
    for _ in 0..3 {
        assert!(tree.insert(7));
    }
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.to_vec(), [7, 7, 7]);

    assert!(tree.remove(&7));
    assert_eq!(tree.len(), 2);
    assert!(tree.contains(&7));
}

#[test]
fn clear_resets_and_tree_is_reusable() {
    let mut tree = RBTree::from([5, 1, 9]);
    tree.clear();

    assert!(tree.is_empty());
    tree.extend([2, 4]);
    assert_eq!(tree.to_vec(), [2, 4]);
}

// ─── Comparator and construction surfaces ────────────────────────────────────

#[test]
fn custom_comparator_orders_iteration() {
    let mut tree = RBTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    tree.extend([1, 3, 2, 5, 4]);

    let keys: Vec<i32> = tree.iter().copied().collect();
    assert_eq!(keys, [5, 4, 3, 2, 1]);
    assert_eq!(tree.first(), Some(&5));
    assert_eq!(tree.last(), Some(&1));
    assert!(tree.remove(&3));
    assert_eq!(tree.to_vec(), [5, 4, 2, 1]);
}

#[test]
fn construction_from_existing_collections() {
    let from_vec: RBTree<i64> = vec![3, 1, 2].into_iter().collect();
    assert_eq!(from_vec.to_vec(), [1, 2, 3]);

    let from_array = RBTree::from([3, 1, 2]);
    assert_eq!(from_vec, from_array);

    let mut extended: RBTree<i64> = RBTree::new();
    extended.extend(&[2, 1, 3][..]);
    assert_eq!(extended, from_array);
}

#[test]
fn equality_ignores_insertion_order() {
    let a = RBTree::from([1, 2, 3]);
    let b = RBTree::from([3, 2, 1]);
    let c = RBTree::from([1, 2]);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn debug_lists_keys_in_order() {
    let tree = RBTree::from([2, 1, 3]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}

#[test]
fn extract_if_stops_where_the_caller_stops() {
    let mut tree = RBTree::from([1, 2, 3, 4, 5, 6]);

    // Take only the first two matches; the rest must survive.
    let taken: Vec<i64> = tree.extract_if(|k| k % 2 == 0).take(2).collect();
    assert_eq!(taken, [2, 4]);
    assert_eq!(tree.to_vec(), [1, 3, 5, 6]);
}

#[test]
fn extract_if_can_drain_everything() {
    let mut tree = RBTree::from([4, 2, 6, 1, 3, 5, 7]);

    let all: Vec<i64> = tree.extract_if(|_| true).collect();
    assert_eq!(all, [1, 2, 3, 4, 5, 6, 7]);
    assert!(tree.is_empty());
}

#[test]
fn display_renders_every_key_with_a_color_marker() {
    let tree = RBTree::from([2, 1, 3]);
    let diagram = format!("{tree}");

    // One line per node, each tagged R| or B|.
    assert_eq!(diagram.lines().count(), 3);
    for key in ["1", "2", "3"] {
        assert!(diagram.contains(key), "diagram must mention key {key}");
    }
    assert!(diagram.contains("B|"));
}
