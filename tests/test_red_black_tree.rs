extern crate bincode;
extern crate rand;
extern crate rb_collections;

use self::rand::{thread_rng, Rng};
use rb_collections::red_black_tree::{Color, RedBlackMap, RedBlackSet, Tree};
use std::collections::{BTreeMap, BTreeSet};
use std::vec::Vec;

const NUM_OF_OPERATIONS: usize = 10_000;

fn walk_forward<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut ret = Vec::new();
    let mut position = tree.begin();
    while position != tree.end() {
        ret.push(tree.get(position).unwrap().clone());
        position = tree.next(position);
    }
    ret
}

fn walk_backward<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut ret = Vec::new();
    let mut position = tree.prev(tree.end());
    while position != tree.end() {
        ret.push(tree.get(position).unwrap().clone());
        position = tree.prev(position);
    }
    ret
}

#[test]
fn int_test_tree_small_scenario() {
    let mut tree = Tree::new();
    for value in &[5, 3, 8, 1, 4] {
        assert!(tree.insert(*value, true).1);
    }
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(walk_forward(&tree), vec![1, 3, 4, 5, 8]);
    assert_eq!(walk_backward(&tree), vec![8, 5, 4, 3, 1]);

    let next = tree.erase(tree.find(&3));
    assert_eq!(tree.get(next), Some(&4));
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(walk_forward(&tree), vec![1, 4, 5, 8]);

    assert!(tree.find(&42).is_end());
    assert_eq!(tree.next(tree.end()), tree.begin());
    assert_eq!(tree.prev(tree.end()), tree.find(&8));
}

#[test]
fn int_test_tree_ascending_insert_rebalances() {
    let mut tree = Tree::new();
    for value in &[10, 20, 30] {
        tree.insert(*value, true);
    }
    let root = tree.root();
    assert_eq!(tree.get(root), Some(&20));
    assert_eq!(tree.color(root), Some(Color::Black));
    assert_eq!(tree.get(tree.left(root)), Some(&10));
    assert_eq!(tree.get(tree.right(root)), Some(&30));
    assert_eq!(tree.parent(tree.left(root)), root);
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn int_test_tree_round_trip_traversal() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = Tree::new();
    for _ in 0..1000 {
        tree.insert(rng.gen_range(0, 500), false);
    }

    let mut position = tree.begin();
    for _ in 0..tree.len() {
        assert!(!position.is_end());
        assert_eq!(tree.prev(tree.next(position)), position);
        assert_eq!(tree.next(tree.prev(position)), position);
        position = tree.next(position);
    }
    assert_eq!(position, tree.end());

    for _ in 0..tree.len() {
        position = tree.prev(position);
    }
    assert_eq!(position, tree.begin());
}

#[test]
fn int_test_tree_duplicates() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = Tree::new();
    let mut expected = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, 100);
        tree.insert(value, false);
        expected.push(value);
    }
    expected.sort();

    assert_eq!(tree.len(), expected.len());
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(walk_forward(&tree), expected);

    // keep_unique rejects every value already present
    for value in 0..100 {
        let (position, inserted) = tree.insert(value, true);
        assert!(!inserted);
        assert_eq!(tree.get(position), Some(&value));
    }
    assert_eq!(tree.len(), expected.len());
}

#[test]
fn int_test_tree_random_insert_erase() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = Tree::new();
    let mut expected = BTreeSet::new();

    for i in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, 1000);
        if rng.gen::<bool>() {
            let (_, inserted) = tree.insert(value, true);
            assert_eq!(inserted, expected.insert(value));
        } else {
            let position = tree.find(&value);
            let removed = expected.remove(&value);
            assert_eq!(!position.is_end(), removed);
            let next = tree.erase(position);
            if removed {
                assert_eq!(tree.get(next), expected.range(value..).next());
            } else {
                assert!(next.is_end());
            }
        }

        if i % 100 == 0 {
            assert_eq!(tree.validate(), Ok(()));
        }
    }

    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.len(), expected.len());
    assert_eq!(
        tree.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_eq!(
        tree.iter().rev().collect::<Vec<&u32>>(),
        expected.iter().rev().collect::<Vec<&u32>>(),
    );
}

#[test]
fn int_test_tree_height_bound() {
    let mut tree = Tree::new();
    for value in 0..(1u32 << 12) {
        tree.insert(value, true);
    }
    let n = tree.len() as f64;
    assert!(tree.height() as f64 <= 2.0 * (n + 1.0).log2());
    assert_eq!(tree.validate(), Ok(()));

    let mut position = tree.begin();
    while !position.is_end() {
        position = tree.erase(position);
        if !position.is_end() {
            position = tree.next(position);
        }
    }
    assert_eq!(tree.len(), 1 << 11);
    assert_eq!(tree.validate(), Ok(()));
    assert!(tree.iter().all(|value| value % 2 == 1));
}

#[test]
fn int_test_tree_copy_independent() {
    let mut original: Tree<u32> = (0..1000).collect();
    let copy = original.clone();
    assert_eq!(copy.validate(), Ok(()));

    let mut position = original.begin();
    while !position.is_end() {
        position = original.erase(position);
    }
    assert!(original.is_empty());
    assert_eq!(copy.len(), 1000);
    assert_eq!(walk_forward(&copy), (0..1000).collect::<Vec<u32>>());

    original.insert(7, true);
    assert_eq!(original.validate(), Ok(()));
    assert_eq!(copy.validate(), Ok(()));
}

#[test]
fn int_test_redblackset() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackSet::new();
    let mut expected = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<u32>();

        set.insert(key);
        expected.push(key);
    }

    expected.sort();
    expected.dedup();

    assert_eq!(set.len(), expected.len());
    assert_eq!(set.min(), Some(&expected[0]));
    assert_eq!(set.max(), Some(&expected[expected.len() - 1]));

    for key in &expected {
        assert!(set.contains(key));
        assert_eq!(set.floor(key), Some(key));
        assert_eq!(set.ceil(key), Some(key));
    }

    thread_rng().shuffle(&mut expected);

    let mut expected_len = expected.len();
    for key in expected {
        assert_eq!(set.remove(&key), Some(key));
        expected_len -= 1;
        assert_eq!(set.len(), expected_len);
    }
    assert!(set.is_empty());
}

#[test]
fn int_test_redblackmap() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = RedBlackMap::new();
    let mut expected = BTreeMap::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 5000);
        let val = rng.gen::<u32>();

        assert_eq!(map.insert_or_replace(key, val), expected.insert(key, val));
    }

    assert_eq!(map.len(), expected.len());
    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );

    for (key, value) in map.iter_mut() {
        *value = key + 1;
    }
    for key in expected.keys() {
        assert_eq!(map.get(key), Some(&(key + 1)));
    }

    let mut keys = expected.keys().cloned().collect::<Vec<u32>>();
    thread_rng().shuffle(&mut keys);

    let mut expected_len = keys.len();
    for key in keys {
        assert_eq!(map.remove(&key), Some((key, key + 1)));
        expected_len -= 1;
        assert_eq!(map.len(), expected_len);
    }
    assert!(map.is_empty());
}

#[test]
fn int_test_bincode_round_trip() {
    let set: RedBlackSet<u32> = (0..100).collect();
    let bytes = bincode::serialize(&set).unwrap();
    let decoded: RedBlackSet<u32> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(set, decoded);

    let map: RedBlackMap<u32, String> = (0..100).map(|i| (i, i.to_string())).collect();
    let bytes = bincode::serialize(&map).unwrap();
    let decoded: RedBlackMap<u32, String> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(map, decoded);
}
