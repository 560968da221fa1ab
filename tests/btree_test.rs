//! Integration tests for the B-tree index.
//!
//! These exercise the public API end to end with timestamp keys.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tallytree::{BTree, Error, Key, TreeConfig, ORDER};

fn key(s: &str) -> Key {
    s.parse().unwrap()
}

/// Timestamp key for the `n`th second after 2020-01-01 00:00:00.
fn stamp(n: u32) -> Key {
    let (days, rest) = (n / 86_400, n % 86_400);
    let (month, day) = (1 + days / 28, 1 + days % 28);
    format!(
        "2020-{:02}-{:02} {:02}:{:02}:{:02}",
        month,
        day,
        rest / 3600,
        (rest / 60) % 60,
        rest % 60
    )
    .parse()
    .unwrap()
}

#[test]
fn test_date_scenario() {
    let mut tree = BTree::new();
    tree.insert(key("2020-01-01 00:00:00"), "A");
    tree.insert(key("2020-02-01 00:00:00"), "B");
    tree.insert(key("2020-03-01 00:00:00"), "C");

    assert_eq!(tree.lookup(&key("2020-02-01 00:00:00")), Some("B"));
    assert_eq!(
        tree.range_count(&key("2020-01-15 00:00:00"), &key("2020-03-01 00:00:00")),
        2
    );

    assert!(tree.delete(&key("2020-02-01 00:00:00")));
    assert!(!tree.delete(&key("2020-02-01 00:00:00")));
    assert_eq!(tree.lookup(&key("2020-02-01 00:00:00")), None);
    assert_eq!(
        tree.range_count(&key("2020-01-01 00:00:00"), &key("2020-12-31 23:59:59")),
        2
    );

    tree.insert(key("2020-02-01 00:00:00"), "B2");
    assert_eq!(tree.lookup(&key("2020-02-01 00:00:00")), Some("B2"));
    assert_eq!(tree.live_count(), 3);
    tree.validate().unwrap();
}

#[test]
fn test_overwrite_replaces_value() {
    let mut tree = BTree::new();
    tree.insert(key("2020-01-01 00:00:00"), "A");
    tree.insert(key("2020-01-01 00:00:00"), "Z");

    assert_eq!(tree.lookup(&key("2020-01-01 00:00:00")), Some("Z"));
    assert_eq!(tree.live_count(), 1);
}

#[test]
fn test_range_bounds_are_inclusive() {
    let mut tree = BTree::new();
    for n in 0..10 {
        tree.insert(stamp(n), "v");
    }

    assert_eq!(tree.range_count(&stamp(0), &stamp(9)), 10);
    assert_eq!(tree.range_count(&stamp(3), &stamp(3)), 1);
    assert_eq!(tree.range_count(&stamp(3), &stamp(5)), 3);
    // Reversed bounds count nothing
    assert_eq!(tree.range_count(&stamp(5), &stamp(3)), 0);
}

#[test]
fn test_range_bounds_need_not_exist() {
    let mut tree = BTree::new();
    for n in (0..100).step_by(10) {
        tree.insert(stamp(n), "v");
    }

    assert_eq!(tree.range_count(&stamp(5), &stamp(35)), 3);
    assert_eq!(
        tree.range_count(&key("1999-01-01 00:00:00"), &key("2999-01-01 00:00:00")),
        10
    );
    assert_eq!(
        tree.range_count(&key("2021-01-01 00:00:00"), &key("2022-01-01 00:00:00")),
        0
    );
}

#[test]
fn test_many_shuffled_inserts_past_order() {
    let n = (ORDER * 5) as u32;
    let mut keys: Vec<u32> = (0..n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(7));

    let mut tree = BTree::new();
    for &k in &keys {
        tree.insert(stamp(k), format!("v{}", k));
    }

    assert_eq!(tree.live_count(), n as usize);
    assert!(tree.height() >= 2);
    tree.validate().unwrap();

    for &k in &keys {
        assert_eq!(tree.lookup(&stamp(k)), Some(format!("v{}", k).as_str()));
    }
    assert_eq!(tree.range_count(&stamp(100), &stamp(1099)), 1000);
}

#[test]
fn test_iteration_strictly_increasing() {
    let mut keys: Vec<u32> = (0..2_000).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(11));

    let mut tree = BTree::with_config(TreeConfig::with_order(6)).unwrap();
    for &k in &keys {
        tree.insert(stamp(k), "v");
    }
    for k in (0..2_000).step_by(4) {
        tree.delete(&stamp(k));
    }

    let seen: Vec<Key> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(seen.len(), 1_500);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(tree.tombstone_count(), 500);
}

#[test]
fn test_delete_everything_then_revive() {
    let mut tree = BTree::with_config(TreeConfig::with_order(4)).unwrap();
    for k in 0..300 {
        tree.insert(stamp(k), "v");
    }
    let nodes = tree.node_count();

    for k in 0..300 {
        assert!(tree.delete(&stamp(k)));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.range_count(&stamp(0), &stamp(299)), 0);
    assert_eq!(tree.iter().count(), 0);
    // Tombstones keep their slots
    assert_eq!(tree.node_count(), nodes);
    tree.validate().unwrap();

    for k in (0..300).rev() {
        tree.insert(stamp(k), "again");
    }
    assert_eq!(tree.live_count(), 300);
    assert_eq!(tree.node_count(), nodes);
    assert_eq!(tree.stats().snapshot().revivals, 300);
    tree.validate().unwrap();
}

#[test]
fn test_invalid_order_rejected() {
    let err = BTree::with_config(TreeConfig::with_order(1)).unwrap_err();
    assert!(matches!(err, Error::InvalidOrder { .. }));
}

#[test]
fn test_key_width_enforced() {
    assert!(matches!(
        "2020-01-01".parse::<Key>(),
        Err(Error::KeyLength { .. })
    ));
    assert!("2020-01-01 00:00:00".parse::<Key>().is_ok());
}
