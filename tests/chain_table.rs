// ChainTable integration suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Round-trip: lookup after insert returns the stored value, also across
//   interleaved inserts and resizes.
// - Absence: keys never inserted look up as None.
// - Counting: increment_or_insert k times yields k.
// - Iteration: every entry exactly once, stable for a given table state.
// - Lifecycle: destroy releases everything; destroying nothing is a no-op.
use chain_table::{ChainTable, TableConfig, TableError};
use std::collections::BTreeSet;

// Test: round-trip with interleaved inserts of other keys.
// Verifies: earlier keys keep their values while the table grows.
#[test]
fn insert_then_lookup_survives_interleaving() {
    let mut t = ChainTable::new();
    t.insert("anchor", -1i64).unwrap();
    for i in 0..500i64 {
        t.insert(&format!("word{i}"), i).unwrap();
        assert_eq!(t.lookup("anchor"), Some(&-1));
    }
    for i in 0..500i64 {
        assert_eq!(t.lookup(&format!("word{i}")), Some(&i));
    }
    assert_eq!(t.len(), 501);
}

// Test: absent keys.
// Verifies: lookup/contains_key report absence without mutating the table.
#[test]
fn never_inserted_keys_are_absent() {
    let mut t = ChainTable::new();
    for k in ["alpha", "beta", "gamma"] {
        t.insert(k, k.len()).unwrap();
    }
    for k in ["delta", "ALPHA", "alph", "alphaa", ""] {
        assert_eq!(t.lookup(k), None, "{k:?} should be absent");
        assert!(!t.contains_key(k));
    }
    assert_eq!(t.len(), 3);
}

// Test: counter semantics.
// Verifies: one call yields 1, k calls yield k, len stays 1.
#[test]
fn increment_or_insert_counts_calls() {
    let mut t: ChainTable<u32> = ChainTable::new();
    assert_eq!(*t.increment_or_insert("same").unwrap(), 1);
    for _ in 1..1000 {
        t.increment_or_insert("same").unwrap();
    }
    assert_eq!(t.lookup("same"), Some(&1000));
    assert_eq!(t.len(), 1);
    assert_eq!(t.capacity(), 16, "repeated updates never grow the table");
}

// Test: iteration over {a:1, b:2, c:3}.
// Verifies: exactly those pairs, each once; repeated traversal of the same
// state yields the same order.
#[test]
fn iteration_yields_each_pair_once() {
    for order in [["a", "b", "c"], ["c", "b", "a"], ["b", "c", "a"]] {
        let mut t = ChainTable::new();
        for k in order {
            let v = match k {
                "a" => 1,
                "b" => 2,
                _ => 3,
            };
            t.insert(k, v).unwrap();
        }
        let first: Vec<(&str, &i32)> = t.iter().collect();
        let second: Vec<(&str, &i32)> = (&t).into_iter().collect();
        assert_eq!(first, second, "order is stable for a given state");

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(sorted, [("a", &1), ("b", &2), ("c", &3)]);
    }
}

// Test: resize correctness.
// Verifies: crossing the load factor several times keeps every key reachable
// and the capacity doubles each time.
#[test]
fn lookups_survive_multiple_resizes() {
    let cfg = TableConfig::new()
        .with_initial_capacity(2)
        .with_max_load_factor(0.5);
    let mut t = ChainTable::with_config(cfg).unwrap();
    let mut capacities = BTreeSet::new();
    for i in 0..300u32 {
        t.insert(&i.to_string(), i * 2).unwrap();
        capacities.insert(t.capacity());
    }
    assert!(capacities.len() >= 5, "expected several resizes: {capacities:?}");
    assert!(capacities.iter().all(|c| c.is_power_of_two()));
    for i in 0..300u32 {
        assert_eq!(t.lookup(&i.to_string()), Some(&(i * 2)));
    }
    assert!(t.load_factor() <= 0.5);
}

// Test: configuration validation at creation.
// Verifies: zero capacity and out-of-range load factors are InvalidConfiguration.
#[test]
fn degenerate_configuration_rejected() {
    for cfg in [
        TableConfig::new().with_initial_capacity(0),
        TableConfig::new().with_max_load_factor(0.0),
        TableConfig::new().with_max_load_factor(2.0),
    ] {
        match ChainTable::<u8>::with_config(cfg) {
            Err(TableError::InvalidConfiguration { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

// Test: lifecycle.
// Verifies: destroy consumes a populated table; an absent table is a no-op.
#[test]
fn destroy_populated_and_absent_tables() {
    let mut t: ChainTable<String> = ChainTable::new();
    for i in 0..64 {
        t.insert(&format!("k{i}"), "v".repeat(i)).unwrap();
    }
    t.destroy();

    let absent: Option<ChainTable<String>> = None;
    if let Some(t) = absent {
        t.destroy();
    }
}

// Test: values are owned by the table.
// Verifies: dropping the table drops every stored value exactly once.
#[test]
fn dropping_table_releases_values() {
    use std::rc::Rc;

    let tracker = Rc::new(());
    {
        let mut t = ChainTable::new();
        for i in 0..40 {
            t.insert(&format!("k{i}"), Rc::clone(&tracker)).unwrap();
        }
        // Overwrite drops the replaced value immediately.
        t.insert("k0", Rc::clone(&tracker)).unwrap();
        assert_eq!(Rc::strong_count(&tracker), 41);
    }
    assert_eq!(Rc::strong_count(&tracker), 1);
}

// Test: update_or_insert with a non-Copy value.
// Verifies: update sees the current value and its result replaces it.
#[test]
fn update_or_insert_builds_lists() {
    let mut t: ChainTable<Vec<usize>> = ChainTable::new();
    for (i, w) in ["x", "y", "x", "x", "y"].iter().enumerate() {
        t.update_or_insert(w, vec![i], |old| {
            let mut v = old.clone();
            v.push(i);
            v
        })
        .unwrap();
    }
    assert_eq!(t.lookup("x"), Some(&vec![0, 2, 3]));
    assert_eq!(t.lookup("y"), Some(&vec![1, 4]));
}
