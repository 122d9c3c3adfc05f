#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can reach the
// crate-private resize hook.

use crate::chain_table::ChainTable;
use crate::config::TableConfig;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    UpdateOrInsert(usize, i32, i32),
    Increment(usize),
    Lookup(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>(), -10i32..10)
                .prop_map(|(i, v, d)| OpI::UpdateOrInsert(i, v, d)),
            idx.clone().prop_map(OpI::Increment),
            idx.clone().prop_map(OpI::Lookup),
            prop_oneof![contains_pool, "[a-z]{0,5}".prop_map(|s| s)].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model(
    mut sut: ChainTable<i32>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let stored = *sut.insert(k, v).expect("insert");
                prop_assert_eq!(stored, v);
                model.insert(k.clone(), v);
            }
            OpI::UpdateOrInsert(i, v, d) => {
                let k = &pool[i];
                let mut called = false;
                let stored = *sut
                    .update_or_insert(k, v, |old| {
                        called = true;
                        old.saturating_add(d)
                    })
                    .expect("update_or_insert");
                let already = model.contains_key(k);
                prop_assert_eq!(called, already, "update runs only for existing keys");
                let mv = model
                    .entry(k.clone())
                    .and_modify(|old| *old = old.saturating_add(d))
                    .or_insert(v);
                prop_assert_eq!(stored, *mv);
            }
            OpI::Increment(i) => {
                let k = &pool[i];
                let stored = *sut.increment_or_insert(k).expect("increment");
                let mv = model
                    .entry(k.clone())
                    .and_modify(|old| *old = old.saturating_add(1))
                    .or_insert(1);
                prop_assert_eq!(stored, *mv);
            }
            OpI::Lookup(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.lookup(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.lookup_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "lookup_mut presence differs from model"),
                }
            }
            OpI::Iterate => {
                let seen: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                prop_assert_eq!(seen.len(), sut.len(), "each entry exactly once");
                let s_map: BTreeMap<_, _> = seen.into_iter().collect();
                let m_map: BTreeMap<_, _> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s_map, m_map);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() <= sut.max_load_factor());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` round-trips and overwrites in place.
// - `update_or_insert` calls `update` exactly when the key exists.
// - `increment_or_insert` matches a saturating counter model.
// - `lookup`/`contains_key` parity with the model, including absent keys.
// - `iter` yields each entry exactly once with the model's values.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(ChainTable::new(), &pool, ops)?;
    }
}

// Property: Same invariants starting from a single slot, so nearly every new
// key crosses the load factor and forces a rehash.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_through_resizes((pool, ops) in arb_scenario()) {
        let cfg = TableConfig::new().with_initial_capacity(1).with_max_load_factor(1.0);
        run_against_model(ChainTable::with_config(cfg).expect("valid config"), &pool, ops)?;
    }
}

// Property: Rehashing into any capacity keeps every key reachable with its
// value; the iteration order is a permutation of the entries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_resize_preserves_entries(
        keys in proptest::collection::hash_set("[a-z]{1,8}", 0..64),
        new_capacity in 1usize..200,
    ) {
        let mut sut: ChainTable<usize> = ChainTable::new();
        for (i, k) in keys.iter().enumerate() {
            sut.insert(k, i).expect("insert");
        }
        let before: BTreeMap<String, usize> =
            sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();

        sut.resize(new_capacity).expect("resize");
        prop_assert_eq!(sut.capacity(), new_capacity);

        let after: BTreeMap<String, usize> =
            sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        prop_assert_eq!(&before, &after);
        for (k, v) in &before {
            prop_assert_eq!(sut.lookup(k), Some(v));
        }
    }
}
