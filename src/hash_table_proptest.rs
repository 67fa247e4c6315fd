#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// the slot array directly.

use crate::hash_table::HashTable;
use crate::prime::{is_prime, next_prime};
use crate::InsertError;
use crate::BASE_HASH_TABLE_SIZE;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, Vec<u8>),
    Delete(usize),
    Search(usize),
    SearchFresh(String),
    ResizeUp,
    ResizeDown,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z0-9]{0,6}", 1..=120).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => (idx.clone(), proptest::collection::vec(any::<u8>(), 0..4))
                .prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Search),
            1 => "[A-Z]{1,4}".prop_map(OpI::SearchFresh),
            1 => Just(OpI::ResizeUp),
            1 => Just(OpI::ResizeDown),
        ];
        proptest::collection::vec(op, 1..300).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_structure(t: &HashTable) -> Result<(), TestCaseError> {
    let occupied = t.slots_for_test().filter(|s| s.entry().is_some()).count();
    prop_assert_eq!(t.len(), occupied);
    prop_assert!(t.len() <= t.size());
    prop_assert!(t.base_size() >= BASE_HASH_TABLE_SIZE);
    prop_assert_eq!(t.size(), next_prime(t.base_size()));
    prop_assert!(is_prime(t.size()).is_prime());
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Insert returns the replaced value exactly when the model had the key.
// - Search/delete agree with the model, including keys behind tombstones.
// - `count` equals the number of occupied slots; `size` stays the prime
//   for `base_size` and never drops below the floor.
// - Explicit resizes keep every live entry.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = HashTable::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].clone();
                    match sut.insert(k.clone(), v.clone()) {
                        Ok(old) => {
                            let expected = model.insert(k, v);
                            prop_assert_eq!(old, expected);
                        }
                        Err(InsertError::ProbeExhausted { key, .. }) => {
                            prop_assert_eq!(key, k);
                        }
                    }
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let removed = sut.delete(k).map(|e| e.into_parts().1);
                    prop_assert_eq!(removed, model.remove(k));
                }
                OpI::Search(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k).map(Vec::as_slice));
                }
                OpI::SearchFresh(k) => {
                    // Upper-case keys are never inserted.
                    prop_assert!(sut.search(&k).is_none());
                }
                OpI::ResizeUp => sut.resize_up(),
                OpI::ResizeDown => sut.resize_down(),
            }
            check_structure(&sut)?;
            prop_assert_eq!(sut.len(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v.as_slice()));
        }
        prop_assert_eq!(sut.iter().count(), model.len());
    }
}

// Property: with few distinct keys hammered by insert/delete, tombstones pile
// up without ever hiding a live key.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_tombstone_churn(ops in proptest::collection::vec((any::<bool>(), 0usize..8), 1..400)) {
        let mut sut = HashTable::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        for (step, (is_insert, k)) in ops.into_iter().enumerate() {
            let key = format!("churn-{k}");
            if is_insert {
                let v = step.to_le_bytes().to_vec();
                if sut.insert(key.clone(), v.clone()).is_ok() {
                    model.insert(key, v);
                }
            } else {
                prop_assert_eq!(sut.delete(&key).is_some(), model.remove(&key).is_some());
            }
            for (mk, mv) in &model {
                prop_assert_eq!(sut.get(mk), Some(mv.as_slice()));
            }
            check_structure(&sut)?;
        }
    }
}
