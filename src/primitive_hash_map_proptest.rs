#![cfg(test)]

// Property tests for PrimitiveHashMap kept inside the crate so they can run
// the structural checker on private bucket and tree state.

use crate::key::PrimitiveKey;
use crate::primitive_hash_map::PrimitiveHashMap;
use crate::{BucketKind, Handle};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

// Key whose base hash keeps only the low two bits, so a small pool piles
// into four buckets and drives them through treeify and untreeify.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Clustered(i32);

impl PrimitiveKey for Clustered {
    fn hash_code(&self) -> u32 {
        (self.0 & 3) as u32
    }
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i32, i32),
    PutIfAbsent(i32, i32),
    Remove(i32),
    RemoveIfEq(i32, i32),
    Get(i32),
    Merge(i32, i32),
    ComputeIfPresent(i32, i32),
    Retain(i32),
    CursorRemove(i32),
    Iterate,
    Clear,
}

fn arb_ops(key_space: i32) -> impl Strategy<Value = Vec<Op>> {
    let k = 0..key_space;
    let op = prop_oneof![
        6 => (k.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (k.clone(), any::<i32>()).prop_map(|(k, v)| Op::PutIfAbsent(k, v)),
        4 => k.clone().prop_map(Op::Remove),
        1 => (k.clone(), -2..2i32).prop_map(|(k, v)| Op::RemoveIfEq(k, v)),
        2 => k.clone().prop_map(Op::Get),
        2 => (k.clone(), -4..4i32).prop_map(|(k, v)| Op::Merge(k, v)),
        1 => (k.clone(), -4..4i32).prop_map(|(k, d)| Op::ComputeIfPresent(k, d)),
        1 => (2..5i32).prop_map(Op::Retain),
        1 => (2..5i32).prop_map(Op::CursorRemove),
        2 => prop_oneof![3 => Just(Op::Iterate), 1 => Just(Op::Clear)],
    ];
    proptest::collection::vec(op, 1..200)
}

// Property: state-machine equivalence against std::collections::HashMap.
// After every operation:
// - `len` matches the model and every bucket/tree passes the structural audit.
// - stale handles never resolve.
fn run<K>(
    mut sut: PrimitiveHashMap<K, i32>,
    ops: Vec<Op>,
    mk: impl Fn(i32) -> K,
) -> Result<(), TestCaseError>
where
    K: PrimitiveKey + Eq + std::hash::Hash + Ord,
{
    let mut model: HashMap<K, i32> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let k = mk(k);
                prop_assert_eq!(sut.insert(k, v), model.insert(k, v));
            }
            Op::PutIfAbsent(k, v) => {
                let k = mk(k);
                let existing = model.get(&k).copied();
                prop_assert_eq!(sut.put_if_absent(k, v).copied(), existing);
                model.entry(k).or_insert(v);
            }
            Op::Remove(k) => {
                let k = mk(k);
                let h = sut.find(k);
                prop_assert_eq!(sut.remove(k), model.remove(&k));
                if let Some(h) = h {
                    stale.push(h);
                }
            }
            Op::RemoveIfEq(k, v) => {
                let k = mk(k);
                let expect = model.get(&k) == Some(&v);
                prop_assert_eq!(sut.remove_if_eq(k, &v), expect);
                if expect {
                    model.remove(&k);
                }
            }
            Op::Get(k) => {
                let k = mk(k);
                prop_assert_eq!(sut.get(k), model.get(&k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
            }
            Op::Merge(k, v) => {
                let k = mk(k);
                // Sum to zero removes.
                let merged = sut
                    .merge(k, v, |a, b| Some(a.wrapping_add(b)).filter(|s| *s != 0))
                    .copied();
                let expected = match model.get(&k) {
                    Some(old) => Some(old.wrapping_add(v)).filter(|s| *s != 0),
                    None => Some(v),
                };
                match expected {
                    Some(x) => model.insert(k, x),
                    None => model.remove(&k),
                };
                prop_assert_eq!(merged, expected);
            }
            Op::ComputeIfPresent(k, d) => {
                let k = mk(k);
                let out = sut
                    .compute_if_present(k, |_, v| (d != 0).then(|| v.wrapping_add(d)))
                    .copied();
                let expected = model.get(&k).and_then(|v| (d != 0).then(|| v.wrapping_add(d)));
                match (model.contains_key(&k), expected) {
                    (true, Some(x)) => {
                        model.insert(k, x);
                    }
                    (true, None) => {
                        model.remove(&k);
                    }
                    _ => {}
                }
                prop_assert_eq!(out, expected);
            }
            Op::Retain(m) => {
                sut.retain(|_, v| v.rem_euclid(m) != 0);
                model.retain(|_, v| v.rem_euclid(m) != 0);
            }
            Op::CursorRemove(m) => {
                let mut c = sut.cursor();
                let mut doomed = Vec::new();
                while let Some((k, v)) = c.next(&sut).map_err(|e| TestCaseError::fail(e.to_string()))? {
                    if v.rem_euclid(m) == 0 {
                        doomed.push(k);
                    }
                }
                // Second pass removes while walking.
                let mut c = sut.cursor();
                loop {
                    let k = match c.next(&sut) {
                        Ok(Some((k, _))) => k,
                        Ok(None) => break,
                        Err(e) => return Err(TestCaseError::fail(e.to_string())),
                    };
                    if doomed.contains(&k) {
                        let (rk, rv) = c
                            .remove(&mut sut)
                            .map_err(|e| TestCaseError::fail(e.to_string()))?;
                        prop_assert_eq!(rk, k);
                        prop_assert_eq!(Some(rv), model.remove(&k));
                    }
                }
            }
            Op::Iterate => {
                let s_keys: BTreeSet<K> = sut.keys().collect();
                let m_keys: BTreeSet<K> = model.keys().copied().collect();
                prop_assert_eq!(s_keys, m_keys);
                prop_assert_eq!(sut.iter().len(), model.len());
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                stale.clear();
            }
        }

        if let Err(msg) = sut.check_structure() {
            return Err(TestCaseError::fail(msg));
        }
        for h in &stale {
            prop_assert!(h.value(&sut).is_none());
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops(300)) {
        run(PrimitiveHashMap::<i32, i32>::new(), ops, |k| k)?;
    }

    // Same invariants under heavy collisions in a table large enough to
    // treeify, so tree insert, delete and split paths all run.
    #[test]
    fn prop_state_machine_with_collisions(ops in arb_ops(64)) {
        run(PrimitiveHashMap::<Clustered, i32>::with_capacity(64), ops, Clustered)?;
    }
}

// Property: any insertion order that piles at least 9 keys into one bucket
// of a 64-bucket table yields a tree bucket holding exactly those keys.
proptest! {
    #[test]
    fn prop_collisions_form_valid_tree(keys in proptest::collection::btree_set(0..10_000i32, 9..60)) {
        let mut m: PrimitiveHashMap<Clustered, i32> = PrimitiveHashMap::with_capacity(64);
        for &k in &keys {
            m.insert(Clustered(k * 4), k);
        }
        let idx = m.bucket_index(Clustered(0)).unwrap();
        prop_assert_eq!(m.bucket_kind(idx), BucketKind::Tree);
        for &k in &keys {
            prop_assert_eq!(m.get(Clustered(k * 4)), Some(&k));
        }
        if let Err(msg) = m.check_structure() {
            return Err(TestCaseError::fail(msg));
        }
    }
}
