//! Property-based tests for store invariants under random operation sequences

use artiset::{ArtifactMeta, ArtifactStore, Change, ManualClock, Workset};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
    Activate(u8),
    Minimize(u8),
    Tick(u64),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..8).prop_map(Op::Add),
        2 => (0u8..8).prop_map(Op::Remove),
        3 => (0u8..8).prop_map(Op::Activate),
        2 => (0u8..8).prop_map(Op::Minimize),
        1 => (0u64..5).prop_map(Op::Tick),
        1 => Just(Op::Clear),
    ]
}

fn key(n: u8) -> String {
    format!("art-{}", n)
}

fn metas(store: &ArtifactStore<u32>) -> Vec<ArtifactMeta> {
    store.list().into_iter().map(|r| r.meta.clone()).collect()
}

/// Check every step of a random session against the documented store rules.
#[test]
fn test_store_invariants_hold_for_random_sessions() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1usize..5, prop::collection::vec(op_strategy(), 1..60)),
            |(capacity, ops)| {
                let mut store: ArtifactStore<u32> = ArtifactStore::new(capacity).unwrap();
                let mut now = 1u64;
                let mut high_water = 0u64;

                for (step, op) in ops.iter().enumerate() {
                    let before = metas(&store);
                    let active_before = store.active_id().cloned();

                    match op {
                        Op::Add(n) => {
                            let id = key(*n);
                            let existed = store.has(&id);
                            let expected_victim = if !existed && before.len() >= capacity {
                                let candidates: Vec<&ArtifactMeta> = before
                                    .iter()
                                    .filter(|m| Some(&m.id) != active_before.as_ref())
                                    .collect();
                                let pool: Vec<&ArtifactMeta> = if candidates.is_empty() {
                                    before.iter().collect()
                                } else {
                                    candidates
                                };
                                pool.into_iter()
                                    .min_by_key(|m| m.recency_key())
                                    .map(|m| m.id.clone())
                            } else {
                                None
                            };

                            let outcome = store.add(id.as_str(), step as u32, None, now);
                            let evicted = outcome.evicted.as_ref().map(|r| r.meta.id.clone());
                            prop_assert_eq!(evicted, expected_victim);

                            if existed {
                                let old = before.iter().find(|m| m.id.as_str() == id).unwrap();
                                prop_assert_eq!(outcome.position, old.position);
                                prop_assert_eq!(store.len(), before.len());
                            } else {
                                prop_assert!(outcome.position > high_water);
                                high_water = outcome.position;
                            }
                            // Adding never moves focus onto the new artifact
                            if active_before.as_ref().map(|a| a.as_str()) != Some(id.as_str()) {
                                prop_assert_ne!(
                                    store.active_id().map(|a| a.as_str()),
                                    Some(id.as_str())
                                );
                            }
                        }
                        Op::Remove(n) => {
                            let id = key(*n);
                            let removed = store.remove(&id);
                            prop_assert_eq!(removed.is_some(), before.iter().any(|m| m.id.as_str() == id));
                            if active_before.as_ref().map(|a| a.as_str()) == Some(id.as_str()) {
                                let expected = store
                                    .list()
                                    .into_iter()
                                    .max_by_key(|r| r.meta.recency_key())
                                    .map(|r| r.meta.id.clone());
                                prop_assert_eq!(store.active_id().cloned(), expected);
                            } else {
                                prop_assert_eq!(store.active_id().cloned(), active_before.clone());
                            }
                        }
                        Op::Activate(n) => {
                            let id = key(*n);
                            let known = store.has(&id);
                            let change = store.set_active(&id, now);
                            prop_assert_eq!(change.is_some(), known);
                            if known {
                                prop_assert_eq!(store.active_id().map(|a| a.as_str()), Some(id.as_str()));
                                prop_assert_eq!(store.get(&id).unwrap().meta.last_accessed_at, now);
                            } else {
                                prop_assert_eq!(store.active_id().cloned(), active_before.clone());
                            }
                        }
                        Op::Minimize(n) => {
                            let id = key(*n);
                            let result = store.minimize(&id);
                            let after = metas(&store);
                            prop_assert_eq!(after.len(), before.len());
                            for (b, a) in before.iter().zip(after.iter()) {
                                prop_assert_eq!(&b.id, &a.id);
                                prop_assert_eq!(b.position, a.position);
                                prop_assert_eq!(b.added_at, a.added_at);
                                prop_assert_eq!(b.last_accessed_at, a.last_accessed_at);
                                if a.id.as_str() == id {
                                    prop_assert_eq!(Some(a.is_minimized), result);
                                    prop_assert_eq!(a.is_minimized, !b.is_minimized);
                                } else {
                                    prop_assert_eq!(a.is_minimized, b.is_minimized);
                                }
                            }
                            prop_assert_eq!(store.active_id().cloned(), active_before.clone());
                        }
                        Op::Tick(ms) => now += ms,
                        Op::Clear => {
                            let cleared = store.clear_all();
                            prop_assert_eq!(cleared.records.len(), before.len());
                            prop_assert!(store.is_empty());
                            prop_assert!(store.active_id().is_none());
                        }
                    }

                    prop_assert!(store.len() <= capacity);
                    if let Some(active) = store.active_id() {
                        prop_assert!(store.has(active.as_str()));
                    }
                    let positions: Vec<u64> = store.list().iter().map(|r| r.position()).collect();
                    prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
                    if let Err(e) = store.check_invariants() {
                        return Err(TestCaseError::fail(e));
                    }
                    now += 1;
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Every published snapshot agrees with the store, and sequence numbers have no gaps.
#[test]
fn test_published_changes_match_state() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1usize..4, prop::collection::vec(op_strategy(), 1..40)),
            |(capacity, ops)| {
                let clock = ManualClock::new(1);
                let mut ws: Workset<u32, ManualClock> =
                    Workset::with_clock(capacity, clock.clone()).unwrap();
                let seen: Arc<Mutex<Vec<Change>>> = Arc::new(Mutex::new(Vec::new()));
                let sink = Arc::clone(&seen);
                ws.subscribe(move |change: &Change| sink.lock().unwrap().push(change.clone()));

                for (step, op) in ops.iter().enumerate() {
                    let published_before = seen.lock().unwrap().len();
                    let changed = match op {
                        Op::Add(n) => {
                            ws.add(key(*n).as_str(), step as u32, None);
                            true
                        }
                        Op::Remove(n) => ws.remove(&key(*n)),
                        Op::Activate(n) => ws.set_active(&key(*n)),
                        Op::Minimize(n) => ws.minimize(&key(*n)),
                        Op::Tick(ms) => {
                            clock.advance(*ms);
                            false
                        }
                        Op::Clear => ws.clear_all() > 0,
                    };
                    let published = seen.lock().unwrap().len() - published_before;
                    prop_assert_eq!(published, usize::from(changed));

                    if changed {
                        let log = seen.lock().unwrap();
                        let last = log.last().unwrap();
                        prop_assert!(!last.events.is_empty());
                        prop_assert_eq!(&last.snapshot, &ws.snapshot());
                    }
                    clock.advance(1);
                }

                let log = seen.lock().unwrap();
                for (i, change) in log.iter().enumerate() {
                    prop_assert_eq!(change.seq, i as u64 + 1);
                }
                prop_assert_eq!(ws.last_seq(), log.len() as u64);
                Ok(())
            },
        )
        .unwrap();
}
