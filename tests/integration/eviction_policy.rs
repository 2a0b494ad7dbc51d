//! Eviction ordering and pluggable policies

use super::test_utils::{add_tick, ids, manual_workset};
use artiset::store::ArtifactStore;
use artiset::{ArtifactId, ArtifactMeta, EvictionPolicy, ManualClock, Workset};

#[test]
fn test_same_millisecond_ties_fall_back_to_position() {
    let (mut ws, _clock) = manual_workset(3);
    ws.add("A", String::new(), None);
    ws.add("B", String::new(), None);
    ws.add("C", String::new(), None);
    ws.add("D", String::new(), None);
    assert_eq!(ids(&ws), vec!["B", "C", "D"]);
}

#[test]
fn test_focus_history_decides_victim() {
    let (mut ws, clock) = manual_workset(3);
    add_tick(&mut ws, &clock, "A");
    add_tick(&mut ws, &clock, "B");
    add_tick(&mut ws, &clock, "C");
    ws.set_active("A");
    clock.advance(1);
    ws.set_active("B");
    clock.advance(1);
    ws.set_active("C");
    clock.advance(1);

    // A was focused longest ago; C is active and protected
    add_tick(&mut ws, &clock, "D");
    assert_eq!(ids(&ws), vec!["B", "C", "D"]);
    // D was never focused, its insertion time is newer than B's last access
    add_tick(&mut ws, &clock, "E");
    assert_eq!(ids(&ws), vec!["C", "D", "E"]);
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("C")));
}

#[test]
fn test_minimized_state_does_not_affect_eviction() {
    let (mut ws, clock) = manual_workset(2);
    add_tick(&mut ws, &clock, "A");
    add_tick(&mut ws, &clock, "B");
    ws.minimize("B");
    add_tick(&mut ws, &clock, "C");
    assert_eq!(ids(&ws), vec!["B", "C"]);
    assert_eq!(ws.is_minimized("B"), Some(true));
}

#[test]
fn test_exactly_one_eviction_per_insert() {
    let (mut ws, clock) = manual_workset(4);
    for id in ["A", "B", "C", "D"] {
        add_tick(&mut ws, &clock, id);
    }
    let (_, rx) = ws.subscribe_channel();
    add_tick(&mut ws, &clock, "E");
    let change = rx.try_recv().unwrap();
    let evictions = change
        .events
        .iter()
        .filter(|e| e.event_type() == "evicted")
        .count();
    assert_eq!(evictions, 1);
    assert_eq!(ws.len(), 4);
}

/// Evicts the newest insertion instead; exercises the policy seam.
struct NewestFirst;

impl EvictionPolicy for NewestFirst {
    fn select_victim(
        &self,
        entries: &[&ArtifactMeta],
        _active: Option<&ArtifactId>,
    ) -> Option<ArtifactId> {
        entries
            .iter()
            .max_by_key(|m| m.position)
            .map(|m| m.id.clone())
    }
}

#[test]
fn test_custom_policy_plugs_into_store() {
    let store: ArtifactStore<String, NewestFirst> =
        ArtifactStore::with_policy(2, NewestFirst).unwrap();
    let clock = ManualClock::new(1);
    let mut ws = Workset::from_store(store, clock.clone());
    ws.add("A", String::new(), None);
    ws.add("B", String::new(), None);
    ws.add("C", String::new(), None);
    let ids: Vec<String> = ws.list().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["A", "C"]);
}

/// Returns nothing, or an id the store never held.
struct Unhelpful {
    ghost: Option<&'static str>,
}

impl EvictionPolicy for Unhelpful {
    fn select_victim(
        &self,
        _entries: &[&ArtifactMeta],
        _active: Option<&ArtifactId>,
    ) -> Option<ArtifactId> {
        self.ghost.map(ArtifactId::new)
    }
}

#[test]
fn test_capacity_holds_when_policy_gives_no_victim() {
    for ghost in [None, Some("not-there")] {
        let mut store: ArtifactStore<u8, Unhelpful> =
            ArtifactStore::with_policy(1, Unhelpful { ghost }).unwrap();
        store.add("a", 1, None, 1);
        let outcome = store.add("b", 2, None, 2);

        assert_eq!(outcome.evicted.unwrap().meta.id, ArtifactId::new("a"));
        assert_eq!(store.len(), 1);
        assert!(store.has("b"));
        assert!(store.check_invariants().is_ok());
    }
}

#[test]
fn test_fallback_victim_spares_active_entry() {
    let store: ArtifactStore<String, Unhelpful> =
        ArtifactStore::with_policy(2, Unhelpful { ghost: None }).unwrap();
    let clock = ManualClock::new(1);
    let mut ws = Workset::from_store(store, clock.clone());
    ws.add("A", String::new(), None);
    clock.advance(1);
    ws.add("B", String::new(), None);
    clock.advance(1);
    ws.set_active("A");
    clock.advance(1);
    ws.add("C", String::new(), None);

    let ids: Vec<String> = ws.list().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["A", "C"]);
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("A")));
}
