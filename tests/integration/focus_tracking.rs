//! Focus reassignment and state-machine behavior

use super::test_utils::{add_tick, manual_workset};
use artiset::ArtifactId;

#[test]
fn test_removing_active_picks_most_recently_accessed() {
    let (mut ws, clock) = manual_workset(4);
    for id in ["A", "B", "C", "D"] {
        add_tick(&mut ws, &clock, id);
    }
    ws.set_active("B");
    clock.advance(1);
    ws.set_active("A");
    clock.advance(1);
    ws.set_active("C");
    clock.advance(1);

    assert!(ws.remove("C"));
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("A")));
    assert!(ws.remove("A"));
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("B")));
    assert!(ws.remove("B"));
    // D was only ever inserted
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("D")));
    assert!(ws.remove("D"));
    assert_eq!(ws.active_id(), None);
}

#[test]
fn test_add_never_steals_focus() {
    let (mut ws, clock) = manual_workset(3);
    add_tick(&mut ws, &clock, "A");
    ws.set_active("A");
    add_tick(&mut ws, &clock, "B");
    add_tick(&mut ws, &clock, "A");
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("A")));
}

#[test]
fn test_active_moves_only_to_another_id() {
    let (mut ws, clock) = manual_workset(3);
    add_tick(&mut ws, &clock, "A");
    add_tick(&mut ws, &clock, "B");
    ws.set_active("A");
    assert!(!ws.set_active("ghost"));
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("A")));
    ws.set_active("B");
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("B")));
}

#[test]
fn test_minimize_is_orthogonal_to_focus() {
    let (mut ws, clock) = manual_workset(2);
    add_tick(&mut ws, &clock, "A");
    ws.set_active("A");
    let before = ws.get("A").unwrap().meta.clone();

    assert!(ws.minimize("A"));
    let after = &ws.get("A").unwrap().meta;
    assert!(after.is_minimized);
    assert_eq!(after.position, before.position);
    assert_eq!(after.added_at, before.added_at);
    assert_eq!(after.last_accessed_at, before.last_accessed_at);
    assert_eq!(ws.active_id(), Some(&ArtifactId::new("A")));

    assert!(ws.restore("A"));
    assert_eq!(ws.is_minimized("A"), Some(false));
    assert!(!ws.restore("ghost"));
}
