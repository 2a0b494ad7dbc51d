//! Change notification contract

use super::test_utils::{add_tick, manual_workset};
use artiset::{ArtifactId, Change, SharedWorkset, Workset, WorksetEvent};
use std::sync::{Arc, Mutex};

#[test]
fn test_subscribers_receive_changes_in_order_before_return() {
    let (mut ws, clock) = manual_workset(2);
    let log: Arc<Mutex<Vec<(usize, u64)>>> = Arc::new(Mutex::new(Vec::new()));
    for tag in 0..2 {
        let log = Arc::clone(&log);
        ws.subscribe(move |change: &Change| {
            log.lock().unwrap().push((tag, change.seq));
        });
    }

    add_tick(&mut ws, &clock, "A");
    assert_eq!(*log.lock().unwrap(), vec![(0, 1), (1, 1)]);
    add_tick(&mut ws, &clock, "B");
    assert_eq!(log.lock().unwrap().len(), 4);
}

#[test]
fn test_removal_of_active_reports_focus_change() {
    let (mut ws, clock) = manual_workset(3);
    add_tick(&mut ws, &clock, "A");
    add_tick(&mut ws, &clock, "B");
    ws.set_active("B");
    let (_, rx) = ws.subscribe_channel();

    ws.remove("B");
    let change = rx.try_recv().unwrap();
    assert_eq!(
        change.events,
        vec![
            WorksetEvent::Removed {
                id: ArtifactId::new("B")
            },
            WorksetEvent::FocusChanged {
                previous: Some(ArtifactId::new("B")),
                current: Some(ArtifactId::new("A")),
            },
        ]
    );
    assert_eq!(change.snapshot.active_id, Some(ArtifactId::new("A")));
    assert!(change.snapshot.get("A").unwrap().is_active);
}

#[test]
fn test_clear_reports_count_and_focus_loss() {
    let (mut ws, clock) = manual_workset(3);
    add_tick(&mut ws, &clock, "A");
    add_tick(&mut ws, &clock, "B");
    ws.set_active("A");
    let (_, rx) = ws.subscribe_channel();
    ws.clear_all();
    let change = rx.try_recv().unwrap();
    assert_eq!(change.events[0], WorksetEvent::Cleared { removed: 2 });
    assert!(change.snapshot.is_empty());
    assert_eq!(change.snapshot.active_id, None);
}

#[test]
fn test_change_serializes_to_json() {
    let (mut ws, clock) = manual_workset(1);
    let (_, rx) = ws.subscribe_channel();
    add_tick(&mut ws, &clock, "A");
    let change = rx.try_recv().unwrap();
    let value = serde_json::to_value(&change).unwrap();
    assert_eq!(value["seq"], 1);
    assert_eq!(value["events"][0]["type"], "added");
    assert_eq!(value["snapshot"]["artifacts"][0]["id"], "A");
}

#[test]
fn test_shared_handle_delivers_under_lock() {
    let shared = SharedWorkset::new(Workset::<String>::new(2).unwrap());
    let (_, rx) = shared.with(|ws| ws.subscribe_channel());
    let worker = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            shared.with(|ws| {
                ws.add("A", "from worker".to_string(), None);
                ws.set_active("A");
            });
        })
    };
    worker.join().unwrap();
    let seqs: Vec<u64> = rx.try_iter().map(|c| c.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
    assert_eq!(shared.snapshot().active_id, Some(ArtifactId::new("A")));
}
