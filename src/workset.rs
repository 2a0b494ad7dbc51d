//! Session-facing working set: a store, a clock and synchronous change notification.

use crate::artifact::ArtifactRecord;
use crate::clock::{Clock, SystemClock};
use crate::error::WorksetError;
use crate::events::{
    ChannelSubscriber, Change, Subscriber, Subscribers, SubscriptionId, WorksetEvent,
};
use crate::store::{AddKind, ArtifactStore, EvictionPolicy, FocusChange, LeastRecentlyFocused};
use crate::types::{ArtifactId, MessageId};
use crate::views::WorksetSnapshot;
use parking_lot::{Mutex, MutexGuard};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Bounded artifact working set for one chat session.
///
/// Mutations stamp times from the clock, apply to the store and, when something changed,
/// deliver one [`Change`] to every subscriber before returning.
#[derive(Debug)]
pub struct Workset<P, C = SystemClock, E = LeastRecentlyFocused> {
    store: ArtifactStore<P, E>,
    clock: C,
    subscribers: Subscribers,
    seq: u64,
}

impl<P> Workset<P> {
    pub fn new(capacity: usize) -> Result<Self, WorksetError> {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<P, C: Clock> Workset<P, C> {
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self, WorksetError> {
        Ok(Self::from_store(ArtifactStore::new(capacity)?, clock))
    }
}

impl<P, C: Clock, E: EvictionPolicy> Workset<P, C, E> {
    pub fn from_store(store: ArtifactStore<P, E>, clock: C) -> Self {
        Workset {
            store,
            clock,
            subscribers: Subscribers::new(),
            seq: 0,
        }
    }

    /// Add or replace an artifact. Never focuses it.
    pub fn add(
        &mut self,
        id: impl Into<ArtifactId>,
        payload: P,
        origin_message_id: Option<MessageId>,
    ) -> ArtifactId {
        let now = self.clock.now();
        let outcome = self.store.add(id, payload, origin_message_id, now);

        let mut events = Vec::with_capacity(3);
        if let Some(evicted) = &outcome.evicted {
            events.push(WorksetEvent::Evicted {
                id: evicted.meta.id.clone(),
                was_active: outcome
                    .focus
                    .as_ref()
                    .map(|f| f.previous.as_ref() == Some(&evicted.meta.id))
                    .unwrap_or(false),
            });
        }
        push_focus(&mut events, outcome.focus);
        match outcome.kind {
            AddKind::Inserted => events.push(WorksetEvent::Added {
                id: outcome.id.clone(),
                position: outcome.position,
                origin_message_id: self
                    .store
                    .get(outcome.id.as_str())
                    .and_then(|r| r.meta.origin_message_id.clone()),
            }),
            AddKind::Replaced => events.push(WorksetEvent::Replaced {
                id: outcome.id.clone(),
            }),
        }

        self.publish(events);
        outcome.id
    }

    /// Remove an artifact. `false` for unknown or already-removed ids.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(removal) = self.store.remove(id) else {
            return false;
        };
        let mut events = vec![WorksetEvent::Removed {
            id: removal.record.meta.id,
        }];
        push_focus(&mut events, removal.focus);
        self.publish(events);
        true
    }

    /// Focus an artifact and refresh its recency. `false` for unknown ids.
    pub fn set_active(&mut self, id: &str) -> bool {
        let now = self.clock.now();
        let Some(change) = self.store.set_active(id, now) else {
            return false;
        };
        let event = if change.is_noop() {
            WorksetEvent::Refocused {
                id: ArtifactId::new(id),
            }
        } else {
            WorksetEvent::FocusChanged {
                previous: change.previous,
                current: change.current,
            }
        };
        self.publish(vec![event]);
        true
    }

    /// Toggle the minimized flag. `false` for unknown ids.
    pub fn minimize(&mut self, id: &str) -> bool {
        let Some(minimized) = self.store.minimize(id) else {
            return false;
        };
        self.publish(vec![WorksetEvent::MinimizedChanged {
            id: ArtifactId::new(id),
            minimized,
        }]);
        true
    }

    /// Set the minimized flag explicitly. `false` for unknown ids; no change is published
    /// when the flag already had the requested value.
    pub fn set_minimized(&mut self, id: &str, minimized: bool) -> bool {
        let Some(previous) = self.store.set_minimized(id, minimized) else {
            return false;
        };
        if previous != minimized {
            self.publish(vec![WorksetEvent::MinimizedChanged {
                id: ArtifactId::new(id),
                minimized,
            }]);
        }
        true
    }

    pub fn restore(&mut self, id: &str) -> bool {
        self.set_minimized(id, false)
    }

    /// Drop everything. Returns how many artifacts were removed.
    pub fn clear_all(&mut self) -> usize {
        let cleared = self.store.clear_all();
        let removed = cleared.records.len();
        if removed > 0 {
            let mut events = vec![WorksetEvent::Cleared { removed }];
            push_focus(&mut events, cleared.focus);
            self.publish(events);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&ArtifactRecord<P>> {
        self.store.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.store.has(id)
    }

    pub fn active_id(&self) -> Option<&ArtifactId> {
        self.store.active_id()
    }

    pub fn is_minimized(&self, id: &str) -> Option<bool> {
        self.store.is_minimized(id)
    }

    pub fn list(&self) -> Vec<&ArtifactRecord<P>> {
        self.store.list()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn snapshot(&self) -> WorksetSnapshot {
        WorksetSnapshot::capture(&self.store)
    }

    pub fn store(&self) -> &ArtifactStore<P, E> {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn subscribe<S: Subscriber + 'static>(&mut self, subscriber: S) -> SubscriptionId {
        self.subscribers.add(Box::new(subscriber))
    }

    /// Subscribe through an mpsc channel.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<Change>) {
        let (subscriber, receiver) = ChannelSubscriber::new_pair();
        (self.subscribe(subscriber), receiver)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Sequence number of the last published change (0 before any).
    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    fn publish(&mut self, events: Vec<WorksetEvent>) {
        self.seq += 1;
        if self.subscribers.is_empty() {
            return;
        }
        let change = Change {
            seq: self.seq,
            events,
            snapshot: self.snapshot(),
        };
        self.subscribers.deliver(&change);
    }
}

fn push_focus(events: &mut Vec<WorksetEvent>, focus: Option<FocusChange>) {
    if let Some(change) = focus {
        events.push(WorksetEvent::FocusChanged {
            previous: change.previous,
            current: change.current,
        });
    }
}

/// Thread-safe handle that serializes every call into one working set.
pub struct SharedWorkset<P, C = SystemClock, E = LeastRecentlyFocused> {
    inner: Arc<Mutex<Workset<P, C, E>>>,
}

impl<P, C, E> Clone for SharedWorkset<P, C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, C: Clock, E: EvictionPolicy> SharedWorkset<P, C, E> {
    pub fn new(workset: Workset<P, C, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(workset)),
        }
    }

    /// Lock for a sequence of calls that must not interleave with other handlers.
    pub fn lock(&self) -> MutexGuard<'_, Workset<P, C, E>> {
        self.inner.lock()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Workset<P, C, E>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn snapshot(&self) -> WorksetSnapshot {
        self.inner.lock().snapshot()
    }
}
