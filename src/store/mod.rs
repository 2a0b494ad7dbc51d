//! Artifact Store
//!
//! Owns every Artifact Record of a working set and enforces its invariants: bounded size,
//! an active id that always points at a live entry, and unique, never-reused positions.
//! Focus and ordering state hold only ids into the store.
//!
//! The store takes timestamps as arguments and never notifies anyone; it returns outcome
//! values describing what changed. See [`crate::workset::Workset`] for the clocked,
//! observable facade.

pub mod eviction;
pub mod focus;
pub mod layout;

pub use eviction::{EvictionPolicy, LeastRecentlyFocused};
pub use focus::{FocusChange, FocusTracker};
pub use layout::Layout;

use crate::artifact::{ArtifactMeta, ArtifactRecord};
use crate::error::WorksetError;
use crate::types::{ArtifactId, MessageId, Position, Timestamp};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Whether an add inserted a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddKind {
    Inserted,
    Replaced,
}

/// Result of [`ArtifactStore::add`].
#[derive(Debug)]
pub struct AddOutcome<P> {
    pub id: ArtifactId,
    pub position: Position,
    pub kind: AddKind,
    /// Payload that was swapped out by a replacement.
    pub previous_payload: Option<P>,
    /// Entry evicted to make room.
    pub evicted: Option<ArtifactRecord<P>>,
    /// Focus repair caused by the eviction.
    pub focus: Option<FocusChange>,
}

/// Result of a successful [`ArtifactStore::remove`].
#[derive(Debug)]
pub struct Removal<P> {
    pub record: ArtifactRecord<P>,
    pub focus: Option<FocusChange>,
}

/// Result of [`ArtifactStore::clear_all`]. Records are in position order.
#[derive(Debug)]
pub struct Cleared<P> {
    pub records: Vec<ArtifactRecord<P>>,
    pub focus: Option<FocusChange>,
}

/// Bounded keyed collection of artifacts with focus and ordering metadata.
#[derive(Debug, Clone)]
pub struct ArtifactStore<P, E = LeastRecentlyFocused> {
    entries: HashMap<ArtifactId, ArtifactRecord<P>>,
    focus: FocusTracker,
    layout: Layout,
    capacity: usize,
    policy: E,
}

impl<P> ArtifactStore<P, LeastRecentlyFocused> {
    /// Create an empty store. Fails when `capacity < 1`.
    pub fn new(capacity: usize) -> Result<Self, WorksetError> {
        Self::with_policy(capacity, LeastRecentlyFocused)
    }
}

impl<P, E: EvictionPolicy> ArtifactStore<P, E> {
    pub fn with_policy(capacity: usize, policy: E) -> Result<Self, WorksetError> {
        if capacity < 1 {
            return Err(WorksetError::InvalidCapacity(capacity));
        }
        Ok(ArtifactStore {
            entries: HashMap::with_capacity(capacity),
            focus: FocusTracker::new(),
            layout: Layout::new(),
            capacity,
            policy,
        })
    }

    /// Insert a new artifact or replace an existing one in place.
    ///
    /// Replacement keeps `position` and `added_at` and counts as an access. Inserting a new id
    /// into a full store evicts exactly one entry first. Never changes focus except through
    /// repair after an eviction.
    pub fn add(
        &mut self,
        id: impl Into<ArtifactId>,
        payload: P,
        origin_message_id: Option<MessageId>,
        now: Timestamp,
    ) -> AddOutcome<P> {
        let id = id.into();

        if let Some(record) = self.entries.get_mut(&id) {
            let previous = record.replace(payload, origin_message_id, now);
            debug!(artifact_id = %id, position = record.position(), "Replaced artifact in place");
            return AddOutcome {
                position: record.position(),
                id,
                kind: AddKind::Replaced,
                previous_payload: Some(previous),
                evicted: None,
                focus: None,
            };
        }

        let mut evicted = None;
        let mut focus = None;
        if self.entries.len() >= self.capacity {
            let victim = {
                let metas: Vec<&ArtifactMeta> = self.entries.values().map(|r| &r.meta).collect();
                let active = self.focus.active();
                match self.policy.select_victim(&metas, active) {
                    Some(choice) if self.entries.contains_key(&choice) => Some(choice),
                    choice => {
                        warn!(
                            choice = ?choice.as_ref().map(|c| c.as_str()),
                            "Eviction policy gave no live victim, using least recently focused"
                        );
                        LeastRecentlyFocused.select_victim(&metas, active)
                    }
                }
            };
            if let Some(victim) = victim {
                if let Some((record, change)) = self.take(victim.as_str()) {
                    debug!(
                        artifact_id = %record.meta.id,
                        last_accessed_at = record.meta.last_accessed_at,
                        was_active = change.is_some(),
                        "Evicted artifact to stay within capacity"
                    );
                    evicted = Some(record);
                    focus = change;
                }
            }
        }

        let position = self.layout.place(id.clone());
        self.entries.insert(
            id.clone(),
            ArtifactRecord::new(id.clone(), payload, origin_message_id, position, now),
        );
        debug!(artifact_id = %id, position, "Added artifact");

        AddOutcome {
            id,
            position,
            kind: AddKind::Inserted,
            previous_payload: None,
            evicted,
            focus,
        }
    }

    /// Delete an entry. Unknown ids are a no-op returning `None`.
    pub fn remove(&mut self, id: &str) -> Option<Removal<P>> {
        match self.take(id) {
            Some((record, focus)) => {
                debug!(artifact_id = %id, "Removed artifact");
                Some(Removal { record, focus })
            }
            None => {
                trace!(artifact_id = %id, "Ignoring remove of unknown artifact");
                None
            }
        }
    }

    /// Make `id` the active artifact and refresh its recency. Unknown ids are a no-op.
    pub fn set_active(&mut self, id: &str, now: Timestamp) -> Option<FocusChange> {
        let Some(record) = self.entries.get_mut(id) else {
            trace!(artifact_id = %id, "Ignoring focus of unknown artifact");
            return None;
        };
        record.touch(now);
        let change = self.focus.focus(record.meta.id.clone());
        if !change.is_noop() {
            debug!(
                previous = ?change.previous.as_ref().map(|p| p.as_str()),
                artifact_id = %id,
                "Focus changed"
            );
        }
        Some(change)
    }

    /// Toggle the minimized flag. Returns the new state, or `None` for unknown ids.
    pub fn minimize(&mut self, id: &str) -> Option<bool> {
        let Some(record) = self.entries.get_mut(id) else {
            trace!(artifact_id = %id, "Ignoring minimize of unknown artifact");
            return None;
        };
        record.meta.is_minimized = !record.meta.is_minimized;
        Some(record.meta.is_minimized)
    }

    /// Set the minimized flag explicitly. Returns the previous state, or `None` for unknown ids.
    pub fn set_minimized(&mut self, id: &str, minimized: bool) -> Option<bool> {
        let record = self.entries.get_mut(id)?;
        Some(std::mem::replace(&mut record.meta.is_minimized, minimized))
    }

    /// Drop every entry and the focus. Positions keep counting from the high-water mark.
    pub fn clear_all(&mut self) -> Cleared<P> {
        let mut records: Vec<ArtifactRecord<P>> = self.entries.drain().map(|(_, r)| r).collect();
        records.sort_by_key(|r| r.meta.position);
        self.layout.clear();
        let focus = self.focus.clear();
        debug!(removed = records.len(), "Cleared working set");
        Cleared { records, focus }
    }

    pub fn get(&self, id: &str) -> Option<&ArtifactRecord<P>> {
        self.entries.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn active_id(&self) -> Option<&ArtifactId> {
        self.focus.active()
    }

    pub fn is_minimized(&self, id: &str) -> Option<bool> {
        self.entries.get(id).map(|r| r.meta.is_minimized)
    }

    /// All records in ascending position order.
    pub fn list(&self) -> Vec<&ArtifactRecord<P>> {
        self.layout
            .ordered_ids()
            .filter_map(|id| self.entries.get(id))
            .collect()
    }

    /// All ids in ascending position order.
    pub fn ids(&self) -> Vec<ArtifactId> {
        self.layout.ordered_ids().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Verify every store invariant. Intended for tests and debug tooling.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.entries.len() > self.capacity {
            return Err(format!(
                "{} entries exceed capacity {}",
                self.entries.len(),
                self.capacity
            ));
        }
        if let Some(active) = self.focus.active() {
            if !self.entries.contains_key(active) {
                return Err(format!("active id {} is not in the store", active));
            }
        }
        let ordered = self.list();
        if ordered.len() != self.entries.len() {
            return Err("ordering index out of sync with entries".to_string());
        }
        for pair in ordered.windows(2) {
            if pair[0].meta.position >= pair[1].meta.position {
                return Err(format!(
                    "positions not strictly increasing: {} then {}",
                    pair[0].meta.position, pair[1].meta.position
                ));
            }
        }
        for record in &ordered {
            if record.meta.position > self.layout.last_assigned() {
                return Err(format!("position {} was never assigned", record.meta.position));
            }
            if record.meta.last_accessed_at < record.meta.added_at {
                return Err(format!("{} accessed before it was added", record.meta.id));
            }
        }
        Ok(())
    }

    /// Remove an entry and repair focus if it pointed at it.
    fn take(&mut self, id: &str) -> Option<(ArtifactRecord<P>, Option<FocusChange>)> {
        let record = self.entries.remove(id)?;
        self.layout.unplace(record.meta.position);
        let metas: Vec<&ArtifactMeta> = self.entries.values().map(|r| &r.meta).collect();
        let focus = self.focus.repair(&metas);
        if let Some(change) = &focus {
            debug!(
                removed = %id,
                current = ?change.current.as_ref().map(|c| c.as_str()),
                "Reassigned focus"
            );
        }
        Some((record, focus))
    }
}
