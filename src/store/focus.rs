//! Focus tracking: the single active artifact id, kept consistent with store membership.

use crate::artifact::ArtifactMeta;
use crate::types::ArtifactId;
use serde::{Deserialize, Serialize};

/// Focus transition produced by a store call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusChange {
    pub previous: Option<ArtifactId>,
    pub current: Option<ArtifactId>,
}

impl FocusChange {
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    active: Option<ArtifactId>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ArtifactId> {
        self.active.as_ref()
    }

    /// Only entry point that sets a specific id. Caller guarantees membership.
    pub(crate) fn focus(&mut self, id: ArtifactId) -> FocusChange {
        let previous = self.active.replace(id);
        FocusChange {
            previous,
            current: self.active.clone(),
        }
    }

    pub(crate) fn clear(&mut self) -> Option<FocusChange> {
        self.active.take().map(|previous| FocusChange {
            previous: Some(previous),
            current: None,
        })
    }

    /// Re-establish the active-id invariant after entries left the store.
    ///
    /// If the active id is still live nothing changes. Otherwise focus moves to the
    /// remaining entry with the greatest `last_accessed_at` (ties: greatest `added_at`,
    /// then greatest `position`), or clears when `remaining` is empty.
    pub(crate) fn repair(&mut self, remaining: &[&ArtifactMeta]) -> Option<FocusChange> {
        let active = self.active.as_ref()?;
        if remaining.iter().any(|meta| &meta.id == active) {
            return None;
        }
        let previous = self.active.take();
        self.active = remaining
            .iter()
            .max_by_key(|meta| meta.recency_key())
            .map(|meta| meta.id.clone());
        Some(FocusChange {
            previous,
            current: self.active.clone(),
        })
    }
}
