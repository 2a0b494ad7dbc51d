//! Working-Set Views
//!
//! Serializable, payload-free snapshots of a working set, plus ordering and filtering for
//! presenting them. Snapshots are copies taken at call time, never live views.

use crate::artifact::ArtifactMeta;
use crate::store::{ArtifactStore, EvictionPolicy};
use crate::types::{ArtifactId, MessageId, Position, Timestamp};
use serde::{Deserialize, Serialize};

/// Metadata of one artifact as seen by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub id: ArtifactId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_message_id: Option<MessageId>,
    pub position: Position,
    pub is_minimized: bool,
    pub is_active: bool,
    pub added_at: Timestamp,
    pub last_accessed_at: Timestamp,
}

impl ArtifactSummary {
    fn from_meta(meta: &ArtifactMeta, active: Option<&ArtifactId>) -> Self {
        ArtifactSummary {
            id: meta.id.clone(),
            origin_message_id: meta.origin_message_id.clone(),
            position: meta.position,
            is_minimized: meta.is_minimized,
            is_active: Some(&meta.id) == active,
            added_at: meta.added_at,
            last_accessed_at: meta.last_accessed_at,
        }
    }
}

/// Settled working-set state; artifacts in ascending position order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksetSnapshot {
    pub capacity: usize,
    pub active_id: Option<ArtifactId>,
    pub artifacts: Vec<ArtifactSummary>,
}

impl WorksetSnapshot {
    pub fn capture<P, E: EvictionPolicy>(store: &ArtifactStore<P, E>) -> Self {
        let active = store.active_id();
        WorksetSnapshot {
            capacity: store.capacity(),
            active_id: active.cloned(),
            artifacts: store
                .list()
                .into_iter()
                .map(|record| ArtifactSummary::from_meta(&record.meta, active))
                .collect(),
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.artifacts.iter().map(|a| a.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&ArtifactSummary> {
        self.artifacts.iter().find(|a| a.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Apply a view policy, returning a filtered and reordered copy of the summaries.
    pub fn view(&self, policy: &ViewPolicy) -> Vec<ArtifactSummary> {
        let mut out: Vec<ArtifactSummary> = self
            .artifacts
            .iter()
            .filter(|a| !policy.visible_only || !a.is_minimized)
            .cloned()
            .collect();
        match policy.ordering {
            ViewOrdering::Position => {}
            ViewOrdering::Recency => {
                out.sort_by(|a, b| {
                    (b.last_accessed_at, b.added_at, b.position)
                        .cmp(&(a.last_accessed_at, a.added_at, a.position))
                });
            }
        }
        out
    }
}

/// Ordering for presenting artifacts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewOrdering {
    /// Insertion order (ascending position)
    #[default]
    Position,
    /// Most recently accessed first
    Recency,
}

/// Presentation policy
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewPolicy {
    pub ordering: ViewOrdering,
    /// Skip minimized artifacts
    pub visible_only: bool,
}
