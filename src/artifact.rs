//! Artifact Records
//!
//! An opaque payload wrapped with the metadata the working set owns: origin message,
//! visibility, ordering and recency. Records carry no behavior of their own.

use crate::types::{ArtifactId, MessageId, Position, Timestamp};
use serde::{Deserialize, Serialize};

/// Manager-owned metadata for one artifact. Eviction and focus decisions only ever see this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub id: ArtifactId,
    pub origin_message_id: Option<MessageId>,
    pub is_minimized: bool,
    pub position: Position,
    pub added_at: Timestamp,
    pub last_accessed_at: Timestamp,
}

impl ArtifactMeta {
    /// Eviction rank key: oldest access, then oldest insertion, then lowest position.
    pub fn recency_key(&self) -> (Timestamp, Timestamp, Position) {
        (self.last_accessed_at, self.added_at, self.position)
    }
}

/// Artifact record: payload plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord<P> {
    pub meta: ArtifactMeta,
    pub payload: P,
}

impl<P> ArtifactRecord<P> {
    pub(crate) fn new(
        id: ArtifactId,
        payload: P,
        origin_message_id: Option<MessageId>,
        position: Position,
        now: Timestamp,
    ) -> Self {
        ArtifactRecord {
            meta: ArtifactMeta {
                id,
                origin_message_id,
                is_minimized: false,
                position,
                added_at: now,
                last_accessed_at: now,
            },
            payload,
        }
    }

    pub fn id(&self) -> &ArtifactId {
        &self.meta.id
    }

    pub fn position(&self) -> Position {
        self.meta.position
    }

    pub fn is_minimized(&self) -> bool {
        self.meta.is_minimized
    }

    /// Refresh recency. Never moves `last_accessed_at` below `added_at` or backwards.
    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.meta.last_accessed_at = now.max(self.meta.last_accessed_at).max(self.meta.added_at);
    }

    /// Swap in new content, keeping identity, position and insertion time.
    pub(crate) fn replace(
        &mut self,
        payload: P,
        origin_message_id: Option<MessageId>,
        now: Timestamp,
    ) -> P {
        self.meta.origin_message_id = origin_message_id;
        self.touch(now);
        std::mem::replace(&mut self.payload, payload)
    }
}
