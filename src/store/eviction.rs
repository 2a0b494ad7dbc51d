//! Eviction policy: picks the entry to drop when an insertion would exceed capacity.

use crate::artifact::ArtifactMeta;
use crate::types::ArtifactId;

/// Victim selection for a full store.
///
/// Called with every live entry's metadata (in no particular order) and the current
/// active id. Should return one of the given ids whenever `entries` is non-empty. The store
/// falls back to [`LeastRecentlyFocused`] when it gets `None` or an id it does not hold.
pub trait EvictionPolicy {
    fn select_victim(&self, entries: &[&ArtifactMeta], active: Option<&ArtifactId>)
        -> Option<ArtifactId>;
}

/// Default policy: least recently focused entry loses, the active entry is protected.
///
/// Ordering is `last_accessed_at`, then `added_at`, then `position`, all ascending. When the
/// only candidate is the active entry it is evicted anyway; capacity is a hard ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastRecentlyFocused;

impl EvictionPolicy for LeastRecentlyFocused {
    fn select_victim(
        &self,
        entries: &[&ArtifactMeta],
        active: Option<&ArtifactId>,
    ) -> Option<ArtifactId> {
        entries
            .iter()
            .filter(|meta| Some(&meta.id) != active)
            .min_by_key(|meta| meta.recency_key())
            .or_else(|| entries.iter().min_by_key(|meta| meta.recency_key()))
            .map(|meta| meta.id.clone())
    }
}
