//! Display ordering: position allocation and the position -> id index.

use crate::types::{ArtifactId, Position};
use std::collections::BTreeMap;

/// Ordering state. Positions come from a high-water mark, so a position freed by removal,
/// eviction or clearing is never handed out again.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    order: BTreeMap<Position, ArtifactId>,
    high_water: Position,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next position (`max(ever assigned) + 1`, starting at 1) and index `id` under it.
    pub(crate) fn place(&mut self, id: ArtifactId) -> Position {
        self.high_water += 1;
        self.order.insert(self.high_water, id);
        self.high_water
    }

    pub(crate) fn unplace(&mut self, position: Position) {
        self.order.remove(&position);
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
    }

    /// Ids in ascending position order.
    pub fn ordered_ids(&self) -> impl Iterator<Item = &ArtifactId> {
        self.order.values()
    }

    pub fn last_assigned(&self) -> Position {
        self.high_water
    }
}
