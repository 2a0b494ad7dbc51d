//! Change notification: event schema, change batches and subscribers.
//!
//! Every successful working-set mutation yields one [`Change`]: the ordered events it caused
//! plus a snapshot of the settled state. Delivery is synchronous and in subscription order.

use crate::types::{ArtifactId, MessageId, Position};
use crate::views::WorksetSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One observable state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorksetEvent {
    Added {
        id: ArtifactId,
        position: Position,
        #[serde(skip_serializing_if = "Option::is_none")]
        origin_message_id: Option<MessageId>,
    },
    Replaced {
        id: ArtifactId,
    },
    Evicted {
        id: ArtifactId,
        was_active: bool,
    },
    Removed {
        id: ArtifactId,
    },
    FocusChanged {
        previous: Option<ArtifactId>,
        current: Option<ArtifactId>,
    },
    /// Active artifact focused again; recency refreshed, focus unchanged.
    Refocused {
        id: ArtifactId,
    },
    MinimizedChanged {
        id: ArtifactId,
        minimized: bool,
    },
    Cleared {
        removed: usize,
    },
}

impl WorksetEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            WorksetEvent::Added { .. } => "added",
            WorksetEvent::Replaced { .. } => "replaced",
            WorksetEvent::Evicted { .. } => "evicted",
            WorksetEvent::Removed { .. } => "removed",
            WorksetEvent::FocusChanged { .. } => "focus_changed",
            WorksetEvent::Refocused { .. } => "refocused",
            WorksetEvent::MinimizedChanged { .. } => "minimized_changed",
            WorksetEvent::Cleared { .. } => "cleared",
        }
    }
}

/// Events caused by one mutating call, with the state they left behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub seq: u64,
    pub events: Vec<WorksetEvent>,
    pub snapshot: WorksetSnapshot,
}

/// Receives changes synchronously, before the mutating call returns.
pub trait Subscriber: Send {
    /// Return `false` to unsubscribe.
    fn on_change(&mut self, change: &Change) -> bool;
}

impl<F> Subscriber for F
where
    F: FnMut(&Change) + Send,
{
    fn on_change(&mut self, change: &Change) -> bool {
        self(change);
        true
    }
}

/// Forwards changes into an mpsc channel. Drops itself once the receiver is gone.
pub struct ChannelSubscriber {
    sender: Sender<Change>,
}

impl ChannelSubscriber {
    pub fn new_pair() -> (Self, Receiver<Change>) {
        let (sender, receiver) = channel();
        (Self { sender }, receiver)
    }
}

impl Subscriber for ChannelSubscriber {
    fn on_change(&mut self, change: &Change) -> bool {
        self.sender.send(change.clone()).is_ok()
    }
}

/// Handle returned by subscribe, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Ordered subscriber list.
#[derive(Default)]
pub struct Subscribers {
    entries: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_id: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, subscriber));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn deliver(&mut self, change: &Change) {
        self.entries.retain_mut(|(_, s)| s.on_change(change));
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
