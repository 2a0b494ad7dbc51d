//! artiset: Artifact Working-Set Management
//!
//! A bounded, in-memory working set for AI-generated chat artifacts. It keeps at most
//! `capacity` artifacts per session, tracks which one is in focus and which are minimized,
//! and evicts the least recently focused entry when a new artifact arrives at a full set.

pub mod artifact;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod script;
pub mod store;
pub mod types;
pub mod views;
pub mod workset;

pub use artifact::{ArtifactMeta, ArtifactRecord};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ApiError, WorksetError};
pub use events::{Change, Subscriber, SubscriptionId, WorksetEvent};
pub use store::{ArtifactStore, EvictionPolicy, LeastRecentlyFocused};
pub use types::{ArtifactId, MessageId, Position, Timestamp};
pub use views::{ArtifactSummary, WorksetSnapshot};
pub use workset::{SharedWorkset, Workset};
