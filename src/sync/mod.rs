//! Client-side synchronization for Linkstash.
//!
//! Three unordered input streams — the initial server-fetched list,
//! optimistic local mutations, and remote push notifications — are merged
//! into one consistent view by [`state::CollectionState`]. The live stream
//! arrives through [`feed::ChangeFeed`], and [`session::SyncSession`] ties
//! one subscription and one state machine together for the lifetime of a
//! signed-in session.

pub mod feed;
pub mod session;
pub mod state;

pub use feed::{ChangeEvent, ChangeFeed, FeedSubscription};
pub use session::SyncSession;
pub use state::{CollectionState, SyncEvent};
