//! Per-session glue between the change feed and the state machine.
//!
//! A `SyncSession` owns exactly one feed subscription and one
//! `CollectionState` for the lifetime of a signed-in session view. All
//! callers communicate intent via discrete events; only the state machine's
//! transition function touches the collection.

use tracing::{debug, warn};

use crate::sync::feed::{ChangeEvent, ChangeFeed, FeedSubscription};
use crate::sync::state::{CollectionState, SyncEvent};
use crate::types::bookmark::Bookmark;
use crate::types::errors::FeedError;

/// One signed-in session's live view of the user's collection.
pub struct SyncSession {
    state: CollectionState,
    subscription: FeedSubscription,
}

impl SyncSession {
    /// Opens the session: subscribes to the user's feed and seeds the state
    /// with the initially fetched page.
    ///
    /// Subscribing before applying the seed means a mutation committed
    /// between fetch and open is still observed (and deduplicated by id).
    pub fn open(
        feed: &ChangeFeed,
        user_id: &str,
        initial: Vec<Bookmark>,
    ) -> Result<Self, FeedError> {
        let subscription = feed.subscribe(user_id)?;
        let mut state = CollectionState::new();
        state.apply(SyncEvent::Loaded(initial));
        Ok(Self {
            state,
            subscription,
        })
    }

    pub fn user_id(&self) -> &str {
        self.subscription.user_id()
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    /// Feeds a local event into the state machine.
    pub fn apply(&mut self, event: SyncEvent) {
        if let SyncEvent::DeleteFailed(id) = &event {
            // Matches the write boundary's behavior: the failure is logged,
            // the row stays visible, and the pending marker reverts.
            warn!(bookmark_id = %id, "delete failed; reverting pending state");
        }
        self.state.apply(event);
    }

    /// Clears the add-form error (called when the user edits either field).
    pub fn clear_submit_error(&mut self) {
        self.state.clear_submit_error();
    }

    /// Drains queued feed events into the state machine.
    ///
    /// Returns the number of events applied. Safe to call at any point
    /// relative to local optimistic events — reconciliation is by id, not
    /// by ordering.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(change) = self.subscription.try_next() {
            let event = match change {
                ChangeEvent::Inserted(bm) => SyncEvent::RemoteInsert(bm),
                ChangeEvent::Deleted { id } => SyncEvent::RemoteDelete(id),
            };
            self.state.apply(event);
            applied += 1;
        }
        if applied > 0 {
            debug!(count = applied, user_id = %self.user_id(), "applied feed events");
        }
        applied
    }
}
