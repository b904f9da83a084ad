//! The reconciliation state machine.
//!
//! Holds the authoritative in-memory view of the signed-in user's bookmark
//! collection and folds events from three sources (initial load, local
//! optimistic actions, remote push notifications) into a single ordered list
//! with no duplicates. Transitions are synchronous, total, and free of side
//! effects beyond the state update — idempotence by id is the sole mechanism
//! preventing duplication or double removal; no sequence numbers or
//! timestamps are compared.

use std::collections::HashSet;

use crate::types::bookmark::Bookmark;

/// An event delivered to the state machine.
///
/// The optimistic path (`AddSucceeded`/`DeleteSucceeded`) and the push
/// notification path (`RemoteInsert`/`RemoteDelete`) both mutate the same
/// collection and must tolerate arriving in either order.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Initial (or refreshed) server-fetched list; replaces the view wholesale.
    Loaded(Vec<Bookmark>),
    /// A row-inserted push notification, possibly an echo of our own add.
    RemoteInsert(Bookmark),
    /// A row-deleted push notification, possibly an echo of our own delete.
    RemoteDelete(String),
    /// A local add request went out.
    AddStarted,
    /// The local add resolved with the persisted record.
    AddSucceeded(Bookmark),
    /// The local add failed with a user-visible message.
    AddFailed(String),
    /// A local delete request went out for this id.
    DeleteStarted(String),
    /// The local delete resolved.
    DeleteSucceeded(String),
    /// The local delete failed; the entry stays visible so the user can retry.
    DeleteFailed(String),
}

/// The ordered, deduplicated projection of the user's bookmarks, plus the
/// transient flags driving the add form and per-row delete affordances.
#[derive(Debug, Default)]
pub struct CollectionState {
    items: Vec<Bookmark>,
    is_submitting: bool,
    submit_error: Option<String>,
    pending_deletes: HashSet<String>,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the state with an already-fetched initial page.
    pub fn with_items(items: Vec<Bookmark>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// The current view, newest-created-first, unique by id.
    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while an add request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// The last add failure message, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Ids with a delete request in flight. Drives UI affordances only.
    pub fn pending_deletes(&self) -> &HashSet<String> {
        &self.pending_deletes
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|b| b.id == id)
    }

    /// Clears the add error without waiting for the next submit. The form
    /// calls this as soon as the user edits either field again.
    pub fn clear_submit_error(&mut self) {
        self.submit_error = None;
    }

    /// Applies one event to the state. Runs to completion; there is no
    /// partial-application visibility.
    pub fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Loaded(items) => {
                self.items = items;
            }
            SyncEvent::RemoteInsert(bm) => {
                self.insert_unique(bm);
            }
            SyncEvent::RemoteDelete(id) => {
                self.items.retain(|b| b.id != id);
                self.pending_deletes.remove(&id);
            }
            SyncEvent::AddStarted => {
                self.is_submitting = true;
                self.submit_error = None;
            }
            SyncEvent::AddSucceeded(bm) => {
                self.is_submitting = false;
                self.submit_error = None;
                // The echoed notification may have landed first; dedup by id
                // in either arrival order.
                self.insert_unique(bm);
            }
            SyncEvent::AddFailed(msg) => {
                self.is_submitting = false;
                self.submit_error = Some(msg);
            }
            SyncEvent::DeleteStarted(id) => {
                self.pending_deletes.insert(id);
            }
            SyncEvent::DeleteSucceeded(id) => {
                self.items.retain(|b| b.id != id);
                self.pending_deletes.remove(&id);
            }
            SyncEvent::DeleteFailed(id) => {
                // Entry stays in the view; only the pending marker reverts.
                self.pending_deletes.remove(&id);
            }
        }
    }

    /// Prepends the bookmark iff its id is not already present. A duplicate
    /// is a no-op: it is an echo, not a fresh logical entity.
    fn insert_unique(&mut self, bm: Bookmark) {
        if self.contains(&bm.id) {
            return;
        }
        self.items.insert(0, bm);
    }
}
