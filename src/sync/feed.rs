//! In-process change feed for bookmark mutations.
//!
//! The write boundary publishes one event per committed insert/delete; every
//! open session for the same user holds a subscription and receives those
//! events asynchronously. Delivery is scoped server-side: events for one
//! user are never handed to another user's subscriptions, which is what lets
//! the state machine trust remote deletes without a client-side ownership
//! re-check.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};

use crate::types::bookmark::Bookmark;
use crate::types::errors::FeedError;

/// A normalized change delivered over the feed.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    /// A row was inserted for the subscribed user.
    Inserted(Bookmark),
    /// A row was deleted for the subscribed user.
    Deleted { id: String },
}

type Registry = Mutex<HashMap<String, Vec<(u64, Sender<ChangeEvent>)>>>;

/// Per-user change feed broker.
///
/// Cheap to clone; all clones share one subscriber registry.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    registry: Arc<Registry>,
    next_token: Arc<AtomicU64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a subscription scoped to the given user's rows.
    ///
    /// The subscription is live until the returned handle is dropped.
    pub fn subscribe(&self, user_id: &str) -> Result<FeedSubscription, FeedError> {
        let (tx, rx) = channel();
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let mut registry = self.registry.lock().map_err(|_| FeedError::Poisoned)?;
        registry
            .entry(user_id.to_string())
            .or_default()
            .push((token, tx));
        Ok(FeedSubscription {
            user_id: user_id.to_string(),
            token,
            rx,
            registry: Arc::clone(&self.registry),
        })
    }

    /// Delivers an event to every live subscription for the user.
    ///
    /// Returns the number of subscriptions reached. Subscriptions whose
    /// receiving side has gone away are pruned on the spot.
    pub fn publish(&self, user_id: &str, event: ChangeEvent) -> Result<usize, FeedError> {
        let mut registry = self.registry.lock().map_err(|_| FeedError::Poisoned)?;
        let Some(subscribers) = registry.get_mut(user_id) else {
            return Ok(0);
        };
        subscribers.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        let delivered = subscribers.len();
        if subscribers.is_empty() {
            registry.remove(user_id);
        }
        Ok(delivered)
    }

    /// Number of live subscriptions for the user.
    pub fn subscriber_count(&self, user_id: &str) -> usize {
        self.registry
            .lock()
            .map(|r| r.get(user_id).map_or(0, |subs| subs.len()))
            .unwrap_or(0)
    }
}

/// A live, owned subscription to one user's change feed.
///
/// Dropping the handle unregisters it — no dangling subscriptions.
pub struct FeedSubscription {
    user_id: String,
    token: u64,
    rx: Receiver<ChangeEvent>,
    registry: Arc<Registry>,
}

impl FeedSubscription {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Non-blocking receive of the next queued event, if any.
    pub fn try_next(&self) -> Option<ChangeEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.registry.lock() {
            if let Some(subscribers) = registry.get_mut(&self.user_id) {
                subscribers.retain(|(token, _)| *token != self.token);
                if subscribers.is_empty() {
                    registry.remove(&self.user_id);
                }
            }
        }
    }
}
