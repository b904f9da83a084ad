use std::fmt;

// === StoreError ===

/// Errors surfaced by the collection store.
///
/// Both variants carry the user-facing message verbatim — validation
/// messages are fixed strings, persistence messages pass the backend's
/// text through unmodified so the client stays simple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The URL or title failed validation before any write was attempted.
    Validation(String),
    /// The backend rejected or failed the operation.
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "{}", msg),
            StoreError::Database(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === FeedError ===

/// Errors related to the live change feed.
#[derive(Debug)]
pub enum FeedError {
    /// The feed registry lock was poisoned.
    Poisoned,
    /// The subscription's channel has been closed.
    Closed,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Poisoned => write!(f, "Change feed registry is poisoned"),
            FeedError::Closed => write!(f, "Change feed subscription is closed"),
        }
    }
}

impl std::error::Error for FeedError {}
