//! App core for Linkstash.
//!
//! Central struct holding the shared database handle and the change feed
//! broker. The `BookmarkStore` is created on-demand via `db.connection()`
//! because it borrows the connection with a lifetime parameter.

use std::sync::Arc;

use crate::database::Database;
use crate::sync::feed::ChangeFeed;

/// Central application state shared by the request handler.
pub struct App {
    pub db: Arc<Database>,
    pub feed: ChangeFeed,
}

impl App {
    /// Opens (or creates) the database at the given path and wires the feed.
    pub fn new(db_path: &str) -> Result<Self, rusqlite::Error> {
        let db = Arc::new(Database::open(db_path)?);
        Ok(Self {
            db,
            feed: ChangeFeed::new(),
        })
    }

    /// In-memory variant for tests; discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let db = Arc::new(Database::open_in_memory()?);
        Ok(Self {
            db,
            feed: ChangeFeed::new(),
        })
    }
}
