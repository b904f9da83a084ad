//! Collection store for Linkstash.
//!
//! Implements `BookmarkStoreTrait` — the read/write boundary to the
//! persisted bookmarks table, backed by SQLite via `rusqlite`. Validation
//! runs here, before any write; persistence errors surface their backend
//! message verbatim. No operation retries internally.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::bookmark::{Bookmark, BookmarkInsert, BookmarkPage};
use crate::types::errors::StoreError;
use crate::validate::{is_valid_url, normalize_url, validate_title};

/// Rows per page for the bulk fetch.
pub const PAGE_SIZE: i64 = 50;

/// Trait defining the collection store operations.
pub trait BookmarkStoreTrait {
    /// Paginated listing of an owner's bookmarks, newest-created-first.
    fn list(&self, user_id: &str, page: i64) -> Result<BookmarkPage, StoreError>;
    /// Validates, normalizes, and persists a new bookmark. Returns the full record.
    fn insert(&mut self, user_id: &str, entry: &BookmarkInsert) -> Result<Bookmark, StoreError>;
    /// Deletes a bookmark by id, scoped to the owner's rows. Idempotent.
    fn remove(&mut self, user_id: &str, bookmark_id: &str) -> Result<(), StoreError>;
}

/// Collection store backed by a SQLite connection.
pub struct BookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkStore<'a> {
    /// Creates a new `BookmarkStore` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            user_id: row.get(1)?,
            url: row.get(2)?,
            title: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

impl<'a> BookmarkStoreTrait for BookmarkStore<'a> {
    /// Fetches page `page` (0-indexed, 50 per page) of the owner's bookmarks
    /// ordered by creation time descending.
    ///
    /// `has_more` is computed from the owner's exact total count against the
    /// page boundary, so an empty final page still reports `false`.
    fn list(&self, user_id: &str, page: i64) -> Result<BookmarkPage, StoreError> {
        let total: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        // rowid breaks ties between same-second inserts so the newest write
        // still sorts first
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, user_id, url, title, created_at, updated_at \
                 FROM bookmarks WHERE user_id = ?1 \
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(
                params![user_id, PAGE_SIZE, page * PAGE_SIZE],
                Self::row_to_bookmark,
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }

        let has_more = total > (page + 1) * PAGE_SIZE;
        Ok(BookmarkPage { items, has_more })
    }

    /// Adds a new bookmark for the owner.
    ///
    /// Validates the URL and title before touching the database, normalizes
    /// the URL, and assigns the id and both timestamps. Returns the persisted
    /// record.
    fn insert(&mut self, user_id: &str, entry: &BookmarkInsert) -> Result<Bookmark, StoreError> {
        if !is_valid_url(&entry.url) {
            return Err(StoreError::Validation(
                "Invalid URL. Please include http:// or https://".to_string(),
            ));
        }
        let title = validate_title(&entry.title)?;
        let url = normalize_url(entry.url.trim());

        let id = Uuid::new_v4().to_string();
        let now = Self::now();

        self.conn
            .execute(
                "INSERT INTO bookmarks (id, user_id, url, title, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, user_id, url, title, now, now],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Bookmark {
            id,
            user_id: user_id.to_string(),
            url,
            title,
            created_at: now,
            updated_at: now,
        })
    }

    /// Removes a bookmark by id, scoped to the owner's rows.
    ///
    /// Deleting a non-existent or already-deleted id succeeds — delete is
    /// idempotent from this boundary's perspective.
    fn remove(&mut self, user_id: &str, bookmark_id: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM bookmarks WHERE id = ?1 AND user_id = ?2",
                params![bookmark_id, user_id],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
