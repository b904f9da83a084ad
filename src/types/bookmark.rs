use serde::{Deserialize, Serialize};

/// Represents one saved link belonging to exactly one owner.
///
/// The `id` is server-assigned and stable for the record's lifetime; two
/// records with the same `id` are the same logical entity regardless of
/// which stream delivered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub url: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller-supplied fields for a new bookmark. The store assigns everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkInsert {
    pub url: String,
    pub title: String,
}

/// One page of an owner's bookmarks, newest-created-first.
///
/// `has_more` is computed from the owner's total row count against the page
/// boundary, not from the number of items returned, so an empty final page
/// still reports `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    pub has_more: bool,
}
