//! Owner-scoped persistence boundary for bookmarks.

pub mod bookmark_store;

pub use bookmark_store::{BookmarkStore, BookmarkStoreTrait, PAGE_SIZE};
