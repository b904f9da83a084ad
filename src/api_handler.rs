//! Request handler for the Linkstash write boundary.
//!
//! Extracted from `api_server.rs` so it can be unit-tested independently.
//! Each method mirrors one HTTP route of the bookmark API and returns an
//! HTTP-style status plus JSON body. The caller's identity is an
//! externally-verified session user id — the identity exchange itself is an
//! external collaborator, not re-implemented here.

use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::warn;

use crate::app::App;
use crate::store::{BookmarkStore, BookmarkStoreTrait};
use crate::sync::feed::ChangeEvent;
use crate::types::bookmark::BookmarkInsert;

/// An HTTP-style response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::new(status, json!({ "error": message }))
    }
}

/// Dispatches a request to the appropriate handler.
///
/// `user` is the authenticated caller's id, if any; its absence yields 401
/// for every method. Unexpected internal failures (e.g. a poisoned lock)
/// map to a generic 500 so internals never leak.
pub fn handle_request(
    app: &Mutex<App>,
    user: Option<&str>,
    method: &str,
    params: &Value,
) -> ApiResponse {
    let Some(user) = user else {
        return ApiResponse::error(401, "Unauthorized");
    };

    let app = match app.lock() {
        Ok(a) => a,
        Err(_) => return ApiResponse::error(500, "Internal server error"),
    };

    match method {
        // POST /bookmarks
        "bookmarks.add" => {
            let url = params.get("url").and_then(|v| v.as_str()).unwrap_or("");
            let title = params.get("title").and_then(|v| v.as_str()).unwrap_or("");
            if url.is_empty() || title.is_empty() {
                return ApiResponse::error(400, "URL and title are required");
            }

            let mut store = BookmarkStore::new(app.db.connection());
            let entry = BookmarkInsert {
                url: url.to_string(),
                title: title.to_string(),
            };
            match store.insert(user, &entry) {
                Ok(bm) => {
                    if let Err(e) = app.feed.publish(user, ChangeEvent::Inserted(bm.clone())) {
                        warn!(error = %e, "failed to publish insert event");
                    }
                    match serde_json::to_value(&bm) {
                        Ok(data) => ApiResponse::new(201, json!({ "data": data })),
                        Err(_) => ApiResponse::error(500, "Internal server error"),
                    }
                }
                Err(e) => ApiResponse::error(400, &e.to_string()),
            }
        }

        // DELETE /bookmarks?id=<id>
        "bookmarks.delete" => {
            let Some(id) = params.get("id").and_then(|v| v.as_str()) else {
                return ApiResponse::error(400, "Bookmark ID is required");
            };

            let mut store = BookmarkStore::new(app.db.connection());
            match store.remove(user, id) {
                Ok(()) => {
                    let event = ChangeEvent::Deleted { id: id.to_string() };
                    if let Err(e) = app.feed.publish(user, event) {
                        warn!(error = %e, "failed to publish delete event");
                    }
                    ApiResponse::new(200, json!({ "success": true }))
                }
                Err(e) => ApiResponse::error(400, &e.to_string()),
            }
        }

        // GET /bookmarks?page=<n> — the bulk fetch backing the initial load
        "bookmarks.list" => {
            let page = params
                .get("page")
                .and_then(|v| v.as_i64())
                .unwrap_or(0)
                .max(0);

            let store = BookmarkStore::new(app.db.connection());
            match store.list(user, page) {
                Ok(result) => match serde_json::to_value(&result.items) {
                    Ok(data) => {
                        ApiResponse::new(200, json!({ "data": data, "hasMore": result.has_more }))
                    }
                    Err(_) => ApiResponse::error(500, "Internal server error"),
                },
                Err(e) => ApiResponse::error(400, &e.to_string()),
            }
        }

        _ => ApiResponse::error(404, &format!("Unknown method: {}", method)),
    }
}
