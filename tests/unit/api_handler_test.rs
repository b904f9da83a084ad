//! Unit tests for the API request handler.
//!
//! Exercises the HTTP-style contract end to end against an in-memory
//! database, including the feed events the write boundary publishes on
//! successful mutations.

use std::sync::Mutex;

use serde_json::json;

use linkstash::api_handler::handle_request;
use linkstash::app::App;
use linkstash::sync::feed::ChangeEvent;
use linkstash::sync::session::SyncSession;

fn setup() -> Mutex<App> {
    Mutex::new(App::open_in_memory().expect("Failed to open in-memory app"))
}

#[test]
fn requests_without_a_session_get_401() {
    let app = setup();
    for method in ["bookmarks.add", "bookmarks.delete", "bookmarks.list"] {
        let res = handle_request(&app, None, method, &json!({}));
        assert_eq!(res.status, 401, "method: {}", method);
        assert_eq!(res.body, json!({"error": "Unauthorized"}));
    }
}

#[test]
fn add_requires_url_and_title() {
    let app = setup();

    let res = handle_request(&app, Some("user-1"), "bookmarks.add", &json!({}));
    assert_eq!(res.status, 400);
    assert_eq!(res.body, json!({"error": "URL and title are required"}));

    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.add",
        &json!({"url": "https://example.com"}),
    );
    assert_eq!(res.status, 400);
    assert_eq!(res.body, json!({"error": "URL and title are required"}));
}

#[test]
fn add_surfaces_validation_errors() {
    let app = setup();
    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.add",
        &json!({"url": "ftp://example.com", "title": "Nope"}),
    );
    assert_eq!(res.status, 400);
    assert_eq!(
        res.body,
        json!({"error": "Invalid URL. Please include http:// or https://"})
    );
}

#[test]
fn add_returns_the_persisted_record() {
    let app = setup();
    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.add",
        &json!({"url": "  https://EXAMPLE.com  ", "title": "  My Site  "}),
    );
    assert_eq!(res.status, 201);

    let data = res.body.get("data").expect("body should carry data");
    assert_eq!(data["url"], "https://example.com/");
    assert_eq!(data["title"], "My Site");
    assert_eq!(data["user_id"], "user-1");
    assert!(data["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[test]
fn add_publishes_an_insert_event_to_open_sessions() {
    let app = setup();
    let feed = app.lock().unwrap().feed.clone();
    let mut session = SyncSession::open(&feed, "user-1", vec![]).unwrap();

    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.add",
        &json!({"url": "https://example.com", "title": "Example"}),
    );
    assert_eq!(res.status, 201);

    assert_eq!(session.pump(), 1);
    assert_eq!(session.state().len(), 1);
    assert_eq!(session.state().items()[0].title, "Example");
}

#[test]
fn delete_requires_an_id() {
    let app = setup();
    let res = handle_request(&app, Some("user-1"), "bookmarks.delete", &json!({}));
    assert_eq!(res.status, 400);
    assert_eq!(res.body, json!({"error": "Bookmark ID is required"}));
}

#[test]
fn delete_succeeds_and_is_idempotent() {
    let app = setup();
    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.add",
        &json!({"url": "https://example.com", "title": "Example"}),
    );
    let id = res.body["data"]["id"].as_str().unwrap().to_string();

    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.delete",
        &json!({"id": id}),
    );
    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!({"success": true}));

    // Deleting the same id again still succeeds
    let res = handle_request(
        &app,
        Some("user-1"),
        "bookmarks.delete",
        &json!({"id": id}),
    );
    assert_eq!(res.status, 200);
}

#[test]
fn delete_publishes_a_delete_event() {
    let app = setup();
    let feed = app.lock().unwrap().feed.clone();
    let sub = feed.subscribe("user-1").unwrap();

    handle_request(
        &app,
        Some("user-1"),
        "bookmarks.delete",
        &json!({"id": "some-id"}),
    );

    match sub.try_next() {
        Some(ChangeEvent::Deleted { id }) => assert_eq!(id, "some-id"),
        other => panic!("expected Deleted, got {:?}", other),
    }
}

#[test]
fn list_returns_newest_first_with_has_more() {
    let app = setup();
    for i in 0..3 {
        handle_request(
            &app,
            Some("user-1"),
            "bookmarks.add",
            &json!({"url": format!("https://example.com/{}", i), "title": format!("Site {}", i)}),
        );
    }

    let res = handle_request(&app, Some("user-1"), "bookmarks.list", &json!({}));
    assert_eq!(res.status, 200);
    assert_eq!(res.body["hasMore"], json!(false));

    let titles: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Site 2", "Site 1", "Site 0"]);
}

#[test]
fn list_is_scoped_to_the_caller() {
    let app = setup();
    handle_request(
        &app,
        Some("user-a"),
        "bookmarks.add",
        &json!({"url": "https://a.example", "title": "A's"}),
    );

    let res = handle_request(&app, Some("user-b"), "bookmarks.list", &json!({}));
    assert_eq!(res.status, 200);
    assert!(res.body["data"].as_array().unwrap().is_empty());
}

#[test]
fn unknown_methods_get_404() {
    let app = setup();
    let res = handle_request(&app, Some("user-1"), "bookmarks.rename", &json!({}));
    assert_eq!(res.status, 404);
}
