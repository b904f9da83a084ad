//! Linkstash API server — newline-delimited JSON over stdin/stdout.
//!
//! Protocol: one JSON object per line.
//! Request:  {"id":1, "user":"<session user id>", "method":"bookmarks.add", "params":{"url":"...","title":"..."}}
//! Response: {"id":1, "status":201, "body":{...}}
//!
//! The `user` field is the already-verified session identity supplied by the
//! fronting auth layer; requests without it receive 401.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkstash::api_handler::handle_request;
use linkstash::app::App;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Prefer LINKSTASH_DATA_DIR, fall back to the executable's directory
    let db_path = if let Ok(dir) = std::env::var("LINKSTASH_DATA_DIR") {
        std::path::PathBuf::from(dir).join("linkstash.db")
    } else if let Ok(exe) = std::env::current_exe() {
        exe.parent()
            .unwrap_or(std::path::Path::new("."))
            .join("linkstash.db")
    } else {
        std::path::PathBuf::from("linkstash.db")
    };
    let app = Mutex::new(
        App::new(db_path.to_str().unwrap_or("linkstash.db"))
            .expect("Failed to initialize Linkstash"),
    );
    info!(path = %db_path.display(), "database opened");

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    let _ = io::stdout().flush();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id":null,"status":400,"body":{"error":format!("parse error: {}", e)}});
                println!("{}", err);
                let _ = io::stdout().flush();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let user = req.get("user").and_then(|v| v.as_str());
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = handle_request(&app, user, method, &params);
        let out = json!({"id": id, "status": response.status, "body": response.body});
        println!("{}", out);
        let _ = io::stdout().flush();
    }
}
