//! Linkstash — a private, per-user bookmark manager core.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests: validation, the SQLite-backed collection store, the
//! client-side reconciliation state machine, and the change-feed adapter
//! that keeps open sessions in sync.

pub mod api_handler;
pub mod app;
pub mod database;
pub mod store;
pub mod sync;
pub mod types;
pub mod validate;
