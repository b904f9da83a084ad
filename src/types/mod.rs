//! Shared data types for Linkstash.

pub mod bookmark;
pub mod errors;
