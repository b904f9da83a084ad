//! URL and title validation for Linkstash.
//!
//! Pure functions with no dependencies on the rest of the crate beyond the
//! error type. URL handling follows WHATWG parsing via the `url` crate, so
//! normalization matches what browsers produce (lowercased scheme and host,
//! trailing slash on an empty path, path/query/fragment case untouched).

use url::Url;

use crate::types::errors::StoreError;

/// Maximum accepted title length, in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 500;

/// Returns true iff the trimmed input parses as an absolute URL with an
/// `http` or `https` scheme.
///
/// Scheme-less input (`example.com`, `/`), any other scheme (`ftp`,
/// `javascript`, `data`), malformed input, and the empty string are all
/// rejected. The parser lowercases the scheme, so `HTTP://` is accepted.
pub fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(parsed) => parsed.scheme() == "http" || parsed.scheme() == "https",
        Err(_) => false,
    }
}

/// Best-effort canonicalizer: parses the URL, lowercases scheme and host,
/// and returns the reserialized absolute form.
///
/// Path, query, and fragment case are preserved. On parse failure the
/// original input is returned unchanged — this function never fails and is
/// not a validator. Idempotent for any parseable input.
pub fn normalize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Trims the title and enforces the 1–500 character bound.
///
/// Returns the trimmed title on success.
pub fn validate_title(raw: &str) -> Result<String, StoreError> {
    let title = raw.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(StoreError::Validation(
            "Title must be between 1 and 500 characters".to_string(),
        ));
    }
    Ok(title.to_string())
}
