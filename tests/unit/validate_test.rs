//! Unit tests for URL/title validation and canonicalization.
//!
//! The validator is the only gate before a write — everything here maps
//! directly to user-visible accept/reject behavior on the add form.

use linkstash::validate::{is_valid_url, normalize_url, validate_title, MAX_TITLE_LEN};
use rstest::rstest;

#[rstest]
#[case("https://example.com", true)]
#[case("http://example.com", true)]
#[case("HTTP://EXAMPLE.COM", true)]
#[case("  https://example.com  ", true)]
#[case("https://example.com/path?q=1#frag", true)]
#[case("ftp://example.com", false)]
#[case("javascript:alert(1)", false)]
#[case("data:text/plain,hi", false)]
#[case("example.com", false)]
#[case("/", false)]
#[case("", false)]
#[case("   ", false)]
#[case("https://", false)]
fn url_validity(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(is_valid_url(input), expected, "input: {:?}", input);
}

#[test]
fn normalize_lowercases_scheme_and_host_only() {
    assert_eq!(
        normalize_url("https://EXAMPLE.com/MyPath"),
        "https://example.com/MyPath"
    );
}

#[test]
fn normalize_preserves_query_and_fragment_case() {
    assert_eq!(
        normalize_url("HTTPS://Example.COM/Path?Key=Value#Frag"),
        "https://example.com/Path?Key=Value#Frag"
    );
}

#[test]
fn normalize_adds_trailing_slash_for_empty_path() {
    assert_eq!(normalize_url("https://example.com"), "https://example.com/");
}

#[test]
fn normalize_is_idempotent() {
    let once = normalize_url("HTTPS://Example.COM/Some/Path");
    assert_eq!(normalize_url(&once), once);
}

#[test]
fn normalize_returns_unparseable_input_unchanged() {
    assert_eq!(normalize_url("not a url"), "not a url");
    assert_eq!(normalize_url(""), "");
}

#[test]
fn title_rejects_empty_and_whitespace_only() {
    assert!(validate_title("").is_err());
    assert!(validate_title("   ").is_err());
}

#[test]
fn title_accepts_length_one_and_max() {
    assert_eq!(validate_title("a").unwrap(), "a");
    let max = "x".repeat(MAX_TITLE_LEN);
    assert_eq!(validate_title(&max).unwrap(), max);
}

#[test]
fn title_rejects_length_over_max() {
    let too_long = "x".repeat(MAX_TITLE_LEN + 1);
    let err = validate_title(&too_long).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Title must be between 1 and 500 characters"
    );
}

#[test]
fn title_is_trimmed() {
    assert_eq!(validate_title("  My Site  ").unwrap(), "My Site");
}

#[test]
fn title_bound_counts_characters_not_bytes() {
    // 500 multibyte characters must still be accepted
    let max = "é".repeat(MAX_TITLE_LEN);
    assert!(validate_title(&max).is_ok());
    let over = "é".repeat(MAX_TITLE_LEN + 1);
    assert!(validate_title(&over).is_err());
}
