//! Slug validation.
//!
//! A slug is the path segment a company reserves to prefix its short links
//! (`/{slug}/{code}`). Slugs that collide with fixed top-level routes are
//! permanently disallowed and never reach the reservation store.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Maximum slug length, bounding the redirect path length.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Slugs that can never be reserved.
///
/// `none` and `add` are command words of the reservation flow. `api` and
/// `health` are top-level route segments. `shorten`, `admin` and `static`
/// have no route here but stay reserved so that future top-level routes
/// cannot collide with a company slug.
pub const RESERVED_SLUGS: &[&str] = &["none", "add", "api", "health", "shorten", "admin", "static"];

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug pattern is valid"));

/// Returns true if `slug` is one of [`RESERVED_SLUGS`] (case-insensitive).
pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
}

/// Validates a slug before it is used as a reservation key or namespace.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the slug is empty, longer than
/// [`MAX_SLUG_LENGTH`], or contains characters outside `[A-Za-z0-9_-]`.
///
/// Returns [`AppError::ReservedWord`] if the slug is reserved.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::bad_request(
            "Slug must not be empty",
            json!({ "field": "slug" }),
        ));
    }

    if slug.len() > MAX_SLUG_LENGTH {
        return Err(AppError::bad_request(
            format!("Slug must be at most {MAX_SLUG_LENGTH} characters"),
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::bad_request(
            "Slug can only contain letters, digits, underscores, and hyphens",
            json!({ "slug": slug }),
        ));
    }

    if is_reserved(slug) {
        return Err(AppError::reserved_word(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plain_slug() {
        assert!(validate_slug("promo").is_ok());
        assert!(validate_slug("acme-2024_sale").is_ok());
    }

    #[test]
    fn test_validate_empty_slug() {
        let result = validate_slug("");
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_validate_max_length() {
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LENGTH)).is_ok());

        let result = validate_slug(&"a".repeat(MAX_SLUG_LENGTH + 1));
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_validate_rejects_path_characters() {
        for slug in ["a/b", "a b", "a?b", "caf\u{e9}", "a.b"] {
            assert!(
                matches!(validate_slug(slug), Err(AppError::Validation { .. })),
                "slug '{slug}' should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_all_reserved_slugs() {
        for &reserved in RESERVED_SLUGS {
            let result = validate_slug(reserved);
            assert!(
                matches!(result, Err(AppError::ReservedWord { .. })),
                "reserved slug '{reserved}' should be rejected"
            );
        }
    }

    #[test]
    fn test_reserved_is_case_insensitive() {
        assert!(is_reserved("NONE"));
        assert!(is_reserved("Api"));
        assert!(!is_reserved("nonesuch"));
    }
}
