//! Short code generation.
//!
//! Codes are derived from the current date, a fresh UUIDv4, and the seed URL.
//! The bytes are shuffled, split into [`CODE_LENGTH`] equal intervals, and
//! each interval's byte sum is folded onto a 62-character alphabet.
//!
//! Uniqueness is probabilistic only. Callers must always re-check a code
//! against the store (see [`crate::application::services::AllocationService`]).

use chrono::Utc;
use rand::seq::SliceRandom;
use std::sync::Arc;
use uuid::Uuid;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Size of the `[A-Za-z0-9]` alphabet.
const ALPHABET_SIZE: u64 = 62;

/// A code generation strategy: seed URL in, candidate short code out.
///
/// The production strategy is [`generate_code`]; tests substitute
/// deterministic closures to force collisions.
pub type CodeGenerator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Returns the default [`CodeGenerator`], backed by [`generate_code`].
pub fn default_generator() -> CodeGenerator {
    Arc::new(generate_code)
}

/// Generates a fresh 6-character short code for `seed_url`.
///
/// Trailing bytes that do not fill a whole interval are dropped. Every call
/// draws a new UUID, so two calls with the same seed differ with
/// overwhelming probability.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code("https://example.com");
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(seed_url: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let token = Uuid::new_v4().to_string();

    let mut bytes: Vec<u8> = Vec::with_capacity(date.len() + token.len() + seed_url.len());
    bytes.extend_from_slice(date.as_bytes());
    bytes.extend_from_slice(token.as_bytes());
    bytes.extend_from_slice(seed_url.as_bytes());

    bytes.shuffle(&mut rand::rng());

    fold_intervals(&bytes)
}

/// Splits `bytes` into [`CODE_LENGTH`] equal intervals and maps each
/// interval sum onto the alphabet.
fn fold_intervals(bytes: &[u8]) -> String {
    let interval = bytes.len() / CODE_LENGTH;

    (0..CODE_LENGTH)
        .map(|k| {
            let sum: u64 = bytes[interval * k..interval * (k + 1)]
                .iter()
                .map(|&b| u64::from(b))
                .sum();
            alphabet_char(sum % ALPHABET_SIZE)
        })
        .collect()
}

/// Maps `0..62` onto `A-Z`, `a-z`, `0-9` in that order.
fn alphabet_char(index: u64) -> char {
    // index < 62, so the narrowing below is lossless
    let index = index as u8;
    match index {
        0..=25 => char::from(b'A' + index),
        26..=51 => char::from(b'a' + (index - 26)),
        _ => char::from(b'0' + (index - 52)),
    }
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}
