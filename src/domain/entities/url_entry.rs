//! URL entry entity: a short code mapped to a long URL within a namespace.

use chrono::{DateTime, Utc};

/// The global namespace, used for links not published under a company slug.
pub const GLOBAL_NAMESPACE: &str = "";

/// A stored short link with its usage counters.
///
/// Identity is `(namespace, code)`. Entries are never deleted; only the
/// counters change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub namespace: String,
    pub code: String,
    pub record_id: Option<String>,
    pub long_url: String,
    pub times_accessed: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UrlEntry {
    /// Returns the externally visible path of the link: `code` in the
    /// global namespace, `namespace/code` otherwise.
    pub fn short_path(&self) -> String {
        short_path(&self.namespace, &self.code)
    }
}

/// Input data for creating a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlEntry {
    pub namespace: String,
    pub code: String,
    pub record_id: Option<String>,
    pub long_url: String,
}

/// Composes the path under which a short code is resolved.
pub fn short_path(namespace: &str, code: &str) -> String {
    if namespace.is_empty() {
        code.to_string()
    } else {
        format!("{namespace}/{code}")
    }
}
