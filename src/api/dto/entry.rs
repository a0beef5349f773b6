//! DTOs for short link hit counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlEntry;

/// A short link with its usage counters.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Company slug, absent for the global namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub code: String,
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub long_url: String,
    pub times_accessed: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EntryResponse {
    pub fn new(entry: UrlEntry, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url, entry.short_path());

        Self {
            slug: (!entry.namespace.is_empty()).then_some(entry.namespace),
            code: entry.code,
            short_url,
            record_id: entry.record_id,
            long_url: entry.long_url,
            times_accessed: entry.times_accessed,
            last_accessed: entry.last_accessed,
            created_at: entry.created_at,
        }
    }
}
