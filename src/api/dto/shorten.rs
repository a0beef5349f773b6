//! DTOs for the shortening endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{ShortenRequest as ShortenInput, ShortenedUrl};

/// Request to shorten URLs in the global namespace.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 1000, message = "Between 1 and 1000 URLs per request"))]
    #[validate(nested)]
    pub urls: Vec<UrlItem>,
}

/// Request to shorten URLs under a company slug.
///
/// An empty `urls` list is accepted: it only claims the slug.
#[derive(Debug, Deserialize, Validate)]
pub struct SlugShortenRequest {
    /// Company on whose behalf the slug is claimed.
    #[validate(length(min = 1, max = 255))]
    pub company_id: String,

    #[validate(length(max = 1000, message = "At most 1000 URLs per request"))]
    #[validate(nested)]
    #[serde(default)]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UrlItem {
    /// Caller-side identifier echoed back in the response.
    #[validate(length(max = 255))]
    #[serde(default)]
    pub record_id: String,

    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,
}

impl From<UrlItem> for ShortenInput {
    fn from(item: UrlItem) -> Self {
        Self {
            record_id: item.record_id,
            long_url: item.long_url,
        }
    }
}

/// Shortened URLs, in request order.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub count: usize,
    pub items: Vec<ShortenedItem>,
}

#[derive(Debug, Serialize)]
pub struct ShortenedItem {
    pub record_id: String,
    pub long_url: String,
    /// `code` or `slug/code`.
    pub short_code: String,
    pub short_url: String,
}

impl ShortenedItem {
    pub fn new(shortened: ShortenedUrl, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url, shortened.short_code);

        Self {
            record_id: shortened.record_id,
            long_url: shortened.long_url,
            short_code: shortened.short_code,
            short_url,
        }
    }
}
