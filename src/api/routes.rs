//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    company_slugs_handler, entry_handler, reservation_handler, reserve_handler, shorten_handler,
    slug_entry_handler, slug_shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /shorten`                    - Shorten URLs in the global namespace
/// - `POST /slugs/{slug}/shorten`       - Shorten URLs under a company slug
/// - `PUT  /slugs/{slug}/reservation`   - Reserve or refresh a slug
/// - `GET  /slugs/{slug}/reservation`   - Current reservation of a slug
/// - `GET  /companies/{company_id}/slugs` - Slugs attributed to a company
/// - `GET  /entries/{code}`             - Hit counter of a global link
/// - `GET  /entries/{slug}/{code}`      - Hit counter of a slug link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/slugs/{slug}/shorten", post(slug_shorten_handler))
        .route(
            "/slugs/{slug}/reservation",
            put(reserve_handler).get(reservation_handler),
        )
        .route("/companies/{company_id}/slugs", get(company_slugs_handler))
        .route("/entries/{code}", get(entry_handler))
        .route("/entries/{slug}/{code}", get(slug_entry_handler))
}
