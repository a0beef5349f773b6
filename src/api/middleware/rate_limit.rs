//! Per-IP rate limiting (token bucket).
//!
//! Clients are keyed on the socket peer address, so the router must be
//! served with `into_make_service_with_connect_info::<SocketAddr>`. Requests
//! over the limit get `429 Too Many Requests`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Limiter for public redirects and health checks: 2 req/s, burst of 100.
pub fn layer() -> RateLimitLayer {
    token_bucket(2, 100)
}

/// Limiter for the authenticated `/api` routes, which write to storage:
/// 1 req/s, burst of 10.
pub fn secure_layer() -> RateLimitLayer {
    token_bucket(1, 10)
}

fn token_bucket(per_second: u64, burst_size: u32) -> RateLimitLayer {
    let config = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .expect("rate limit and burst size are non-zero");

    GovernorLayer::new(Arc::new(config))
}
