//! Middleware applied by [`crate::routes::app_router`].

pub mod auth;
pub mod rate_limit;
pub mod tracing;
