//! HTTP surface of the service.
//!
//! Handlers only decode requests, call a service from
//! [`crate::state::AppState`] and encode the outcome; all reservation and
//! allocation rules live in [`crate::application`].
//!
//! - [`dto`] - request and response bodies
//! - [`handlers`] - endpoint functions
//! - [`middleware`] - authentication, rate limiting and request tracing
//! - [`routes`] - the authenticated `/api` router

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
