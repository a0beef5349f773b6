//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Short code allocation and resolution
//! - [`services::reservation_service::ReservationService`] - Slug reservation state machine
//! - [`services::shortening_service::ShorteningService`] - Batch shortening, global or under a slug
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
