//! Business logic services for the application layer.

pub mod allocation_service;
pub mod auth_service;
pub mod reservation_service;
pub mod shortening_service;

pub use allocation_service::{AllocationConfig, AllocationService};
pub use auth_service::AuthService;
pub use reservation_service::{ReservationConfig, ReservationService};
pub use shortening_service::{ShortenRequest, ShortenedUrl, ShorteningService};
