//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod entries;
pub mod health;
pub mod redirect;
pub mod reservations;
pub mod shorten;

pub use entries::{entry_handler, slug_entry_handler};
pub use health::health_handler;
pub use redirect::{redirect_handler, slug_redirect_handler};
pub use reservations::{company_slugs_handler, reservation_handler, reserve_handler};
pub use shorten::{shorten_handler, slug_shorten_handler};
