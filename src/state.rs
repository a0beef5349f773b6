//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AllocationConfig, AllocationService, AuthService, ReservationConfig, ReservationService,
    ShorteningService,
};
use crate::domain::repositories::{SlugReservationRepository, UrlEntryRepository};

pub type DynAllocationService = AllocationService<dyn UrlEntryRepository>;
pub type DynReservationService = ReservationService<dyn SlugReservationRepository>;
pub type DynShorteningService =
    ShorteningService<dyn UrlEntryRepository, dyn SlugReservationRepository>;

/// Services and settings shared across requests.
///
/// Cloning is cheap: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<DynAllocationService>,
    pub reservation_service: Arc<DynReservationService>,
    pub shortening_service: Arc<DynShorteningService>,
    pub auth_service: Arc<AuthService>,
    /// Public prefix of short links, without trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires the services on top of the given stores.
    pub fn new(
        url_entries: Arc<dyn UrlEntryRepository>,
        reservations: Arc<dyn SlugReservationRepository>,
        allocation_config: AllocationConfig,
        reservation_config: ReservationConfig,
        auth_service: AuthService,
        base_url: impl Into<String>,
    ) -> Self {
        let allocation_service = Arc::new(AllocationService::new(url_entries, allocation_config));
        let reservation_service =
            Arc::new(ReservationService::new(reservations, reservation_config));
        let shortening_service = Arc::new(ShorteningService::new(
            allocation_service.clone(),
            reservation_service.clone(),
        ));

        Self {
            allocation_service,
            reservation_service,
            shortening_service,
            auth_service: Arc::new(auth_service),
            base_url: base_url.into(),
        }
    }
}
