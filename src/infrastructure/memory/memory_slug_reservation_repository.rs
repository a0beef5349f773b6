use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::SlugReservation;
use crate::domain::repositories::SlugReservationRepository;
use crate::error::AppError;

/// In-memory slug reservation store.
///
/// Compare-and-swap transitions hold the entry's shard lock between the
/// comparison and the write.
#[derive(Debug, Default)]
pub struct MemorySlugReservationRepository {
    storage: DashMap<String, SlugReservation>,
}

impl MemorySlugReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `update` if the stored reservation still satisfies `matches`.
    fn compare_and_update<M, F>(&self, slug: &str, matches: M, update: F) -> bool
    where
        M: FnOnce(&SlugReservation) -> bool,
        F: FnOnce(&mut SlugReservation),
    {
        let Some(mut current) = self.storage.get_mut(slug) else {
            return false;
        };

        if !matches(&current) {
            return false;
        }

        update(&mut current);
        true
    }
}

#[async_trait]
impl SlugReservationRepository for MemorySlugReservationRepository {
    async fn get(&self, slug: &str) -> Result<Option<SlugReservation>, AppError> {
        Ok(self.storage.get(slug).map(|r| r.value().clone()))
    }

    async fn create(
        &self,
        slug: &str,
        owner: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<SlugReservation>, AppError> {
        match self.storage.entry(slug.to_string()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(vacant) => {
                let reservation = SlugReservation {
                    slug: slug.to_string(),
                    owner: owner.to_string(),
                    permanent: false,
                    created_at: Utc::now(),
                    expires_at: Some(expires_at),
                };
                vacant.insert(reservation.clone());
                Ok(Some(reservation))
            }
        }
    }

    async fn refresh(
        &self,
        expected: &SlugReservation,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Ok(self.compare_and_update(
            &expected.slug,
            |current| {
                !current.permanent
                    && current.owner == expected.owner
                    && current.expires_at == expected.expires_at
            },
            |current| current.expires_at = Some(new_expires_at),
        ))
    }

    async fn transfer(
        &self,
        expected: &SlugReservation,
        new_owner: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Ok(self.compare_and_update(
            &expected.slug,
            |current| {
                !current.permanent
                    && current.owner == expected.owner
                    && current.expires_at == expected.expires_at
            },
            |current| {
                current.owner = new_owner.to_string();
                current.expires_at = Some(new_expires_at);
            },
        ))
    }

    async fn promote_permanent(&self, expected: &SlugReservation) -> Result<bool, AppError> {
        Ok(self.compare_and_update(
            &expected.slug,
            |current| current.owner == expected.owner,
            |current| {
                current.permanent = true;
                current.expires_at = None;
            },
        ))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<String>, AppError> {
        let mut slugs: Vec<String> = self
            .storage
            .iter()
            .filter(|r| r.owner == owner)
            .map(|r| r.key().clone())
            .collect();

        slugs.sort();
        Ok(slugs)
    }
}
