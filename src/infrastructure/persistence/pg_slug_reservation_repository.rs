//! PostgreSQL implementation of the slug reservation repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::SlugReservation;
use crate::domain::repositories::SlugReservationRepository;
use crate::error::AppError;

/// PostgreSQL repository for slug reservations.
///
/// Each transition is a conditional `UPDATE` whose `WHERE` clause pins the
/// owner and expiry the caller read; zero affected rows means another
/// writer changed the reservation first.
pub struct PgSlugReservationRepository {
    pool: Arc<PgPool>,
}

impl PgSlugReservationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SlugReservationRow {
    slug: String,
    owner: String,
    permanent: bool,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<SlugReservationRow> for SlugReservation {
    fn from(row: SlugReservationRow) -> Self {
        Self {
            slug: row.slug,
            owner: row.owner,
            permanent: row.permanent,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl SlugReservationRepository for PgSlugReservationRepository {
    async fn get(&self, slug: &str) -> Result<Option<SlugReservation>, AppError> {
        let row = sqlx::query_as::<_, SlugReservationRow>(
            r#"
            SELECT slug, owner, permanent, created_at, expires_at
            FROM slug_reservations
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SlugReservation::from))
    }

    async fn create(
        &self,
        slug: &str,
        owner: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<SlugReservation>, AppError> {
        let row = sqlx::query_as::<_, SlugReservationRow>(
            r#"
            INSERT INTO slug_reservations (slug, owner, permanent, created_at, expires_at)
            VALUES ($1, $2, FALSE, now(), $3)
            ON CONFLICT (slug) DO NOTHING
            RETURNING slug, owner, permanent, created_at, expires_at
            "#,
        )
        .bind(slug)
        .bind(owner)
        .bind(expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SlugReservation::from))
    }

    async fn refresh(
        &self,
        expected: &SlugReservation,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE slug_reservations
            SET expires_at = $4
            WHERE slug = $1
              AND owner = $2
              AND NOT permanent
              AND expires_at IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(&expected.slug)
        .bind(&expected.owner)
        .bind(expected.expires_at)
        .bind(new_expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn transfer(
        &self,
        expected: &SlugReservation,
        new_owner: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE slug_reservations
            SET owner = $4, expires_at = $5
            WHERE slug = $1
              AND owner = $2
              AND NOT permanent
              AND expires_at IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(&expected.slug)
        .bind(&expected.owner)
        .bind(expected.expires_at)
        .bind(new_owner)
        .bind(new_expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn promote_permanent(&self, expected: &SlugReservation) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE slug_reservations
            SET permanent = TRUE, expires_at = NULL
            WHERE slug = $1 AND owner = $2
            "#,
        )
        .bind(&expected.slug)
        .bind(&expected.owner)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<String>, AppError> {
        let slugs = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT slug
            FROM slug_reservations
            WHERE owner = $1
            ORDER BY slug
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(slugs)
    }
}
