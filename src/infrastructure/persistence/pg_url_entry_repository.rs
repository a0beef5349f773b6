//! PostgreSQL implementation of the URL entry repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::UrlEntryRepository;
use crate::error::AppError;

/// PostgreSQL repository for short code storage and resolution.
///
/// Collisions are detected by the `(company_slug, short_code)` primary key
/// with `ON CONFLICT DO NOTHING`; counters are bumped by a single `UPDATE`.
pub struct PgUrlEntryRepository {
    pool: Arc<PgPool>,
}

impl PgUrlEntryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlEntryRow {
    company_slug: String,
    short_code: String,
    record_id: Option<String>,
    long_url: String,
    times_accessed: i64,
    last_accessed: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<UrlEntryRow> for UrlEntry {
    fn from(row: UrlEntryRow) -> Self {
        Self {
            namespace: row.company_slug,
            code: row.short_code,
            record_id: row.record_id,
            long_url: row.long_url,
            times_accessed: row.times_accessed,
            last_accessed: row.last_accessed,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UrlEntryRepository for PgUrlEntryRepository {
    async fn insert_if_absent(&self, new_entry: NewUrlEntry) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_entries (company_slug, short_code, record_id, long_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_slug, short_code) DO NOTHING
            "#,
        )
        .bind(&new_entry.namespace)
        .bind(&new_entry.code)
        .bind(&new_entry.record_id)
        .bind(&new_entry.long_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn resolve_and_touch(
        &self,
        namespace: &str,
        code: &str,
    ) -> Result<Option<String>, AppError> {
        let long_url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE url_entries
            SET times_accessed = times_accessed + 1,
                last_accessed = now()
            WHERE company_slug = $1 AND short_code = $2
            RETURNING long_url
            "#,
        )
        .bind(namespace)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(long_url)
    }

    async fn find(&self, namespace: &str, code: &str) -> Result<Option<UrlEntry>, AppError> {
        let row = sqlx::query_as::<_, UrlEntryRow>(
            r#"
            SELECT company_slug, short_code, record_id, long_url,
                   times_accessed, last_accessed, created_at
            FROM url_entries
            WHERE company_slug = $1 AND short_code = $2
            "#,
        )
        .bind(namespace)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlEntry::from))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
