//! Short code allocation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{GLOBAL_NAMESPACE, NewUrlEntry, UrlEntry};
use crate::domain::repositories::UrlEntryRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, default_generator};
use crate::utils::slug::is_reserved;
use serde_json::json;

/// Settings for [`AllocationService`].
#[derive(Debug, Clone)]
pub struct AllocationConfig {
    /// Upper bound on generate-and-insert attempts for one allocation.
    ///
    /// Reaching it means the namespace keyspace is effectively exhausted.
    pub max_attempts: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10_000,
        }
    }
}

/// Allocates collision-free short codes and resolves them back to long URLs.
///
/// Allocation generates a candidate and asks the store to insert it if
/// absent; a rejected insert means a collision, and a new candidate is drawn
/// immediately, with no backoff.
pub struct AllocationService<U: UrlEntryRepository + ?Sized> {
    repository: Arc<U>,
    generator: CodeGenerator,
    config: AllocationConfig,
}

impl<U: UrlEntryRepository + ?Sized> AllocationService<U> {
    /// Creates a service using the default code generator.
    pub fn new(repository: Arc<U>, config: AllocationConfig) -> Self {
        Self::with_generator(repository, default_generator(), config)
    }

    /// Creates a service with a custom code generation strategy.
    pub fn with_generator(
        repository: Arc<U>,
        generator: CodeGenerator,
        config: AllocationConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            config,
        }
    }

    /// Allocates a new short code for `seed_url` in `namespace`.
    ///
    /// On success the store holds a new entry with `times_accessed = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store fails or if
    /// [`AllocationConfig::max_attempts`] candidates all collided.
    pub async fn allocate(
        &self,
        namespace: &str,
        seed_url: &str,
        record_id: Option<&str>,
    ) -> Result<String, AppError> {
        for attempt in 1..=self.config.max_attempts {
            let code = (self.generator)(seed_url);

            // global codes share the top-level path with fixed routes like `/health`
            if namespace == GLOBAL_NAMESPACE && is_reserved(&code) {
                tracing::debug!(code = %code, attempt, "Short code shadows a fixed route, retrying");
                continue;
            }

            let inserted = self
                .repository
                .insert_if_absent(NewUrlEntry {
                    namespace: namespace.to_string(),
                    code: code.clone(),
                    record_id: record_id.map(str::to_string),
                    long_url: seed_url.to_string(),
                })
                .await?;

            if inserted {
                tracing::debug!(namespace, code = %code, attempt, "Short code allocated");
                return Ok(code);
            }

            tracing::debug!(namespace, code = %code, attempt, "Short code collision, retrying");
        }

        tracing::error!(
            namespace,
            max_attempts = self.config.max_attempts,
            "Short code keyspace exhausted"
        );

        Err(AppError::internal(
            "Failed to allocate a unique short code",
            json!({ "reason": "Too many collisions", "namespace": namespace }),
        ))
    }

    /// Resolves a short code and records the access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `(namespace, code)` does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, namespace: &str, code: &str) -> Result<String, AppError> {
        self.repository
            .resolve_and_touch(namespace, code)
            .await?
            .ok_or_else(|| not_found(namespace, code))
    }

    /// Returns an entry with its usage counters, without recording an access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `(namespace, code)` does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn entry(&self, namespace: &str, code: &str) -> Result<UrlEntry, AppError> {
        self.repository
            .find(namespace, code)
            .await?
            .ok_or_else(|| not_found(namespace, code))
    }

    /// Probes the underlying store.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn not_found(namespace: &str, code: &str) -> AppError {
    AppError::not_found(
        "Short link not found",
        json!({ "namespace": namespace, "code": code }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlEntryRepository;
    use crate::infrastructure::memory::MemoryUrlEntryRepository;
    use crate::utils::code_generator::is_valid_code;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_generator() -> CodeGenerator {
        let counter = Arc::new(AtomicUsize::new(0));
        Arc::new(move |_: &str| format!("C{:05}", counter.fetch_add(1, Ordering::SeqCst)))
    }

    #[tokio::test]
    async fn test_allocate_first_attempt() {
        let mut mock_repo = MockUrlEntryRepository::new();

        mock_repo
            .expect_insert_if_absent()
            .withf(|entry| {
                entry.namespace == "promo"
                    && entry.long_url == "https://example.com"
                    && entry.record_id.as_deref() == Some("r1")
            })
            .times(1)
            .returning(|_| Ok(true));

        let service = AllocationService::new(Arc::new(mock_repo), AllocationConfig::default());

        let code = service
            .allocate("promo", "https://example.com", Some("r1"))
            .await
            .unwrap();

        assert!(is_valid_code(&code));
    }

    #[tokio::test]
    async fn test_allocate_survives_thousand_forced_collisions() {
        let mut mock_repo = MockUrlEntryRepository::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_mock = calls.clone();

        mock_repo
            .expect_insert_if_absent()
            .times(1001)
            .returning(move |_| Ok(calls_in_mock.fetch_add(1, Ordering::SeqCst) >= 1000));

        let service = AllocationService::with_generator(
            Arc::new(mock_repo),
            counting_generator(),
            AllocationConfig::default(),
        );

        let code = service
            .allocate("", "https://example.com", None)
            .await
            .unwrap();

        // the 1001st candidate is the one that lands
        assert_eq!(code, "C01000");
        assert_eq!(calls.load(Ordering::SeqCst), 1001);
    }

    #[tokio::test]
    async fn test_global_allocation_skips_fixed_route_segments() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());
        let sequence = Arc::new(AtomicUsize::new(0));
        let generator: CodeGenerator = Arc::new(move |_: &str| {
            match sequence.fetch_add(1, Ordering::SeqCst) {
                0 => "health".to_string(),
                _ => "abc123".to_string(),
            }
        });

        let service = AllocationService::with_generator(
            repo.clone(),
            generator,
            AllocationConfig::default(),
        );

        let code = service
            .allocate(GLOBAL_NAMESPACE, "https://example.com", None)
            .await
            .unwrap();

        assert_eq!(code, "abc123");
        assert!(repo.find(GLOBAL_NAMESPACE, "health").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slug_namespace_may_use_route_words_as_codes() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());
        let generator: CodeGenerator = Arc::new(|_: &str| "health".to_string());
        let service =
            AllocationService::with_generator(repo, generator, AllocationConfig::default());

        let code = service
            .allocate("promo", "https://example.com", None)
            .await
            .unwrap();

        assert_eq!(code, "health");
    }

    #[tokio::test]
    async fn test_allocate_exhaustion_is_internal_error() {
        let mut mock_repo = MockUrlEntryRepository::new();

        mock_repo
            .expect_insert_if_absent()
            .times(5)
            .returning(|_| Ok(false));

        let service =
            AllocationService::new(Arc::new(mock_repo), AllocationConfig { max_attempts: 5 });

        let result = service.allocate("", "https://example.com", None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_allocate_never_returns_existing_code() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());

        // first allocation takes "AAAAAA"; the generator then repeats it twice more
        let sequence = Arc::new(AtomicUsize::new(0));
        let generator: CodeGenerator = Arc::new(move |_: &str| {
            match sequence.fetch_add(1, Ordering::SeqCst) {
                0..=2 => "AAAAAA".to_string(),
                _ => "BBBBBB".to_string(),
            }
        });

        let service = AllocationService::with_generator(
            repo.clone(),
            generator,
            AllocationConfig::default(),
        );

        let first = service.allocate("ns", "https://a.com", None).await.unwrap();
        let second = service.allocate("ns", "https://b.com", None).await.unwrap();

        assert_eq!(first, "AAAAAA");
        assert_eq!(second, "BBBBBB");
        assert_eq!(service.resolve("ns", "AAAAAA").await.unwrap(), "https://a.com");
    }

    #[tokio::test]
    async fn test_namespaces_reuse_codes_independently() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());
        let generator: CodeGenerator = Arc::new(|_: &str| "SAME01".to_string());
        let service =
            AllocationService::with_generator(repo, generator, AllocationConfig::default());

        let global = service.allocate("", "https://a.com", None).await.unwrap();
        let scoped = service.allocate("promo", "https://b.com", None).await.unwrap();

        assert_eq!(global, scoped);
        assert_eq!(service.resolve("", "SAME01").await.unwrap(), "https://a.com");
        assert_eq!(
            service.resolve("promo", "SAME01").await.unwrap(),
            "https://b.com"
        );
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockUrlEntryRepository::new();

        mock_repo
            .expect_resolve_and_touch()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = AllocationService::new(Arc::new(mock_repo), AllocationConfig::default());

        let result = service.resolve("", "nope00").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_increments_counter_by_one() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());
        let service = AllocationService::new(repo, AllocationConfig::default());

        let code = service
            .allocate("", "https://example.com", Some("r1"))
            .await
            .unwrap();

        let before = service.entry("", &code).await.unwrap();
        assert_eq!(before.times_accessed, 0);
        assert!(before.last_accessed.is_none());

        let url = service.resolve("", &code).await.unwrap();
        assert_eq!(url, "https://example.com");

        let after = service.entry("", &code).await.unwrap();
        assert_eq!(after.times_accessed, 1);
        assert!(after.last_accessed.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolutions_lose_no_increments() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());
        let service = Arc::new(AllocationService::new(repo, AllocationConfig::default()));

        let code = service
            .allocate("promo", "https://example.com", None)
            .await
            .unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let service = service.clone();
                let code = code.clone();
                tokio::spawn(async move { service.resolve("promo", &code).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "https://example.com");
        }

        let entry = service.entry("promo", &code).await.unwrap();
        assert_eq!(entry.times_accessed, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_allocations_yield_unique_codes() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());

        // tiny keyspace forces allocators to race for the same candidates
        let generator: CodeGenerator = Arc::new(|_: &str| {
            let n: u8 = rand::random_range(0..64);
            format!("K{n:05}")
        });
        let service = Arc::new(AllocationService::with_generator(
            repo,
            generator,
            AllocationConfig::default(),
        ));

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .allocate("", &format!("https://example.com/{i}"), None)
                        .await
                })
            })
            .collect();

        let mut codes = std::collections::HashSet::new();
        for handle in handles {
            codes.insert(handle.await.unwrap().unwrap());
        }

        assert_eq!(codes.len(), 50);
    }
}
