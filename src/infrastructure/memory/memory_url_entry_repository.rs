use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::UrlEntryRepository;
use crate::error::AppError;

type Key = (String, String);

/// In-memory URL entry store keyed by `(namespace, code)`.
#[derive(Debug, Default)]
pub struct MemoryUrlEntryRepository {
    storage: DashMap<Key, UrlEntry>,
}

impl MemoryUrlEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.storage.len()
    }
}

fn key(namespace: &str, code: &str) -> Key {
    (namespace.to_string(), code.to_string())
}

#[async_trait]
impl UrlEntryRepository for MemoryUrlEntryRepository {
    async fn insert_if_absent(&self, new_entry: NewUrlEntry) -> Result<bool, AppError> {
        match self.storage.entry(key(&new_entry.namespace, &new_entry.code)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(vacant) => {
                vacant.insert(UrlEntry {
                    namespace: new_entry.namespace,
                    code: new_entry.code,
                    record_id: new_entry.record_id,
                    long_url: new_entry.long_url,
                    times_accessed: 0,
                    last_accessed: None,
                    created_at: Utc::now(),
                });
                Ok(true)
            }
        }
    }

    async fn resolve_and_touch(
        &self,
        namespace: &str,
        code: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(mut entry) = self.storage.get_mut(&key(namespace, code)) else {
            return Ok(None);
        };

        entry.times_accessed += 1;
        entry.last_accessed = Some(Utc::now());

        Ok(Some(entry.long_url.clone()))
    }

    async fn find(&self, namespace: &str, code: &str) -> Result<Option<UrlEntry>, AppError> {
        Ok(self
            .storage
            .get(&key(namespace, code))
            .map(|entry| entry.value().clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_entry(namespace: &str, code: &str, url: &str) -> NewUrlEntry {
        NewUrlEntry {
            namespace: namespace.to_string(),
            code: code.to_string(),
            record_id: Some("r1".to_string()),
            long_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = MemoryUrlEntryRepository::new();

        assert!(
            repo.insert_if_absent(new_entry("", "abc123", "https://example.com"))
                .await
                .unwrap()
        );

        let entry = repo.find("", "abc123").await.unwrap().unwrap();
        assert_eq!(entry.long_url, "https://example.com");
        assert_eq!(entry.record_id.as_deref(), Some("r1"));
        assert_eq!(entry.times_accessed, 0);
        assert!(entry.last_accessed.is_none());
    }

    #[tokio::test]
    async fn insert_collision_keeps_original() {
        let repo = MemoryUrlEntryRepository::new();

        repo.insert_if_absent(new_entry("", "abc123", "https://first.com"))
            .await
            .unwrap();
        let inserted = repo
            .insert_if_absent(new_entry("", "abc123", "https://second.com"))
            .await
            .unwrap();

        assert!(!inserted);
        let entry = repo.find("", "abc123").await.unwrap().unwrap();
        assert_eq!(entry.long_url, "https://first.com");
    }

    #[tokio::test]
    async fn same_code_in_different_namespaces() {
        let repo = MemoryUrlEntryRepository::new();

        assert!(
            repo.insert_if_absent(new_entry("", "abc123", "https://a.com"))
                .await
                .unwrap()
        );
        assert!(
            repo.insert_if_absent(new_entry("promo", "abc123", "https://b.com"))
                .await
                .unwrap()
        );

        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn resolve_missing() {
        let repo = MemoryUrlEntryRepository::new();

        assert!(repo.resolve_and_touch("", "nope00").await.unwrap().is_none());
        assert!(repo.find("", "nope00").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_touches_counters() {
        let repo = MemoryUrlEntryRepository::new();
        repo.insert_if_absent(new_entry("promo", "abc123", "https://example.com"))
            .await
            .unwrap();

        let url = repo.resolve_and_touch("promo", "abc123").await.unwrap();
        repo.resolve_and_touch("promo", "abc123").await.unwrap();

        assert_eq!(url.as_deref(), Some("https://example.com"));
        let entry = repo.find("promo", "abc123").await.unwrap().unwrap();
        assert_eq!(entry.times_accessed, 2);
        assert!(entry.last_accessed.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_same_key_have_one_winner() {
        let repo = Arc::new(MemoryUrlEntryRepository::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.insert_if_absent(new_entry("", "abc123", &format!("https://{i}.com")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }
}
