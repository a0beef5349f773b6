use slug_shortener::domain::entities::NewUrlEntry;
use slug_shortener::domain::repositories::UrlEntryRepository;
use slug_shortener::infrastructure::persistence::PgUrlEntryRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_entry(namespace: &str, code: &str, url: &str) -> NewUrlEntry {
    NewUrlEntry {
        namespace: namespace.to_string(),
        code: code.to_string(),
        record_id: Some("rec-1".to_string()),
        long_url: url.to_string(),
    }
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgUrlEntryRepository::new(Arc::new(pool));

    let inserted = repo
        .insert_if_absent(new_entry("", "abc123", "https://example.com"))
        .await
        .unwrap();

    assert!(inserted);

    let entry = repo.find("", "abc123").await.unwrap().unwrap();
    assert_eq!(entry.namespace, "");
    assert_eq!(entry.code, "abc123");
    assert_eq!(entry.record_id.as_deref(), Some("rec-1"));
    assert_eq!(entry.long_url, "https://example.com");
    assert_eq!(entry.times_accessed, 0);
    assert!(entry.last_accessed.is_none());
}

#[sqlx::test]
async fn test_insert_collision(pool: PgPool) {
    let repo = PgUrlEntryRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_entry("promo", "abc123", "https://first.com"))
        .await
        .unwrap();

    let inserted = repo
        .insert_if_absent(new_entry("promo", "abc123", "https://second.com"))
        .await
        .unwrap();

    assert!(!inserted);
    let entry = repo.find("promo", "abc123").await.unwrap().unwrap();
    assert_eq!(entry.long_url, "https://first.com");
}

#[sqlx::test]
async fn test_same_code_in_two_namespaces(pool: PgPool) {
    let repo = PgUrlEntryRepository::new(Arc::new(pool));

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

    assert_eq!(
        repo.resolve_and_touch("promo", "abc123").await.unwrap().as_deref(),
        Some("https://b.com")
    );
}

#[sqlx::test]
async fn test_resolve_and_touch(pool: PgPool) {
    let repo = PgUrlEntryRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_entry("", "abc123", "https://example.com"))
        .await
        .unwrap();

    let url = repo.resolve_and_touch("", "abc123").await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));

    let entry = repo.find("", "abc123").await.unwrap().unwrap();
    assert_eq!(entry.times_accessed, 1);
    assert!(entry.last_accessed.is_some());
}

#[sqlx::test]
async fn test_resolve_missing(pool: PgPool) {
    let repo = PgUrlEntryRepository::new(Arc::new(pool));

    assert!(repo.resolve_and_touch("", "nope00").await.unwrap().is_none());
    assert!(repo.find("", "nope00").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_concurrent_resolutions(pool: PgPool) {
    let repo = Arc::new(PgUrlEntryRepository::new(Arc::new(pool)));

    repo.insert_if_absent(new_entry("", "abc123", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.resolve_and_touch("", "abc123").await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_some());
    }

    let entry = repo.find("", "abc123").await.unwrap().unwrap();
    assert_eq!(entry.times_accessed, 100);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUrlEntryRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
