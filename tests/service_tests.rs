//! ShortenerService tests
//!
//! Runs the shorten/resolve flow against the in-memory store, a temporary
//! SQLite database, and a store that fails on demand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;
use urlshrink::config::DatabaseConfig;
use urlshrink::errors::{Result, UrlShrinkError};
use urlshrink::services::ShortenerService;
use urlshrink::storage::{MemoryStore, NewUrlRecord, SeaOrmStore, UrlRecord, UrlStore};
use urlshrink::utils::UrlPolicy;

// =============================================================================
// Test Setup
// =============================================================================

fn memory_service() -> (ShortenerService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (ShortenerService::new(store.clone()), store)
}

/// Create a service backed by a temporary SQLite database
async fn sqlite_service() -> (ShortenerService, Arc<SeaOrmStore>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("service.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = Arc::new(
        SeaOrmStore::new(&db_url, "sqlite", &DatabaseConfig::default())
            .await
            .expect("Failed to create storage"),
    );
    (ShortenerService::new(store.clone()), store, temp_dir)
}

/// Store wrapper that can be told to fail creates or updates, or to act as if
/// a record disappeared right before its click is counted
struct FlakyStore {
    inner: MemoryStore,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    lose_clicks: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_create: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            lose_clicks: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl UrlStore for FlakyStore {
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(UrlShrinkError::storage_failure("create unavailable"));
        }
        self.inner.create(record).await
    }

    async fn update(&self, record: &UrlRecord) -> Result<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(UrlShrinkError::storage_failure("update unavailable"));
        }
        self.inner.update(record).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        self.inner.find_by_short_code(code).await
    }

    async fn increment_click(&self, id: i64) -> Result<Option<u64>> {
        if self.lose_clicks.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.increment_click(id).await
    }

    fn backend_name(&self) -> &str {
        "flaky"
    }
}

// =============================================================================
// Shorten Tests
// =============================================================================

#[tokio::test]
async fn test_shorten_assigns_code_from_id() {
    let (service, store) = memory_service();

    let code = service.shorten("https://example.com/first").await.unwrap();
    assert_eq!(code, "1");

    let record = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(record.short_code.as_deref(), Some("1"));
    assert_eq!(record.original_url, "https://example.com/first");
    assert_eq!(record.click_count, 0);
}

#[tokio::test]
async fn test_sixty_second_record_gets_two_symbol_code() {
    let (service, _store) = memory_service();

    let mut last = String::new();
    for i in 1..=62 {
        last = service
            .shorten(&format!("https://example.com/{}", i))
            .await
            .unwrap();
    }
    assert_eq!(last, "10");
}

#[tokio::test]
async fn test_shorten_rejects_empty_url() {
    let (service, store) = memory_service();

    for input in ["", "   "] {
        let err = service.shorten(input).await.unwrap_err();
        assert!(matches!(err, UrlShrinkError::InvalidArgument(_)));
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_strict_policy_rejects_non_http() {
    let (service, store) = memory_service();
    assert_eq!(service.policy(), UrlPolicy::HttpOnly);

    let err = service.shorten("javascript:alert(1)").await.unwrap_err();
    assert!(matches!(err, UrlShrinkError::InvalidArgument(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_failure_returns_no_code() {
    let store = Arc::new(FlakyStore::new());
    store.fail_create.store(true, Ordering::SeqCst);
    let service = ShortenerService::new(store.clone());

    let err = service.shorten("https://example.com").await.unwrap_err();
    assert!(matches!(err, UrlShrinkError::StorageFailure(_)));
    assert!(store.inner.is_empty());
}

#[tokio::test]
async fn test_update_failure_leaves_unreachable_record() {
    let store = Arc::new(FlakyStore::new());
    store.fail_update.store(true, Ordering::SeqCst);
    let service = ShortenerService::new(store.clone());

    let err = service.shorten("https://example.com").await.unwrap_err();
    assert!(matches!(err, UrlShrinkError::StorageFailure(_)));

    // 记录已创建但没有短码
    let orphan = store.find_by_id(1).await.unwrap().unwrap();
    assert!(orphan.short_code.is_none());
    assert!(service.resolve("1").await.unwrap_err().is_not_found());

    // 后续成功的 shorten 使用新的 id
    store.fail_update.store(false, Ordering::SeqCst);
    assert_eq!(service.shorten("https://example.com").await.unwrap(), "2");
}

// =============================================================================
// Resolve Tests
// =============================================================================

#[tokio::test]
async fn test_round_trip_counts_one_click() {
    let (service, store) = memory_service();
    let url = "https://example.com/some/long/path?with=query&and=more#frag";

    let code = service.shorten(url).await.unwrap();
    assert_eq!(service.resolve(&code).await.unwrap(), url);

    let record = store.find_by_short_code(&code).await.unwrap().unwrap();
    assert_eq!(record.click_count, 1);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let (service, _store) = memory_service();

    for code in ["doesNotExist", "1", "zz"] {
        let err = service.resolve(code).await.unwrap_err();
        assert!(err.is_not_found(), "{}", code);
        assert!(err.message().contains(code));
    }
}

#[tokio::test]
async fn test_resolve_when_record_vanishes_before_click() {
    let store = Arc::new(FlakyStore::new());
    let service = ShortenerService::new(store.clone());
    let code = service.shorten("https://example.com").await.unwrap();

    store.lose_clicks.store(true, Ordering::SeqCst);
    let err = service.resolve(&code).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.message().contains(&code));

    // lookup 仍能看到记录，点击量未变化
    assert_eq!(service.lookup(&code).await.unwrap().click_count, 0);
}

#[tokio::test]
async fn test_counter_monotonicity() {
    let (service, _store) = memory_service();
    let code = service.shorten("https://example.com").await.unwrap();

    for k in 1..=10u64 {
        service.resolve(&code).await.unwrap();
        assert_eq!(service.lookup(&code).await.unwrap().click_count, k);
    }
}

#[tokio::test]
async fn test_lookup_does_not_count() {
    let (service, _store) = memory_service();
    let code = service.shorten("https://example.com").await.unwrap();

    let record = service.lookup(&code).await.unwrap();
    assert_eq!(record.click_count, 0);
    assert_eq!(service.lookup(&code).await.unwrap().click_count, 0);
}

#[tokio::test]
async fn test_resolves_are_isolated_per_code() {
    let (service, _store) = memory_service();
    let a = service.shorten("https://a.example").await.unwrap();
    let b = service.shorten("https://b.example").await.unwrap();

    service.resolve(&a).await.unwrap();
    service.resolve(&a).await.unwrap();
    service.resolve(&b).await.unwrap();

    assert_eq!(service.lookup(&a).await.unwrap().click_count, 2);
    assert_eq!(service.lookup(&b).await.unwrap().click_count, 1);
    assert_eq!(service.resolve(&b).await.unwrap(), "https://b.example");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_lose_no_clicks() {
    let (service, _store) = memory_service();
    let service = Arc::new(service);
    let code = service.shorten("https://example.com").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..25 {
                service.resolve(&code).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(service.lookup(&code).await.unwrap().click_count, 200);
}

// =============================================================================
// SQLite-backed flow
// =============================================================================

#[tokio::test]
async fn test_sqlite_round_trip() {
    let (service, store, _dir) = sqlite_service().await;

    let first = service.shorten("https://example.com/one").await.unwrap();
    let second = service.shorten("https://example.com/two").await.unwrap();
    assert_eq!(first, "1");
    assert_eq!(second, "2");

    assert_eq!(service.resolve(&first).await.unwrap(), "https://example.com/one");
    assert_eq!(service.resolve(&second).await.unwrap(), "https://example.com/two");
    assert_eq!(service.resolve(&second).await.unwrap(), "https://example.com/two");

    let record = store.find_by_short_code(&second).await.unwrap().unwrap();
    assert_eq!(record.click_count, 2);
    assert!(service.resolve("3").await.unwrap_err().is_not_found());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_concurrent_resolves_lose_no_clicks() {
    let (service, _store, _dir) = sqlite_service().await;
    let service = Arc::new(service);
    let code = service.shorten("https://example.com").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                service.resolve(&code).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(service.lookup(&code).await.unwrap().click_count, 40);
}
