//! In-process storage backend
//!
//! Everything lives behind one `RwLock`, which makes id assignment and click
//! increments trivially atomic. Data is lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{NewUrlRecord, UrlRecord, UrlStore};
use crate::errors::{Result, UrlShrinkError};

#[derive(Default)]
struct Inner {
    records: HashMap<i64, UrlRecord>,
    by_code: HashMap<String, i64>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, including ones still waiting for a code.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UrlStore for MemoryStore {
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord> {
        let mut inner = self.inner.write();
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| UrlShrinkError::storage_failure("id sequence exhausted"))?;
        inner.last_id = id;

        let stored = UrlRecord {
            id,
            original_url: record.original_url,
            short_code: None,
            click_count: 0,
            created_at: record.created_at,
        };
        inner.records.insert(id, stored.clone());
        debug!("MemoryStore: created record {}", id);
        Ok(stored)
    }

    async fn update(&self, record: &UrlRecord) -> Result<()> {
        let mut inner = self.inner.write();

        // 已存在的记录只补短码；url、点击量、创建时间以存储中的为准
        let stored = match inner.records.get(&record.id) {
            Some(existing) => UrlRecord {
                short_code: existing.short_code.clone().or_else(|| record.short_code.clone()),
                ..existing.clone()
            },
            None => record.clone(),
        };

        if let Some(code) = &stored.short_code
            && let Some(&owner) = inner.by_code.get(code)
            && owner != stored.id
        {
            return Err(UrlShrinkError::storage_failure(format!(
                "short code '{}' already belongs to record {}",
                code, owner
            )));
        }

        if let Some(code) = &stored.short_code {
            inner.by_code.insert(code.clone(), stored.id);
        }
        inner.last_id = inner.last_id.max(stored.id);
        inner.records.insert(stored.id, stored);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>> {
        Ok(self.inner.read().records.get(&id).cloned())
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        let inner = self.inner.read();
        Ok(inner
            .by_code
            .get(code)
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    async fn increment_click(&self, id: i64) -> Result<Option<u64>> {
        let mut inner = self.inner.write();
        Ok(inner.records.get_mut(&id).map(|record| {
            record.click_count = record.click_count.saturating_add(1);
            record.click_count
        }))
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = MemoryStore::new();
        let a = store.create(NewUrlRecord::new("https://a.example")).await.unwrap();
        let b = store.create(NewUrlRecord::new("https://b.example")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.short_code.is_none());
        assert_eq!(a.click_count, 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_record_without_code_is_invisible_by_code() {
        let store = MemoryStore::new();
        let rec = store.create(NewUrlRecord::new("https://a.example")).await.unwrap();
        assert!(store.find_by_short_code("1").await.unwrap().is_none());

        let mut with_code = rec.clone();
        with_code.short_code = Some("1".to_string());
        store.update(&with_code).await.unwrap();

        let found = store.find_by_short_code("1").await.unwrap().unwrap();
        assert_eq!(found.id, rec.id);
    }

    #[tokio::test]
    async fn test_update_rejects_code_owned_by_other_record() {
        let store = MemoryStore::new();
        let mut a = store.create(NewUrlRecord::new("https://a.example")).await.unwrap();
        let mut b = store.create(NewUrlRecord::new("https://b.example")).await.unwrap();
        a.short_code = Some("x".to_string());
        store.update(&a).await.unwrap();

        b.short_code = Some("x".to_string());
        let err = store.update(&b).await.unwrap_err();
        assert!(matches!(err, UrlShrinkError::StorageFailure(_)));
    }

    #[tokio::test]
    async fn test_update_only_attaches_code() {
        let store = MemoryStore::new();
        let stale = store.create(NewUrlRecord::new("https://a.example")).await.unwrap();

        let mut with_code = stale.clone();
        with_code.short_code = Some("1".to_string());
        store.update(&with_code).await.unwrap();
        for _ in 0..3 {
            store.increment_click(stale.id).await.unwrap();
        }

        // 旧副本写回不能重置点击量或改写 url
        let mut rewritten = with_code.clone();
        rewritten.original_url = "https://evil.example".to_string();
        store.update(&rewritten).await.unwrap();
        store.update(&stale).await.unwrap();

        let found = store.find_by_id(stale.id).await.unwrap().unwrap();
        assert_eq!(found.click_count, 3);
        assert_eq!(found.original_url, "https://a.example");
        assert_eq!(found.short_code.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_attached_code_is_not_replaced() {
        let store = MemoryStore::new();
        let mut rec = store.create(NewUrlRecord::new("https://a.example")).await.unwrap();
        rec.short_code = Some("1".to_string());
        store.update(&rec).await.unwrap();

        rec.short_code = Some("other".to_string());
        store.update(&rec).await.unwrap();

        assert!(store.find_by_short_code("other").await.unwrap().is_none());
        assert_eq!(store.find_by_short_code("1").await.unwrap().unwrap().id, rec.id);
    }

    #[tokio::test]
    async fn test_increment_click() {
        let store = MemoryStore::new();
        let rec = store.create(NewUrlRecord::new("https://a.example")).await.unwrap();
        assert_eq!(store.increment_click(rec.id).await.unwrap(), Some(1));
        assert_eq!(store.increment_click(rec.id).await.unwrap(), Some(2));
        assert_eq!(store.increment_click(999).await.unwrap(), None);
        assert_eq!(
            store.find_by_id(rec.id).await.unwrap().unwrap().click_count,
            2
        );
    }
}
