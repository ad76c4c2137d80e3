//! Persistence for URL records
//!
//! The shortener only talks to storage through [`UrlStore`]. Two backends are
//! provided: an in-process [`MemoryStore`] and the SeaORM-backed
//! [`SeaOrmStore`] for SQLite, MySQL and PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::{SeaOrmStore, infer_backend_from_url};
pub use memory::MemoryStore;
pub use models::{NewUrlRecord, UrlRecord};

/// Storage collaborator used by the shortening service.
///
/// Implementations assign ids that are unique, strictly increasing and start
/// at 1. Only records that already carry a short code are visible through
/// [`find_by_short_code`](UrlStore::find_by_short_code).
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord>;

    /// Upsert by `record.id`.
    ///
    /// For an existing record only a missing short code is filled in; the
    /// stored URL, click count and creation time are kept.
    async fn update(&self, record: &UrlRecord) -> Result<()>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>>;

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>>;

    /// 原子地增加点击量，返回新的计数；记录不存在时返回 `None`
    async fn increment_click(&self, id: i64) -> Result<Option<u64>>;

    fn backend_name(&self) -> &str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn UrlStore>> {
        let database_url = &config.database_url;

        // 从 URL 自动推断存储类型
        let backend_type = infer_backend_from_url(database_url)?;

        let store: Arc<dyn UrlStore> = if backend_type == "memory" {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(SeaOrmStore::new(database_url, &backend_type, config).await?)
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}
