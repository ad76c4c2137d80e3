//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{Result, UrlShrinkError};
use crate::storage::{NewUrlRecord, UrlRecord, UrlStore};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, record_to_active_model};

/// 从数据库 URL 推断存储类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(UrlShrinkError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: memory://, sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStore {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(UrlShrinkError::database_config("database_url 未设置"));
        }

        let retry_config = retry::RetryConfig {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        };

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config).await?
        };

        let store = SeaOrmStore {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        run_migrations(&store.db).await?;

        warn!("{} Storage initialized.", store.backend_name.to_uppercase());
        Ok(store)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UrlStore for SeaOrmStore {
    async fn create(&self, record: NewUrlRecord) -> Result<UrlRecord> {
        self.insert_record(record).await
    }

    async fn update(&self, record: &UrlRecord) -> Result<()> {
        self.upsert_record(record).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>> {
        self.get_by_id(id).await
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        self.get_by_short_code(code).await
    }

    async fn increment_click(&self, id: i64) -> Result<Option<u64>> {
        self.bump_click(id).await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
