//! Mutation operations for SeaOrmStore
//!
//! This module contains all write database operations.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, ExprTrait,
    QueryFilter, TransactionTrait, UpdateMany,
};
use tracing::{debug, info};

use super::SeaOrmStore;
use super::converters::{model_to_record, new_record_to_active_model, record_to_active_model};
use super::retry;
use crate::errors::{Result, UrlShrinkError};
use crate::storage::{NewUrlRecord, UrlRecord};

use migration::entities::url_record;

impl SeaOrmStore {
    /// 插入新记录，由数据库分配自增 id
    pub(super) async fn insert_record(&self, record: NewUrlRecord) -> Result<UrlRecord> {
        let db = &self.db;

        let model = retry::with_retry("insert_record", self.retry_config, || {
            let active_model = new_record_to_active_model(record.clone());
            async move { active_model.insert(db).await }
        })
        .await
        .map_err(|e| UrlShrinkError::storage_failure(format!("创建记录失败: {}", e)))?;

        debug!("Record {} created", model.id);
        Ok(model_to_record(model))
    }

    /// 使用 ON CONFLICT(id) 的 upsert
    ///
    /// 已存在的记录只会补上短码，其余列保持数据库中的值；已有短码不会被覆盖
    pub(super) async fn upsert_record(&self, record: &UrlRecord) -> Result<()> {
        let db = &self.db;
        let keep_code = keep_existing_code_expr(db.get_database_backend());

        retry::with_retry(
            &format!("upsert_record({})", record.id),
            self.retry_config,
            || async {
                url_record::Entity::insert(record_to_active_model(record))
                    .on_conflict(
                        OnConflict::column(url_record::Column::Id)
                            .value(url_record::Column::ShortCode, keep_code.clone())
                            .to_owned(),
                    )
                    .exec(db)
                    .await
                    .map(|_| ())
            },
        )
        .await
        .map_err(|e| {
            UrlShrinkError::storage_failure(format!("更新记录 {} 失败: {}", record.id, e))
        })?;

        info!(
            "Record {} saved (code: {})",
            record.id,
            record.short_code.as_deref().unwrap_or("<none>")
        );
        Ok(())
    }

    /// 原子 +1 并返回本次更新产生的计数
    ///
    /// 支持 RETURNING 的后端（SQLite、PostgreSQL）用单条语句完成；MySQL 在事务内
    /// 先 UPDATE 再读取，行锁保证读到的是本次的结果
    pub(super) async fn bump_click(&self, id: i64) -> Result<Option<u64>> {
        let db = &self.db;
        let operation = format!("bump_click({})", id);

        let model = if db.support_returning() {
            retry::with_retry(&operation, self.retry_config, || async {
                let mut rows = increment_click_stmt(id).exec_with_returning(db).await?;
                Ok::<_, DbErr>(rows.pop())
            })
            .await
        } else {
            retry::with_retry(&operation, self.retry_config, || async {
                let txn = db.begin().await?;
                let updated = increment_click_stmt(id).exec(&txn).await?;
                let model = if updated.rows_affected == 0 {
                    None
                } else {
                    url_record::Entity::find_by_id(id).one(&txn).await?
                };
                txn.commit().await?;
                Ok::<_, DbErr>(model)
            })
            .await
        }
        .map_err(|e| UrlShrinkError::storage_failure(format!("更新点击量失败: {}", e)))?;

        Ok(model.map(|m| model_to_record(m).click_count))
    }
}

fn increment_click_stmt(id: i64) -> UpdateMany<url_record::Entity> {
    url_record::Entity::update_many()
        .col_expr(
            url_record::Column::ClickCount,
            Expr::col(url_record::Column::ClickCount).add(1i64),
        )
        .filter(url_record::Column::Id.eq(id))
}

/// `short_code = COALESCE(当前值, 新值)`，MySQL 用 VALUES() 引用待插入行
fn keep_existing_code_expr(backend: DbBackend) -> Expr {
    match backend {
        DbBackend::MySql => Expr::cust("COALESCE(`short_code`, VALUES(`short_code`))"),
        _ => Expr::cust(r#"COALESCE("url_records"."short_code", "excluded"."short_code")"#),
    }
}
