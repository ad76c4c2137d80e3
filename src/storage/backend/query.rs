//! Query operations for SeaOrmStore
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::debug;

use super::converters::model_to_record;
use super::{SeaOrmStore, retry};
use crate::errors::{Result, UrlShrinkError};
use crate::storage::UrlRecord;

use migration::entities::url_record;

impl SeaOrmStore {
    pub(super) async fn get_by_id(&self, id: i64) -> Result<Option<UrlRecord>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_by_id({})", id), self.retry_config, || {
            url_record::Entity::find_by_id(id).one(db)
        })
        .await
        .map_err(|e| UrlShrinkError::storage_failure(format!("查询记录 {} 失败: {}", id, e)))?;

        Ok(model.map(model_to_record))
    }

    pub(super) async fn get_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("get_by_short_code({})", code),
            self.retry_config,
            || {
                url_record::Entity::find()
                    .filter(url_record::Column::ShortCode.eq(code))
                    .one(db)
            },
        )
        .await
        .map_err(|e| {
            UrlShrinkError::storage_failure(format!("查询短码 '{}' 失败: {}", code, e))
        })?;

        if model.is_none() {
            debug!("No record for short code '{}'", code);
        }
        Ok(model.map(model_to_record))
    }
}
