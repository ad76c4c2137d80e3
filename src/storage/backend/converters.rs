use crate::storage::{NewUrlRecord, UrlRecord};
use migration::entities::url_record;

/// 将 Sea-ORM Model 转换为 UrlRecord
pub fn model_to_record(model: url_record::Model) -> UrlRecord {
    UrlRecord {
        id: model.id,
        original_url: model.original_url,
        short_code: model.short_code,
        click_count: model.click_count.max(0) as u64,
        created_at: model.created_at,
    }
}

/// Active model for a fresh insert; the database assigns `id`.
pub fn new_record_to_active_model(record: NewUrlRecord) -> url_record::ActiveModel {
    use sea_orm::ActiveValue::*;

    url_record::ActiveModel {
        id: NotSet,
        original_url: Set(record.original_url),
        short_code: Set(None),
        click_count: Set(0),
        created_at: Set(record.created_at),
    }
}

/// 将 UrlRecord 转换为 ActiveModel（用于按 id upsert）
pub fn record_to_active_model(record: &UrlRecord) -> url_record::ActiveModel {
    use sea_orm::ActiveValue::*;

    url_record::ActiveModel {
        id: Set(record.id),
        original_url: Set(record.original_url.clone()),
        short_code: Set(record.short_code.clone()),
        click_count: Set(i64::try_from(record.click_count).unwrap_or(i64::MAX)),
        created_at: Set(record.created_at),
    }
}
