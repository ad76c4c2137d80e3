use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored URL mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    /// `None` only between creation and code attachment
    pub short_code: Option<String>,
    #[serde(default)]
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Input to [`UrlStore::create`](super::UrlStore::create); the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlRecord {
    pub fn new<T: Into<String>>(original_url: T) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: Utc::now(),
        }
    }
}
