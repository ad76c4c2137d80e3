//! Shortening service
//!
//! Turns URLs into codes and codes back into URLs on top of any [`UrlStore`].
//! The code for a record is the base-62 form of its storage id, so creating a
//! link takes two writes: insert to learn the id, then attach the code.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::codec;
use crate::errors::{Result, UrlShrinkError};
use crate::storage::{NewUrlRecord, UrlRecord, UrlStore};
use crate::utils::url_validator::{UrlPolicy, validate_url};

/// Service for shorten / resolve operations
///
/// Holds no mutable state of its own; share it behind an `Arc`.
pub struct ShortenerService {
    store: Arc<dyn UrlStore>,
    policy: UrlPolicy,
}

impl ShortenerService {
    /// Create a service with strict (http/https only) URL validation.
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self {
            store,
            policy: UrlPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UrlPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UrlPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<dyn UrlStore> {
        &self.store
    }

    /// Store `original_url` and return its short code.
    ///
    /// If attaching the code fails after the insert succeeded, the record is
    /// left in storage without a code and the storage error is returned. Such a
    /// record is never reachable through [`resolve`](Self::resolve).
    pub async fn shorten(&self, original_url: &str) -> Result<String> {
        validate_url(original_url, self.policy)?;

        let mut record = self.store.create(NewUrlRecord::new(original_url)).await?;

        let code = codec::encode(record.id)?;
        record.short_code = Some(code.clone());

        if let Err(e) = self.store.update(&record).await {
            error!(
                "ShortenerService: record {} stored but code '{}' not attached: {}",
                record.id, code, e
            );
            return Err(e);
        }

        info!("ShortenerService: shortened '{}' -> '{}'", original_url, code);
        Ok(code)
    }

    /// Return the URL behind `code` and count the visit.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        let record = self.lookup(code).await?;

        // 点击计数由存储层原子完成
        let clicks = self
            .store
            .increment_click(record.id)
            .await?
            .ok_or_else(|| not_found(code))?;

        debug!("ShortenerService: '{}' resolved ({} clicks)", code, clicks);
        Ok(record.original_url)
    }

    /// Fetch the record behind `code` without counting a visit.
    pub async fn lookup(&self, code: &str) -> Result<UrlRecord> {
        // 不可能由 encode 产生的短码无需查询存储
        if !codec::is_valid_code(code) {
            return Err(not_found(code));
        }

        self.store
            .find_by_short_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }
}

fn not_found(code: &str) -> UrlShrinkError {
    UrlShrinkError::not_found(format!("no URL for short code '{}'", code))
}

/// Join a base address and a code with exactly one `/` between them.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
