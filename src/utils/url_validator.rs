//! URL 验证模块
//!
//! Two policies: accept anything non-blank, or require a parseable
//! http(s) URL and block script-capable schemes.

use url::Url;

use crate::errors::{Result, UrlShrinkError};

/// How much checking `shorten` applies to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlPolicy {
    /// Only reject empty or whitespace-only input
    NonEmpty,
    /// Require an absolute http:// or https:// URL
    #[default]
    HttpOnly,
}

impl UrlPolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            UrlPolicy::HttpOnly
        } else {
            UrlPolicy::NonEmpty
        }
    }
}

/// 危险协议列表
const DANGEROUS_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

/// Check `input` against `policy`. The input itself is never modified.
pub fn validate_url(input: &str, policy: UrlPolicy) -> Result<()> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlShrinkError::invalid_argument("URL cannot be empty"));
    }

    if policy == UrlPolicy::NonEmpty {
        return Ok(());
    }

    // 协议比较不区分大小写
    let scheme = trimmed
        .split_once(':')
        .map(|(s, _)| s.to_ascii_lowercase())
        .unwrap_or_default();

    if DANGEROUS_SCHEMES.contains(&scheme.as_str()) {
        return Err(UrlShrinkError::invalid_argument(format!(
            "Dangerous protocol blocked: {}:",
            scheme
        )));
    }

    if scheme != "http" && scheme != "https" {
        return Err(UrlShrinkError::invalid_argument(format!(
            "Invalid protocol '{}'. Only http:// and https:// are allowed",
            scheme
        )));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| UrlShrinkError::invalid_argument(format!("Invalid URL format: {}", e)))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlShrinkError::invalid_argument("URL must have a host"));
    }

    Ok(())
}
