//! urlshrink - a small URL shortener core
//!
//! Long URLs are stored as records whose storage-assigned id is rendered in
//! base 62 to form the short code. Resolving a code returns the original URL
//! and bumps the record's visit counter.
//!
//! # Architecture
//! - `codec`: base-62 encoding of storage ids
//! - `storage`: the `UrlStore` seam plus in-memory and SeaORM backends
//! - `services`: shorten / resolve orchestration
//! - `config`: static configuration (TOML + environment)
//! - `system`: logging setup
//! - `interfaces`, `cli`: command-line driver

pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

pub use errors::{Result, UrlShrinkError};
pub use services::ShortenerService;
