//! Short code encoding
//!
//! Short codes are the base-62 rendering of the storage key assigned to a
//! record, so uniqueness of codes follows from uniqueness of keys.

pub mod base62;

pub use base62::{ALPHABET, BASE, decode, encode, encode_u64, is_valid_code};
