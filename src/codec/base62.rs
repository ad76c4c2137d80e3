//! Base-62 codec
//!
//! Alphabet order is digits, lowercase, uppercase, so `0` is index 0 and
//! `Z` is index 61. Output is most-significant digit first with no padding.

use crate::errors::{Result, UrlShrinkError};

/// 62 个符号：0-9a-zA-Z
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const BASE: u64 = ALPHABET.len() as u64;

/// Longest code `encode` can produce (`i64::MAX` in base 62).
pub const MAX_CODE_LEN: usize = 11;

/// Encode a storage key as a short code.
///
/// Keys are strictly positive; `0` and negative values are rejected rather
/// than mapped to something that could collide with a real code.
///
/// ```
/// use urlshrink::codec::encode;
/// assert_eq!(encode(1).unwrap(), "1");
/// assert_eq!(encode(62).unwrap(), "10");
/// ```
pub fn encode(n: i64) -> Result<String> {
    if n <= 0 {
        return Err(UrlShrinkError::invalid_argument(format!(
            "cannot encode {}: storage keys must be positive",
            n
        )));
    }
    Ok(encode_u64(n as u64))
}

/// Total base-62 conversion over `u64`. `0` renders as `"0"`.
pub fn encode_u64(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // 低位先写入，最后反转
    let mut digits = Vec::with_capacity(MAX_CODE_LEN + 1);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Index of `c` in [`ALPHABET`], if it belongs to it.
fn symbol_index(c: u8) -> Option<u64> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u64),
        b'a'..=b'z' => Some((c - b'a') as u64 + 10),
        b'A'..=b'Z' => Some((c - b'A') as u64 + 36),
        _ => None,
    }
}

/// Decode a short code back into the storage key that produced it.
///
/// Only canonical codes are accepted: no leading `0`, no symbols outside the
/// alphabet, and the value must fit in a positive `i64`.
pub fn decode(code: &str) -> Result<i64> {
    if code.is_empty() {
        return Err(UrlShrinkError::invalid_argument("short code cannot be empty"));
    }
    if code.len() > 1 && code.as_bytes()[0] == ALPHABET[0] {
        return Err(UrlShrinkError::invalid_argument(format!(
            "short code '{}' is not canonical (leading zero)",
            code
        )));
    }

    let mut value: i64 = 0;
    for &b in code.as_bytes() {
        let digit = symbol_index(b).ok_or_else(|| {
            UrlShrinkError::invalid_argument(format!(
                "short code '{}' contains invalid symbol '{}'",
                code,
                b.escape_ascii()
            ))
        })?;
        value = value
            .checked_mul(BASE as i64)
            .and_then(|v| v.checked_add(digit as i64))
            .ok_or_else(|| {
                UrlShrinkError::invalid_argument(format!(
                    "short code '{}' is out of range",
                    code
                ))
            })?;
    }

    if value == 0 {
        return Err(UrlShrinkError::invalid_argument(
            "short code '0' does not correspond to any storage key",
        ));
    }
    Ok(value)
}

/// Cheap check that `code` could have come out of [`encode`].
pub fn is_valid_code(code: &str) -> bool {
    decode(code).is_ok()
}
