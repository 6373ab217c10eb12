//! Environment helpers
//!
//! Thin lookups used by the config crate and the binaries. `.env` is loaded once
//! by whoever calls [`load_dotenv`].

use std::str::FromStr;

use tracing::warn;

/// Load `.env` if present; a missing file is not an error.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Value of `key`, or `fallback` when unset.
pub fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Parsed value of `key`; unset or unparsable values yield `None`.
pub fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%key, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}
