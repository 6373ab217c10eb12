//! Field checks shared by request validators.
//!
//! Every failure is a [`ServiceError::MalformedEntity`] so callers can `?` them
//! straight out of `validate()`.

use uuid::Uuid;

use crate::errors::ServiceError;

pub const INVALID_UUID: &str = "invalid uuid";
pub const INVALID_MAC: &str = "invalid mac address";

pub fn missing(field: &str) -> ServiceError {
    ServiceError::MalformedEntity(format!("missing field `{}`", field))
}

pub fn malformed(msg: impl Into<String>) -> ServiceError {
    ServiceError::MalformedEntity(msg.into())
}

pub fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(missing(field));
    }
    Ok(())
}

pub fn require_some<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T, ServiceError> {
    value.as_ref().ok_or_else(|| missing(field))
}

/// Supplied-but-blank strings are rejected; absent ones pass.
pub fn not_blank(field: &str, value: &Option<String>) -> Result<(), ServiceError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(malformed(format!("field `{}` must not be empty", field))),
        _ => Ok(()),
    }
}

pub fn parse_uuid(value: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(value.trim()).map_err(|_| malformed(INVALID_UUID))
}

pub fn require_uuid(field: &str, value: &str) -> Result<Uuid, ServiceError> {
    require(field, value)?;
    parse_uuid(value)
}

/// Empty means "not given"; anything else must be a UUID.
pub fn optional_uuid(value: &str) -> Result<Option<Uuid>, ServiceError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_uuid(value).map(Some)
}

pub fn check_mac(value: &str) -> Result<(), ServiceError> {
    if is_mac(value) {
        Ok(())
    } else {
        Err(malformed(INVALID_MAC))
    }
}

pub fn require_mac(field: &str, value: &str) -> Result<(), ServiceError> {
    require(field, value)?;
    check_mac(value)
}

pub fn rating_in_range(rating: i32) -> Result<(), ServiceError> {
    if !(1..=5).contains(&rating) {
        return Err(missing("rating"));
    }
    Ok(())
}

/// IEEE 802 MAC-48, EUI-64 or 20-octet InfiniBand address in one of:
/// `00:00:5e:00:53:01`, `00-00-5e-00-53-01`, `0000.5e00.5301`.
pub fn is_mac(s: &str) -> bool {
    if s.len() < 14 {
        return false;
    }
    let bytes = s.as_bytes();
    match bytes[2] {
        b':' | b'-' => {
            let sep = bytes[2];
            let groups: Vec<&str> = s.split(sep as char).collect();
            valid_octet_count(groups.len())
                && groups.iter().all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()))
        }
        _ if bytes[4] == b'.' => {
            let groups: Vec<&str> = s.split('.').collect();
            valid_octet_count(groups.len() * 2)
                && groups.iter().all(|g| g.len() == 4 && g.chars().all(|c| c.is_ascii_hexdigit()))
        }
        _ => false,
    }
}

fn valid_octet_count(n: usize) -> bool {
    matches!(n, 6 | 8 | 20)
}
