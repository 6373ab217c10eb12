//! Inputs accepted by the admin services.
//!
//! `New*` structs carry every column of a fresh row; `*Changes` structs carry
//! only what the caller supplied (`None` = leave the stored value alone).

use models::{Status, UserRole};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    /// plaintext on the way in; hashed by the service before it reaches storage
    pub password: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: Status,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub images: String,
    pub game_type: String,
    pub exchange_allow: bool,
    pub tutorial: String,
}

#[derive(Debug, Clone, Default)]
pub struct GameChanges {
    pub name: Option<String>,
    pub images: Option<String>,
    pub game_type: Option<String>,
    pub exchange_allow: Option<bool>,
    pub tutorial: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEnterprise {
    pub name: String,
    pub field: String,
    pub location: String,
    pub gps: String,
    pub status: Status,
}

#[derive(Debug, Clone, Default)]
pub struct EnterpriseChanges {
    pub name: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub gps: Option<String>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub images: String,
    pub voucher_num: i32,
    pub start_time: DateTimeWithTimeZone,
    pub end_time: DateTimeWithTimeZone,
    pub game_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub name: Option<String>,
    pub images: Option<String>,
    pub voucher_num: Option<i32>,
    pub start_time: Option<DateTimeWithTimeZone>,
    pub end_time: Option<DateTimeWithTimeZone>,
    pub game_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewVoucher {
    pub code: String,
    pub qrcode: String,
    pub images: String,
    pub value: i32,
    pub description: String,
    pub expired_time: DateTimeWithTimeZone,
    pub status: Status,
}

#[derive(Debug, Clone, Default)]
pub struct VoucherChanges {
    pub code: Option<String>,
    pub qrcode: Option<String>,
    pub images: Option<String>,
    pub value: Option<i32>,
    pub description: Option<String>,
    pub expired_time: Option<DateTimeWithTimeZone>,
    pub status: Option<Status>,
}

/// Inclusive time range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTimeWithTimeZone,
    pub end: DateTimeWithTimeZone,
}

/// Filter for user counts; `None` matches any value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub status: Option<Status>,
}
