//! Admin request bodies. Creates must carry every required column; updates are
//! partial, so a field left out of the JSON stays untouched in storage.

use std::str::FromStr;

use chrono::DateTime;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use models::{Status, UserRole};
use service::admin::domain::{
    EnterpriseChanges, EventChanges, GameChanges, NewEnterprise, NewEvent, NewGame, NewUser, NewVoucher,
    TimeWindow, UserChanges, VoucherChanges,
};
use service::validate::{malformed, not_blank, require, require_some, require_uuid};
use service::ServiceError;

fn role(value: &Option<String>) -> Result<Option<UserRole>, ServiceError> {
    value.as_deref().map(UserRole::from_str).transpose().map_err(malformed)
}

fn status(value: &Option<String>) -> Result<Option<Status>, ServiceError> {
    value.as_deref().map(Status::from_str).transpose().map_err(malformed)
}

fn time(field: &str, value: &str) -> Result<DateTimeWithTimeZone, ServiceError> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|_| malformed(format!("field `{}` must be an RFC 3339 time", field)))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    /// enterprise | end_user | admin (defaults to end_user)
    pub role: Option<String>,
    /// active | inactive (defaults to active)
    pub status: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, ServiceError> {
        require("name", &self.name)?;
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("email", &self.email)?;
        Ok(NewUser {
            role: role(&self.role)?.unwrap_or_default(),
            status: status(&self.status)?.unwrap_or_default(),
            name: self.name,
            username: self.username,
            password: self.password,
            email: self.email,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserChanges, ServiceError> {
        not_blank("name", &self.name)?;
        not_blank("username", &self.username)?;
        not_blank("password", &self.password)?;
        not_blank("email", &self.email)?;
        Ok(UserChanges {
            role: role(&self.role)?,
            status: status(&self.status)?,
            name: self.name,
            username: self.username,
            password: self.password,
            email: self.email,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateGameRequest {
    pub name: String,
    pub images: String,
    #[serde(rename = "type")]
    pub game_type: String,
    pub exchange_allow: bool,
    pub tutorial: String,
}

impl CreateGameRequest {
    pub fn validate(self) -> Result<NewGame, ServiceError> {
        require("name", &self.name)?;
        require("type", &self.game_type)?;
        Ok(NewGame {
            name: self.name,
            images: self.images,
            game_type: self.game_type,
            exchange_allow: self.exchange_allow,
            tutorial: self.tutorial,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateGameRequest {
    pub name: Option<String>,
    pub images: Option<String>,
    #[serde(rename = "type")]
    pub game_type: Option<String>,
    pub exchange_allow: Option<bool>,
    pub tutorial: Option<String>,
}

impl UpdateGameRequest {
    pub fn validate(self) -> Result<GameChanges, ServiceError> {
        not_blank("name", &self.name)?;
        not_blank("type", &self.game_type)?;
        Ok(GameChanges {
            name: self.name,
            images: self.images,
            game_type: self.game_type,
            exchange_allow: self.exchange_allow,
            tutorial: self.tutorial,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateEnterpriseRequest {
    pub name: String,
    pub field: String,
    pub location: String,
    pub gps: String,
    pub status: Option<String>,
}

impl CreateEnterpriseRequest {
    pub fn validate(self) -> Result<NewEnterprise, ServiceError> {
        require("name", &self.name)?;
        Ok(NewEnterprise {
            status: status(&self.status)?.unwrap_or_default(),
            name: self.name,
            field: self.field,
            location: self.location,
            gps: self.gps,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateEnterpriseRequest {
    pub name: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub gps: Option<String>,
    pub status: Option<String>,
}

impl UpdateEnterpriseRequest {
    pub fn validate(self) -> Result<EnterpriseChanges, ServiceError> {
        not_blank("name", &self.name)?;
        Ok(EnterpriseChanges {
            status: status(&self.status)?,
            name: self.name,
            field: self.field,
            location: self.location,
            gps: self.gps,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateEventRequest {
    pub name: String,
    pub images: String,
    pub voucher_num: i32,
    /// RFC 3339
    pub start_time: String,
    /// RFC 3339
    pub end_time: String,
    pub game_id: String,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, ServiceError> {
        require("name", &self.name)?;
        require("start_time", &self.start_time)?;
        require("end_time", &self.end_time)?;
        let game_id = require_uuid("game_id", &self.game_id)?;
        Ok(NewEvent {
            start_time: time("start_time", &self.start_time)?,
            end_time: time("end_time", &self.end_time)?,
            name: self.name,
            images: self.images,
            voucher_num: self.voucher_num,
            game_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub images: Option<String>,
    pub voucher_num: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub game_id: Option<String>,
}

impl UpdateEventRequest {
    pub fn validate(self) -> Result<EventChanges, ServiceError> {
        not_blank("name", &self.name)?;
        let game_id = match self.game_id.as_deref() {
            Some(raw) => Some(require_uuid("game_id", raw)?),
            None => None,
        };
        Ok(EventChanges {
            start_time: self.start_time.as_deref().map(|t| time("start_time", t)).transpose()?,
            end_time: self.end_time.as_deref().map(|t| time("end_time", t)).transpose()?,
            name: self.name,
            images: self.images,
            voucher_num: self.voucher_num,
            game_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateVoucherRequest {
    pub code: String,
    pub qrcode: String,
    pub images: String,
    pub value: i32,
    pub description: String,
    /// RFC 3339
    pub expired_time: String,
    pub status: Option<String>,
}

impl CreateVoucherRequest {
    pub fn validate(self) -> Result<NewVoucher, ServiceError> {
        require("code", &self.code)?;
        require("expired_time", &self.expired_time)?;
        Ok(NewVoucher {
            expired_time: time("expired_time", &self.expired_time)?,
            status: status(&self.status)?.unwrap_or_default(),
            code: self.code,
            qrcode: self.qrcode,
            images: self.images,
            value: self.value,
            description: self.description,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateVoucherRequest {
    pub code: Option<String>,
    pub qrcode: Option<String>,
    pub images: Option<String>,
    pub value: Option<i32>,
    pub description: Option<String>,
    pub expired_time: Option<String>,
    pub status: Option<String>,
}

impl UpdateVoucherRequest {
    pub fn validate(self) -> Result<VoucherChanges, ServiceError> {
        not_blank("code", &self.code)?;
        Ok(VoucherChanges {
            expired_time: self.expired_time.as_deref().map(|t| time("expired_time", t)).transpose()?,
            status: status(&self.status)?,
            code: self.code,
            qrcode: self.qrcode,
            images: self.images,
            value: self.value,
            description: self.description,
        })
    }
}

/// `?start=&end=` as RFC 3339 times.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct WindowQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl WindowQuery {
    /// Both bounds, or neither.
    pub fn optional(&self) -> Result<Option<TimeWindow>, ServiceError> {
        match (&self.start, &self.end) {
            (None, None) => Ok(None),
            _ => self.required().map(Some),
        }
    }

    pub fn required(&self) -> Result<TimeWindow, ServiceError> {
        let start = require_some("start", &self.start)?;
        let end = require_some("end", &self.end)?;
        Ok(TimeWindow { start: time("start", start)?, end: time("end", end)? })
    }
}

/// Path ids arrive as strings so a bad one reports "invalid uuid" in the envelope.
pub fn path_id(raw: &str) -> Result<uuid::Uuid, ServiceError> {
    require_uuid("id", raw)
}

#[cfg(test)]
mod tests {
    use service::validate::missing;

    use super::*;

    #[test]
    fn create_user_requires_username() {
        let req: CreateUserRequest =
            serde_json::from_value(serde_json::json!({"name": "Ann", "password": "pw", "email": "a@x.io"})).unwrap();
        assert_eq!(req.validate().unwrap_err(), missing("username"));
    }

    #[test]
    fn create_user_defaults_role_and_status() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ann", "username": "ann", "password": "pw", "email": "a@x.io"
        }))
        .unwrap();
        let user = req.validate().unwrap();
        assert_eq!(user.role, UserRole::EndUser);
        assert_eq!(user.status, Status::Active);
    }

    #[test]
    fn unknown_role_is_malformed() {
        let req = UpdateUserRequest { role: Some("owner".into()), ..Default::default() };
        assert!(matches!(req.validate(), Err(ServiceError::MalformedEntity(_))));
    }

    #[test]
    fn update_keeps_explicit_zero() {
        let req: UpdateEventRequest = serde_json::from_value(serde_json::json!({"voucher_num": 0})).unwrap();
        let changes = req.validate().unwrap();
        assert_eq!(changes.voucher_num, Some(0));
        assert!(changes.name.is_none());
    }

    #[test]
    fn event_game_id_must_be_uuid() {
        let req = CreateEventRequest {
            name: "Launch".into(),
            start_time: "2024-06-01T00:00:00Z".into(),
            end_time: "2024-06-30T00:00:00Z".into(),
            game_id: "not-a-uuid".into(),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap_err(), malformed("invalid uuid"));
    }

    #[test]
    fn window_needs_both_bounds() {
        let q = WindowQuery { start: Some("2024-06-01T00:00:00Z".into()), end: None };
        assert_eq!(q.optional().unwrap_err(), missing("end"));
        assert_eq!(WindowQuery::default().optional().unwrap(), None);
        assert!(WindowQuery { start: Some("yesterday".into()), end: Some("2024-06-01T00:00:00Z".into()) }
            .required()
            .is_err());
    }

    #[test]
    fn path_ids_report_invalid_uuid() {
        assert_eq!(path_id("42").unwrap_err(), malformed("invalid uuid"));
    }
}
