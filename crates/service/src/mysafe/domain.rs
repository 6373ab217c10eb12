//! Parental-control gateway vocabulary.
//!
//! Closed value sets parse straight into [`ServiceError::MalformedEntity`] so
//! request validators can `?` them. Payload structs serialize into the bodies the
//! remote platform expects; absent optionals are left out.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

macro_rules! closed_set {
    ($(#[$meta:meta])* $name:ident, $msg:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const INVALID: &'static str = $msg;

            pub fn as_str(&self) -> &'static str {
                match self { $($name::$variant => $wire),+ }
            }
        }

        impl FromStr for $name {
            type Err = ServiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ServiceError::MalformedEntity($msg.into())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set!(
    /// Internet service line a plan belongs to.
    ServiceType, "service_type must be HOME or NET", { Home => "HOME", Net => "NET" }
);

closed_set!(
    FilterType, "filter_type must be CATEGORIES, DOMAINS or APPS",
    { Categories => "CATEGORIES", Domains => "DOMAINS", Apps => "APPS" }
);

closed_set!(
    AppFilterAction, "app filter action must be block or allow",
    { Block => "block", Allow => "allow" }
);

closed_set!(
    DomainFilterAction, "domain filter action must be block or alert",
    { Block => "block", Alert => "alert" }
);

closed_set!(
    CategoryFilterAction, "category filter action must be block or allow",
    { Block => "block", Allow => "allow" }
);

impl FilterType {
    /// Path segment under `/filters/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            FilterType::Categories => "categories",
            FilterType::Domains => "domains",
            FilterType::Apps => "apps",
        }
    }
}

/// Phone + one-time code from the auth screens.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneCredentials {
    pub phone: String,
    pub phone_code: String,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDevice {
    pub mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChildProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<ChildDevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityMode {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_time: Option<String>,
    /// passed through untouched
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub child_timetable: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityQuery {
    pub start: i64,
    pub end: i64,
    pub limit: i64,
    pub skip: i64,
    pub query_by: Option<String>,
    pub query_value: Option<String>,
}

impl ActivityQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("start".to_string(), self.start.to_string()),
            ("end".to_string(), self.end.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("skip".to_string(), self.skip.to_string()),
        ];
        if let Some(by) = &self.query_by {
            pairs.push(("query_by".into(), by.clone()));
        }
        if let Some(value) = &self.query_value {
            pairs.push(("query_value".into(), value.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickAction {
    pub quick_action_id: String,
    pub duration_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub plan_id: String,
    pub service_type: String,
    pub ftth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refferal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeTicket {
    pub sub_id: String,
    pub ftth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
}

/// Feedback forwarded to the platform with inline base64 images.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rating: i32,
    pub subject: String,
    pub feedback_content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Feedback kept by the gateway itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub rating: i32,
    pub subject: String,
    pub feedback_content: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

/// Pulls `access_token` out of a login/sign-up reply, top level or under `data`.
pub fn extract_access_token(payload: &Value) -> Option<String> {
    payload
        .get("access_token")
        .or_else(|| payload.get("data").and_then(|d| d.get("access_token")))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closed_sets_reject_outsiders() {
        assert_eq!("HOME".parse::<ServiceType>().unwrap(), ServiceType::Home);
        assert_eq!(
            "home".parse::<ServiceType>().unwrap_err(),
            ServiceError::MalformedEntity(ServiceType::INVALID.into())
        );
        assert!("alert".parse::<AppFilterAction>().is_err());
        assert_eq!("alert".parse::<DomainFilterAction>().unwrap(), DomainFilterAction::Alert);
        assert!("allow".parse::<DomainFilterAction>().is_err());
        assert_eq!("APPS".parse::<FilterType>().unwrap().path_segment(), "apps");
    }

    #[test]
    fn optional_fields_are_omitted() {
        let body = serde_json::to_value(DeviceUpdate { name: Some("iPad".into()), ..Default::default() }).unwrap();
        assert_eq!(body, json!({"name": "iPad"}));
    }

    #[test]
    fn token_found_at_top_level_or_in_data() {
        assert_eq!(extract_access_token(&json!({"access_token": "a"})).as_deref(), Some("a"));
        assert_eq!(extract_access_token(&json!({"data": {"access_token": "b"}})).as_deref(), Some("b"));
        assert_eq!(extract_access_token(&json!({"access_token": ""})), None);
        assert_eq!(extract_access_token(&json!({"status": "ok"})), None);
    }

    #[test]
    fn activity_query_pairs() {
        let q = ActivityQuery { start: 1, end: 2, limit: 10, skip: 1, query_by: Some("domain".into()), query_value: None };
        let pairs = q.to_pairs();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[4], ("query_by".to_string(), "domain".to_string()));
    }
}
