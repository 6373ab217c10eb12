//! mysafe request bodies.
//!
//! Each route takes one loosely-typed body shared by all of its `:api`
//! operations; `validate` checks the fields the chosen operation needs and turns
//! the body into a typed call. Blank strings count as missing.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use service::mysafe::domain::{
    ActivityMode, ActivityQuery, AppFilterAction, CategoryFilterAction, ChildDevice, ChildProfile, DeviceUpdate,
    DomainFilterAction, FilterType, NewFeedback, PhoneCredentials, PlatformFeedback, QuickAction, ServiceType,
    Subscription, UpgradeTicket,
};
use service::mysafe::OtpRequest;
use service::validate::{
    check_mac, missing, optional_uuid, rating_in_range, require, require_mac, require_some, require_uuid,
};
use service::ServiceError;

macro_rules! api_set {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl FromStr for $name {
            type Err = ServiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ServiceError::invalid_api()),
                }
            }
        }
    };
}

api_set!(AuthApi { LinkRequest => "LinkRequest", LoginOtp => "LoginOTP", Register => "Register" });

api_set!(DeviceApi {
    GetDevice => "GetDevice",
    UpdateDevice => "UpdateDevice",
    DeleteDevice => "DeleteDevice",
    AssignDeviceToChild => "AssignDeviceToChild",
    UnassignDevice => "UnassignDevice",
    InternetDevice => "InternetDevice",
});

api_set!(UserApi {
    GetUserLicenses => "GetUserLicenses",
    GetFtthContracts => "GetFTTHContracts",
    GetServicePlans => "GetServicePlans",
    MakeSubscription => "MakeSubscription",
    ActivateSubscription => "ActivateSubscription",
    RequestUpgradeDevice => "RequestUpgradeDevice",
    GiveFeedbackBase64 => "GiveFeedbackBase64",
});

api_set!(ChildApi {
    GetChildren => "GetChildren",
    CreateChild => "CreateChild",
    UpdateChild => "UpdateChild",
    DeleteChild => "DeleteChild",
    GetChildActivityMode => "GetChildActivityMode",
    UpdateChildActivityMode => "UpdateChildActivityMode",
    GetChildAllActivities => "GetChildAllActivities",
    GetChildOneActivity => "GetChildOneActivity",
    GetChildQuickActions => "GetChildQuickActions",
    UpdateChildQuickActions => "UpdateChildQuickActions",
    UpdateChildFilterStatus => "UpdateChildFilterStatus",
    UpdateChildAppFilter => "UpdateChildAppFilter",
    UpdateChildCategoryFilter => "UpdateChildCategoryFilter",
    UpdateChildDomainFilter => "UpdateChildDomainFilter",
    DeleteChildDomainFilter => "DeleteChildDomainFilter",
});

api_set!(FeedbackApi { GiveFeedback => "GiveFeedback", GetFeedback => "GetFeedback", DeleteFeedback => "DeleteFeedback" });

fn some_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Closed-set field: absent is "missing field", anything outside the set is
/// the set's own message.
fn one_of<T: FromStr<Err = ServiceError>>(field: &str, value: &str) -> Result<T, ServiceError> {
    require(field, value)?;
    value.parse()
}

fn nonzero(field: &str, value: i64) -> Result<i64, ServiceError> {
    if value == 0 {
        return Err(missing(field));
    }
    Ok(value)
}

fn bearer_of(token: &str) -> Result<String, ServiceError> {
    some_text(token.trim().to_string()).ok_or(ServiceError::Unauthorized)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AuthRequest {
    pub phone: String,
    #[serde(rename = "phoneCode")]
    pub phone_code: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

impl AuthRequest {
    pub fn validate(self, api: AuthApi) -> Result<PhoneCredentials, ServiceError> {
        require("phone", &self.phone)?;
        if matches!(api, AuthApi::LoginOtp | AuthApi::Register) {
            require("phoneCode", &self.phone_code)?;
        }
        Ok(PhoneCredentials {
            phone: self.phone,
            phone_code: self.phone_code,
            country_code: some_text(self.country_code),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct DeviceRequest {
    pub access_token: String,
    pub mac_addr: String,
    pub name: String,
    pub user_agent: String,
    pub os: String,
    pub device_type: String,
    pub device_model: String,
    pub devices: Option<Vec<String>>,
    pub child_id: String,
    pub enable_internet: Option<bool>,
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Get { mac: Option<String>, online: bool },
    Update { mac: String, update: DeviceUpdate },
    Delete { mac: String },
    AssignToChild { child_id: Uuid, devices: Vec<String> },
    Unassign { mac: String },
    Internet { mac: String, enable: bool },
}

impl DeviceRequest {
    pub fn bearer(&self) -> Result<String, ServiceError> {
        bearer_of(&self.access_token)
    }

    pub fn validate(self, api: DeviceApi) -> Result<DeviceCall, ServiceError> {
        let call = match api {
            DeviceApi::GetDevice => {
                let mac = some_text(self.mac_addr);
                if let Some(mac) = &mac {
                    check_mac(mac)?;
                }
                DeviceCall::Get { mac, online: self.online }
            }
            DeviceApi::UpdateDevice => {
                require_mac("mac_addr", &self.mac_addr)?;
                DeviceCall::Update {
                    mac: self.mac_addr,
                    update: DeviceUpdate {
                        name: some_text(self.name),
                        user_agent: some_text(self.user_agent),
                        os: some_text(self.os),
                        device_type: some_text(self.device_type),
                        device_model: some_text(self.device_model),
                    },
                }
            }
            DeviceApi::DeleteDevice => {
                require_mac("mac_addr", &self.mac_addr)?;
                DeviceCall::Delete { mac: self.mac_addr }
            }
            DeviceApi::AssignDeviceToChild => {
                let child_id = require_uuid("child_id", &self.child_id)?;
                let devices = require_some("devices", &self.devices)?;
                for mac in devices {
                    check_mac(mac)?;
                }
                DeviceCall::AssignToChild { child_id, devices: devices.clone() }
            }
            DeviceApi::UnassignDevice => {
                require_mac("mac_addr", &self.mac_addr)?;
                DeviceCall::Unassign { mac: self.mac_addr }
            }
            DeviceApi::InternetDevice => {
                require_mac("mac_addr", &self.mac_addr)?;
                let enable = *require_some("enable_internet", &self.enable_internet)?;
                DeviceCall::Internet { mac: self.mac_addr, enable }
            }
        };
        Ok(call)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    pub access_token: String,
    pub ftth: String,
    pub service_type: String,
    pub plan_id: String,
    pub refferal_code: String,
    pub subscription_id: String,
    pub sub_id: String,
    pub ticket_type: String,
    pub id: String,
    pub rating: i32,
    pub subject: String,
    pub feedback_content: String,
    pub images: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserCall {
    Licenses,
    FtthContracts,
    ServicePlans(ServiceType),
    MakeSubscription(Subscription),
    ActivateSubscription(String),
    RequestUpgradeDevice(UpgradeTicket),
    GiveFeedbackBase64(PlatformFeedback),
}

impl UserRequest {
    pub fn bearer(&self) -> Result<String, ServiceError> {
        bearer_of(&self.access_token)
    }

    pub fn validate(self, api: UserApi) -> Result<UserCall, ServiceError> {
        let call = match api {
            UserApi::GetUserLicenses => UserCall::Licenses,
            UserApi::GetFtthContracts => UserCall::FtthContracts,
            UserApi::GetServicePlans => UserCall::ServicePlans(one_of("service_type", &self.service_type)?),
            UserApi::MakeSubscription => {
                require("plan_id", &self.plan_id)?;
                require("service_type", &self.service_type)?;
                require("ftth", &self.ftth)?;
                UserCall::MakeSubscription(Subscription {
                    plan_id: self.plan_id,
                    service_type: self.service_type,
                    ftth: self.ftth,
                    refferal_code: some_text(self.refferal_code),
                })
            }
            UserApi::ActivateSubscription => {
                require("subscription_id", &self.subscription_id)?;
                UserCall::ActivateSubscription(self.subscription_id)
            }
            UserApi::RequestUpgradeDevice => {
                require("sub_id", &self.sub_id)?;
                require("ftth", &self.ftth)?;
                UserCall::RequestUpgradeDevice(UpgradeTicket {
                    sub_id: self.sub_id,
                    ftth: self.ftth,
                    ticket_type: some_text(self.ticket_type),
                })
            }
            UserApi::GiveFeedbackBase64 => {
                require("subject", &self.subject)?;
                rating_in_range(self.rating)?;
                let created_at = *require_some("created_at", &self.created_at)?;
                UserCall::GiveFeedbackBase64(PlatformFeedback {
                    id: some_text(self.id),
                    rating: self.rating,
                    subject: self.subject,
                    feedback_content: self.feedback_content,
                    images: self.images,
                    created_at,
                })
            }
        };
        Ok(call)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChildrenRequest {
    pub access_token: String,
    pub child_id: String,
    pub name: String,
    pub birthday: Option<DateTime<Utc>>,
    pub gender: String,
    pub avatar: String,
    pub phone: String,
    #[schema(value_type = Vec<Object>)]
    pub devices: Vec<ChildDevice>,
    pub active: bool,
    pub from_time: String,
    pub to_time: String,
    #[schema(value_type = Vec<Object>)]
    pub child_timetable: Vec<Value>,
    pub quick_action_id: String,
    pub duration_seconds: i64,
    pub activity_mode_id: String,
    pub enable: bool,
    pub filter_type: String,
    pub app_id: String,
    pub action: String,
    pub category_name: String,
    pub num_id: i64,
    pub host_name: String,
    pub sort: String,
    pub start: i64,
    pub end: i64,
    pub limit: i64,
    pub skip: i64,
    pub query_by: String,
    pub query_value: String,
    pub activity_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChildCall {
    List { child_id: Option<Uuid>, sort: Option<String> },
    Create(ChildProfile),
    Update(Uuid, ChildProfile),
    Delete(Uuid),
    GetActivityMode(Uuid),
    UpdateActivityMode { child_id: Uuid, mode_id: Option<String>, mode: ActivityMode },
    AllActivities(Uuid, ActivityQuery),
    OneActivity(Uuid, String),
    GetQuickActions(Uuid),
    UpdateQuickActions(Uuid, QuickAction),
    FilterStatus { child_id: Uuid, filter: FilterType, enable: bool },
    AppFilter { child_id: Uuid, app_id: Uuid, action: AppFilterAction },
    CategoryFilter { child_id: Uuid, category_name: String, num_id: i64, action: CategoryFilterAction },
    DomainFilter { child_id: Uuid, host_name: String, action: DomainFilterAction },
    DeleteDomainFilter { child_id: Uuid, host_name: String },
}

impl ChildrenRequest {
    pub fn bearer(&self) -> Result<String, ServiceError> {
        bearer_of(&self.access_token)
    }

    fn profile(self) -> ChildProfile {
        ChildProfile {
            name: some_text(self.name),
            birthday: self.birthday,
            gender: some_text(self.gender),
            avatar: some_text(self.avatar),
            phone: some_text(self.phone),
            devices: self.devices,
        }
    }

    fn child(&self) -> Result<Uuid, ServiceError> {
        require_uuid("child_id", &self.child_id)
    }

    pub fn validate(self, api: ChildApi) -> Result<ChildCall, ServiceError> {
        let call = match api {
            ChildApi::GetChildren => {
                ChildCall::List { child_id: optional_uuid(&self.child_id)?, sort: some_text(self.sort) }
            }
            ChildApi::CreateChild => {
                for device in &self.devices {
                    check_mac(&device.mac)?;
                }
                ChildCall::Create(self.profile())
            }
            ChildApi::UpdateChild => ChildCall::Update(self.child()?, self.profile()),
            ChildApi::DeleteChild => ChildCall::Delete(self.child()?),
            ChildApi::GetChildActivityMode => ChildCall::GetActivityMode(self.child()?),
            ChildApi::UpdateChildActivityMode => ChildCall::UpdateActivityMode {
                child_id: self.child()?,
                mode_id: some_text(self.activity_mode_id),
                mode: ActivityMode {
                    active: self.active,
                    from_time: some_text(self.from_time),
                    to_time: some_text(self.to_time),
                    child_timetable: self.child_timetable,
                },
            },
            ChildApi::GetChildAllActivities => ChildCall::AllActivities(
                self.child()?,
                ActivityQuery {
                    start: nonzero("start", self.start)?,
                    end: nonzero("end", self.end)?,
                    limit: nonzero("limit", self.limit)?,
                    skip: nonzero("skip", self.skip)?,
                    query_by: some_text(self.query_by),
                    query_value: some_text(self.query_value),
                },
            ),
            ChildApi::GetChildOneActivity => {
                let child_id = self.child()?;
                require("activity_id", &self.activity_id)?;
                ChildCall::OneActivity(child_id, self.activity_id)
            }
            ChildApi::GetChildQuickActions => ChildCall::GetQuickActions(self.child()?),
            ChildApi::UpdateChildQuickActions => {
                let child_id = self.child()?;
                let quick_action_id = require_uuid("quick_action_id", &self.quick_action_id)?;
                ChildCall::UpdateQuickActions(
                    child_id,
                    QuickAction { quick_action_id: quick_action_id.to_string(), duration_seconds: self.duration_seconds },
                )
            }
            ChildApi::UpdateChildFilterStatus => ChildCall::FilterStatus {
                child_id: self.child()?,
                filter: one_of("filter_type", &self.filter_type)?,
                enable: self.enable,
            },
            ChildApi::UpdateChildAppFilter => ChildCall::AppFilter {
                child_id: self.child()?,
                app_id: require_uuid("app_id", &self.app_id)?,
                action: one_of("action", &self.action)?,
            },
            ChildApi::UpdateChildDomainFilter => {
                let child_id = self.child()?;
                require("host_name", &self.host_name)?;
                let action = one_of("action", &self.action)?;
                ChildCall::DomainFilter { child_id, host_name: self.host_name, action }
            }
            ChildApi::UpdateChildCategoryFilter => {
                let child_id = self.child()?;
                require("category_name", &self.category_name)?;
                let action = one_of("action", &self.action)?;
                let num_id = nonzero("num_id", self.num_id)?;
                ChildCall::CategoryFilter { child_id, category_name: self.category_name, num_id, action }
            }
            ChildApi::DeleteChildDomainFilter => {
                let child_id = self.child()?;
                require("host_name", &self.host_name)?;
                ChildCall::DeleteDomainFilter { child_id, host_name: self.host_name }
            }
        };
        Ok(call)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct FeedbackRequest {
    pub rating: i32,
    pub subject: String,
    pub feedback_content: String,
    pub images: Vec<String>,
    pub feedback_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackCall {
    Give(NewFeedback),
    List,
    Delete(Uuid),
}

impl FeedbackRequest {
    pub fn validate(self, api: FeedbackApi) -> Result<FeedbackCall, ServiceError> {
        let call = match api {
            FeedbackApi::GiveFeedback => {
                rating_in_range(self.rating)?;
                FeedbackCall::Give(NewFeedback {
                    rating: self.rating,
                    subject: self.subject,
                    feedback_content: self.feedback_content,
                    images: self.images,
                })
            }
            FeedbackApi::GetFeedback => FeedbackCall::List,
            FeedbackApi::DeleteFeedback => FeedbackCall::Delete(require_uuid("feedback_id", &self.feedback_id)?),
        };
        Ok(call)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct OtpBody {
    pub phone: String,
    pub otp: String,
}

impl OtpBody {
    /// Key and signature come from `X-Client-Key` / `X-Signature`.
    pub fn validate(self, client_key: Option<String>, signature: Option<String>) -> Result<OtpRequest, ServiceError> {
        let client_key = client_key.ok_or_else(|| missing("X-Client-Key"))?;
        let signature = signature.ok_or_else(|| missing("X-Signature"))?;
        require("phone", &self.phone)?;
        require("otp", &self.otp)?;
        Ok(OtpRequest { client_key, signature, phone: self.phone, otp: self.otp })
    }
}
