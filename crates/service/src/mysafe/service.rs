use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use configs::MysafeConfig;
use models::feedback;

use super::client::{OtpRequest, VcsClient, VcsRequest};
use super::domain::{
    extract_access_token, AccessToken, ActivityMode, ActivityQuery, AppFilterAction,
    CategoryFilterAction, ChildProfile, DeviceUpdate, DomainFilterAction, FilterType, NewFeedback,
    PhoneCredentials, PlatformFeedback, QuickAction, ServiceType, Subscription, UpgradeTicket,
};
use super::store::{FeedbackStore, TokenStore};
use crate::errors::ServiceError;
use crate::password::generate_password;

const API: &str = "/api/v1";

/// Fixed identity-platform parameters sent with login and sign-up.
#[derive(Debug, Clone)]
pub struct PlatformIdentity {
    pub client_id: String,
    pub organization: String,
    pub application: String,
    pub country_code: String,
}

impl From<&MysafeConfig> for PlatformIdentity {
    fn from(cfg: &MysafeConfig) -> Self {
        Self {
            client_id: cfg.client_id.clone(),
            organization: cfg.organization.clone(),
            application: cfg.application.clone(),
            country_code: cfg.country_code.clone(),
        }
    }
}

/// Gateway facade: one method per `:api` operation. Remote replies come back
/// as opaque JSON for the handler to wrap.
pub struct MysafeService {
    client: Arc<dyn VcsClient>,
    feedback: Arc<dyn FeedbackStore>,
    tokens: Arc<dyn TokenStore>,
    identity: PlatformIdentity,
}

fn child_path(child_id: Uuid) -> String {
    format!("{}/children/{}", API, child_id)
}

fn device_path(mac: &str) -> String {
    format!("{}/devices/{}", API, mac)
}

impl MysafeService {
    pub fn new(
        client: Arc<dyn VcsClient>,
        feedback: Arc<dyn FeedbackStore>,
        tokens: Arc<dyn TokenStore>,
        identity: PlatformIdentity,
    ) -> Self {
        Self { client, feedback, tokens, identity }
    }

    // token / auth

    pub async fn token(&self, user_id: &str) -> Result<AccessToken, ServiceError> {
        let stored = self
            .tokens
            .find(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("access token"))?;
        Ok(AccessToken { access_token: stored.access_token })
    }

    #[instrument(skip(self, req), fields(phone = %req.phone))]
    pub async fn send_otp(&self, req: OtpRequest) -> Result<Value, ServiceError> {
        self.client.send_otp(req).await
    }

    #[instrument(skip(self))]
    pub async fn link_request(&self, phone: &str) -> Result<Value, ServiceError> {
        let req = VcsRequest::post(format!("{}/auth/link-request", API)).json(&json!({ "phone": phone }))?;
        self.client.send(req).await
    }

    /// Log in with an SMS code and remember the issued token for `user_id`.
    #[instrument(skip(self, creds), fields(user_id = %user_id))]
    pub async fn login_otp(&self, user_id: &str, creds: PhoneCredentials) -> Result<Value, ServiceError> {
        let body = json!({
            "grant_type": "otp",
            "client_id": self.identity.client_id,
            "username": creds.phone,
            "code": creds.phone_code,
            "countryCode": creds.country_code.unwrap_or_else(|| self.identity.country_code.clone()),
        });
        let reply = self.client.send(VcsRequest::post(format!("{}/auth/login", API)).json(&body)?).await?;
        self.remember_token(user_id, &reply).await?;
        Ok(reply)
    }

    /// Sign up on the platform with a generated password, signing in at once.
    #[instrument(skip(self, creds), fields(user_id = %user_id))]
    pub async fn register(&self, user_id: &str, creds: PhoneCredentials) -> Result<Value, ServiceError> {
        let body = json!({
            "application": self.identity.application,
            "organization": self.identity.organization,
            "countryCode": creds.country_code.unwrap_or_else(|| self.identity.country_code.clone()),
            "phone": creds.phone,
            "phoneCode": creds.phone_code,
            "password": generate_password(),
            "auto_signin": true,
            "type": "login",
        });
        let reply = self.client.send(VcsRequest::post(format!("{}/auth/signup", API)).json(&body)?).await?;
        self.remember_token(user_id, &reply).await?;
        Ok(reply)
    }

    async fn remember_token(&self, user_id: &str, reply: &Value) -> Result<(), ServiceError> {
        let token = extract_access_token(reply)
            .ok_or_else(|| ServiceError::Remote("reply carried no access_token".into()))?;
        self.tokens.upsert(user_id, &token).await?;
        info!(user_id = %user_id, "platform_token_stored");
        Ok(())
    }

    // devices

    pub async fn get_device(&self, bearer: &str, mac: Option<&str>, online: bool) -> Result<Value, ServiceError> {
        let path = match mac {
            Some(mac) => device_path(mac),
            None => format!("{}/devices", API),
        };
        self.client.send(VcsRequest::get(path).bearer(bearer).query("online", online)).await
    }

    pub async fn update_device(&self, bearer: &str, mac: &str, update: DeviceUpdate) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::put(device_path(mac)).bearer(bearer).json(&update)?).await
    }

    pub async fn delete_device(&self, bearer: &str, mac: &str) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::delete(device_path(mac)).bearer(bearer)).await
    }

    pub async fn assign_device_to_child(&self, bearer: &str, child_id: Uuid, devices: Vec<String>) -> Result<Value, ServiceError> {
        let req = VcsRequest::post(format!("{}/devices", child_path(child_id)))
            .bearer(bearer)
            .json(&json!({ "devices": devices }))?;
        self.client.send(req).await
    }

    pub async fn unassign_device(&self, bearer: &str, mac: &str) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::delete(format!("{}/child", device_path(mac))).bearer(bearer)).await
    }

    pub async fn internet_device(&self, bearer: &str, mac: &str, enable: bool) -> Result<Value, ServiceError> {
        let req = VcsRequest::put(format!("{}/internet", device_path(mac)))
            .bearer(bearer)
            .json(&json!({ "enable": enable }))?;
        self.client.send(req).await
    }

    // user / subscriptions

    pub async fn get_user_licenses(&self, bearer: &str) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::get(format!("{}/users/licenses", API)).bearer(bearer)).await
    }

    pub async fn get_ftth_contracts(&self, bearer: &str) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::get(format!("{}/users/ftth-contracts", API)).bearer(bearer)).await
    }

    pub async fn get_service_plans(&self, bearer: &str, service_type: ServiceType) -> Result<Value, ServiceError> {
        let req = VcsRequest::get(format!("{}/service-plans", API))
            .bearer(bearer)
            .query("service_type", service_type);
        self.client.send(req).await
    }

    pub async fn make_subscription(&self, bearer: &str, sub: Subscription) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::post(format!("{}/subscriptions", API)).bearer(bearer).json(&sub)?).await
    }

    pub async fn activate_subscription(&self, bearer: &str, subscription_id: &str) -> Result<Value, ServiceError> {
        let req = VcsRequest::post(format!("{}/subscriptions/activate", API))
            .bearer(bearer)
            .json(&json!({ "subscription_id": subscription_id }))?;
        self.client.send(req).await
    }

    pub async fn request_upgrade_device(&self, bearer: &str, ticket: UpgradeTicket) -> Result<Value, ServiceError> {
        let req = VcsRequest::post(format!("{}/tickets/upgrade-device", API)).bearer(bearer).json(&ticket)?;
        self.client.send(req).await
    }

    pub async fn give_feedback_base64(&self, bearer: &str, fb: PlatformFeedback) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::post(format!("{}/feedback", API)).bearer(bearer).json(&fb)?).await
    }

    // children

    pub async fn get_children(&self, bearer: &str, child_id: Option<Uuid>, sort: Option<&str>) -> Result<Value, ServiceError> {
        let path = match child_id {
            Some(id) => child_path(id),
            None => format!("{}/children", API),
        };
        let mut req = VcsRequest::get(path).bearer(bearer);
        if let Some(sort) = sort {
            req = req.query("sort", sort);
        }
        self.client.send(req).await
    }

    pub async fn create_child(&self, bearer: &str, profile: ChildProfile) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::post(format!("{}/children", API)).bearer(bearer).json(&profile)?).await
    }

    pub async fn update_child(&self, bearer: &str, child_id: Uuid, profile: ChildProfile) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::put(child_path(child_id)).bearer(bearer).json(&profile)?).await
    }

    pub async fn delete_child(&self, bearer: &str, child_id: Uuid) -> Result<Value, ServiceError> {
        self.client.send(VcsRequest::delete(child_path(child_id)).bearer(bearer)).await
    }

    pub async fn get_child_activity_mode(&self, bearer: &str, child_id: Uuid) -> Result<Value, ServiceError> {
        let req = VcsRequest::get(format!("{}/activity-mode", child_path(child_id))).bearer(bearer);
        self.client.send(req).await
    }

    pub async fn update_child_activity_mode(
        &self,
        bearer: &str,
        child_id: Uuid,
        mode_id: Option<&str>,
        mode: ActivityMode,
    ) -> Result<Value, ServiceError> {
        let path = match mode_id {
            Some(id) => format!("{}/activity-mode/{}", child_path(child_id), id),
            None => format!("{}/activity-mode", child_path(child_id)),
        };
        self.client.send(VcsRequest::put(path).bearer(bearer).json(&mode)?).await
    }

    pub async fn get_child_all_activities(&self, bearer: &str, child_id: Uuid, query: ActivityQuery) -> Result<Value, ServiceError> {
        let mut req = VcsRequest::get(format!("{}/activities", child_path(child_id))).bearer(bearer);
        req.query = query.to_pairs();
        self.client.send(req).await
    }

    pub async fn get_child_one_activity(&self, bearer: &str, child_id: Uuid, activity_id: &str) -> Result<Value, ServiceError> {
        let req = VcsRequest::get(format!("{}/activities/{}", child_path(child_id), activity_id)).bearer(bearer);
        self.client.send(req).await
    }

    pub async fn get_child_quick_actions(&self, bearer: &str, child_id: Uuid) -> Result<Value, ServiceError> {
        let req = VcsRequest::get(format!("{}/quick-actions", child_path(child_id))).bearer(bearer);
        self.client.send(req).await
    }

    pub async fn update_child_quick_actions(&self, bearer: &str, child_id: Uuid, action: QuickAction) -> Result<Value, ServiceError> {
        let req = VcsRequest::put(format!("{}/quick-actions", child_path(child_id))).bearer(bearer).json(&action)?;
        self.client.send(req).await
    }

    pub async fn update_child_filter_status(
        &self,
        bearer: &str,
        child_id: Uuid,
        filter: FilterType,
        enable: bool,
    ) -> Result<Value, ServiceError> {
        let req = VcsRequest::put(format!("{}/filters/{}", child_path(child_id), filter.path_segment()))
            .bearer(bearer)
            .json(&json!({ "enable": enable }))?;
        self.client.send(req).await
    }

    pub async fn update_child_app_filter(
        &self,
        bearer: &str,
        child_id: Uuid,
        app_id: Uuid,
        action: AppFilterAction,
    ) -> Result<Value, ServiceError> {
        let req = VcsRequest::put(format!("{}/filters/{}", child_path(child_id), FilterType::Apps.path_segment()))
            .bearer(bearer)
            .json(&json!({ "app_id": app_id, "action": action }))?;
        self.client.send(req).await
    }

    pub async fn update_child_category_filter(
        &self,
        bearer: &str,
        child_id: Uuid,
        category_name: &str,
        num_id: i64,
        action: CategoryFilterAction,
    ) -> Result<Value, ServiceError> {
        let req = VcsRequest::put(format!("{}/filters/{}", child_path(child_id), FilterType::Categories.path_segment()))
            .bearer(bearer)
            .json(&json!({ "category_name": category_name, "num_id": num_id, "action": action }))?;
        self.client.send(req).await
    }

    pub async fn update_child_domain_filter(
        &self,
        bearer: &str,
        child_id: Uuid,
        host_name: &str,
        action: DomainFilterAction,
    ) -> Result<Value, ServiceError> {
        let req = VcsRequest::put(format!("{}/filters/{}", child_path(child_id), FilterType::Domains.path_segment()))
            .bearer(bearer)
            .json(&json!({ "host_name": host_name, "action": action }))?;
        self.client.send(req).await
    }

    pub async fn delete_child_domain_filter(&self, bearer: &str, child_id: Uuid, host_name: &str) -> Result<Value, ServiceError> {
        let req = VcsRequest::delete(format!("{}/filters/{}", child_path(child_id), FilterType::Domains.path_segment()))
            .bearer(bearer)
            .json(&json!({ "host_name": host_name }))?;
        self.client.send(req).await
    }

    // gateway-side feedback

    #[instrument(skip(self, input), fields(user_id = %user_id, rating = input.rating))]
    pub async fn save_feedback(&self, user_id: &str, input: NewFeedback) -> Result<feedback::Model, ServiceError> {
        let saved = self.feedback.insert(user_id, input).await?;
        info!(feedback_id = %saved.id, "feedback_saved");
        Ok(saved)
    }

    pub async fn get_feedback(&self, user_id: &str) -> Result<Vec<feedback::Model>, ServiceError> {
        self.feedback.list_by_user(user_id).await
    }

    #[instrument(skip(self), fields(user_id = %user_id, feedback_id = %id))]
    pub async fn delete_feedback(&self, user_id: &str, id: Uuid) -> Result<(), ServiceError> {
        if self.feedback.delete(user_id, id).await? == 0 {
            return Err(ServiceError::not_found("feedback"));
        }
        Ok(())
    }
}
