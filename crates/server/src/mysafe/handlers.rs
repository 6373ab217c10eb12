use axum::extract::{Path, State};
use axum::http::HeaderMap;
use common::SuccessRes;
use serde::Serialize;
use serde_json::Value;
use service::mysafe::client::{CLIENT_KEY_HEADER, SIGNATURE_HEADER};
use service::mysafe::domain::AccessToken;
use service::ServiceError;
use tracing::info;

use super::requests::{
    AuthApi, AuthRequest, ChildApi, ChildCall, ChildrenRequest, DeviceApi, DeviceCall, DeviceRequest, FeedbackApi,
    FeedbackCall, FeedbackRequest, OtpBody, UserApi, UserCall, UserRequest,
};
use super::MysafeState;
use crate::errors::JsonApiError;
use crate::extract::{header_value, ApiJson, CallerId};

type Reply = Result<SuccessRes<Value>, JsonApiError>;

fn to_payload<T: Serialize>(value: T) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(|e| ServiceError::Internal(e.to_string()))
}

#[utoipa::path(
    get, path = "/mysafe/token", tag = "mysafe",
    responses((status = 200, description = "Stored platform token"), (status = 401, description = "No caller"), (status = 404, description = "No token yet"))
)]
pub async fn token(State(state): State<MysafeState>, CallerId(user_id): CallerId) -> Result<SuccessRes<AccessToken>, JsonApiError> {
    Ok(SuccessRes::new(state.mysafe.token(&user_id).await?))
}

#[utoipa::path(
    post, path = "/mysafe/auth/{api}", tag = "mysafe",
    params(("api" = String, Path, description = "LinkRequest | LoginOTP | Register")),
    request_body = crate::mysafe::requests::AuthRequest,
    responses((status = 200, description = "Platform reply"), (status = 400, description = "Invalid api or body"))
)]
pub async fn auth(
    State(state): State<MysafeState>,
    CallerId(user_id): CallerId,
    Path(api): Path<String>,
    ApiJson(req): ApiJson<AuthRequest>,
) -> Reply {
    let api: AuthApi = api.parse()?;
    let creds = req.validate(api)?;
    let svc = &state.mysafe;
    let payload = match api {
        AuthApi::LinkRequest => svc.link_request(&creds.phone).await?,
        AuthApi::LoginOtp => svc.login_otp(&user_id, creds).await?,
        AuthApi::Register => svc.register(&user_id, creds).await?,
    };
    Ok(SuccessRes::new(payload))
}

#[utoipa::path(
    post, path = "/mysafe/devices/{api}", tag = "mysafe",
    params(("api" = String, Path, description = "GetDevice | UpdateDevice | DeleteDevice | AssignDeviceToChild | UnassignDevice | InternetDevice")),
    request_body = crate::mysafe::requests::DeviceRequest,
    responses((status = 200, description = "Platform reply"), (status = 401, description = "No access token"))
)]
pub async fn devices(State(state): State<MysafeState>, Path(api): Path<String>, ApiJson(req): ApiJson<DeviceRequest>) -> Reply {
    let bearer = req.bearer()?;
    let call = req.validate(api.parse::<DeviceApi>()?)?;
    let svc = &state.mysafe;
    let payload = match call {
        DeviceCall::Get { mac, online } => svc.get_device(&bearer, mac.as_deref(), online).await?,
        DeviceCall::Update { mac, update } => svc.update_device(&bearer, &mac, update).await?,
        DeviceCall::Delete { mac } => svc.delete_device(&bearer, &mac).await?,
        DeviceCall::AssignToChild { child_id, devices } => svc.assign_device_to_child(&bearer, child_id, devices).await?,
        DeviceCall::Unassign { mac } => svc.unassign_device(&bearer, &mac).await?,
        DeviceCall::Internet { mac, enable } => svc.internet_device(&bearer, &mac, enable).await?,
    };
    Ok(SuccessRes::new(payload))
}

#[utoipa::path(
    post, path = "/mysafe/user/{api}", tag = "mysafe",
    params(("api" = String, Path, description = "GetUserLicenses | GetFTTHContracts | GetServicePlans | MakeSubscription | ActivateSubscription | RequestUpgradeDevice | GiveFeedbackBase64")),
    request_body = crate::mysafe::requests::UserRequest,
    responses((status = 200, description = "Platform reply"), (status = 401, description = "No access token"))
)]
pub async fn user(State(state): State<MysafeState>, Path(api): Path<String>, ApiJson(req): ApiJson<UserRequest>) -> Reply {
    let bearer = req.bearer()?;
    let call = req.validate(api.parse::<UserApi>()?)?;
    let svc = &state.mysafe;
    let payload = match call {
        UserCall::Licenses => svc.get_user_licenses(&bearer).await?,
        UserCall::FtthContracts => svc.get_ftth_contracts(&bearer).await?,
        UserCall::ServicePlans(service_type) => svc.get_service_plans(&bearer, service_type).await?,
        UserCall::MakeSubscription(sub) => svc.make_subscription(&bearer, sub).await?,
        UserCall::ActivateSubscription(id) => svc.activate_subscription(&bearer, &id).await?,
        UserCall::RequestUpgradeDevice(ticket) => svc.request_upgrade_device(&bearer, ticket).await?,
        UserCall::GiveFeedbackBase64(fb) => svc.give_feedback_base64(&bearer, fb).await?,
    };
    Ok(SuccessRes::new(payload))
}

#[utoipa::path(
    post, path = "/mysafe/children/{api}", tag = "mysafe",
    params(("api" = String, Path, description = "Child operation, e.g. GetChildren or UpdateChildDomainFilter")),
    request_body = crate::mysafe::requests::ChildrenRequest,
    responses((status = 200, description = "Platform reply"), (status = 401, description = "No access token"))
)]
pub async fn children(State(state): State<MysafeState>, Path(api): Path<String>, ApiJson(req): ApiJson<ChildrenRequest>) -> Reply {
    let bearer = req.bearer()?;
    let call = req.validate(api.parse::<ChildApi>()?)?;
    let svc = &state.mysafe;
    let payload = match call {
        ChildCall::List { child_id, sort } => svc.get_children(&bearer, child_id, sort.as_deref()).await?,
        ChildCall::Create(profile) => svc.create_child(&bearer, profile).await?,
        ChildCall::Update(id, profile) => svc.update_child(&bearer, id, profile).await?,
        ChildCall::Delete(id) => svc.delete_child(&bearer, id).await?,
        ChildCall::GetActivityMode(id) => svc.get_child_activity_mode(&bearer, id).await?,
        ChildCall::UpdateActivityMode { child_id, mode_id, mode } => {
            svc.update_child_activity_mode(&bearer, child_id, mode_id.as_deref(), mode).await?
        }
        ChildCall::AllActivities(id, query) => svc.get_child_all_activities(&bearer, id, query).await?,
        ChildCall::OneActivity(id, activity_id) => svc.get_child_one_activity(&bearer, id, &activity_id).await?,
        ChildCall::GetQuickActions(id) => svc.get_child_quick_actions(&bearer, id).await?,
        ChildCall::UpdateQuickActions(id, action) => svc.update_child_quick_actions(&bearer, id, action).await?,
        ChildCall::FilterStatus { child_id, filter, enable } => {
            svc.update_child_filter_status(&bearer, child_id, filter, enable).await?
        }
        ChildCall::AppFilter { child_id, app_id, action } => {
            svc.update_child_app_filter(&bearer, child_id, app_id, action).await?
        }
        ChildCall::CategoryFilter { child_id, category_name, num_id, action } => {
            svc.update_child_category_filter(&bearer, child_id, &category_name, num_id, action).await?
        }
        ChildCall::DomainFilter { child_id, host_name, action } => {
            svc.update_child_domain_filter(&bearer, child_id, &host_name, action).await?
        }
        ChildCall::DeleteDomainFilter { child_id, host_name } => {
            svc.delete_child_domain_filter(&bearer, child_id, &host_name).await?
        }
    };
    Ok(SuccessRes::new(payload))
}

#[utoipa::path(
    post, path = "/mysafe/no-auth/otp", tag = "mysafe",
    request_body = crate::mysafe::requests::OtpBody,
    responses((status = 200, description = "OTP sent"), (status = 400, description = "Missing field"))
)]
pub async fn send_otp(State(state): State<MysafeState>, headers: HeaderMap, ApiJson(body): ApiJson<OtpBody>) -> Reply {
    let req = body.validate(
        header_value(&headers, CLIENT_KEY_HEADER),
        header_value(&headers, SIGNATURE_HEADER),
    )?;
    Ok(SuccessRes::new(state.mysafe.send_otp(req).await?))
}

#[utoipa::path(
    post, path = "/mysafe/feedback/{api}", tag = "mysafe",
    params(("api" = String, Path, description = "GiveFeedback | GetFeedback | DeleteFeedback")),
    request_body = crate::mysafe::requests::FeedbackRequest,
    responses((status = 200, description = "Feedback result"), (status = 404, description = "Not Found"))
)]
pub async fn feedback(
    State(state): State<MysafeState>,
    CallerId(user_id): CallerId,
    Path(api): Path<String>,
    ApiJson(req): ApiJson<FeedbackRequest>,
) -> Reply {
    let call = req.validate(api.parse::<FeedbackApi>()?)?;
    let svc = &state.mysafe;
    match call {
        FeedbackCall::Give(input) => {
            let saved = svc.save_feedback(&user_id, input).await?;
            Ok(SuccessRes::new(to_payload(saved)?))
        }
        FeedbackCall::List => Ok(SuccessRes::new(to_payload(svc.get_feedback(&user_id).await?)?)),
        FeedbackCall::Delete(id) => {
            svc.delete_feedback(&user_id, id).await?;
            info!(user_id = %user_id, feedback_id = %id, "feedback removed");
            Ok(SuccessRes::empty())
        }
    }
}
