use axum::extract::{Path, State};
use axum::Extension;
use common::SuccessRes;
use models::voucher;

use super::guard::EnterpriseCaller;
use super::requests::{path_id, CreateVoucherRequest, UpdateVoucherRequest};
use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[utoipa::path(
    get, path = "/enterprise/event/{event_id}/voucher", tag = "voucher",
    params(("event_id" = String, Path, description = "Event id")),
    responses((status = 200, description = "Vouchers of the event"), (status = 404, description = "Event not found"))
)]
pub async fn list(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path(event_id): Path<String>,
) -> Result<SuccessRes<Vec<voucher::Model>>, JsonApiError> {
    Ok(SuccessRes::new(state.vouchers.list(owner, path_id(&event_id)?).await?))
}

#[utoipa::path(
    get, path = "/enterprise/event/{event_id}/voucher/{id}", tag = "voucher",
    params(("event_id" = String, Path, description = "Event id"), ("id" = String, Path, description = "Voucher id")),
    responses((status = 200, description = "Voucher"), (status = 404, description = "Not Found"))
)]
pub async fn get(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path((event_id, id)): Path<(String, String)>,
) -> Result<SuccessRes<voucher::Model>, JsonApiError> {
    let voucher = state.vouchers.get(owner, path_id(&event_id)?, path_id(&id)?).await?;
    Ok(SuccessRes::new(voucher))
}

#[utoipa::path(
    post, path = "/enterprise/event/{event_id}/voucher", tag = "voucher",
    params(("event_id" = String, Path, description = "Event id")),
    request_body = crate::admin::requests::CreateVoucherRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path(event_id): Path<String>,
    ApiJson(req): ApiJson<CreateVoucherRequest>,
) -> Result<SuccessRes<voucher::Model>, JsonApiError> {
    let event_id = path_id(&event_id)?;
    Ok(SuccessRes::created(state.vouchers.create(owner, event_id, req.validate()?).await?))
}

#[utoipa::path(
    put, path = "/enterprise/event/{event_id}/voucher/{id}", tag = "voucher",
    params(("event_id" = String, Path, description = "Event id"), ("id" = String, Path, description = "Voucher id")),
    request_body = crate::admin::requests::UpdateVoucherRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path((event_id, id)): Path<(String, String)>,
    ApiJson(req): ApiJson<UpdateVoucherRequest>,
) -> Result<SuccessRes<voucher::Model>, JsonApiError> {
    let (event_id, id) = (path_id(&event_id)?, path_id(&id)?);
    Ok(SuccessRes::new(state.vouchers.update(owner, event_id, id, req.validate()?).await?))
}

#[utoipa::path(
    delete, path = "/enterprise/event/{event_id}/voucher/{id}", tag = "voucher",
    params(("event_id" = String, Path, description = "Event id"), ("id" = String, Path, description = "Voucher id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path((event_id, id)): Path<(String, String)>,
) -> Result<SuccessRes<()>, JsonApiError> {
    state.vouchers.delete(owner, path_id(&event_id)?, path_id(&id)?).await?;
    Ok(SuccessRes::empty())
}
