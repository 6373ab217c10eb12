use axum::extract::{Path, State};
use common::SuccessRes;
use models::enterprise;

use super::requests::{path_id, CreateEnterpriseRequest, UpdateEnterpriseRequest};
use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[utoipa::path(
    get, path = "/admin/enterprise/{id}", tag = "enterprise",
    params(("id" = String, Path, description = "Enterprise id")),
    responses((status = 200, description = "Enterprise"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<enterprise::Model>, JsonApiError> {
    Ok(SuccessRes::new(state.enterprises.get(path_id(&id)?).await?))
}

#[utoipa::path(
    post, path = "/admin/enterprise", tag = "enterprise",
    request_body = crate::admin::requests::CreateEnterpriseRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AdminState>,
    ApiJson(req): ApiJson<CreateEnterpriseRequest>,
) -> Result<SuccessRes<enterprise::Model>, JsonApiError> {
    Ok(SuccessRes::created(state.enterprises.create(req.validate()?).await?))
}

#[utoipa::path(
    put, path = "/admin/enterprise/{id}", tag = "enterprise",
    params(("id" = String, Path, description = "Enterprise id")),
    request_body = crate::admin::requests::UpdateEnterpriseRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEnterpriseRequest>,
) -> Result<SuccessRes<enterprise::Model>, JsonApiError> {
    let id = path_id(&id)?;
    Ok(SuccessRes::new(state.enterprises.update(id, req.validate()?).await?))
}
