use axum::extract::{Path, State};
use common::SuccessRes;
use models::{user, Status};
use tracing::info;

use super::requests::{path_id, CreateUserRequest, UpdateUserRequest};
use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[utoipa::path(get, path = "/admin/user", tag = "user", responses((status = 200, description = "All users")))]
pub async fn list(State(state): State<AdminState>) -> Result<SuccessRes<Vec<user::Model>>, JsonApiError> {
    let users = state.users.list().await?;
    Ok(SuccessRes::new(users))
}

#[utoipa::path(
    get, path = "/admin/user/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "User"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<user::Model>, JsonApiError> {
    let user = state.users.get(path_id(&id)?).await?;
    Ok(SuccessRes::new(user))
}

#[utoipa::path(
    post, path = "/admin/user", tag = "user",
    request_body = crate::admin::requests::CreateUserRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AdminState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<SuccessRes<user::Model>, JsonApiError> {
    let created = state.users.create(req.validate()?).await?;
    info!(user_id = %created.id, role = %created.role, "user created");
    Ok(SuccessRes::created(created))
}

#[utoipa::path(
    put, path = "/admin/user/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    request_body = crate::admin::requests::UpdateUserRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<SuccessRes<user::Model>, JsonApiError> {
    let id = path_id(&id)?;
    let updated = state.users.update(id, req.validate()?).await?;
    Ok(SuccessRes::new(updated))
}

#[utoipa::path(
    delete, path = "/admin/user/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<()>, JsonApiError> {
    let id = path_id(&id)?;
    state.users.delete(id).await?;
    info!(user_id = %id, "user deleted");
    Ok(SuccessRes::empty())
}

#[utoipa::path(
    put, path = "/admin/user/active/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "Activated"), (status = 404, description = "Not Found"))
)]
pub async fn activate(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<user::Model>, JsonApiError> {
    let user = state.users.set_status(path_id(&id)?, Status::Active).await?;
    Ok(SuccessRes::new(user))
}

#[utoipa::path(
    put, path = "/admin/user/deactive/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "Deactivated"), (status = 404, description = "Not Found"))
)]
pub async fn deactivate(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<user::Model>, JsonApiError> {
    let user = state.users.set_status(path_id(&id)?, Status::Inactive).await?;
    Ok(SuccessRes::new(user))
}
