use axum::extract::{Path, State};
use common::SuccessRes;
use models::game;

use super::requests::{path_id, CreateGameRequest, UpdateGameRequest};
use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[utoipa::path(get, path = "/admin/game", tag = "game", responses((status = 200, description = "All games")))]
pub async fn list(State(state): State<AdminState>) -> Result<SuccessRes<Vec<game::Model>>, JsonApiError> {
    Ok(SuccessRes::new(state.games.list().await?))
}

#[utoipa::path(
    get, path = "/admin/game/{id}", tag = "game",
    params(("id" = String, Path, description = "Game id")),
    responses((status = 200, description = "Game"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<game::Model>, JsonApiError> {
    Ok(SuccessRes::new(state.games.get(path_id(&id)?).await?))
}

#[utoipa::path(
    post, path = "/admin/game", tag = "game",
    request_body = crate::admin::requests::CreateGameRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AdminState>,
    ApiJson(req): ApiJson<CreateGameRequest>,
) -> Result<SuccessRes<game::Model>, JsonApiError> {
    Ok(SuccessRes::created(state.games.create(req.validate()?).await?))
}

#[utoipa::path(
    put, path = "/admin/game/{id}", tag = "game",
    params(("id" = String, Path, description = "Game id")),
    request_body = crate::admin::requests::UpdateGameRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateGameRequest>,
) -> Result<SuccessRes<game::Model>, JsonApiError> {
    let id = path_id(&id)?;
    Ok(SuccessRes::new(state.games.update(id, req.validate()?).await?))
}

#[utoipa::path(
    delete, path = "/admin/game/{id}", tag = "game",
    params(("id" = String, Path, description = "Game id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AdminState>, Path(id): Path<String>) -> Result<SuccessRes<()>, JsonApiError> {
    state.games.delete(path_id(&id)?).await?;
    Ok(SuccessRes::empty())
}
