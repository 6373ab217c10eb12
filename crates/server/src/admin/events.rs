use axum::extract::{Path, State};
use axum::Extension;
use common::SuccessRes;
use models::event;
use tracing::info;

use super::guard::EnterpriseCaller;
use super::requests::{path_id, CreateEventRequest, UpdateEventRequest, WindowQuery};
use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiQuery};

#[utoipa::path(
    get, path = "/enterprise/event", tag = "event",
    params(WindowQuery),
    responses((status = 200, description = "Caller's events"), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden"))
)]
pub async fn list(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    ApiQuery(q): ApiQuery<WindowQuery>,
) -> Result<SuccessRes<Vec<event::Model>>, JsonApiError> {
    let events = match q.optional()? {
        Some(window) => state.events.list_in_window(owner, window).await?,
        None => state.events.list(owner).await?,
    };
    Ok(SuccessRes::new(events))
}

#[utoipa::path(
    get, path = "/enterprise/event/{id}", tag = "event",
    params(("id" = String, Path, description = "Event id")),
    responses((status = 200, description = "Event"), (status = 404, description = "Not Found"))
)]
pub async fn get(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path(id): Path<String>,
) -> Result<SuccessRes<event::Model>, JsonApiError> {
    Ok(SuccessRes::new(state.events.get(owner, path_id(&id)?).await?))
}

#[utoipa::path(
    post, path = "/enterprise/event", tag = "event",
    request_body = crate::admin::requests::CreateEventRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<SuccessRes<event::Model>, JsonApiError> {
    let created = state.events.create(owner, req.validate()?).await?;
    info!(event_id = %created.id, owner = %owner, "event created");
    Ok(SuccessRes::created(created))
}

#[utoipa::path(
    put, path = "/enterprise/event/{id}", tag = "event",
    params(("id" = String, Path, description = "Event id")),
    request_body = crate::admin::requests::UpdateEventRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<AdminState>,
    Extension(EnterpriseCaller(owner)): Extension<EnterpriseCaller>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEventRequest>,
) -> Result<SuccessRes<event::Model>, JsonApiError> {
    let id = path_id(&id)?;
    Ok(SuccessRes::new(state.events.update(owner, id, req.validate()?).await?))
}
