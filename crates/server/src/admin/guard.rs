use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

use models::UserRole;
use service::ServiceError;

use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::caller_from_headers;

/// Owner of the events and vouchers touched by an `/enterprise/*` request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnterpriseCaller(pub Uuid);

/// 401 without a caller id, 403 unless the caller is a known enterprise user.
pub async fn require_enterprise(
    State(state): State<AdminState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let raw = caller_from_headers(req.headers()).ok_or(ServiceError::Unauthorized)?;
    let id = Uuid::parse_str(&raw).map_err(|_| ServiceError::Unauthorized)?;

    let user = match state.users.get(id).await {
        Ok(user) => user,
        Err(ServiceError::NotFound(_)) => return Err(ServiceError::Forbidden.into()),
        Err(e) => return Err(e.into()),
    };
    if user.role != UserRole::Enterprise {
        warn!(user_id = %id, role = %user.role, "enterprise route refused");
        return Err(ServiceError::Forbidden.into());
    }

    req.extensions_mut().insert(EnterpriseCaller(id));
    Ok(next.run(req).await)
}
