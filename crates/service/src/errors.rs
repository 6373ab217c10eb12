use thiserror::Error;

use models::errors::ModelError;

pub const INVALID_API: &str = "invalid api";

/// Every failure a handler can surface. Each kind carries a stable numeric code
/// so clients can branch without parsing messages.
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("malformed entity: {0}")]
    MalformedEntity(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("missing or invalid credentials")]
    Unauthorized,
    #[error("access forbidden")]
    Forbidden,
    #[error("unsupported content type")]
    UnsupportedMediaType,
    #[error("database error: {0}")]
    Db(String),
    #[error("remote platform error: {0}")]
    Remote(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn invalid_api() -> Self {
        Self::BadRequest(INVALID_API.into())
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::MalformedEntity(_) => 1001,
            ServiceError::BadRequest(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Unauthorized => 1004,
            ServiceError::Forbidden => 1005,
            ServiceError::UnsupportedMediaType => 1006,
            ServiceError::Db(_) => 1100,
            ServiceError::Remote(_) => 1200,
            ServiceError::Internal(_) => 1500,
        }
    }

    /// Short kind label used as the `message` of error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::MalformedEntity(_) => "malformed entity specification",
            ServiceError::BadRequest(_) => "bad request",
            ServiceError::NotFound(_) => "entity not found",
            ServiceError::Unauthorized => "missing or invalid credentials provided",
            ServiceError::Forbidden => "access forbidden",
            ServiceError::UnsupportedMediaType => "unsupported content type",
            ServiceError::Db(_) => "database operation failed",
            ServiceError::Remote(_) => "remote platform call failed",
            ServiceError::Internal(_) => "internal server error",
        }
    }

    pub fn is_server_side(&self) -> bool {
        matches!(self, ServiceError::Db(_) | ServiceError::Remote(_) | ServiceError::Internal(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::MalformedEntity(msg),
            ModelError::Conflict(msg) => ServiceError::BadRequest(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ServiceError::MalformedEntity("x".into()).code(), 1001);
        assert_eq!(ServiceError::invalid_api().code(), 1002);
        assert_eq!(ServiceError::not_found("user").code(), 1003);
        assert_eq!(ServiceError::Unauthorized.code(), 1004);
        assert_eq!(ServiceError::UnsupportedMediaType.code(), 1006);
        assert_eq!(ServiceError::Remote("boom".into()).code(), 1200);
    }

    #[test]
    fn empty_patch_maps_to_malformed_entity() {
        let e: ServiceError = ModelError::Validation("no fields to update".into()).into();
        assert_eq!(e, ServiceError::MalformedEntity("no fields to update".into()));
        assert!(!e.is_server_side());
    }

    #[test]
    fn display_keeps_detail() {
        assert_eq!(ServiceError::not_found("game").to_string(), "not found: game not found");
        assert_eq!(ServiceError::invalid_api().to_string(), "bad request: invalid api");
    }
}
