//! Success envelope shared by every endpoint.
//!
//! Errors use their own `{message, error, code}` body built in the server crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "success";

/// `{"code": 200, "message": "success", "data": ...}`; `data` is omitted for unit results.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SuccessRes<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessRes<T> {
    pub fn new(data: T) -> Self {
        Self::with_status(StatusCode::OK, Some(data))
    }

    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, Some(data))
    }

    /// Success with no `data` key.
    pub fn empty() -> Self {
        Self::with_status(StatusCode::OK, None)
    }

    fn with_status(status: StatusCode, data: Option<T>) -> Self {
        Self { code: status.as_u16(), message: SUCCESS_MESSAGE.to_string(), data }
    }
}

impl<T: Serialize> IntoResponse for SuccessRes<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
