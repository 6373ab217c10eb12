//! Request extractors that fail with the JSON error envelope instead of axum's
//! plain-text rejections.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use service::ServiceError;

use crate::errors::JsonApiError;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// JSON body; a missing or foreign `Content-Type` is 415, anything else that
/// fails to decode is a malformed entity.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Err(ServiceError::UnsupportedMediaType.into()),
            Err(rejection) => Err(ServiceError::MalformedEntity(rejection.body_text()).into()),
        }
    }
}

/// Query string; a rejection becomes a malformed entity.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| ServiceError::MalformedEntity(rejection.body_text()).into())
    }
}

/// Authenticated caller as forwarded by the policy layer in front of us.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from_headers(&parts.headers)
            .map(CallerId)
            .ok_or_else(|| ServiceError::Unauthorized.into())
    }
}

pub fn caller_from_headers(headers: &HeaderMap) -> Option<String> {
    header_value(headers, USER_ID_HEADER)
}

pub fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn blank_caller_is_absent() {
        let mut headers = HeaderMap::new();
        assert_eq!(caller_from_headers(&headers), None);
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("   "));
        assert_eq!(caller_from_headers(&headers), None);
        headers.insert(USER_ID_HEADER, HeaderValue::from_static(" u-42 "));
        assert_eq!(caller_from_headers(&headers).as_deref(), Some("u-42"));
    }
}
