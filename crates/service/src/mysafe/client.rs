//! Remote platform access.
//!
//! [`VcsClient`] is the seam the gateway service talks through; the reqwest
//! implementation targets the identity/device platform and the VHome OTP sender.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use configs::MysafeConfig;

use crate::errors::ServiceError;

pub const CLIENT_KEY_HEADER: &str = "X-Client-Key";
pub const SIGNATURE_HEADER: &str = "X-Signature";
pub const OTP_PATH: &str = "/api/v1/otp/send";

/// One call against the platform, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct VcsRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl VcsRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), bearer: None, query: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self { Self::new(Method::GET, path) }
    pub fn post(path: impl Into<String>) -> Self { Self::new(Method::POST, path) }
    pub fn put(path: impl Into<String>) -> Self { Self::new(Method::PUT, path) }
    pub fn delete(path: impl Into<String>) -> Self { Self::new(Method::DELETE, path) }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ServiceError> {
        let value = serde_json::to_value(body).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// VHome one-time-password dispatch; key and signature come from the caller's headers.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpRequest {
    pub client_key: String,
    pub signature: String,
    pub phone: String,
    pub otp: String,
}

#[async_trait]
pub trait VcsClient: Send + Sync {
    async fn send(&self, req: VcsRequest) -> Result<Value, ServiceError>;
    async fn send_otp(&self, req: OtpRequest) -> Result<Value, ServiceError>;
}

pub struct ReqwestVcsClient {
    http: reqwest::Client,
    vcs_base_url: String,
    vhome_base_url: String,
    content_type: HeaderValue,
}

impl ReqwestVcsClient {
    pub fn new(cfg: &MysafeConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Internal(format!("http client: {}", e)))?;
        let content_type = HeaderValue::from_str(&cfg.content_type)
            .map_err(|e| ServiceError::Internal(format!("content type: {}", e)))?;
        Ok(Self {
            http,
            vcs_base_url: cfg.vcs_base_url.trim_end_matches('/').to_string(),
            vhome_base_url: cfg.vhome_base_url.trim_end_matches('/').to_string(),
            content_type,
        })
    }

    async fn execute(&self, builder: reqwest::RequestBuilder, what: &str) -> Result<Value, ServiceError> {
        let resp = builder.send().await.map_err(|e| {
            error!(target: "service::mysafe", call = %what, error = %e, "platform unreachable");
            ServiceError::Remote(format!("{}: {}", what, e))
        })?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::Remote(format!("{}: {}", what, e)))?;
        if !status.is_success() {
            let detail = String::from_utf8_lossy(&bytes);
            error!(target: "service::mysafe", call = %what, status = status.as_u16(), body = %detail, "platform rejected call");
            return Err(ServiceError::Remote(format!("{} returned {}", what, status.as_u16())));
        }
        debug!(target: "service::mysafe", call = %what, status = status.as_u16(), "platform replied");
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Remote(format!("{}: invalid json: {}", what, e)))
    }
}

#[async_trait]
impl VcsClient for ReqwestVcsClient {
    #[instrument(skip(self, req), fields(method = %req.method, path = %req.path))]
    async fn send(&self, req: VcsRequest) -> Result<Value, ServiceError> {
        let url = format!("{}{}", self.vcs_base_url, req.path);
        let mut builder = self.http.request(req.method.clone(), &url);
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.header(CONTENT_TYPE, self.content_type.clone()).json(body);
        }
        let what = format!("{} {}", req.method, req.path);
        self.execute(builder, &what).await
    }

    #[instrument(skip(self, req), fields(phone = %req.phone))]
    async fn send_otp(&self, req: OtpRequest) -> Result<Value, ServiceError> {
        let url = format!("{}{}", self.vhome_base_url, OTP_PATH);
        let body = serde_json::json!({ "phone": req.phone, "otp": req.otp });
        let builder = self
            .http
            .post(&url)
            .header(CLIENT_KEY_HEADER, req.client_key.as_str())
            .header(SIGNATURE_HEADER, req.signature.as_str())
            .header(CONTENT_TYPE, self.content_type.clone())
            .json(&body);
        self.execute(builder, &format!("POST {}", OTP_PATH)).await
    }
}
