#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use configs::MysafeConfig;
use models::{enterprise, event, feedback, game, token, user, voucher};
use server::admin::AdminState;
use server::mysafe::MysafeState;
use server::routes::{build_admin_router, build_mysafe_router};
use service::mysafe::{OtpRequest, VcsClient, VcsRequest};
use service::ServiceError;

pub async fn memory_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.expect("open sqlite");
    let schema = Schema::new(DbBackend::Sqlite);
    let stmts = vec![
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(game::Entity),
        schema.create_table_from_entity(enterprise::Entity),
        schema.create_table_from_entity(event::Entity),
        schema.create_table_from_entity(voucher::Entity),
        schema.create_table_from_entity(feedback::Entity),
        schema.create_table_from_entity(token::Entity),
    ];
    for stmt in stmts {
        db.execute(db.get_database_backend().build(&stmt)).await.expect("create table");
    }
    db
}

pub async fn admin_app() -> Router {
    build_admin_router(AdminState::from_db(memory_db().await), CorsLayer::very_permissive())
}

/// Records every platform call and answers with a canned payload.
#[derive(Default)]
pub struct RecordingClient {
    pub calls: Mutex<Vec<VcsRequest>>,
    pub otps: Mutex<Vec<OtpRequest>>,
    pub reply: Mutex<Option<Value>>,
}

impl RecordingClient {
    pub fn replying(reply: Value) -> Self {
        Self { reply: Mutex::new(Some(reply)), ..Default::default() }
    }

    pub fn last(&self) -> VcsRequest {
        self.calls.lock().unwrap().last().cloned().expect("no platform call recorded")
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VcsClient for RecordingClient {
    async fn send(&self, req: VcsRequest) -> Result<Value, ServiceError> {
        self.calls.lock().unwrap().push(req);
        Ok(self.reply.lock().unwrap().clone().unwrap_or_else(|| json!({"ok": true})))
    }

    async fn send_otp(&self, req: OtpRequest) -> Result<Value, ServiceError> {
        self.otps.lock().unwrap().push(req);
        Ok(json!({"sent": true}))
    }
}

pub async fn mysafe_app(client: Arc<RecordingClient>) -> Router {
    let state = MysafeState::with_client(memory_db().await, client, &MysafeConfig::default());
    build_mysafe_router(state, CorsLayer::very_permissive())
}

pub async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.expect("router is infallible");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("read body");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
    (status, body)
}

pub fn json(method: &str, uri: &str, headers: &[(&str, &str)], body: Value) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}
