use axum::{routing::get, Json, Router};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::admin::{self, AdminState};
use crate::mysafe::{self, MysafeState};
use crate::openapi::{AdminDoc, MysafeDoc};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Admin API: health, `/admin/*`, `/enterprise/*` and the swagger UI.
pub fn build_admin_router(state: AdminState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(admin::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", AdminDoc::openapi()))
        .layer(cors)
        .layer(trace_layer())
}

/// Gateway API: health and `/mysafe/*`.
pub fn build_mysafe_router(state: MysafeState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(mysafe::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", MysafeDoc::openapi()))
        .layer(cors)
        .layer(trace_layer())
}

fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        // one span per request, method and path included
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        // status and latency
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
