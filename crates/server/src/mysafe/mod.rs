//! mysafe gateway HTTP surface: one POST route per operation group, the
//! operation picked by the `:api` path segment.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sea_orm::DatabaseConnection;

use configs::MysafeConfig;
use service::mysafe::{
    MysafeService, PlatformIdentity, ReqwestVcsClient, SeaOrmFeedbackStore, SeaOrmTokenStore, VcsClient,
};
use service::ServiceError;

pub mod handlers;
pub mod requests;

#[derive(Clone)]
pub struct MysafeState {
    pub mysafe: Arc<MysafeService>,
}

impl MysafeState {
    /// Wire the service against `db` and an arbitrary platform client.
    pub fn with_client(db: DatabaseConnection, client: Arc<dyn VcsClient>, cfg: &MysafeConfig) -> Self {
        let service = MysafeService::new(
            client,
            Arc::new(SeaOrmFeedbackStore { db: db.clone() }),
            Arc::new(SeaOrmTokenStore { db }),
            PlatformIdentity::from(cfg),
        );
        Self { mysafe: Arc::new(service) }
    }

    pub fn from_config(db: DatabaseConnection, cfg: &MysafeConfig) -> Result<Self, ServiceError> {
        let client = ReqwestVcsClient::new(cfg)?;
        Ok(Self::with_client(db, Arc::new(client), cfg))
    }
}

pub fn routes(state: MysafeState) -> Router {
    Router::new()
        .route("/mysafe/token", get(handlers::token))
        .route("/mysafe/auth/:api", post(handlers::auth))
        .route("/mysafe/devices/:api", post(handlers::devices))
        .route("/mysafe/user/:api", post(handlers::user))
        .route("/mysafe/children/:api", post(handlers::children))
        .route("/mysafe/no-auth/otp", post(handlers::send_otp))
        .route("/mysafe/feedback/:api", post(handlers::feedback))
        .with_state(state)
}
