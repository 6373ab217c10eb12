use axum::Router;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;

use crate::admin::AdminState;
use crate::errors::StartupError;
use crate::mysafe::MysafeState;
use crate::routes::{build_admin_router, build_mysafe_router};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Logging and `.env` are set up by the binary before this runs.
fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Connect the pool and bring the schema up to date.
async fn connect(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Migrator::up(&db, None).await.map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("migrations applied");
    Ok(db)
}

/// `host:port`, where host may be a name that needs resolving.
async fn bind(addr: &str) -> Result<TcpListener, StartupError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {}", addr, e).into())
}

async fn serve(app: Router, cfg: &AppConfig, name: &str) -> Result<(), StartupError> {
    let listener = bind(&cfg.server.bind_addr()).await?;
    info!(addr = %listener.local_addr().map_err(anyhow::Error::from)?, service = name, "listening");
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}

/// VOU admin API.
pub async fn run_admin() -> Result<(), StartupError> {
    let cfg = load_config()?;
    let db = connect(&cfg).await?;
    let app = build_admin_router(AdminState::from_db(db), build_cors());
    serve(app, &cfg, "admin").await
}

/// mysafe gateway.
pub async fn run_mysafe() -> Result<(), StartupError> {
    let cfg = load_config()?;
    let db = connect(&cfg).await?;
    let state = MysafeState::from_config(db, &cfg.mysafe).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(vcs = %cfg.mysafe.vcs_base_url, vhome = %cfg.mysafe.vhome_base_url, "platform endpoints");
    let app = build_mysafe_router(state, build_cors());
    serve(app, &cfg, "mysafe").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_by_host_name() {
        let listener = bind("localhost:0").await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn loading_config_leaves_logging_to_the_binary() {
        let _ = load_config();
        assert!(!tracing::dispatcher::has_been_set());
    }
}
