//! VOU administration HTTP surface.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use sea_orm::DatabaseConnection;

use service::admin::repo::{
    SeaOrmEnterpriseRepository, SeaOrmEventRepository, SeaOrmGameRepository, SeaOrmStatisticRepository,
    SeaOrmUserRepository, SeaOrmVoucherRepository,
};
use service::admin::{EnterpriseService, EventService, GameService, StatisticService, UserService, VoucherService};

pub mod enterprises;
pub mod events;
pub mod games;
pub mod guard;
pub mod requests;
pub mod statistics;
pub mod users;
pub mod vouchers;

#[derive(Clone)]
pub struct AdminState {
    pub users: Arc<UserService<SeaOrmUserRepository>>,
    pub games: Arc<GameService<SeaOrmGameRepository>>,
    pub enterprises: Arc<EnterpriseService<SeaOrmEnterpriseRepository>>,
    pub events: Arc<EventService<SeaOrmEventRepository>>,
    pub vouchers: Arc<VoucherService<SeaOrmVoucherRepository, SeaOrmEventRepository>>,
    pub statistics: Arc<StatisticService<SeaOrmStatisticRepository>>,
}

impl AdminState {
    pub fn from_db(db: DatabaseConnection) -> Self {
        let events = Arc::new(SeaOrmEventRepository { db: db.clone() });
        Self {
            users: Arc::new(UserService::new(Arc::new(SeaOrmUserRepository { db: db.clone() }))),
            games: Arc::new(GameService::new(Arc::new(SeaOrmGameRepository { db: db.clone() }))),
            enterprises: Arc::new(EnterpriseService::new(Arc::new(SeaOrmEnterpriseRepository { db: db.clone() }))),
            events: Arc::new(EventService::new(Arc::clone(&events))),
            vouchers: Arc::new(VoucherService::new(
                Arc::new(SeaOrmVoucherRepository { db: db.clone() }),
                events,
            )),
            statistics: Arc::new(StatisticService::new(Arc::new(SeaOrmStatisticRepository { db }))),
        }
    }
}

/// `/admin/*` plus the enterprise-guarded `/enterprise/*` routes.
pub fn routes(state: AdminState) -> Router {
    let admin = Router::new()
        .route("/admin/user", get(users::list).post(users::create))
        .route("/admin/user/:id", get(users::get).put(users::update).delete(users::delete))
        .route("/admin/user/active/:id", put(users::activate))
        .route("/admin/user/deactive/:id", put(users::deactivate))
        .route("/admin/game", get(games::list).post(games::create))
        .route("/admin/game/:id", get(games::get).put(games::update).delete(games::delete))
        .route("/admin/enterprise", post(enterprises::create))
        .route("/admin/enterprise/:id", get(enterprises::get).put(enterprises::update))
        .route("/admin/statistic/users", get(statistics::total_users))
        .route("/admin/statistic/games", get(statistics::total_games))
        .route("/admin/statistic/enterprises", get(statistics::total_enterprises))
        .route("/admin/statistic/end-users", get(statistics::total_end_users))
        .route("/admin/statistic/active-end-users", get(statistics::total_active_end_users))
        .route("/admin/statistic/active-enterprises", get(statistics::total_active_enterprises))
        .route("/admin/statistic/new-enterprises", get(statistics::new_enterprises))
        .route("/admin/statistic/new-end-users", get(statistics::new_end_users));

    let enterprise = Router::new()
        .route("/enterprise/event", get(events::list).post(events::create))
        .route("/enterprise/event/:id", get(events::get).put(events::update))
        .route("/enterprise/event/:event_id/voucher", get(vouchers::list).post(vouchers::create))
        .route(
            "/enterprise/event/:event_id/voucher/:id",
            get(vouchers::get).put(vouchers::update).delete(vouchers::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), guard::require_enterprise));

    admin.merge(enterprise).with_state(state)
}
