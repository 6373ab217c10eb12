use async_trait::async_trait;
use uuid::Uuid;

use models::{enterprise, event, game, user, voucher, Statistic, UserRole};

use super::domain::{
    EnterpriseChanges, EventChanges, GameChanges, NewEnterprise, NewEvent, NewGame, NewUser,
    NewVoucher, TimeWindow, UserChanges, UserFilter, VoucherChanges,
};
use crate::errors::ServiceError;

/// Update methods return rows affected so services can tell "missing" from "unchanged".
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn insert(&self, input: NewUser) -> Result<user::Model, ServiceError>;
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<u64, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<game::Model>, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<game::Model>, ServiceError>;
    async fn insert(&self, input: NewGame) -> Result<game::Model, ServiceError>;
    async fn update(&self, id: Uuid, changes: GameChanges) -> Result<u64, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait EnterpriseRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<enterprise::Model>, ServiceError>;
    async fn insert(&self, input: NewEnterprise) -> Result<enterprise::Model, ServiceError>;
    async fn update(&self, id: Uuid, changes: EnterpriseChanges) -> Result<u64, ServiceError>;
}

/// Every query is scoped to the owning enterprise user.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<event::Model>, ServiceError>;
    async fn insert(&self, owner: Uuid, input: NewEvent) -> Result<event::Model, ServiceError>;
    async fn update(&self, owner: Uuid, id: Uuid, changes: EventChanges) -> Result<u64, ServiceError>;
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<event::Model>, ServiceError>;
    async fn list_in_window(&self, owner: Uuid, window: TimeWindow) -> Result<Vec<event::Model>, ServiceError>;
}

#[async_trait]
pub trait VoucherRepository: Send + Sync {
    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<voucher::Model>, ServiceError>;
    async fn find(&self, event_id: Uuid, id: Uuid) -> Result<Option<voucher::Model>, ServiceError>;
    async fn insert(&self, event_id: Uuid, input: NewVoucher) -> Result<voucher::Model, ServiceError>;
    async fn update(&self, event_id: Uuid, id: Uuid, changes: VoucherChanges) -> Result<u64, ServiceError>;
    async fn delete(&self, event_id: Uuid, id: Uuid) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait StatisticRepository: Send + Sync {
    async fn count_users(&self, filter: UserFilter) -> Result<u64, ServiceError>;
    async fn count_games(&self) -> Result<u64, ServiceError>;
    /// Per-day counts of users with `role` created inside `window`, ordered by day.
    async fn new_users_per_day(&self, role: UserRole, window: TimeWindow) -> Result<Vec<Statistic>, ServiceError>;
}
