use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Alias, Condition, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use models::errors::ModelError;
use models::{enterprise, event, game, user, voucher, Patch, Statistic, UserRole};

use crate::admin::domain::{
    EnterpriseChanges, EventChanges, GameChanges, NewEnterprise, NewEvent, NewGame, NewUser,
    NewVoucher, TimeWindow, UserChanges, UserFilter, VoucherChanges,
};
use crate::admin::repository::{
    EnterpriseRepository, EventRepository, GameRepository, StatisticRepository, UserRepository,
    VoucherRepository,
};
use crate::errors::ServiceError;

/// Two writers can pass the service's lookup at once; the unique index decides.
fn username_taken(e: ModelError) -> ServiceError {
    match e {
        ModelError::Conflict(_) => ServiceError::BadRequest("username already exists".into()),
        other => other.into(),
    }
}

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, input: NewUser) -> Result<user::Model, ServiceError> {
        let now = Utc::now().into();
        let am = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            username: Set(input.username),
            password: Set(input.password),
            email: Set(input.email),
            phone: Set(input.phone),
            role: Set(input.role),
            status: Set(input.status),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(|e| username_taken(e.into()))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<u64, ServiceError> {
        let rows = Patch::<user::Entity>::new()
            .set(user::Column::Name, changes.name)
            .set(user::Column::Username, changes.username)
            .set(user::Column::Password, changes.password)
            .set(user::Column::Email, changes.email)
            .set(user::Column::Phone, changes.phone)
            .set(user::Column::Role, changes.role)
            .set(user::Column::Status, changes.status)
            .exec(&self.db, Condition::all().add(user::Column::Id.eq(id)))
            .await
            .map_err(username_taken)?;
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let res = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}

pub struct SeaOrmGameRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl GameRepository for SeaOrmGameRepository {
    async fn list(&self) -> Result<Vec<game::Model>, ServiceError> {
        game::Entity::find()
            .order_by_asc(game::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find(&self, id: Uuid) -> Result<Option<game::Model>, ServiceError> {
        game::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, input: NewGame) -> Result<game::Model, ServiceError> {
        let now = Utc::now().into();
        let am = game::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            images: Set(input.images),
            game_type: Set(input.game_type),
            exchange_allow: Set(input.exchange_allow),
            tutorial: Set(input.tutorial),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, id: Uuid, changes: GameChanges) -> Result<u64, ServiceError> {
        let rows = Patch::<game::Entity>::new()
            .set(game::Column::Name, changes.name)
            .set(game::Column::Images, changes.images)
            .set(game::Column::GameType, changes.game_type)
            .set(game::Column::ExchangeAllow, changes.exchange_allow)
            .set(game::Column::Tutorial, changes.tutorial)
            .exec(&self.db, Condition::all().add(game::Column::Id.eq(id)))
            .await?;
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let res = game::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}

pub struct SeaOrmEnterpriseRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl EnterpriseRepository for SeaOrmEnterpriseRepository {
    async fn find(&self, id: Uuid) -> Result<Option<enterprise::Model>, ServiceError> {
        enterprise::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, input: NewEnterprise) -> Result<enterprise::Model, ServiceError> {
        let now = Utc::now().into();
        let am = enterprise::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            field: Set(input.field),
            location: Set(input.location),
            gps: Set(input.gps),
            status: Set(input.status),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, id: Uuid, changes: EnterpriseChanges) -> Result<u64, ServiceError> {
        let rows = Patch::<enterprise::Entity>::new()
            .set(enterprise::Column::Name, changes.name)
            .set(enterprise::Column::Field, changes.field)
            .set(enterprise::Column::Location, changes.location)
            .set(enterprise::Column::Gps, changes.gps)
            .set(enterprise::Column::Status, changes.status)
            .exec(&self.db, Condition::all().add(enterprise::Column::Id.eq(id)))
            .await?;
        Ok(rows)
    }
}

pub struct SeaOrmEventRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl EventRepository for SeaOrmEventRepository {
    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<event::Model>, ServiceError> {
        event::Entity::find_by_id(id)
            .filter(event::Column::UserId.eq(owner))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, owner: Uuid, input: NewEvent) -> Result<event::Model, ServiceError> {
        let now = Utc::now().into();
        let am = event::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            images: Set(input.images),
            voucher_num: Set(input.voucher_num),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            game_id: Set(input.game_id),
            user_id: Set(owner),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, owner: Uuid, id: Uuid, changes: EventChanges) -> Result<u64, ServiceError> {
        let rows = Patch::<event::Entity>::new()
            .set(event::Column::Name, changes.name)
            .set(event::Column::Images, changes.images)
            .set(event::Column::VoucherNum, changes.voucher_num)
            .set(event::Column::StartTime, changes.start_time)
            .set(event::Column::EndTime, changes.end_time)
            .set(event::Column::GameId, changes.game_id)
            .exec(
                &self.db,
                Condition::all()
                    .add(event::Column::Id.eq(id))
                    .add(event::Column::UserId.eq(owner)),
            )
            .await?;
        Ok(rows)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<event::Model>, ServiceError> {
        event::Entity::find()
            .filter(event::Column::UserId.eq(owner))
            .order_by_asc(event::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn list_in_window(&self, owner: Uuid, window: TimeWindow) -> Result<Vec<event::Model>, ServiceError> {
        event::Entity::find()
            .filter(event::Column::UserId.eq(owner))
            .filter(event::Column::StartTime.gte(window.start))
            .filter(event::Column::EndTime.lte(window.end))
            .order_by_asc(event::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}

pub struct SeaOrmVoucherRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl VoucherRepository for SeaOrmVoucherRepository {
    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<voucher::Model>, ServiceError> {
        voucher::Entity::find()
            .filter(voucher::Column::EventId.eq(event_id))
            .order_by_asc(voucher::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find(&self, event_id: Uuid, id: Uuid) -> Result<Option<voucher::Model>, ServiceError> {
        voucher::Entity::find_by_id(id)
            .filter(voucher::Column::EventId.eq(event_id))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, event_id: Uuid, input: NewVoucher) -> Result<voucher::Model, ServiceError> {
        let now = Utc::now().into();
        let am = voucher::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            qrcode: Set(input.qrcode),
            images: Set(input.images),
            value: Set(input.value),
            description: Set(input.description),
            expired_time: Set(input.expired_time),
            status: Set(input.status),
            event_id: Set(event_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, event_id: Uuid, id: Uuid, changes: VoucherChanges) -> Result<u64, ServiceError> {
        let rows = Patch::<voucher::Entity>::new()
            .set(voucher::Column::Code, changes.code)
            .set(voucher::Column::Qrcode, changes.qrcode)
            .set(voucher::Column::Images, changes.images)
            .set(voucher::Column::Value, changes.value)
            .set(voucher::Column::Description, changes.description)
            .set(voucher::Column::ExpiredTime, changes.expired_time)
            .set(voucher::Column::Status, changes.status)
            .exec(
                &self.db,
                Condition::all()
                    .add(voucher::Column::Id.eq(id))
                    .add(voucher::Column::EventId.eq(event_id)),
            )
            .await?;
        Ok(rows)
    }

    async fn delete(&self, event_id: Uuid, id: Uuid) -> Result<u64, ServiceError> {
        let res = voucher::Entity::delete_many()
            .filter(voucher::Column::Id.eq(id))
            .filter(voucher::Column::EventId.eq(event_id))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}

pub struct SeaOrmStatisticRepository {
    pub db: DatabaseConnection,
}

fn created_day() -> SimpleExpr {
    Func::cust(Alias::new("DATE"))
        .arg(Expr::col((user::Entity, user::Column::CreatedAt)))
        .into()
}

/// `SELECT DATE(created_at) AS day, COUNT(id) AS count ... GROUP BY day ORDER BY day`
pub fn new_users_per_day_query(role: UserRole, window: TimeWindow) -> Select<user::Entity> {
    user::Entity::find()
        .select_only()
        .column_as(created_day(), "day")
        .column_as(user::Column::Id.count(), "count")
        .filter(user::Column::Role.eq(role))
        .filter(user::Column::CreatedAt.gte(window.start))
        .filter(user::Column::CreatedAt.lte(window.end))
        .group_by(created_day())
        .order_by_asc(created_day())
}

#[async_trait]
impl StatisticRepository for SeaOrmStatisticRepository {
    async fn count_users(&self, filter: UserFilter) -> Result<u64, ServiceError> {
        let mut q = user::Entity::find();
        if let Some(role) = filter.role {
            q = q.filter(user::Column::Role.eq(role));
        }
        if let Some(status) = filter.status {
            q = q.filter(user::Column::Status.eq(status));
        }
        q.count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn count_games(&self) -> Result<u64, ServiceError> {
        game::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn new_users_per_day(&self, role: UserRole, window: TimeWindow) -> Result<Vec<Statistic>, ServiceError> {
        new_users_per_day_query(role, window)
            .into_model::<Statistic>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}
