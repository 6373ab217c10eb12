use std::sync::Arc;

use models::{Statistic, Status, UserRole};

use super::domain::{TimeWindow, UserFilter};
use super::repository::StatisticRepository;
use crate::errors::ServiceError;

/// Dashboard counters. Enterprises here are users with the `enterprise` role.
pub struct StatisticService<R: StatisticRepository> {
    repo: Arc<R>,
}

impl<R: StatisticRepository> StatisticService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn total_users(&self) -> Result<u64, ServiceError> {
        self.repo.count_users(UserFilter::default()).await
    }

    pub async fn total_games(&self) -> Result<u64, ServiceError> {
        self.repo.count_games().await
    }

    pub async fn total_enterprises(&self) -> Result<u64, ServiceError> {
        self.repo
            .count_users(UserFilter { role: Some(UserRole::Enterprise), status: None })
            .await
    }

    pub async fn total_end_users(&self) -> Result<u64, ServiceError> {
        self.repo
            .count_users(UserFilter { role: Some(UserRole::EndUser), status: None })
            .await
    }

    pub async fn total_active_end_users(&self) -> Result<u64, ServiceError> {
        self.repo
            .count_users(UserFilter { role: Some(UserRole::EndUser), status: Some(Status::Active) })
            .await
    }

    pub async fn total_active_enterprises(&self) -> Result<u64, ServiceError> {
        self.repo
            .count_users(UserFilter { role: Some(UserRole::Enterprise), status: Some(Status::Active) })
            .await
    }

    pub async fn new_enterprises_in_window(&self, window: TimeWindow) -> Result<Vec<Statistic>, ServiceError> {
        check_window(&window)?;
        self.repo.new_users_per_day(UserRole::Enterprise, window).await
    }

    pub async fn new_end_users_in_window(&self, window: TimeWindow) -> Result<Vec<Statistic>, ServiceError> {
        check_window(&window)?;
        self.repo.new_users_per_day(UserRole::EndUser, window).await
    }
}

fn check_window(window: &TimeWindow) -> Result<(), ServiceError> {
    if window.end < window.start {
        return Err(ServiceError::MalformedEntity("end must not precede start".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::repo::seaorm::new_users_per_day_query;
    use crate::admin::repo::SeaOrmStatisticRepository;
    use crate::test_support::{at, memory_db, seed_game, seed_user};
    use models::{user, Patch};
    use sea_orm::sea_query::Condition;
    use chrono::{NaiveDate, TimeZone, Utc};
    use sea_orm::{ColumnTrait, DbBackend, QueryTrait};

    #[tokio::test]
    async fn totals_by_role_and_status() {
        let db = memory_db().await;
        seed_user(&db, "admin", UserRole::Admin).await;
        seed_user(&db, "shop1", UserRole::Enterprise).await;
        let shop2 = seed_user(&db, "shop2", UserRole::Enterprise).await;
        seed_user(&db, "kid1", UserRole::EndUser).await;
        seed_user(&db, "kid2", UserRole::EndUser).await;
        seed_user(&db, "kid3", UserRole::EndUser).await;
        seed_game(&db).await;

        Patch::<user::Entity>::new()
            .set(user::Column::Status, Some(Status::Inactive))
            .exec(&db, Condition::all().add(user::Column::Id.eq(shop2.id)))
            .await
            .unwrap();

        let svc = StatisticService::new(Arc::new(SeaOrmStatisticRepository { db }));
        assert_eq!(svc.total_users().await.unwrap(), 6);
        assert_eq!(svc.total_games().await.unwrap(), 1);
        assert_eq!(svc.total_enterprises().await.unwrap(), 2);
        assert_eq!(svc.total_active_enterprises().await.unwrap(), 1);
        assert_eq!(svc.total_end_users().await.unwrap(), 3);
        assert_eq!(svc.total_active_end_users().await.unwrap(), 3);
    }

    #[test]
    fn daily_histogram_groups_by_creation_day() {
        let window = TimeWindow { start: at(2024, 6, 1), end: at(2024, 6, 30) };
        let sql = new_users_per_day_query(UserRole::EndUser, window)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"DATE("users"."created_at") AS "day""#), "{sql}");
        assert!(sql.contains(r#"COUNT("users"."id") AS "count""#), "{sql}");
        assert!(sql.contains(r#""users"."role" = 'end_user'"#), "{sql}");
        assert!(sql.contains(r#"GROUP BY DATE("users"."created_at")"#), "{sql}");
        assert!(sql.contains(r#"ORDER BY DATE("users"."created_at") ASC"#), "{sql}");
    }

    async fn created_on(db: &sea_orm::DatabaseConnection, id: uuid::Uuid, when: sea_orm::prelude::DateTimeWithTimeZone) {
        Patch::<user::Entity>::new()
            .set(user::Column::CreatedAt, Some(when))
            .exec(db, Condition::all().add(user::Column::Id.eq(id)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn daily_histogram_counts_rows_per_day() {
        let db = memory_db().await;
        let day = |d: u32, h: u32| -> sea_orm::prelude::DateTimeWithTimeZone {
            Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap().into()
        };
        for (name, role, when) in [
            ("kid1", UserRole::EndUser, day(2, 8)),
            ("kid2", UserRole::EndUser, day(2, 17)),
            ("kid3", UserRole::EndUser, day(5, 9)),
            ("shop", UserRole::Enterprise, day(2, 12)),
            ("late", UserRole::EndUser, at(2024, 7, 10)),
        ] {
            let u = seed_user(&db, name, role).await;
            created_on(&db, u.id, when).await;
        }

        let svc = StatisticService::new(Arc::new(SeaOrmStatisticRepository { db }));
        let june = TimeWindow { start: at(2024, 6, 1), end: at(2024, 6, 30) };
        let end_users = svc.new_end_users_in_window(june).await.unwrap();
        assert_eq!(
            end_users,
            vec![
                Statistic { day: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), count: 2 },
                Statistic { day: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(), count: 1 },
            ]
        );

        let enterprises = svc.new_enterprises_in_window(june).await.unwrap();
        assert_eq!(enterprises, vec![Statistic { day: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), count: 1 }]);
    }

    #[tokio::test]
    async fn inverted_window_rejected() {
        let svc = StatisticService::new(Arc::new(SeaOrmStatisticRepository { db: memory_db().await }));
        let window = TimeWindow { start: at(2024, 6, 30), end: at(2024, 6, 1) };
        assert!(matches!(
            svc.new_end_users_in_window(window).await.unwrap_err(),
            ServiceError::MalformedEntity(_)
        ));
    }
}
