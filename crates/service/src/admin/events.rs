use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::event;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::domain::{EventChanges, NewEvent, TimeWindow};
use super::repository::EventRepository;
use crate::errors::ServiceError;

fn check_times(start: &DateTimeWithTimeZone, end: &DateTimeWithTimeZone) -> Result<(), ServiceError> {
    if end < start {
        return Err(ServiceError::MalformedEntity("end_time must not precede start_time".into()));
    }
    Ok(())
}

/// Events as seen by their owning enterprise user; other owners' rows look absent.
pub struct EventService<R: EventRepository> {
    repo: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<event::Model, ServiceError> {
        self.repo.find(owner, id).await?.ok_or_else(|| ServiceError::not_found("event"))
    }

    #[instrument(skip(self, input), fields(owner = %owner, game_id = %input.game_id))]
    pub async fn create(&self, owner: Uuid, input: NewEvent) -> Result<event::Model, ServiceError> {
        check_times(&input.start_time, &input.end_time)?;
        let created = self.repo.insert(owner, input).await?;
        info!(event_id = %created.id, "event_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(owner = %owner, event_id = %id))]
    pub async fn update(&self, owner: Uuid, id: Uuid, changes: EventChanges) -> Result<event::Model, ServiceError> {
        if changes.start_time.is_some() || changes.end_time.is_some() {
            // a single bound is checked against the stored other bound
            let stored = self.get(owner, id).await?;
            let start = changes.start_time.as_ref().unwrap_or(&stored.start_time);
            let end = changes.end_time.as_ref().unwrap_or(&stored.end_time);
            check_times(start, end)?;
        }
        if self.repo.update(owner, id, changes).await? == 0 {
            return Err(ServiceError::not_found("event"));
        }
        self.get(owner, id).await
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<event::Model>, ServiceError> {
        self.repo.list_by_owner(owner).await
    }

    /// Events that start and end inside `window`.
    pub async fn list_in_window(&self, owner: Uuid, window: TimeWindow) -> Result<Vec<event::Model>, ServiceError> {
        if window.end < window.start {
            return Err(ServiceError::MalformedEntity("end must not precede start".into()));
        }
        self.repo.list_in_window(owner, window).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::repo::SeaOrmEventRepository;
    use crate::test_support::{at, memory_db, new_event, seed_game, seed_user};
    use models::UserRole;

    #[tokio::test]
    async fn scoped_to_owner() {
        let db = memory_db().await;
        let owner = seed_user(&db, "shop", UserRole::Enterprise).await;
        let other = seed_user(&db, "rival", UserRole::Enterprise).await;
        let game = seed_game(&db).await;
        let svc = EventService::new(Arc::new(SeaOrmEventRepository { db: db.clone() }));

        let ev = svc.create(owner.id, new_event(game.id, at(2024, 6, 1), at(2024, 6, 10))).await.unwrap();
        assert_eq!(ev.user_id, owner.id);
        assert_eq!(svc.get(owner.id, ev.id).await.unwrap().id, ev.id);
        assert!(matches!(svc.get(other.id, ev.id).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(svc.list(other.id).await.unwrap().is_empty());

        let err = svc
            .update(other.id, ev.id, EventChanges { voucher_num: Some(5), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn explicit_zero_is_applied() {
        let db = memory_db().await;
        let owner = seed_user(&db, "shop", UserRole::Enterprise).await;
        let game = seed_game(&db).await;
        let svc = EventService::new(Arc::new(SeaOrmEventRepository { db }));

        let ev = svc.create(owner.id, new_event(game.id, at(2024, 6, 1), at(2024, 6, 10))).await.unwrap();
        assert_eq!(ev.voucher_num, 100);
        let after = svc
            .update(owner.id, ev.id, EventChanges { voucher_num: Some(0), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(after.voucher_num, 0);
        assert_eq!(after.name, ev.name);
    }

    #[tokio::test]
    async fn update_cannot_invert_the_window() {
        let db = memory_db().await;
        let owner = seed_user(&db, "shop", UserRole::Enterprise).await;
        let game = seed_game(&db).await;
        let svc = EventService::new(Arc::new(SeaOrmEventRepository { db }));
        let ev = svc.create(owner.id, new_event(game.id, at(2024, 6, 1), at(2024, 6, 10))).await.unwrap();

        let early_end = EventChanges { end_time: Some(at(2024, 5, 1)), ..Default::default() };
        let err = svc.update(owner.id, ev.id, early_end).await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedEntity(_)));

        let late_start = EventChanges { start_time: Some(at(2024, 6, 20)), ..Default::default() };
        assert!(matches!(svc.update(owner.id, ev.id, late_start).await, Err(ServiceError::MalformedEntity(_))));

        let stored = svc.get(owner.id, ev.id).await.unwrap();
        assert_eq!((stored.start_time, stored.end_time), (at(2024, 6, 1), at(2024, 6, 10)));

        let both = EventChanges { start_time: Some(at(2024, 6, 20)), end_time: Some(at(2024, 6, 25)), ..Default::default() };
        let moved = svc.update(owner.id, ev.id, both).await.unwrap();
        assert_eq!(moved.end_time, at(2024, 6, 25));
    }

    #[tokio::test]
    async fn window_keeps_fully_contained_events() {
        let db = memory_db().await;
        let owner = seed_user(&db, "shop", UserRole::Enterprise).await;
        let game = seed_game(&db).await;
        let svc = EventService::new(Arc::new(SeaOrmEventRepository { db }));

        svc.create(owner.id, new_event(game.id, at(2024, 6, 1), at(2024, 6, 10))).await.unwrap();
        svc.create(owner.id, new_event(game.id, at(2024, 6, 5), at(2024, 7, 5))).await.unwrap();
        svc.create(owner.id, new_event(game.id, at(2024, 5, 1), at(2024, 5, 2))).await.unwrap();

        let june = TimeWindow { start: at(2024, 6, 1), end: at(2024, 6, 30) };
        let found = svc.list_in_window(owner.id, june).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start_time, at(2024, 6, 1));

        let inverted = TimeWindow { start: at(2024, 6, 30), end: at(2024, 6, 1) };
        assert!(svc.list_in_window(owner.id, inverted).await.is_err());
    }
}
