use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::game;

use super::domain::{GameChanges, NewGame};
use super::repository::GameRepository;
use crate::errors::ServiceError;

pub struct GameService<R: GameRepository> {
    repo: Arc<R>,
}

impl<R: GameRepository> GameService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<game::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<game::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("game"))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewGame) -> Result<game::Model, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(game_id = %created.id, "game_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(game_id = %id))]
    pub async fn update(&self, id: Uuid, changes: GameChanges) -> Result<game::Model, ServiceError> {
        if self.repo.update(id, changes).await? == 0 {
            return Err(ServiceError::not_found("game"));
        }
        self.get(id).await
    }

    #[instrument(skip(self), fields(game_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? == 0 {
            return Err(ServiceError::not_found("game"));
        }
        info!("game_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::repo::SeaOrmGameRepository;
    use crate::test_support::{memory_db, new_game};

    #[tokio::test]
    async fn crud_roundtrip() {
        let svc = GameService::new(Arc::new(SeaOrmGameRepository { db: memory_db().await }));
        let g = svc.create(new_game("Shake")).await.unwrap();
        assert_eq!(svc.list().await.unwrap().len(), 1);

        let after = svc
            .update(g.id, GameChanges { exchange_allow: Some(false), ..Default::default() })
            .await
            .unwrap();
        assert!(!after.exchange_allow);
        assert_eq!(after.name, "Shake");
        assert_eq!(after.tutorial, g.tutorial);

        svc.delete(g.id).await.unwrap();
        assert!(matches!(svc.get(g.id).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(matches!(svc.delete(g.id).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_of_missing_game_is_not_found() {
        let svc = GameService::new(Arc::new(SeaOrmGameRepository { db: memory_db().await }));
        let err = svc
            .update(Uuid::new_v4(), GameChanges { name: Some("x".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
