//! Gateway-owned persistence: feedback documents and per-user platform tokens.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use models::{feedback, token};

use super::domain::NewFeedback;
use crate::errors::ServiceError;

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert(&self, user_id: &str, input: NewFeedback) -> Result<feedback::Model, ServiceError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<feedback::Model>, ServiceError>;
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn upsert(&self, user_id: &str, access_token: &str) -> Result<(), ServiceError>;
    async fn find(&self, user_id: &str) -> Result<Option<token::Model>, ServiceError>;
}

pub struct SeaOrmFeedbackStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl FeedbackStore for SeaOrmFeedbackStore {
    async fn insert(&self, user_id: &str, input: NewFeedback) -> Result<feedback::Model, ServiceError> {
        let am = feedback::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            rating: Set(input.rating),
            subject: Set(input.subject),
            feedback_content: Set(input.feedback_content),
            images: Set(serde_json::json!(input.images)),
            created_at: Set(Utc::now().into()),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<feedback::Model>, ServiceError> {
        feedback::Entity::find()
            .filter(feedback::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<u64, ServiceError> {
        let res = feedback::Entity::delete_many()
            .filter(feedback::Column::Id.eq(id))
            .filter(feedback::Column::UserId.eq(user_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}

pub struct SeaOrmTokenStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TokenStore for SeaOrmTokenStore {
    async fn upsert(&self, user_id: &str, access_token: &str) -> Result<(), ServiceError> {
        let am = token::ActiveModel {
            user_id: Set(user_id.to_string()),
            access_token: Set(access_token.to_string()),
            updated_at: Set(Utc::now().into()),
        };
        token::Entity::insert(am)
            .on_conflict(
                OnConflict::column(token::Column::UserId)
                    .update_columns([token::Column::AccessToken, token::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<token::Model>, ServiceError> {
        token::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;

    #[tokio::test]
    async fn token_upsert_overwrites() {
        let store = SeaOrmTokenStore { db: memory_db().await };
        assert!(store.find("u-1").await.unwrap().is_none());
        store.upsert("u-1", "first").await.unwrap();
        store.upsert("u-1", "second").await.unwrap();
        assert_eq!(store.find("u-1").await.unwrap().unwrap().access_token, "second");
    }

    #[tokio::test]
    async fn feedback_is_scoped_to_author() {
        let store = SeaOrmFeedbackStore { db: memory_db().await };
        let fb = store
            .insert(
                "u-1",
                NewFeedback {
                    rating: 4,
                    subject: "filters".into(),
                    feedback_content: "works".into(),
                    images: vec!["aGVsbG8=".into()],
                },
            )
            .await
            .unwrap();
        assert_eq!(fb.images, serde_json::json!(["aGVsbG8="]));
        assert_eq!(store.list_by_user("u-1").await.unwrap().len(), 1);
        assert!(store.list_by_user("u-2").await.unwrap().is_empty());

        assert_eq!(store.delete("u-2", fb.id).await.unwrap(), 0);
        assert_eq!(store.delete("u-1", fb.id).await.unwrap(), 1);
    }
}
