use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::{user, Status};

use super::domain::{NewUser, UserChanges};
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::password::hash_password;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Create with a hashed password. Usernames are unique.
    #[instrument(skip(self, input), fields(username = %input.username, role = %input.role))]
    pub async fn create(&self, mut input: NewUser) -> Result<user::Model, ServiceError> {
        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(ServiceError::BadRequest("username already exists".into()));
        }
        input.password = hash_password(&input.password)?;
        let created = self.repo.insert(input).await?;
        info!(user_id = %created.id, "user_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(user_id = %id))]
    pub async fn update(&self, id: Uuid, mut changes: UserChanges) -> Result<user::Model, ServiceError> {
        if let Some(username) = changes.username.as_deref() {
            if let Some(other) = self.repo.find_by_username(username).await? {
                if other.id != id {
                    return Err(ServiceError::BadRequest("username already exists".into()));
                }
            }
        }
        if let Some(plain) = changes.password.take() {
            changes.password = Some(hash_password(&plain)?);
        }
        if self.repo.update(id, changes).await? == 0 {
            return Err(ServiceError::not_found("user"));
        }
        info!("user_updated");
        self.get(id).await
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? == 0 {
            return Err(ServiceError::not_found("user"));
        }
        info!("user_deleted");
        Ok(())
    }

    /// Backs the activate / deactivate endpoints.
    #[instrument(skip(self), fields(user_id = %id, status = %status))]
    pub async fn set_status(&self, id: Uuid, status: Status) -> Result<user::Model, ServiceError> {
        let changes = UserChanges { status: Some(status), ..Default::default() };
        if self.repo.update(id, changes).await? == 0 {
            return Err(ServiceError::not_found("user"));
        }
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::repo::SeaOrmUserRepository;
    use crate::password::verify_password;
    use crate::test_support::{memory_db, new_user};
    use models::UserRole;

    async fn svc() -> UserService<SeaOrmUserRepository> {
        UserService::new(Arc::new(SeaOrmUserRepository { db: memory_db().await }))
    }

    #[tokio::test]
    async fn create_hashes_password_and_applies_defaults() {
        let svc = svc().await;
        let u = svc.create(new_user("alice", UserRole::EndUser)).await.unwrap();
        assert_eq!(u.role, UserRole::EndUser);
        assert_eq!(u.status, Status::Active);
        assert_ne!(u.password, "Secret123");
        assert!(verify_password("Secret123", &u.password));

        let body = serde_json::to_value(&u).unwrap();
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let svc = svc().await;
        svc.create(new_user("bob", UserRole::EndUser)).await.unwrap();
        let err = svc.create(new_user("bob", UserRole::Admin)).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unique_index_backs_the_username_check() {
        let repo = SeaOrmUserRepository { db: memory_db().await };
        let first = repo.insert(new_user("zoe", UserRole::EndUser)).await.unwrap();
        let err = repo.insert(new_user("zoe", UserRole::Enterprise)).await.unwrap_err();
        assert_eq!(err, ServiceError::BadRequest("username already exists".into()));

        let other = repo.insert(new_user("yan", UserRole::EndUser)).await.unwrap();
        let changes = UserChanges { username: Some(first.username.clone()), ..Default::default() };
        let err = repo.update(other.id, changes).await.unwrap_err();
        assert_eq!(err, ServiceError::BadRequest("username already exists".into()));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let svc = svc().await;
        let u = svc.create(new_user("carol", UserRole::Enterprise)).await.unwrap();
        let changes = UserChanges { phone: Some("0900000001".into()), ..Default::default() };
        let after = svc.update(u.id, changes).await.unwrap();
        assert_eq!(after.phone, "0900000001");
        assert_eq!(after.name, u.name);
        assert_eq!(after.email, u.email);
        assert_eq!(after.role, UserRole::Enterprise);
        assert_eq!(after.password, u.password);
    }

    #[tokio::test]
    async fn empty_update_is_malformed() {
        let svc = svc().await;
        let u = svc.create(new_user("dave", UserRole::EndUser)).await.unwrap();
        let err = svc.update(u.id, UserChanges::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::MalformedEntity("no fields to update".into()));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let svc = svc().await;
        let id = Uuid::new_v4();
        assert!(matches!(svc.get(id).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(matches!(svc.delete(id).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(matches!(svc.set_status(id, Status::Inactive).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn deactivate_then_delete() {
        let svc = svc().await;
        let u = svc.create(new_user("erin", UserRole::EndUser)).await.unwrap();
        let after = svc.set_status(u.id, Status::Inactive).await.unwrap();
        assert_eq!(after.status, Status::Inactive);
        svc.delete(u.id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());
    }
}
